use crate::database::DbError;
use crate::database::trip::{Trip, TripSummary};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, Postgres};

/// Fields of a trip that are chosen by its creator.
#[derive(Debug, Clone)]
pub struct NewTrip<'a> {
    pub name: &'a str,
    pub destination: &'a str,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_location: Option<&'a str>,
    pub estimated_budget: Option<Decimal>,
}

pub struct TripStore;

impl TripStore {
    /// Inserts a trip under `join_code`. Returns `None` when the code is already taken,
    /// so the caller can retry with a fresh code without aborting its transaction.
    pub async fn create_with_code(
        executor: impl Executor<'_, Database = Postgres>,
        trip: &NewTrip<'_>,
        join_code: &str,
    ) -> Result<Option<Trip>, DbError> {
        Ok(sqlx::query_as::<_, Trip>(
            r"
            INSERT INTO trip (name, destination, start_date, end_date, start_location, estimated_budget, join_code)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (join_code) DO NOTHING
            RETURNING *
            ",
        )
        .bind(trip.name)
        .bind(trip.destination)
        .bind(trip.start_date)
        .bind(trip.end_date)
        .bind(trip.start_location)
        .bind(trip.estimated_budget)
        .bind(join_code)
        .fetch_optional(executor)
        .await?)
    }

    pub async fn find_by_id(
        executor: impl Executor<'_, Database = Postgres>,
        trip_id: i32,
    ) -> Result<Option<Trip>, DbError> {
        Ok(
            sqlx::query_as::<_, Trip>("SELECT * FROM trip WHERE id = $1")
                .bind(trip_id)
                .fetch_optional(executor)
                .await?,
        )
    }

    /// Looks up a trip by its (already normalized) join code.
    pub async fn find_by_join_code(
        executor: impl Executor<'_, Database = Postgres>,
        join_code: &str,
    ) -> Result<Option<Trip>, DbError> {
        Ok(
            sqlx::query_as::<_, Trip>("SELECT * FROM trip WHERE join_code = $1")
                .bind(join_code)
                .fetch_optional(executor)
                .await?,
        )
    }

    /// All trips a user is a member of, soonest first.
    pub async fn list_for_user(
        executor: impl Executor<'_, Database = Postgres>,
        user_id: i32,
    ) -> Result<Vec<TripSummary>, DbError> {
        Ok(sqlx::query_as::<_, TripSummary>(
            r"
            SELECT t.id, t.name, t.destination, t.start_date, t.end_date, t.join_code, tm.role
            FROM trip t
            JOIN trip_member tm ON tm.trip_id = t.id
            WHERE tm.user_id = $1
            ORDER BY t.start_date, t.id
            ",
        )
        .bind(user_id)
        .fetch_all(executor)
        .await?)
    }
}
