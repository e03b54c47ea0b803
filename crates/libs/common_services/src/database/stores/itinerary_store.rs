use crate::database::DbError;
use crate::database::itinerary_item::ItineraryItem;
use sqlx::{Executor, Postgres};

/// Fields of a new itinerary entry.
#[derive(Debug, Clone)]
pub struct NewItineraryItem<'a> {
    pub day_number: i32,
    pub time: Option<&'a str>,
    pub activity: &'a str,
    pub location: Option<&'a str>,
    pub description: Option<&'a str>,
}

pub struct ItineraryStore;

impl ItineraryStore {
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        trip_id: i32,
        item: &NewItineraryItem<'_>,
    ) -> Result<ItineraryItem, DbError> {
        Ok(sqlx::query_as::<_, ItineraryItem>(
            r"
            INSERT INTO itinerary_item (trip_id, day_number, time, activity, location, description)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            ",
        )
        .bind(trip_id)
        .bind(item.day_number)
        .bind(item.time)
        .bind(item.activity)
        .bind(item.location)
        .bind(item.description)
        .fetch_one(executor)
        .await?)
    }

    /// Itinerary of a trip ordered by day, then time of day. Untimed entries lead their day.
    pub async fn list_for_trip(
        executor: impl Executor<'_, Database = Postgres>,
        trip_id: i32,
    ) -> Result<Vec<ItineraryItem>, DbError> {
        Ok(sqlx::query_as::<_, ItineraryItem>(
            r"
            SELECT * FROM itinerary_item
            WHERE trip_id = $1
            ORDER BY day_number, time NULLS FIRST, id
            ",
        )
        .bind(trip_id)
        .fetch_all(executor)
        .await?)
    }

    /// Deletes an item only if it belongs to `trip_id`. Returns whether a row was removed.
    pub async fn delete_in_trip(
        executor: impl Executor<'_, Database = Postgres>,
        trip_id: i32,
        item_id: i32,
    ) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM itinerary_item WHERE id = $1 AND trip_id = $2")
            .bind(item_id)
            .bind(trip_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() == 1)
    }
}
