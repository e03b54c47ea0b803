use crate::database::DbError;
use crate::database::membership::{MemberSummary, Membership, TripRole};
use sqlx::{Executor, Postgres};

/// The membership ledger: which users belong to which trips, and in what role.
pub struct MembershipStore;

impl MembershipStore {
    //================================================================================
    // Lookups
    //================================================================================

    /// Role of `user_id` in `trip_id`, or `None` if they are not a member.
    pub async fn find_role(
        executor: impl Executor<'_, Database = Postgres>,
        trip_id: i32,
        user_id: i32,
    ) -> Result<Option<TripRole>, DbError> {
        Ok(sqlx::query_scalar::<_, TripRole>(
            "SELECT role FROM trip_member WHERE trip_id = $1 AND user_id = $2",
        )
        .bind(trip_id)
        .bind(user_id)
        .fetch_optional(executor)
        .await?)
    }

    /// Members of a trip with their profiles, in join order.
    pub async fn list_members(
        executor: impl Executor<'_, Database = Postgres>,
        trip_id: i32,
    ) -> Result<Vec<MemberSummary>, DbError> {
        Ok(sqlx::query_as::<_, MemberSummary>(
            r"
            SELECT u.id AS user_id, u.email, u.name, tm.role
            FROM trip_member tm
            JOIN app_user u ON u.id = tm.user_id
            WHERE tm.trip_id = $1
            ORDER BY tm.joined_at, u.id
            ",
        )
        .bind(trip_id)
        .fetch_all(executor)
        .await?)
    }

    /// Locks every membership row of the trip for the rest of the transaction and returns them.
    pub async fn lock_members(
        executor: impl Executor<'_, Database = Postgres>,
        trip_id: i32,
    ) -> Result<Vec<Membership>, DbError> {
        Ok(sqlx::query_as::<_, Membership>(
            "SELECT * FROM trip_member WHERE trip_id = $1 FOR UPDATE",
        )
        .bind(trip_id)
        .fetch_all(executor)
        .await?)
    }

    //================================================================================
    // Mutations
    //================================================================================

    /// Adds a membership. Returns `false` (and changes nothing) if the user already belongs to the trip.
    pub async fn add(
        executor: impl Executor<'_, Database = Postgres>,
        trip_id: i32,
        user_id: i32,
        role: TripRole,
    ) -> Result<bool, DbError> {
        let result = sqlx::query(
            r"
            INSERT INTO trip_member (trip_id, user_id, role)
            VALUES ($1, $2, $3)
            ON CONFLICT (trip_id, user_id) DO NOTHING
            ",
        )
        .bind(trip_id)
        .bind(user_id)
        .bind(role)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    pub async fn set_role(
        executor: impl Executor<'_, Database = Postgres>,
        trip_id: i32,
        user_id: i32,
        role: TripRole,
    ) -> Result<bool, DbError> {
        let result =
            sqlx::query("UPDATE trip_member SET role = $3 WHERE trip_id = $1 AND user_id = $2")
                .bind(trip_id)
                .bind(user_id)
                .bind(role)
                .execute(executor)
                .await?;
        Ok(result.rows_affected() == 1)
    }

    pub async fn remove(
        executor: impl Executor<'_, Database = Postgres>,
        trip_id: i32,
        user_id: i32,
    ) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM trip_member WHERE trip_id = $1 AND user_id = $2")
            .bind(trip_id)
            .bind(user_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() == 1)
    }
}
