use crate::database::DbError;
use crate::database::message::{Message, MessageWithAuthor};
use sqlx::{Executor, Postgres};

/// Append-only chat log. There is deliberately no update or delete.
pub struct MessageStore;

impl MessageStore {
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        trip_id: i32,
        user_id: i32,
        content: &str,
    ) -> Result<Message, DbError> {
        Ok(sqlx::query_as::<_, Message>(
            r"
            INSERT INTO message (trip_id, user_id, content)
            VALUES ($1, $2, $3)
            RETURNING *
            ",
        )
        .bind(trip_id)
        .bind(user_id)
        .bind(content)
        .fetch_one(executor)
        .await?)
    }

    /// Messages of a trip with an id strictly greater than `since_id`, oldest first.
    pub async fn list_since(
        executor: impl Executor<'_, Database = Postgres>,
        trip_id: i32,
        since_id: i64,
    ) -> Result<Vec<MessageWithAuthor>, DbError> {
        Ok(sqlx::query_as::<_, MessageWithAuthor>(
            r"
            SELECT m.*, u.email AS author_email, u.name AS author_name
            FROM message m
            JOIN app_user u ON u.id = m.user_id
            WHERE m.trip_id = $1 AND m.id > $2
            ORDER BY m.created_at, m.id
            ",
        )
        .bind(trip_id)
        .bind(since_id)
        .fetch_all(executor)
        .await?)
    }
}
