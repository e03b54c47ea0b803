use crate::database::DbError;
use crate::database::media_item::{MediaItem, MediaKind};
use sqlx::{Executor, Postgres};

pub struct MediaStore;

impl MediaStore {
    pub async fn create(
        executor: impl Executor<'_, Database = Postgres>,
        trip_id: i32,
        user_id: i32,
        filename: &str,
        kind: MediaKind,
    ) -> Result<MediaItem, DbError> {
        Ok(sqlx::query_as::<_, MediaItem>(
            r"
            INSERT INTO trip_media (trip_id, user_id, filename, kind)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            ",
        )
        .bind(trip_id)
        .bind(user_id)
        .bind(filename)
        .bind(kind)
        .fetch_one(executor)
        .await?)
    }

    /// Gallery of a trip, newest upload first.
    pub async fn list_for_trip(
        executor: impl Executor<'_, Database = Postgres>,
        trip_id: i32,
    ) -> Result<Vec<MediaItem>, DbError> {
        Ok(sqlx::query_as::<_, MediaItem>(
            "SELECT * FROM trip_media WHERE trip_id = $1 ORDER BY uploaded_at DESC, id DESC",
        )
        .bind(trip_id)
        .fetch_all(executor)
        .await?)
    }

    pub async fn find_in_trip(
        executor: impl Executor<'_, Database = Postgres>,
        trip_id: i32,
        media_id: i32,
    ) -> Result<Option<MediaItem>, DbError> {
        Ok(sqlx::query_as::<_, MediaItem>(
            "SELECT * FROM trip_media WHERE id = $1 AND trip_id = $2",
        )
        .bind(media_id)
        .bind(trip_id)
        .fetch_optional(executor)
        .await?)
    }

    pub async fn find_by_filename_in_trip(
        executor: impl Executor<'_, Database = Postgres>,
        trip_id: i32,
        filename: &str,
    ) -> Result<Option<MediaItem>, DbError> {
        Ok(sqlx::query_as::<_, MediaItem>(
            "SELECT * FROM trip_media WHERE filename = $1 AND trip_id = $2",
        )
        .bind(filename)
        .bind(trip_id)
        .fetch_optional(executor)
        .await?)
    }

    /// Deletes the media row only if `user_id` uploaded it.
    pub async fn delete_by_uploader(
        executor: impl Executor<'_, Database = Postgres>,
        media_id: i32,
        user_id: i32,
    ) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM trip_media WHERE id = $1 AND user_id = $2")
            .bind(media_id)
            .bind(user_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() == 1)
    }
}
