use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Maps to the `media_kind` Postgres enum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "media_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// A gallery upload. `filename` is the generated name of the stored file.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
pub struct MediaItem {
    pub id: i32,
    pub trip_id: i32,
    pub user_id: i32,
    pub filename: String,
    pub kind: MediaKind,
    pub uploaded_at: DateTime<Utc>,
}
