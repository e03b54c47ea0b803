use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
pub struct Message {
    /// Monotonically increasing; clients poll with the highest id they have seen.
    pub id: i64,
    pub trip_id: i32,
    pub user_id: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A chat message joined with its author's profile.
#[derive(Debug, FromRow, Clone)]
pub struct MessageWithAuthor {
    pub id: i64,
    pub trip_id: i32,
    pub user_id: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub author_email: String,
    pub author_name: Option<String>,
}
