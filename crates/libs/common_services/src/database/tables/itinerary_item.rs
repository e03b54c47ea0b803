use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
pub struct ItineraryItem {
    pub id: i32,
    pub trip_id: i32,
    /// 1-based day relative to the trip's start date.
    pub day_number: i32,
    /// Free-form time of day label, e.g. `09:30`.
    pub time: Option<String>,
    pub activity: String,
    pub location: Option<String>,
    pub description: Option<String>,
}
