use crate::database::membership::TripRole;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A planning unit that members, itinerary, expenses, media and chat hang off.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
pub struct Trip {
    pub id: i32,
    pub name: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_location: Option<String>,
    pub estimated_budget: Option<Decimal>,
    pub join_code: String,
    pub created_at: DateTime<Utc>,
}

/// A trip as listed on the dashboard, with the viewing user's role.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
pub struct TripSummary {
    pub id: i32,
    pub name: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub join_code: String,
    pub role: TripRole,
}

impl Trip {
    /// Number of days the trip spans, counting both the first and the last day.
    #[must_use]
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}
