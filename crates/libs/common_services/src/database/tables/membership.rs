use crate::database::app_user::display_name;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;

/// Maps to the `trip_role` Postgres enum.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, PartialOrd, Ord, ToSchema,
)]
#[sqlx(type_name = "trip_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TripRole {
    Member,
    Organizer,
}

impl fmt::Display for TripRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Member => write!(f, "member"),
            Self::Organizer => write!(f, "organizer"),
        }
    }
}

/// One row of the membership ledger.
#[derive(Debug, Serialize, FromRow, Clone, ToSchema)]
pub struct Membership {
    pub trip_id: i32,
    pub user_id: i32,
    pub role: TripRole,
    pub joined_at: DateTime<Utc>,
}

/// A trip member joined with their user profile.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
pub struct MemberSummary {
    pub user_id: i32,
    pub email: String,
    pub name: Option<String>,
    pub role: TripRole,
}

impl MemberSummary {
    #[must_use]
    pub fn display_name(&self) -> &str {
        display_name(self.name.as_deref(), &self.email)
    }
}
