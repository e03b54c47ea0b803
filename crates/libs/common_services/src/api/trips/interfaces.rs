use crate::database::expense::ExpenseWithAuthor;
use crate::database::itinerary_item::ItineraryItem;
use crate::database::membership::{MemberSummary, TripRole};
use crate::database::trip::Trip;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Serialize, Deserialize, Debug, Validate, ToSchema)]
pub struct CreateTripRequest {
    #[validate(length(min = 1, max = 200, message = "Trip name must be 1-200 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 200, message = "Destination must be 1-200 characters"))]
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_location: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct JoinTripRequest {
    pub join_code: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum JoinOutcome {
    Joined,
    AlreadyJoined,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct JoinTripResponse {
    pub status: JoinOutcome,
    pub trip_id: i32,
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ChangeRoleRequest {
    pub role: TripRole,
}

/// A member as shown on the trip page.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct MemberView {
    pub user_id: i32,
    pub name: String,
    pub email: String,
}

impl From<&MemberSummary> for MemberView {
    fn from(member: &MemberSummary) -> Self {
        Self {
            user_id: member.user_id,
            name: member.display_name().to_owned(),
            email: member.email.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct ExpenseView {
    pub id: i32,
    pub amount: Decimal,
    pub purpose: String,
    pub created_at: DateTime<Utc>,
    pub user_id: i32,
    pub added_by: String,
}

impl From<&ExpenseWithAuthor> for ExpenseView {
    fn from(expense: &ExpenseWithAuthor) -> Self {
        Self {
            id: expense.id,
            amount: expense.amount,
            purpose: expense.purpose.clone(),
            created_at: expense.created_at,
            user_id: expense.user_id,
            added_by: expense.author_display_name().to_owned(),
        }
    }
}

/// Everything the trip page shows, assembled for one member.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct TripDetailsResponse {
    pub trip: Trip,
    /// The viewing user's role.
    pub role: TripRole,
    pub organizers: Vec<MemberView>,
    pub members: Vec<MemberView>,
    pub itinerary: Vec<ItineraryItem>,
    pub expenses: Vec<ExpenseView>,
    pub total_expenses: Decimal,
    pub duration_days: i64,
}
