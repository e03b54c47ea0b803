use crate::database::app_user::display_name;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
pub struct Expense {
    pub id: i32,
    pub trip_id: i32,
    pub user_id: i32,
    pub amount: Decimal,
    pub purpose: String,
    pub created_at: DateTime<Utc>,
}

/// An expense joined with the profile of the member who added it.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
pub struct ExpenseWithAuthor {
    pub id: i32,
    pub trip_id: i32,
    pub user_id: i32,
    pub amount: Decimal,
    pub purpose: String,
    pub created_at: DateTime<Utc>,
    pub author_email: String,
    pub author_name: Option<String>,
}

impl ExpenseWithAuthor {
    #[must_use]
    pub fn author_display_name(&self) -> &str {
        display_name(self.author_name.as_deref(), &self.author_email)
    }
}

/// Sum of the given expense amounts. Zero for an empty list.
pub fn total_amount<'a>(amounts: impl IntoIterator<Item = &'a Decimal>) -> Decimal {
    amounts.into_iter().copied().sum()
}
