use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Serialize, Deserialize, Debug, Validate, ToSchema)]
pub struct CreateExpenseRequest {
    #[validate(length(min = 1, max = 500, message = "Purpose must be 1-500 characters"))]
    pub purpose: String,
    #[schema(value_type = String, example = "1250.50")]
    pub amount: Decimal,
}
