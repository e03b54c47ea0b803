use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Serialize, Deserialize, Debug, Validate, ToSchema)]
pub struct CreateItineraryItemRequest {
    #[validate(range(min = 1, message = "Day number must be at least 1"))]
    pub day_number: i32,
    #[schema(example = "09:30")]
    pub time: Option<String>,
    #[validate(length(min = 1, max = 500, message = "Activity must be 1-500 characters"))]
    pub activity: String,
    pub location: Option<String>,
    pub description: Option<String>,
}
