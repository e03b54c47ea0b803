use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Represents the data required to create a new user.
#[derive(Serialize, Deserialize, Debug, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password must not be empty"))]
    #[schema(value_type = String, format = "password", example = "my-secret-password")]
    pub password: String,
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,
}

/// Represents the data required for user login.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct LoginUser {
    pub email: String,
    #[schema(value_type = String, format = "password", example = "my-secret-password")]
    pub password: String,
}

/// Represents the claims contained within a session JWT.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct AuthClaims {
    /// Subject (the user's email)
    pub sub: String,
    pub user_id: i32,
    /// Expiration time as a unix timestamp
    pub exp: i64,
}
