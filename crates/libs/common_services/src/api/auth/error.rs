use crate::database::DbError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::{error, info, warn};
use validator::ValidationErrors;

/// Where anonymous callers are sent.
pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing session token")]
    MissingToken,

    #[error("invalid or expired session token")]
    InvalidToken,

    #[error("user from token no longer exists")]
    UserNotFound,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("user already exists")]
    UserAlreadyExists,

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(#[from] eyre::Report),
}

// Helper function to log failures.
fn log_auth_failure(error: &AuthError) {
    match error {
        AuthError::MissingToken => info!("Anonymous request to a protected route."),
        AuthError::InvalidToken => warn!("Authentication failed: invalid or expired token."),
        AuthError::UserNotFound => warn!("Authentication failed: user from token not found."),
        AuthError::InvalidCredentials => info!("Login failed: invalid credentials provided."),
        AuthError::UserAlreadyExists => info!("Registration failed: user already exists."),
        AuthError::Validation(message) => info!("Auth input rejected: {}", message),
        AuthError::Database(e) => error!("Database error during authentication: {}", e),
        AuthError::Internal(e) => error!("Internal error during authentication: {:?}", e),
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        log_auth_failure(&self);

        let (status, error_message) = match self {
            // Anonymous callers are treated alike, whatever was wrong with their credential.
            Self::MissingToken | Self::InvalidToken | Self::UserNotFound => {
                return Redirect::to(LOGIN_PATH).into_response();
            }
            Self::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid email or password".to_owned(),
            ),
            Self::UserAlreadyExists => (
                StatusCode::CONFLICT,
                "A user with this email already exists".to_owned(),
            ),
            Self::Validation(message) => (StatusCode::BAD_REQUEST, message),
            Self::Database(_) | Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal server error occurred.".to_owned(),
            ),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<DbError> for AuthError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation(_) => Self::UserAlreadyExists,
            DbError::Sqlx(sql_err) => Self::Database(sql_err),
        }
    }
}

impl From<ValidationErrors> for AuthError {
    fn from(err: ValidationErrors) -> Self {
        Self::Validation(crate::api::validation_message(&err))
    }
}
