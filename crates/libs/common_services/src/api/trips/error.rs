use crate::api::access::gate::{AccessError, SafeView};
use crate::database::DbError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::{error, info, warn};
use validator::ValidationErrors;

/// Errors for trips and the resources scoped to them (itinerary, expenses, chat, map).
#[derive(Debug, Error)]
pub enum TripError {
    /// Authorization failure or missing resource. Both look the same to the caller.
    #[error("access denied")]
    Denied(SafeView),

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("invalid join code")]
    InvalidJoinCode,

    #[error("a trip must keep at least one organizer")]
    LastOrganizer,

    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(#[from] eyre::Report),
}

fn log_error(error: &TripError) {
    match error {
        TripError::Denied(view) => warn!("Trip -> access denied, redirecting to {:?}", view),
        TripError::Validation(message) => info!("Trip -> invalid input: {}", message),
        TripError::InvalidJoinCode => info!("Trip -> unknown join code submitted"),
        TripError::LastOrganizer => info!("Trip -> refused to remove the last organizer"),
        TripError::Database(e) => error!("Database query failed: {}", e),
        TripError::Internal(e) => error!("Internal error: {:?}", e),
    }
}

impl IntoResponse for TripError {
    fn into_response(self) -> Response {
        log_error(&self);

        let (status, error_message) = match self {
            Self::Denied(view) => return Redirect::to(&view.path()).into_response(),
            Self::Validation(message) => (StatusCode::BAD_REQUEST, message),
            Self::InvalidJoinCode => (StatusCode::BAD_REQUEST, "Invalid code".to_owned()),
            Self::LastOrganizer => (
                StatusCode::CONFLICT,
                "A trip must keep at least one organizer".to_owned(),
            ),
            Self::Database(_) | Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal server error occurred.".to_owned(),
            ),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<DbError> for TripError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation(sql_err) | DbError::Sqlx(sql_err) => Self::Database(sql_err),
        }
    }
}

impl From<AccessError> for TripError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Denied(view) => Self::Denied(view),
            AccessError::Database(db_err) => db_err.into(),
        }
    }
}

impl From<ValidationErrors> for TripError {
    fn from(err: ValidationErrors) -> Self {
        Self::Validation(crate::api::validation_message(&err))
    }
}
