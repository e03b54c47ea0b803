use crate::api::access::gate::{AccessError, SafeView};
use crate::database::DbError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("access denied")]
    Denied(SafeView),

    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("report rendering failed")]
    Render(#[from] eyre::Report),
}

fn log_error(error: &ExportError) {
    match error {
        ExportError::Denied(view) => warn!("Export -> access denied, redirecting to {:?}", view),
        ExportError::Database(e) => error!("Database query failed: {}", e),
        ExportError::Render(e) => error!("Report rendering failed: {:?}", e),
    }
}

impl IntoResponse for ExportError {
    fn into_response(self) -> Response {
        log_error(&self);

        match self {
            Self::Denied(view) => Redirect::to(&view.path()).into_response(),
            Self::Database(_) | Self::Render(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "An internal server error occurred." })),
            )
                .into_response(),
        }
    }
}

impl From<DbError> for ExportError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation(sql_err) | DbError::Sqlx(sql_err) => Self::Database(sql_err),
        }
    }
}

impl From<AccessError> for ExportError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Denied(view) => Self::Denied(view),
            AccessError::Database(db_err) => db_err.into(),
        }
    }
}
