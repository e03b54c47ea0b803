use crate::api::access::gate::{AccessError, SafeView};
use crate::database::DbError;
use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("access denied")]
    Denied(SafeView),

    #[error("invalid upload: {0}")]
    Validation(String),

    #[error("file type not allowed: {0}")]
    UnsupportedFile(String),

    #[error("file exceeds the {0} byte limit")]
    FileTooLarge(usize),

    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(#[from] eyre::Report),
}

fn log_error(error: &GalleryError) {
    match error {
        GalleryError::Denied(view) => warn!("Gallery -> access denied, redirecting to {:?}", view),
        GalleryError::Validation(message) => info!("Gallery -> invalid upload: {}", message),
        GalleryError::UnsupportedFile(name) => info!("Gallery -> rejected file type: {}", name),
        GalleryError::FileTooLarge(limit) => info!("Gallery -> upload over {} bytes", limit),
        GalleryError::Io(e) => error!("Gallery -> storage error: {}", e),
        GalleryError::Database(e) => error!("Database query failed: {}", e),
        GalleryError::Internal(e) => error!("Internal error: {:?}", e),
    }
}

impl IntoResponse for GalleryError {
    fn into_response(self) -> Response {
        log_error(&self);

        let (status, error_message) = match self {
            Self::Denied(view) => return Redirect::to(&view.path()).into_response(),
            Self::Validation(message) => (StatusCode::BAD_REQUEST, message),
            Self::UnsupportedFile(_) => (
                StatusCode::BAD_REQUEST,
                "Invalid file type. Allowed: images (jpg, jpeg, png, gif, webp) and videos (mp4, mov, webm)".to_owned(),
            ),
            Self::FileTooLarge(limit) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                format!("File is too large. The limit is {} MB.", limit / (1024 * 1024)),
            ),
            Self::Io(_) | Self::Database(_) | Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal server error occurred.".to_owned(),
            ),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<DbError> for GalleryError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation(sql_err) | DbError::Sqlx(sql_err) => Self::Database(sql_err),
        }
    }
}

impl From<AccessError> for GalleryError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Denied(view) => Self::Denied(view),
            AccessError::Database(db_err) => db_err.into(),
        }
    }
}

impl From<MultipartError> for GalleryError {
    fn from(err: MultipartError) -> Self {
        Self::Validation(err.body_text())
    }
}
