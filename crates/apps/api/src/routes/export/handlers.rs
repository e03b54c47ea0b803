use crate::api_state::ApiContext;
use axum::extract::{Path, State};
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use axum::Extension;
use common_services::api::export::error::ExportError;
use common_services::api::export::service::export_trip_report;
use common_services::database::app_user::User;
use tracing::instrument;

/// `Content-Disposition` for a download, keeping the file name header-safe.
fn attachment(filename: &str) -> HeaderValue {
    let safe: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    HeaderValue::from_str(&format!("attachment; filename=\"{safe}\""))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}

/// Downloads the trip summary as a PDF.
#[utoipa::path(
    get,
    path = "/trip/{trip_id}/export",
    tag = "Export",
    params(("trip_id" = i32, Path, description = "Trip id")),
    responses(
        (status = 200, description = "Trip summary document", content_type = "application/pdf"),
        (status = 303, description = "Not a member, redirect to the dashboard"),
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(context, user), fields(user_id = user.id), err(Debug))]
pub async fn export_trip_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(trip_id): Path<i32>,
) -> Result<Response, ExportError> {
    let report =
        export_trip_report(&context.pool, context.report_renderer.as_ref(), &user, trip_id).await?;
    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static(report.content_type),
            ),
            (header::CONTENT_DISPOSITION, attachment(&report.filename)),
        ],
        report.bytes,
    )
        .into_response())
}
