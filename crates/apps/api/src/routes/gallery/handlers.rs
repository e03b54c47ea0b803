use crate::api_state::ApiContext;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use common_services::api::gallery::error::GalleryError;
use common_services::api::gallery::interfaces::UploadMediaForm;
use common_services::api::gallery::service::{
    authorize_upload, delete_media, list_media, open_media, upload_media,
};
use common_services::database::app_user::User;
use common_services::database::media_item::MediaItem;
use tracing::instrument;

/// Name of the multipart field carrying the uploaded file.
const FILE_FIELD: &str = "file";

/// The trip's photos and videos, newest first.
#[utoipa::path(
    get,
    path = "/trip/{trip_id}/gallery",
    tag = "Gallery",
    params(("trip_id" = i32, Path, description = "Trip id")),
    responses(
        (status = 200, description = "Gallery items", body = [MediaItem]),
        (status = 303, description = "Not a member, redirect to the dashboard"),
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(context, user), fields(user_id = user.id), err(Debug))]
pub async fn list_media_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(trip_id): Path<i32>,
) -> Result<Json<Vec<MediaItem>>, GalleryError> {
    let media = list_media(&context.pool, user.id, trip_id).await?;
    Ok(Json(media))
}

/// Uploads a photo or video to the trip gallery.
#[utoipa::path(
    post,
    path = "/trip/{trip_id}/gallery",
    tag = "Gallery",
    params(("trip_id" = i32, Path, description = "Trip id")),
    request_body(content = UploadMediaForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "File stored", body = MediaItem),
        (status = 400, description = "Missing file or disallowed file type"),
        (status = 413, description = "File too large"),
        (status = 303, description = "Not a member, redirect to the gallery"),
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(context, user, multipart), fields(user_id = user.id), err(Debug))]
pub async fn upload_media_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(trip_id): Path<i32>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<MediaItem>), GalleryError> {
    // Membership is settled before any of the body is looked at.
    let permit = authorize_upload(&context.pool, user.id, trip_id).await?;
    let mut multipart =
        multipart.map_err(|rejection| GalleryError::Validation(rejection.body_text()))?;

    let uploads = &context.settings.uploads;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_owned();
        let bytes = field.bytes().await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                GalleryError::FileTooLarge(uploads.max_upload_bytes)
            } else {
                e.into()
            }
        })?;
        if file_name.is_empty() {
            break;
        }

        let item = upload_media(&context.pool, uploads, &permit, &file_name, &bytes).await?;
        return Ok((StatusCode::CREATED, Json(item)));
    }
    Err(GalleryError::Validation("No file selected".to_owned()))
}

/// Deletes a gallery item and its file. Only the uploader may do so.
#[utoipa::path(
    delete,
    path = "/trip/{trip_id}/gallery/{media_id}",
    tag = "Gallery",
    params(
        ("trip_id" = i32, Path, description = "Trip id"),
        ("media_id" = i32, Path, description = "Gallery item id"),
    ),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 303, description = "Not the uploader or no such item, redirect to the gallery"),
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(context, user), fields(user_id = user.id), err(Debug))]
pub async fn delete_media_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path((trip_id, media_id)): Path<(i32, i32)>,
) -> Result<StatusCode, GalleryError> {
    delete_media(
        &context.pool,
        &context.settings.uploads,
        user.id,
        trip_id,
        media_id,
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Serves an uploaded file to members of the trip it belongs to.
#[utoipa::path(
    get,
    path = "/uploads/{trip_id}/{filename}",
    tag = "Gallery",
    params(
        ("trip_id" = i32, Path, description = "Trip id"),
        ("filename" = String, Path, description = "Stored file name"),
    ),
    responses(
        (status = 200, description = "The file", content_type = "application/octet-stream"),
        (status = 303, description = "Not a member or no such file"),
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(context, user), fields(user_id = user.id), err(Debug))]
pub async fn serve_upload_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path((trip_id, filename)): Path<(i32, String)>,
) -> Result<impl IntoResponse, GalleryError> {
    let media = open_media(
        &context.pool,
        &context.settings.uploads,
        user.id,
        trip_id,
        &filename,
    )
    .await?;
    Ok((
        [
            (header::CONTENT_TYPE, media.content_type),
            (header::CACHE_CONTROL, "private, max-age=3600".to_owned()),
        ],
        media.bytes,
    ))
}
