use crate::api_state::ApiContext;
use crate::gallery::handlers::{
    delete_media_handler, list_media_handler, serve_upload_handler, upload_media_handler,
};
use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    routing::{delete, get},
};

/// Room for the multipart boundaries and headers around the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn gallery_protected_router(max_upload_bytes: usize) -> Router<ApiContext> {
    Router::new()
        .route(
            "/trip/{trip_id}/gallery",
            get(list_media_handler).post(upload_media_handler).layer(
                DefaultBodyLimit::max(max_upload_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES)),
            ),
        )
        .route(
            "/trip/{trip_id}/gallery/{media_id}",
            delete(delete_media_handler),
        )
        .route("/uploads/{trip_id}/{filename}", get(serve_upload_handler))
}
