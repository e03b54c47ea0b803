use crate::api_state::ApiContext;
use crate::export::handlers::export_trip_handler;
use axum::{Router, routing::get};

pub fn export_protected_router() -> Router<ApiContext> {
    Router::new().route("/trip/{trip_id}/export", get(export_trip_handler))
}
