use crate::api_state::ApiContext;
use crate::maps::handlers::trip_map_handler;
use axum::{Router, routing::get};

pub fn maps_protected_router() -> Router<ApiContext> {
    Router::new().route("/trip/{trip_id}/map", get(trip_map_handler))
}
