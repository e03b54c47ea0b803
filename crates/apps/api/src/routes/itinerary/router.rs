use crate::api_state::ApiContext;
use crate::itinerary::handlers::{add_itinerary_item_handler, delete_itinerary_item_handler};
use axum::{
    Router,
    routing::{delete, post},
};

pub fn itinerary_protected_router() -> Router<ApiContext> {
    Router::new()
        .route("/trip/{trip_id}/itinerary", post(add_itinerary_item_handler))
        .route(
            "/trip/{trip_id}/itinerary/{item_id}",
            delete(delete_itinerary_item_handler),
        )
}
