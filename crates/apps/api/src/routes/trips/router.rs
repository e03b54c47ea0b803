use crate::api_state::ApiContext;
use crate::trips::handlers::{
    change_member_role_handler, create_trip_handler, dashboard_handler, get_trip_handler,
    join_trip_handler, leave_trip_handler,
};
use axum::{
    Router,
    routing::{get, post, put},
};

pub fn trips_protected_router() -> Router<ApiContext> {
    Router::new()
        .route("/dashboard", get(dashboard_handler))
        .route("/trip", post(create_trip_handler))
        .route("/trip/join", post(join_trip_handler))
        .route("/trip/{trip_id}", get(get_trip_handler))
        .route(
            "/trip/{trip_id}/members/{user_id}/role",
            put(change_member_role_handler),
        )
        .route("/trip/{trip_id}/leave", post(leave_trip_handler))
}
