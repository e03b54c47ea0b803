use crate::api_state::ApiContext;
use crate::expenses::handlers::{add_expense_handler, delete_expense_handler};
use axum::{
    Router,
    routing::{delete, post},
};

pub fn expenses_protected_router() -> Router<ApiContext> {
    Router::new()
        .route("/trip/{trip_id}/expenses", post(add_expense_handler))
        .route(
            "/trip/{trip_id}/expenses/{expense_id}",
            delete(delete_expense_handler),
        )
}
