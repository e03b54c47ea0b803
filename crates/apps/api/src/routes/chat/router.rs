use crate::api_state::ApiContext;
use crate::chat::handlers::{get_chat_handler, messages_since_handler, post_message_handler};
use axum::{Router, routing::get};

pub fn chat_protected_router() -> Router<ApiContext> {
    Router::new()
        .route(
            "/trip/{trip_id}/chat",
            get(get_chat_handler).post(post_message_handler),
        )
        .route("/trip/{trip_id}/messages", get(messages_since_handler))
}
