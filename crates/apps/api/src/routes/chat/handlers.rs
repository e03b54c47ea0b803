use crate::api_state::ApiContext;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use common_services::api::chat::interfaces::{MessageView, MessagesSinceParams, PostMessageRequest};
use common_services::api::chat::service::{messages_since, post_message};
use common_services::api::trips::error::TripError;
use common_services::database::app_user::User;
use tracing::instrument;

/// The full chat history of a trip, oldest first.
#[utoipa::path(
    get,
    path = "/trip/{trip_id}/chat",
    tag = "Chat",
    params(("trip_id" = i32, Path, description = "Trip id")),
    responses(
        (status = 200, description = "All messages", body = [MessageView]),
        (status = 303, description = "Not a member, redirect to the dashboard"),
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(context, user), fields(user_id = user.id), err(Debug))]
pub async fn get_chat_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(trip_id): Path<i32>,
) -> Result<Json<Vec<MessageView>>, TripError> {
    let messages = messages_since(&context.pool, user.id, trip_id, 0).await?;
    Ok(Json(messages))
}

/// Posts a chat message.
#[utoipa::path(
    post,
    path = "/trip/{trip_id}/chat",
    tag = "Chat",
    params(("trip_id" = i32, Path, description = "Trip id")),
    request_body = PostMessageRequest,
    responses(
        (status = 201, description = "Message posted", body = MessageView),
        (status = 400, description = "Empty or overlong message"),
        (status = 303, description = "Not a member, redirect to the trip page"),
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(context, user, payload), fields(user_id = user.id), err(Debug))]
pub async fn post_message_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(trip_id): Path<i32>,
    Json(payload): Json<PostMessageRequest>,
) -> Result<(StatusCode, Json<MessageView>), TripError> {
    let message = post_message(&context.pool, &user, trip_id, &payload).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// Messages newer than `since_id`, for polling clients.
#[utoipa::path(
    get,
    path = "/trip/{trip_id}/messages",
    tag = "Chat",
    params(
        ("trip_id" = i32, Path, description = "Trip id"),
        MessagesSinceParams,
    ),
    responses(
        (status = 200, description = "New messages, oldest first", body = [MessageView]),
        (status = 303, description = "Not a member, redirect to the dashboard"),
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(context, user), fields(user_id = user.id), err(Debug))]
pub async fn messages_since_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(trip_id): Path<i32>,
    Query(params): Query<MessagesSinceParams>,
) -> Result<Json<Vec<MessageView>>, TripError> {
    let messages = messages_since(&context.pool, user.id, trip_id, params.since_id).await?;
    Ok(Json(messages))
}
