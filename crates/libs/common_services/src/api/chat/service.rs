use crate::api::access::gate::{SafeView, authorize};
use crate::api::access::policy::TripAction;
use crate::api::chat::interfaces::{MessageView, PostMessageRequest};
use crate::api::non_blank;
use crate::api::trips::error::TripError;
use crate::database::app_user::User;
use crate::database::message::MessageWithAuthor;
use crate::database::message_store::MessageStore;
use sqlx::PgPool;
use tracing::instrument;
use validator::Validate;

/// Appends a message to the trip chat. Any member may post.
#[instrument(skip(pool, author, payload), fields(user_id = author.id), err(Debug))]
pub async fn post_message(
    pool: &PgPool,
    author: &User,
    trip_id: i32,
    payload: &PostMessageRequest,
) -> Result<MessageView, TripError> {
    authorize(
        pool,
        trip_id,
        author.id,
        TripAction::PostMessage,
        SafeView::Trip(trip_id),
    )
    .await?;

    payload.validate()?;
    let content = non_blank(&payload.content)
        .ok_or_else(|| TripError::Validation("Message cannot be empty".to_owned()))?;

    let message = MessageStore::create(pool, trip_id, author.id, content).await?;
    let with_author = MessageWithAuthor {
        id: message.id,
        trip_id: message.trip_id,
        user_id: message.user_id,
        content: message.content,
        created_at: message.created_at,
        author_email: author.email.clone(),
        author_name: author.name.clone(),
    };
    Ok(MessageView::from(&with_author))
}

/// Messages newer than `since_id`, oldest first. Clients poll this with the highest id
/// they have seen; `0` returns the whole history.
#[instrument(skip(pool), err(Debug))]
pub async fn messages_since(
    pool: &PgPool,
    user_id: i32,
    trip_id: i32,
    since_id: i64,
) -> Result<Vec<MessageView>, TripError> {
    authorize(
        pool,
        trip_id,
        user_id,
        TripAction::ViewChat,
        SafeView::Dashboard,
    )
    .await?;

    let messages = MessageStore::list_since(pool, trip_id, since_id.max(0)).await?;
    Ok(messages.iter().map(MessageView::from).collect())
}
