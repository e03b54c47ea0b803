use crate::database::app_user::display_name;
use crate::database::message::MessageWithAuthor;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Serialize, Deserialize, Debug, Validate, ToSchema)]
pub struct PostMessageRequest {
    #[validate(length(max = 2000, message = "Messages are limited to 2000 characters"))]
    pub content: String,
}

#[derive(Serialize, Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MessagesSinceParams {
    /// Highest message id the client has already seen.
    #[serde(default)]
    pub since_id: i64,
}

/// A chat message ready for display.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct MessageView {
    pub id: i64,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Time of day, e.g. `09:05 PM`.
    pub display_time: String,
    pub user_id: i32,
    pub user_name: String,
    pub user_initial: String,
}

impl From<&MessageWithAuthor> for MessageView {
    fn from(message: &MessageWithAuthor) -> Self {
        let user_name = display_name(message.author_name.as_deref(), &message.author_email);
        Self {
            id: message.id,
            content: message.content.clone(),
            timestamp: message.created_at,
            display_time: message.created_at.format("%I:%M %p").to_string(),
            user_id: message.user_id,
            user_name: user_name.to_owned(),
            user_initial: user_name
                .chars()
                .next()
                .map(|c| c.to_uppercase().to_string())
                .unwrap_or_default(),
        }
    }
}
