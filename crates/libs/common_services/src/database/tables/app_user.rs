use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Represents a user in the application.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, ToSchema)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Represents a user record from db, including the password hash.
#[derive(Debug, FromRow)]
pub struct UserWithPassword {
    pub id: i32,
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub password_hash: String,
}

impl User {
    #[must_use]
    pub fn display_name(&self) -> &str {
        display_name(self.name.as_deref(), &self.email)
    }
}

impl From<UserWithPassword> for User {
    fn from(user: UserWithPassword) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            created_at: user.created_at,
        }
    }
}

/// The name shown for a user: their display name, or their email when they have none.
#[must_use]
pub fn display_name<'a>(name: Option<&'a str>, email: &'a str) -> &'a str {
    match name {
        Some(name) if !name.trim().is_empty() => name,
        _ => email,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_falls_back_to_email() {
        assert_eq!(display_name(Some("Alice"), "a@x.com"), "Alice");
        assert_eq!(display_name(None, "a@x.com"), "a@x.com");
        assert_eq!(display_name(Some("  "), "a@x.com"), "a@x.com");
    }
}
