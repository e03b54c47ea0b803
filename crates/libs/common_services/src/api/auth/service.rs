use crate::api::auth::error::AuthError;
use crate::api::auth::hashing::{hash_password, verify_password};
use crate::api::auth::interfaces::CreateUser;
use crate::database::app_user::User;
use crate::database::user_store::UserStore;
use sqlx::PgPool;
use tracing::{info, instrument};
use validator::Validate;

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Authenticates a user based on email and password.
///
/// # Errors
///
/// * `AuthError::InvalidCredentials` if the email or password is incorrect.
/// * `AuthError::Database` for database-related issues.
#[instrument(skip(pool, password), err(Debug))]
pub async fn authenticate_user(
    pool: &PgPool,
    email: &str,
    password: &str,
) -> Result<User, AuthError> {
    let user = UserStore::find_by_email_with_password(pool, &normalize_email(email))
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let valid = verify_password(password.as_bytes(), &user.password_hash)?;
    if !valid {
        return Err(AuthError::InvalidCredentials);
    }

    Ok(user.into())
}

/// Creates a new user in the database.
///
/// # Errors
///
/// * `AuthError::Validation` for a malformed email, empty password or overlong name.
/// * `AuthError::UserAlreadyExists` if a user with the given email already exists.
/// * `AuthError::Internal` for hashing errors.
#[instrument(skip(pool, payload), err(Debug))]
pub async fn create_user(pool: &PgPool, payload: &CreateUser) -> Result<User, AuthError> {
    payload.validate()?;
    let email = normalize_email(&payload.email);
    let name = payload
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());
    let hashed = hash_password(payload.password.as_bytes())?;

    info!("Creating user email={}", email);
    let user = UserStore::create(pool, &email, name, &hashed).await?;
    Ok(user)
}
