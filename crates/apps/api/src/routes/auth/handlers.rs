//! This module defines the HTTP handlers for authentication-related routes.

use crate::api_state::ApiContext;
use crate::auth::middlewares::common::SESSION_COOKIE;
use axum::response::Redirect;
use axum::{Extension, Json, extract::State};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use common_services::api::auth::error::{AuthError, LOGIN_PATH};
use common_services::api::auth::interfaces::{CreateUser, LoginUser};
use common_services::api::auth::service::{authenticate_user, create_user};
use common_services::api::auth::token::create_access_token;
use common_services::database::app_user::User;
use tracing::{info, instrument};

/// Where a freshly signed-in user lands.
const DASHBOARD_PATH: &str = "/dashboard";

/// Checks the credentials and starts a session by setting the session cookie.
///
/// # Errors
///
/// Returns `AuthError` if the user credentials are invalid or the token cannot be created.
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Auth",
    request_body = LoginUser,
    responses(
        (status = 303, description = "Login successful, session cookie set, redirect to the dashboard"),
        (status = 401, description = "Invalid email or password"),
    )
)]
#[instrument(skip(context, jar, payload), err(Debug))]
pub async fn login(
    State(context): State<ApiContext>,
    jar: CookieJar,
    Json(payload): Json<LoginUser>,
) -> Result<(CookieJar, Redirect), AuthError> {
    let user = authenticate_user(&context.pool, &payload.email, &payload.password).await?;
    let auth = &context.settings.auth;
    let (access_token, _expiry) = create_access_token(auth, &context.settings.secrets.jwt, &user)?;

    let cookie = Cookie::build((SESSION_COOKIE, access_token))
        .path("/")
        .http_only(true)
        .secure(auth.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::minutes(auth.access_token_expiry_minutes));

    info!("User {} signed in", user.id);
    Ok((jar.add(cookie), Redirect::to(DASHBOARD_PATH)))
}

/// Handles the registration of a new user.
///
/// # Errors
///
/// Returns `AuthError` if a user with the provided email already exists or the input is invalid.
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Auth",
    request_body = CreateUser,
    responses(
        (status = 303, description = "User created, redirect to the login page"),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "User with this email already exists"),
    )
)]
#[instrument(skip(context, payload), err(Debug))]
pub async fn register(
    State(context): State<ApiContext>,
    Json(payload): Json<CreateUser>,
) -> Result<Redirect, AuthError> {
    let user = create_user(&context.pool, &payload).await?;
    info!("Registered user {}", user.id);
    Ok(Redirect::to(LOGIN_PATH))
}

/// Ends the session by clearing the session cookie.
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "Auth",
    responses(
        (status = 303, description = "Session cookie cleared, redirect to the login page"),
    )
)]
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Redirect::to(LOGIN_PATH))
}

/// Get current user info.
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Current user data", body = User),
        (status = 303, description = "Not signed in, redirect to the login page"),
    ),
    security(
        ("session_cookie" = []),
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(Extension(user): Extension<User>) -> Json<User> {
    Json(user)
}
