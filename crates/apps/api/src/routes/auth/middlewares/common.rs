use crate::api_state::ApiContext;
use axum::extract::{FromRequestParts, State};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use common_services::api::auth::error::AuthError;
use common_services::api::auth::interfaces::AuthClaims;
use common_services::api::auth::token::decode_access_token;
use http::header;
use http::request::Parts;

/// Name of the HttpOnly cookie holding the session token.
pub const SESSION_COOKIE: &str = "access_token";

pub async fn extract_context<S>(parts: &mut Parts, state: &S) -> Result<ApiContext, AuthError>
where
    S: Send + Sync,
    State<ApiContext>: FromRequestParts<S>,
{
    match State::<ApiContext>::from_request_parts(parts, state).await {
        Ok(State(context)) => Ok(context),
        Err(_e) => Err(AuthError::Internal(eyre!(
            "Server state is not configured correctly."
        ))),
    }
}

/// Get the session token from the cookie, or else from a Bearer Authorization header.
pub fn extract_token(parts: &Parts) -> Result<String, AuthError> {
    let jar = CookieJar::from_headers(&parts.headers);
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        return Ok(cookie.value().to_owned());
    }

    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    auth_header
        .strip_prefix("Bearer ")
        .map(ToOwned::to_owned)
        .ok_or(AuthError::InvalidToken)
}

pub fn decode_token(context: &ApiContext, token: &str) -> Result<AuthClaims, AuthError> {
    decode_access_token(&context.settings.auth, &context.settings.secrets.jwt, token)
}
