use crate::api::auth::error::AuthError;
use crate::api::auth::interfaces::AuthClaims;
use crate::database::app_user::User;
use app_state::AuthSettings;
use chrono::{Duration, Utc};
use color_eyre::eyre::eyre;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::str::FromStr;

fn algorithm(auth: &AuthSettings) -> Result<Algorithm, AuthError> {
    Algorithm::from_str(&auth.token_algorithm).map_err(|e| {
        AuthError::Internal(eyre!(
            "unsupported token algorithm {}: {e}",
            auth.token_algorithm
        ))
    })
}

/// Creates a signed session token for the user. Returns the token and its expiry timestamp.
///
/// # Errors
///
/// * `AuthError::Internal` if the algorithm is unknown or encoding fails.
pub fn create_access_token(
    auth: &AuthSettings,
    jwt_secret: &str,
    user: &User,
) -> Result<(String, i64), AuthError> {
    let exp = (Utc::now() + Duration::minutes(auth.access_token_expiry_minutes)).timestamp();
    let claims = AuthClaims {
        sub: user.email.clone(),
        user_id: user.id,
        exp,
    };
    let token = encode(
        &Header::new(algorithm(auth)?),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_ref()),
    )
    .map_err(|e| AuthError::Internal(e.into()))?;

    Ok((token, exp))
}

/// Verifies signature and expiry of a session token.
///
/// # Errors
///
/// * `AuthError::InvalidToken` for a bad signature, expired token, or malformed claims.
pub fn decode_access_token(
    auth: &AuthSettings,
    jwt_secret: &str,
    token: &str,
) -> Result<AuthClaims, AuthError> {
    decode::<AuthClaims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_ref()),
        &Validation::new(algorithm(auth)?),
    )
    .map(|data| data.claims)
    .map_err(|_| AuthError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth_settings() -> AuthSettings {
        AuthSettings {
            token_algorithm: "HS256".to_owned(),
            access_token_expiry_minutes: 30,
            secure_cookies: true,
        }
    }

    fn alice() -> User {
        User {
            id: 7,
            email: "a@x.com".to_owned(),
            name: Some("Alice".to_owned()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn issued_token_carries_identity_and_lifetime() {
        let auth = auth_settings();
        let (token, exp) = create_access_token(&auth, "secret", &alice()).expect("encodes");

        let claims = decode_access_token(&auth, "secret", &token).expect("decodes");
        assert_eq!(claims.sub, "a@x.com");
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.exp, exp);
        let lifetime = exp - Utc::now().timestamp();
        assert!((30 * 60 - 5..=30 * 60).contains(&lifetime));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let auth = auth_settings();
        let (token, _) = create_access_token(&auth, "secret", &alice()).expect("encodes");

        let result = decode_access_token(&auth, "another-secret", &token);
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let auth = AuthSettings {
            access_token_expiry_minutes: -60,
            ..auth_settings()
        };
        let (token, _) = create_access_token(&auth, "secret", &alice()).expect("encodes");

        let result = decode_access_token(&auth_settings(), "secret", &token);
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[test]
    fn garbage_token_is_rejected() {
        let result = decode_access_token(&auth_settings(), "secret", "not.a.jwt");
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }
}
