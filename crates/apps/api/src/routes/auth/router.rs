use crate::api_state::ApiContext;
use crate::auth::handlers::{get_me, login, logout, register};
use app_state::RateLimitingSettings;
use axum::{
    Router,
    routing::{get, post},
};
use tower_governor::{GovernorLayer, governor::GovernorConfigBuilder};
use tracing::{error, info};

pub fn auth_public_router(rate_limiting: &RateLimitingSettings) -> Router<ApiContext> {
    let credential_routes = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login));

    let credential_routes = if rate_limiting.enabled {
        let governor_conf = GovernorConfigBuilder::default()
            .per_second(rate_limiting.per_second)
            .burst_size(rate_limiting.burst_size)
            .finish();
        if let Some(governor_conf) = governor_conf {
            info!(
                "Rate limiting login and registration: one request per {}s, burst {}",
                rate_limiting.per_second, rate_limiting.burst_size
            );
            credential_routes.layer(GovernorLayer::new(governor_conf))
        } else {
            error!("Invalid rate limiting settings {rate_limiting:?}, running without limits.");
            credential_routes
        }
    } else {
        credential_routes
    };

    credential_routes.route("/auth/logout", post(logout))
}

pub fn auth_protected_router() -> Router<ApiContext> {
    Router::new().route("/auth/me", get(get_me))
}
