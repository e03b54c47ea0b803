mod api_doc;
pub mod auth;
pub mod chat;
pub mod expenses;
pub mod export;
pub mod gallery;
pub mod itinerary;
pub mod maps;
pub mod root;
pub mod trips;

use crate::api_state::ApiContext;
use crate::auth::middlewares::user::ApiUser;
use crate::auth::router::{auth_protected_router, auth_public_router};
use crate::chat::router::chat_protected_router;
use crate::expenses::router::expenses_protected_router;
use crate::export::router::export_protected_router;
use crate::gallery::router::gallery_protected_router;
use crate::itinerary::router::itinerary_protected_router;
use crate::maps::router::maps_protected_router;
use crate::root::router::root_public_router;
use crate::routes::api_doc::ApiDoc;
use crate::trips::router::trips_protected_router;
use app_state::RateLimitingSettings;
use axum::Router;
use axum::middleware::from_extractor_with_state;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// --- Router Construction ---
pub fn create_router(api_state: ApiContext) -> Router {
    let mut router = Router::new()
        .merge(public_routes(&api_state.settings.rate_limiting))
        .merge(protected_routes(api_state.clone()));
    if api_state.settings.is_development() {
        router = router.merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()));
    }
    router.with_state(api_state)
}

fn public_routes(rate_limiting: &RateLimitingSettings) -> Router<ApiContext> {
    Router::new()
        .merge(auth_public_router(rate_limiting))
        .merge(root_public_router())
}

fn protected_routes(api_state: ApiContext) -> Router<ApiContext> {
    Router::new()
        .merge(auth_protected_router())
        .merge(trips_protected_router())
        .merge(itinerary_protected_router())
        .merge(expenses_protected_router())
        .merge(chat_protected_router())
        .merge(gallery_protected_router(
            api_state.settings.uploads.max_upload_bytes,
        ))
        .merge(export_protected_router())
        .merge(maps_protected_router())
        .route_layer(from_extractor_with_state::<ApiUser, ApiContext>(api_state))
}
