use crate::routes::{auth, chat, expenses, export, gallery, itinerary, maps, root, trips};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        root::handlers::health_check,
        // Auth handlers
        auth::handlers::login,
        auth::handlers::register,
        auth::handlers::logout,
        auth::handlers::get_me,
        // Trip handlers
        trips::handlers::dashboard_handler,
        trips::handlers::create_trip_handler,
        trips::handlers::join_trip_handler,
        trips::handlers::get_trip_handler,
        trips::handlers::change_member_role_handler,
        trips::handlers::leave_trip_handler,
        // Itinerary handlers
        itinerary::handlers::add_itinerary_item_handler,
        itinerary::handlers::delete_itinerary_item_handler,
        // Expense handlers
        expenses::handlers::add_expense_handler,
        expenses::handlers::delete_expense_handler,
        // Chat handlers
        chat::handlers::get_chat_handler,
        chat::handlers::post_message_handler,
        chat::handlers::messages_since_handler,
        // Gallery handlers
        gallery::handlers::list_media_handler,
        gallery::handlers::upload_media_handler,
        gallery::handlers::delete_media_handler,
        gallery::handlers::serve_upload_handler,
        // Export and map handlers
        export::handlers::export_trip_handler,
        maps::handlers::trip_map_handler,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Trip Planner", description = "Trip Planner's API"),
        (name = "Auth", description = "Registration, login and session endpoints"),
        (name = "Trips", description = "Trips, membership and the dashboard"),
        (name = "Itinerary", description = "Day-by-day plan of a trip"),
        (name = "Expenses", description = "Shared trip expenses"),
        (name = "Chat", description = "Trip chat with polling"),
        (name = "Gallery", description = "Trip photos and videos"),
        (name = "Export", description = "Trip summary documents"),
        (name = "Map", description = "Map view data and recommendations"),
        (name = "System", description = "Health check"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("access_token"))),
        );
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
