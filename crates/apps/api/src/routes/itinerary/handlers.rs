use crate::api_state::ApiContext;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use common_services::api::itinerary::interfaces::CreateItineraryItemRequest;
use common_services::api::itinerary::service::{add_itinerary_item, delete_itinerary_item};
use common_services::api::trips::error::TripError;
use common_services::database::app_user::User;
use common_services::database::itinerary_item::ItineraryItem;
use tracing::instrument;

/// Adds an itinerary entry. Organizers only.
#[utoipa::path(
    post,
    path = "/trip/{trip_id}/itinerary",
    tag = "Itinerary",
    params(("trip_id" = i32, Path, description = "Trip id")),
    request_body = CreateItineraryItemRequest,
    responses(
        (status = 201, description = "Item added", body = ItineraryItem),
        (status = 400, description = "Invalid input"),
        (status = 303, description = "Not an organizer, redirect to the trip page"),
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(context, user, payload), fields(user_id = user.id), err(Debug))]
pub async fn add_itinerary_item_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(trip_id): Path<i32>,
    Json(payload): Json<CreateItineraryItemRequest>,
) -> Result<(StatusCode, Json<ItineraryItem>), TripError> {
    let item = add_itinerary_item(&context.pool, user.id, trip_id, &payload).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Removes an itinerary entry. Organizers only.
#[utoipa::path(
    delete,
    path = "/trip/{trip_id}/itinerary/{item_id}",
    tag = "Itinerary",
    params(
        ("trip_id" = i32, Path, description = "Trip id"),
        ("item_id" = i32, Path, description = "Itinerary item id"),
    ),
    responses(
        (status = 204, description = "Item removed"),
        (status = 303, description = "Not an organizer or no such item, redirect to the trip page"),
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(context, user), fields(user_id = user.id), err(Debug))]
pub async fn delete_itinerary_item_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path((trip_id, item_id)): Path<(i32, i32)>,
) -> Result<StatusCode, TripError> {
    delete_itinerary_item(&context.pool, user.id, trip_id, item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
