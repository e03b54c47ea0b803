use crate::api_state::ApiContext;
use axum::extract::{Path, State};
use axum::{Extension, Json};
use common_services::api::maps::interfaces::TripMapResponse;
use common_services::api::maps::service::get_trip_map;
use common_services::api::trips::error::TripError;
use common_services::database::app_user::User;
use tracing::instrument;

/// Map data for a trip: locations, route and recommendations.
#[utoipa::path(
    get,
    path = "/trip/{trip_id}/map",
    tag = "Map",
    params(("trip_id" = i32, Path, description = "Trip id")),
    responses(
        (status = 200, description = "Map view data", body = TripMapResponse),
        (status = 303, description = "Not a member, redirect to the dashboard"),
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(context, user), fields(user_id = user.id), err(Debug))]
pub async fn trip_map_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(trip_id): Path<i32>,
) -> Result<Json<TripMapResponse>, TripError> {
    let map = get_trip_map(&context.pool, &context.maps_client, user.id, trip_id).await?;
    Ok(Json(map))
}
