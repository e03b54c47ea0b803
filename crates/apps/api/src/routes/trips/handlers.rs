use crate::api_state::ApiContext;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::{Extension, Json};
use common_services::api::access::gate::SafeView;
use common_services::api::trips::error::TripError;
use common_services::api::trips::interfaces::{
    ChangeRoleRequest, CreateTripRequest, JoinOutcome, JoinTripRequest, JoinTripResponse,
    TripDetailsResponse,
};
use common_services::api::trips::service::{
    change_member_role, create_trip, get_trip_details, join_trip, leave_trip, list_user_trips,
};
use common_services::database::app_user::User;
use common_services::database::trip::{Trip, TripSummary};
use tracing::instrument;

/// Trips the signed-in user belongs to, with their role in each.
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "Trips",
    responses(
        (status = 200, description = "The user's trips", body = [TripSummary]),
        (status = 303, description = "Not signed in"),
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(context, user), fields(user_id = user.id), err(Debug))]
pub async fn dashboard_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<TripSummary>>, TripError> {
    let trips = list_user_trips(&context.pool, user.id).await?;
    Ok(Json(trips))
}

/// Creates a trip. The creator becomes its organizer.
#[utoipa::path(
    post,
    path = "/trip",
    tag = "Trips",
    request_body = CreateTripRequest,
    responses(
        (status = 201, description = "Trip created", body = Trip),
        (status = 400, description = "Invalid input"),
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(context, user, payload), fields(user_id = user.id), err(Debug))]
pub async fn create_trip_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Json(payload): Json<CreateTripRequest>,
) -> Result<(StatusCode, Json<Trip>), TripError> {
    let trip = create_trip(&context.pool, user.id, &payload).await?;
    Ok((StatusCode::CREATED, Json(trip)))
}

/// Joins the trip behind a join code.
#[utoipa::path(
    post,
    path = "/trip/join",
    tag = "Trips",
    request_body = JoinTripRequest,
    responses(
        (status = 200, description = "Joined, or already a member", body = JoinTripResponse),
        (status = 400, description = "Invalid code"),
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(context, user, payload), fields(user_id = user.id), err(Debug))]
pub async fn join_trip_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Json(payload): Json<JoinTripRequest>,
) -> Result<Json<JoinTripResponse>, TripError> {
    let (status, trip) = join_trip(&context.pool, user.id, &payload.join_code).await?;
    let message = match status {
        JoinOutcome::Joined => format!("You joined {}", trip.name),
        JoinOutcome::AlreadyJoined => "You are already a member of this trip".to_owned(),
    };
    Ok(Json(JoinTripResponse {
        status,
        trip_id: trip.id,
        message,
    }))
}

/// The trip page: details, members, itinerary and expenses.
#[utoipa::path(
    get,
    path = "/trip/{trip_id}",
    tag = "Trips",
    params(("trip_id" = i32, Path, description = "Trip id")),
    responses(
        (status = 200, description = "Trip details", body = TripDetailsResponse),
        (status = 303, description = "Not a member, redirect to the dashboard"),
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(context, user), fields(user_id = user.id), err(Debug))]
pub async fn get_trip_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(trip_id): Path<i32>,
) -> Result<Json<TripDetailsResponse>, TripError> {
    let details = get_trip_details(&context.pool, user.id, trip_id).await?;
    Ok(Json(details))
}

/// Promotes a member to organizer or steps an organizer down.
#[utoipa::path(
    put,
    path = "/trip/{trip_id}/members/{user_id}/role",
    tag = "Trips",
    params(
        ("trip_id" = i32, Path, description = "Trip id"),
        ("user_id" = i32, Path, description = "Member whose role changes"),
    ),
    request_body = ChangeRoleRequest,
    responses(
        (status = 204, description = "Role changed"),
        (status = 303, description = "Not an organizer of this trip"),
        (status = 409, description = "A trip must keep at least one organizer"),
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(context, user, payload), fields(user_id = user.id), err(Debug))]
pub async fn change_member_role_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path((trip_id, member_id)): Path<(i32, i32)>,
    Json(payload): Json<ChangeRoleRequest>,
) -> Result<StatusCode, TripError> {
    change_member_role(&context.pool, user.id, trip_id, member_id, payload.role).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Leaves a trip.
#[utoipa::path(
    post,
    path = "/trip/{trip_id}/leave",
    tag = "Trips",
    params(("trip_id" = i32, Path, description = "Trip id")),
    responses(
        (status = 303, description = "Left the trip (or not a member), redirect to the dashboard"),
        (status = 409, description = "A trip must keep at least one organizer"),
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(context, user), fields(user_id = user.id), err(Debug))]
pub async fn leave_trip_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(trip_id): Path<i32>,
) -> Result<Redirect, TripError> {
    leave_trip(&context.pool, user.id, trip_id).await?;
    Ok(Redirect::to(&SafeView::Dashboard.path()))
}
