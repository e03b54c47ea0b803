use crate::api_state::ApiContext;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use common_services::api::expenses::interfaces::CreateExpenseRequest;
use common_services::api::expenses::service::{add_expense, delete_expense};
use common_services::api::trips::error::TripError;
use common_services::database::app_user::User;
use common_services::database::expense::Expense;
use tracing::instrument;

/// Records an expense paid by the signed-in member.
#[utoipa::path(
    post,
    path = "/trip/{trip_id}/expenses",
    tag = "Expenses",
    params(("trip_id" = i32, Path, description = "Trip id")),
    request_body = CreateExpenseRequest,
    responses(
        (status = 201, description = "Expense added", body = Expense),
        (status = 400, description = "Invalid input"),
        (status = 303, description = "Not a member, redirect to the trip page"),
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(context, user, payload), fields(user_id = user.id), err(Debug))]
pub async fn add_expense_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path(trip_id): Path<i32>,
    Json(payload): Json<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<Expense>), TripError> {
    let expense = add_expense(&context.pool, user.id, trip_id, &payload).await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

/// Deletes an expense the signed-in member added.
#[utoipa::path(
    delete,
    path = "/trip/{trip_id}/expenses/{expense_id}",
    tag = "Expenses",
    params(
        ("trip_id" = i32, Path, description = "Trip id"),
        ("expense_id" = i32, Path, description = "Expense id"),
    ),
    responses(
        (status = 204, description = "Expense deleted"),
        (status = 303, description = "Not the author or no such expense, redirect to the trip page"),
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
#[instrument(skip(context, user), fields(user_id = user.id), err(Debug))]
pub async fn delete_expense_handler(
    State(context): State<ApiContext>,
    Extension(user): Extension<User>,
    Path((trip_id, expense_id)): Path<(i32, i32)>,
) -> Result<StatusCode, TripError> {
    delete_expense(&context.pool, user.id, trip_id, expense_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
