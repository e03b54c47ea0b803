use crate::api::access::policy::{Access, TripAction, is_permitted};
use crate::database::DbError;
use crate::database::membership::TripRole;
use crate::database::membership_store::MembershipStore;
use sqlx::{Executor, Postgres};
use thiserror::Error;
use tracing::{debug, instrument};

/// View a denied caller is sent back to. It never reveals why they were denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafeView {
    Dashboard,
    Trip(i32),
    Gallery(i32),
}

impl SafeView {
    #[must_use]
    pub fn path(self) -> String {
        match self {
            Self::Dashboard => "/dashboard".to_owned(),
            Self::Trip(trip_id) => format!("/trip/{trip_id}"),
            Self::Gallery(trip_id) => format!("/trip/{trip_id}/gallery"),
        }
    }
}

#[derive(Debug, Error)]
pub enum AccessError {
    /// Not a member, insufficient role, not the author, or the resource does not exist.
    #[error("access denied")]
    Denied(SafeView),

    #[error(transparent)]
    Database(#[from] DbError),
}

/// Looks up the caller's membership of a trip.
#[instrument(skip(executor))]
pub async fn resolve_access(
    executor: impl Executor<'_, Database = Postgres>,
    trip_id: i32,
    user_id: i32,
) -> Result<Access, DbError> {
    let role = MembershipStore::find_role(executor, trip_id, user_id).await?;
    Ok(Access::from(role))
}

/// Checks already-resolved access against an action.
///
/// # Errors
///
/// * `AccessError::Denied` when the policy does not allow the action.
pub fn ensure(
    access: Access,
    caller_id: i32,
    action: TripAction,
    on_denied: SafeView,
) -> Result<TripRole, AccessError> {
    match access.role() {
        Some(role) if is_permitted(access, caller_id, action) => Ok(role),
        _ => {
            debug!(caller_id, ?action, ?access, "trip action denied");
            Err(AccessError::Denied(on_denied))
        }
    }
}

/// Checks only that the caller belongs to the trip, whatever their role.
///
/// # Errors
///
/// * `AccessError::Denied` for non-members.
pub fn ensure_member(access: Access, on_denied: SafeView) -> Result<TripRole, AccessError> {
    access.role().ok_or(AccessError::Denied(on_denied))
}

/// Resolves the caller's membership and checks it against the action in one step.
///
/// # Errors
///
/// * `AccessError::Denied` when the caller is not a member or lacks the role.
/// * `AccessError::Database` if the lookup fails.
pub async fn authorize(
    executor: impl Executor<'_, Database = Postgres>,
    trip_id: i32,
    caller_id: i32,
    action: TripAction,
    on_denied: SafeView,
) -> Result<TripRole, AccessError> {
    let access = resolve_access(executor, trip_id, caller_id).await?;
    ensure(access, caller_id, action, on_denied)
}
