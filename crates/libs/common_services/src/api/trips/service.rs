use crate::api::access::gate::{SafeView, authorize, ensure};
use crate::api::access::policy::{Access, TripAction};
use crate::api::trips::budget::estimate_budget;
use crate::api::trips::error::TripError;
use crate::api::trips::interfaces::{
    CreateTripRequest, ExpenseView, JoinOutcome, MemberView, TripDetailsResponse,
};
use crate::api::trips::join_code::{generate_join_code, is_well_formed, normalize_join_code};
use crate::api::{non_blank, optional_text};
use crate::database::expense::total_amount;
use crate::database::expense_store::ExpenseStore;
use crate::database::itinerary_store::ItineraryStore;
use crate::database::membership::{Membership, TripRole};
use crate::database::membership_store::MembershipStore;
use crate::database::trip::{Trip, TripSummary};
use crate::database::trip_store::{NewTrip, TripStore};
use color_eyre::eyre::eyre;
use sqlx::PgPool;
use tracing::{info, instrument, warn};
use validator::Validate;

/// Attempts at drawing an unused join code before giving up.
const MAX_JOIN_CODE_ATTEMPTS: usize = 5;

/// Creates a trip with its estimated budget and makes the creator its organizer.
/// The trip and the organizer membership are committed together.
#[instrument(skip(pool, payload), err(Debug))]
pub async fn create_trip(
    pool: &PgPool,
    user_id: i32,
    payload: &CreateTripRequest,
) -> Result<Trip, TripError> {
    payload.validate()?;
    let name = non_blank(&payload.name)
        .ok_or_else(|| TripError::Validation("Trip name is required".to_owned()))?;
    let destination = non_blank(&payload.destination)
        .ok_or_else(|| TripError::Validation("Destination is required".to_owned()))?;
    let estimated_budget = estimate_budget(payload.start_date, payload.end_date).ok_or_else(
        || TripError::Validation("End date must be on or after the start date".to_owned()),
    )?;

    let new_trip = NewTrip {
        name,
        destination,
        start_date: payload.start_date,
        end_date: payload.end_date,
        start_location: optional_text(payload.start_location.as_deref()),
        estimated_budget: Some(estimated_budget),
    };

    let mut tx = pool.begin().await?;
    for attempt in 1..=MAX_JOIN_CODE_ATTEMPTS {
        let join_code = generate_join_code();
        let Some(trip) = TripStore::create_with_code(&mut *tx, &new_trip, &join_code).await?
        else {
            warn!("Join code collision on attempt {attempt}, drawing a new code.");
            continue;
        };
        MembershipStore::add(&mut *tx, trip.id, user_id, TripRole::Organizer).await?;
        tx.commit().await?;

        info!("Created trip {} with organizer {}", trip.id, user_id);
        return Ok(trip);
    }

    Err(TripError::Internal(eyre!(
        "could not allocate an unused join code after {MAX_JOIN_CODE_ATTEMPTS} attempts"
    )))
}

/// Adds the caller to the trip behind `join_code` as a member.
/// Joining a trip twice is a no-op reported as `AlreadyJoined`.
#[instrument(skip(pool), err(Debug))]
pub async fn join_trip(
    pool: &PgPool,
    user_id: i32,
    join_code: &str,
) -> Result<(JoinOutcome, Trip), TripError> {
    let join_code = normalize_join_code(join_code);
    if !is_well_formed(&join_code) {
        return Err(TripError::InvalidJoinCode);
    }

    let mut tx = pool.begin().await?;
    let trip = TripStore::find_by_join_code(&mut *tx, &join_code)
        .await?
        .ok_or(TripError::InvalidJoinCode)?;
    let inserted = MembershipStore::add(&mut *tx, trip.id, user_id, TripRole::Member).await?;
    tx.commit().await?;

    let outcome = if inserted {
        info!("User {} joined trip {}", user_id, trip.id);
        JoinOutcome::Joined
    } else {
        JoinOutcome::AlreadyJoined
    };
    Ok((outcome, trip))
}

/// Trips the user belongs to, for the dashboard.
pub async fn list_user_trips(pool: &PgPool, user_id: i32) -> Result<Vec<TripSummary>, TripError> {
    Ok(TripStore::list_for_user(pool, user_id).await?)
}

/// Assembles the trip page: members split by role, itinerary, expenses and their total.
#[instrument(skip(pool), err(Debug))]
pub async fn get_trip_details(
    pool: &PgPool,
    user_id: i32,
    trip_id: i32,
) -> Result<TripDetailsResponse, TripError> {
    let role = authorize(
        pool,
        trip_id,
        user_id,
        TripAction::ViewTrip,
        SafeView::Dashboard,
    )
    .await?;
    let trip = TripStore::find_by_id(pool, trip_id)
        .await?
        .ok_or(TripError::Denied(SafeView::Dashboard))?;

    let (members_res, itinerary_res, expenses_res) = tokio::join!(
        MembershipStore::list_members(pool, trip_id),
        ItineraryStore::list_for_trip(pool, trip_id),
        ExpenseStore::list_with_authors(pool, trip_id),
    );
    let members = members_res?;
    let expenses = expenses_res?;

    let (organizers, regular): (Vec<_>, Vec<_>) = members
        .iter()
        .partition(|m| m.role == TripRole::Organizer);

    Ok(TripDetailsResponse {
        role,
        organizers: organizers.into_iter().map(MemberView::from).collect(),
        members: regular.into_iter().map(MemberView::from).collect(),
        itinerary: itinerary_res?,
        total_expenses: total_amount(expenses.iter().map(|e| &e.amount)),
        expenses: expenses.iter().map(ExpenseView::from).collect(),
        duration_days: trip.duration_days(),
        trip,
    })
}

/// Number of organizers left if `user_id` ends up with `new_role` (`None` meaning removed).
fn organizers_after(members: &[Membership], user_id: i32, new_role: Option<TripRole>) -> usize {
    members
        .iter()
        .filter_map(|m| {
            if m.user_id == user_id {
                new_role
            } else {
                Some(m.role)
            }
        })
        .filter(|role| *role == TripRole::Organizer)
        .count()
}

fn access_from_rows(members: &[Membership], user_id: i32) -> Access {
    Access::from(members.iter().find(|m| m.user_id == user_id).map(|m| m.role))
}

/// Changes another member's role. Only organizers may do this, and a trip never loses
/// its last organizer.
#[instrument(skip(pool), err(Debug))]
pub async fn change_member_role(
    pool: &PgPool,
    caller_id: i32,
    trip_id: i32,
    target_user_id: i32,
    new_role: TripRole,
) -> Result<(), TripError> {
    let mut tx = pool.begin().await?;
    let members = MembershipStore::lock_members(&mut *tx, trip_id).await?;
    ensure(
        access_from_rows(&members, caller_id),
        caller_id,
        TripAction::ChangeMemberRole,
        SafeView::Dashboard,
    )?;
    if !members.iter().any(|m| m.user_id == target_user_id) {
        return Err(TripError::Denied(SafeView::Trip(trip_id)));
    }
    if organizers_after(&members, target_user_id, Some(new_role)) == 0 {
        return Err(TripError::LastOrganizer);
    }

    MembershipStore::set_role(&mut *tx, trip_id, target_user_id, new_role).await?;
    tx.commit().await?;
    info!("User {target_user_id} is now {new_role} of trip {trip_id}");
    Ok(())
}

/// Removes the caller from a trip, unless they are its last organizer.
#[instrument(skip(pool), err(Debug))]
pub async fn leave_trip(pool: &PgPool, user_id: i32, trip_id: i32) -> Result<(), TripError> {
    let mut tx = pool.begin().await?;
    let members = MembershipStore::lock_members(&mut *tx, trip_id).await?;
    ensure(
        access_from_rows(&members, user_id),
        user_id,
        TripAction::LeaveTrip,
        SafeView::Dashboard,
    )?;
    if organizers_after(&members, user_id, None) == 0 {
        return Err(TripError::LastOrganizer);
    }

    MembershipStore::remove(&mut *tx, trip_id, user_id).await?;
    tx.commit().await?;
    info!("User {user_id} left trip {trip_id}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn membership(user_id: i32, role: TripRole) -> Membership {
        Membership {
            trip_id: 1,
            user_id,
            role,
            joined_at: Utc::now(),
        }
    }

    #[test]
    fn sole_organizer_cannot_step_down_or_leave() {
        let members = [
            membership(1, TripRole::Organizer),
            membership(2, TripRole::Member),
        ];

        assert_eq!(organizers_after(&members, 1, Some(TripRole::Member)), 0);
        assert_eq!(organizers_after(&members, 1, None), 0);
    }

    #[test]
    fn promoting_and_removing_members_keeps_organizers() {
        let members = [
            membership(1, TripRole::Organizer),
            membership(2, TripRole::Member),
        ];

        assert_eq!(organizers_after(&members, 2, Some(TripRole::Organizer)), 2);
        assert_eq!(organizers_after(&members, 2, None), 1);
    }

    #[test]
    fn organizer_may_step_down_when_another_remains() {
        let members = [
            membership(1, TripRole::Organizer),
            membership(2, TripRole::Organizer),
        ];
        assert_eq!(organizers_after(&members, 1, Some(TripRole::Member)), 1);
    }

    #[test]
    fn access_is_read_from_locked_rows() {
        let members = [membership(1, TripRole::Organizer)];
        assert_eq!(
            access_from_rows(&members, 1),
            Access::Granted(TripRole::Organizer)
        );
        assert_eq!(access_from_rows(&members, 9), Access::NotAMember);
    }
}
