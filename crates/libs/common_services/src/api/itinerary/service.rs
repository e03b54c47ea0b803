use crate::api::access::gate::{SafeView, authorize};
use crate::api::access::policy::TripAction;
use crate::api::itinerary::interfaces::CreateItineraryItemRequest;
use crate::api::trips::error::TripError;
use crate::api::{non_blank, optional_text};
use crate::database::itinerary_item::ItineraryItem;
use crate::database::itinerary_store::{ItineraryStore, NewItineraryItem};
use sqlx::PgPool;
use tracing::instrument;
use validator::Validate;

/// Adds an entry to the trip's itinerary. Organizers only.
#[instrument(skip(pool, payload), err(Debug))]
pub async fn add_itinerary_item(
    pool: &PgPool,
    user_id: i32,
    trip_id: i32,
    payload: &CreateItineraryItemRequest,
) -> Result<ItineraryItem, TripError> {
    authorize(
        pool,
        trip_id,
        user_id,
        TripAction::CreateItineraryItem,
        SafeView::Trip(trip_id),
    )
    .await?;

    payload.validate()?;
    let activity = non_blank(&payload.activity)
        .ok_or_else(|| TripError::Validation("Activity is required".to_owned()))?;

    let item = NewItineraryItem {
        day_number: payload.day_number,
        time: optional_text(payload.time.as_deref()),
        activity,
        location: optional_text(payload.location.as_deref()),
        description: optional_text(payload.description.as_deref()),
    };
    Ok(ItineraryStore::create(pool, trip_id, &item).await?)
}

/// Removes an itinerary entry. Organizers only; the entry must belong to the trip.
#[instrument(skip(pool), err(Debug))]
pub async fn delete_itinerary_item(
    pool: &PgPool,
    user_id: i32,
    trip_id: i32,
    item_id: i32,
) -> Result<(), TripError> {
    authorize(
        pool,
        trip_id,
        user_id,
        TripAction::DeleteItineraryItem,
        SafeView::Trip(trip_id),
    )
    .await?;

    let deleted = ItineraryStore::delete_in_trip(pool, trip_id, item_id).await?;
    if !deleted {
        return Err(TripError::Denied(SafeView::Trip(trip_id)));
    }
    Ok(())
}
