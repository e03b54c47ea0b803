use crate::api::access::gate::{SafeView, authorize};
use crate::api::access::policy::TripAction;
use crate::api::maps::interfaces::{MapMarker, TripMapResponse, map_view};
use crate::api::optional_text;
use crate::api::trips::error::TripError;
use crate::database::trip_store::TripStore;
use crate::maps_client::{DEFAULT_CENTER, MapsClient};
use sqlx::PgPool;
use tracing::instrument;

/// Map data for a trip: geocoded endpoints, the route between them and AI recommendations.
/// Outbound failures degrade to fallbacks and never fail the request.
#[instrument(skip(pool, maps), err(Debug))]
pub async fn get_trip_map(
    pool: &PgPool,
    maps: &MapsClient,
    user_id: i32,
    trip_id: i32,
) -> Result<TripMapResponse, TripError> {
    authorize(
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

    let start_location = optional_text(trip.start_location.as_deref());
    let (destination, start, recommendations) = tokio::join!(
        maps.geocode(&trip.destination),
        async {
            match start_location {
                Some(place) => maps.geocode(place).await,
                None => None,
            }
        },
        maps.recommendations(&trip.destination),
    );
    let destination = destination.unwrap_or(DEFAULT_CENTER);

    let route = match start {
        Some(start) => maps.route(start, destination).await,
        None => Vec::new(),
    };
    let (center, zoom) = map_view(destination, start);

    Ok(TripMapResponse {
        trip_id: trip.id,
        destination: MapMarker {
            label: trip.destination.clone(),
            position: destination,
        },
        start: start.zip(start_location).map(|(position, label)| MapMarker {
            label: label.to_owned(),
            position,
        }),
        route,
        center,
        zoom,
        recommendations,
    })
}
