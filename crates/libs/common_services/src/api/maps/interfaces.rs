use crate::maps_client::{Coordinates, Recommendations};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Map zoom when both the start and the destination are shown.
pub const ROUTE_ZOOM: u8 = 6;
/// Map zoom when only the destination is shown.
pub const DESTINATION_ZOOM: u8 = 12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MapMarker {
    pub label: String,
    pub position: Coordinates,
}

/// Everything the map page draws for a trip.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TripMapResponse {
    pub trip_id: i32,
    pub destination: MapMarker,
    pub start: Option<MapMarker>,
    /// Route from the start to the destination, empty without a start location.
    pub route: Vec<Coordinates>,
    pub center: Coordinates,
    pub zoom: u8,
    pub recommendations: Recommendations,
}

/// Centre and zoom of the map: the midpoint of start and destination, or the destination alone.
#[must_use]
pub fn map_view(destination: Coordinates, start: Option<Coordinates>) -> (Coordinates, u8) {
    match start {
        Some(start) => (start.midpoint(destination), ROUTE_ZOOM),
        None => (destination, DESTINATION_ZOOM),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_centres_between_start_and_destination() {
        let destination = Coordinates::new(15.0, 74.0);
        let start = Coordinates::new(19.0, 72.0);

        assert_eq!(
            map_view(destination, Some(start)),
            (Coordinates::new(17.0, 73.0), ROUTE_ZOOM)
        );
        assert_eq!(map_view(destination, None), (destination, DESTINATION_ZOOM));
    }
}
