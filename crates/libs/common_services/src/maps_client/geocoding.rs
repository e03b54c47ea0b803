use crate::maps_client::{MapsClient, MapsError, MapsResult, ensure_success};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.lat + other.lat) / 2.0, (self.lon + other.lon) / 2.0)
    }
}

/// Centre of India, used when a destination cannot be located at all.
pub const DEFAULT_CENTER: Coordinates = Coordinates::new(20.5937, 78.9629);

/// Known places, matched by case-insensitive substring when the geocoder is unavailable.
const FALLBACK_CITIES: [(&str, Coordinates); 9] = [
    ("goa", Coordinates::new(15.2993, 74.1240)),
    ("delhi", Coordinates::new(28.6139, 77.2090)),
    ("mumbai", Coordinates::new(19.0760, 72.8777)),
    ("jaipur", Coordinates::new(26.9124, 75.7873)),
    ("bangalore", Coordinates::new(12.9716, 77.5946)),
    ("kerala", Coordinates::new(10.8505, 76.2711)),
    ("chennai", Coordinates::new(13.0827, 80.2707)),
    ("kolkata", Coordinates::new(22.5726, 88.3639)),
    ("hyderabad", Coordinates::new(17.3850, 78.4867)),
];

#[must_use]
pub fn fallback_coordinates(query: &str) -> Option<Coordinates> {
    let query = query.trim().to_lowercase();
    FALLBACK_CITIES
        .iter()
        .find(|(city, _)| query.contains(city))
        .map(|(_, coords)| *coords)
}

#[derive(Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

impl MapsClient {
    /// Looks a place up with the Nominatim search api.
    pub async fn search_place(&self, query: &str) -> MapsResult<Option<Coordinates>> {
        let response = self
            .http
            .get(&self.geocoding_url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await?;
        let places: Vec<Place> = ensure_success(response).await?.json().await?;

        places
            .first()
            .map(|place| {
                let lat = place.lat.parse::<f64>();
                let lon = place.lon.parse::<f64>();
                match (lat, lon) {
                    (Ok(lat), Ok(lon)) => Ok(Coordinates::new(lat, lon)),
                    _ => Err(MapsError::UnexpectedResponse(format!(
                        "unparseable coordinates {}, {}",
                        place.lat, place.lon
                    ))),
                }
            })
            .transpose()
    }

    /// Coordinates of a place, falling back to the built-in city table.
    #[instrument(skip(self))]
    pub async fn geocode(&self, query: &str) -> Option<Coordinates> {
        match self.search_place(query).await {
            Ok(Some(coords)) => return Some(coords),
            Ok(None) => {}
            Err(e) => warn!("Geocoding failed for {query}: {e}"),
        }
        fallback_coordinates(query)
    }
}
