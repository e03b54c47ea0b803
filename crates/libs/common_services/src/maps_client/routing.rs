use crate::maps_client::{Coordinates, MapsClient, MapsError, MapsResult, ensure_success};
use serde::Deserialize;
use tracing::{instrument, warn};

#[derive(Deserialize)]
struct RouteResponse {
    code: String,
    #[serde(default)]
    routes: Vec<Route>,
}

#[derive(Deserialize)]
struct Route {
    geometry: Geometry,
}

/// GeoJSON line, positions as `[lon, lat]`.
#[derive(Deserialize)]
struct Geometry {
    coordinates: Vec<[f64; 2]>,
}

/// A route that simply connects the two endpoints.
#[must_use]
pub fn straight_line(from: Coordinates, to: Coordinates) -> Vec<Coordinates> {
    vec![from, to]
}

impl MapsClient {
    /// Driving route from the OSRM api.
    pub async fn fetch_route(
        &self,
        from: Coordinates,
        to: Coordinates,
    ) -> MapsResult<Vec<Coordinates>> {
        let url = format!(
            "{}/{},{};{},{}",
            self.routing_url, from.lon, from.lat, to.lon, to.lat
        );
        let response = self
            .http
            .get(url)
            .query(&[("overview", "full"), ("geometries", "geojson")])
            .send()
            .await?;
        let body: RouteResponse = ensure_success(response).await?.json().await?;
        if body.code != "Ok" {
            return Err(MapsError::UnexpectedResponse(format!(
                "routing returned code {}",
                body.code
            )));
        }

        let route = body
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| MapsError::UnexpectedResponse("no route found".to_owned()))?;
        Ok(route
            .geometry
            .coordinates
            .into_iter()
            .map(|[lon, lat]| Coordinates::new(lat, lon))
            .collect())
    }

    /// Route between two points, or a straight line when routing is unavailable.
    #[instrument(skip(self))]
    pub async fn route(&self, from: Coordinates, to: Coordinates) -> Vec<Coordinates> {
        match self.fetch_route(from, to).await {
            Ok(points) if !points.is_empty() => points,
            Ok(_) => straight_line(from, to),
            Err(e) => {
                warn!("Routing failed, drawing a straight line: {e}");
                straight_line(from, to)
            }
        }
    }
}
