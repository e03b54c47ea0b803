//! Outbound calls behind the trip map: geocoding, routing and AI recommendations.
//! Every call has a deterministic fallback, so the map view never fails because of them.

mod error;
mod geocoding;
mod recommendations;
mod routing;

pub use error::*;
pub use geocoding::*;
pub use recommendations::*;
pub use routing::*;

use app_state::MapsSettings;
use bon::bon;
use reqwest::Response;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct MapsClient {
    http: reqwest::Client,
    geocoding_url: String,
    routing_url: String,
    llm_url: String,
    llm_model: String,
    api_key: Option<String>,
}

#[bon]
impl MapsClient {
    #[builder(start_fn = with_settings)]
    pub fn new(
        #[builder(start_fn)] settings: &MapsSettings,
        api_key: Option<String>,
    ) -> MapsResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(Duration::from_secs(settings.request_timeout_seconds))
            .build()?;
        Ok(Self {
            http,
            geocoding_url: settings.geocoding_url.clone(),
            routing_url: settings.routing_url.trim_end_matches('/').to_owned(),
            llm_url: settings.llm_url.trim_end_matches('/').to_owned(),
            llm_model: settings.llm_model.clone(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        })
    }
}

/// Turns a non-success status into `MapsError::Api`, keeping the body for the logs.
async fn ensure_success(response: Response) -> MapsResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(MapsError::Api { status, body })
}
