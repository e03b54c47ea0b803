use app_state::{AppSettings, UploadSettings};
use axum::extract::FromRef;
use common_services::api::export::pdf::ReportRenderer;
use common_services::maps_client::MapsClient;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct ApiContext {
    pub pool: PgPool,
    pub settings: AppSettings,
    pub maps_client: MapsClient,
    pub report_renderer: Arc<dyn ReportRenderer>,
}

// Lets extractors and middleware pull out only the part of the state they need.
impl FromRef<ApiContext> for PgPool {
    fn from_ref(state: &ApiContext) -> Self {
        state.pool.clone()
    }
}

impl FromRef<ApiContext> for AppSettings {
    fn from_ref(state: &ApiContext) -> Self {
        state.settings.clone()
    }
}

impl FromRef<ApiContext> for UploadSettings {
    fn from_ref(state: &ApiContext) -> Self {
        state.settings.uploads.clone()
    }
}

impl FromRef<ApiContext> for MapsClient {
    fn from_ref(state: &ApiContext) -> Self {
        state.maps_client.clone()
    }
}
