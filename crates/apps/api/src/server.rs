use crate::api_state::ApiContext;
use crate::create_router;
use app_state::AppSettings;
use axum::http::Method;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use common_services::api::export::pdf::PdfReportRenderer;
use common_services::maps_client::MapsClient;
use http::{HeaderValue, header};
use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::fs;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub async fn serve(pool: PgPool, settings: AppSettings) -> Result<()> {
    // --- Server Startup ---
    info!("🚀 Initializing server...");
    let maps_client = MapsClient::with_settings(&settings.maps)
        .maybe_api_key(settings.secrets.maps_api_key.clone())
        .build()?;
    fs::create_dir_all(&settings.uploads.folder).await?;

    let api_state = ApiContext {
        pool,
        settings: settings.clone(),
        maps_client,
        report_renderer: Arc::new(PdfReportRenderer::from_settings(&settings.export)?),
    };

    // --- CORS Configuration ---
    let allowed_origins: Vec<HeaderValue> = settings
        .api
        .allowed_origins
        .iter()
        .filter_map(|s| match s.parse() {
            Ok(hv) => Some(hv),
            Err(e) => {
                error!("Invalid CORS origin configured: {} - Error: {}", s, e);
                None
            }
        })
        .collect();

    // The session travels in a cookie, so credentials are allowed and methods are explicit.
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_origin(allowed_origins)
        .allow_credentials(true)
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
            header::USER_AGENT,
            header::CACHE_CONTROL,
            header::PRAGMA,
        ]);

    // --- Create Router ---
    let app = create_router(api_state)
        .layer(TraceLayer::new_for_http().on_request(()))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(SetSensitiveRequestHeadersLayer::new([
            header::AUTHORIZATION,
            header::COOKIE,
        ]));

    let addr: SocketAddr = format!("{}:{}", settings.api.host, settings.api.port)
        .parse()
        .map_err(|e| eyre!("Invalid address: {}", e))?;
    let listener = TcpListener::bind(addr).await?;

    info!("🐸 Server listening on http://{}", listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}
