use crate::runner::context::context_utils::{
    create_test_database, create_test_settings, force_drop_db,
};
use app_state::{AppSettings, load_settings_from_path};
use color_eyre::eyre::{Result, eyre};
use reqwest::Client;
use reqwest::redirect::Policy;
use sqlx::PgPool;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// A running API on its own database and uploads folder, shared by every test in the suite.
pub struct TestContext {
    pub pool: PgPool,
    pub settings: AppSettings,
    db_name: String,
    management_pool: PgPool,
    /// Removed with the context.
    _uploads_dir: TempDir,
    api_handle: JoinHandle<()>,
}

impl TestContext {
    pub async fn new() -> Result<Self> {
        info!("Setting up test environment...");

        let settings_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("assets/settings.yaml")
            .canonicalize()?;
        let base_settings = load_settings_from_path(&settings_path, false)?;

        let db_name = format!("trip_planner_test_{}", std::process::id());
        let (settings, uploads_dir) = create_test_settings(&db_name, &base_settings)?;
        let (pool, management_pool) = create_test_database(&base_settings, &db_name).await?;

        let api_handle = Self::spawn_api(&pool, &settings);
        Self::wait_for_healthy_api(&settings).await?;

        info!("Test environment is ready.");
        Ok(Self {
            pool,
            settings,
            db_name,
            management_pool,
            _uploads_dir: uploads_dir,
            api_handle,
        })
    }

    fn spawn_api(pool: &PgPool, settings: &AppSettings) -> JoinHandle<()> {
        let api_pool = pool.clone();
        let api_settings = settings.clone();
        tokio::spawn(async move {
            if let Err(e) = api::serve(api_pool, api_settings).await {
                error!("API server failed: {e:?}");
            }
        })
    }

    /// Polls `/health` until the server answers or the attempts run out.
    async fn wait_for_healthy_api(settings: &AppSettings) -> Result<()> {
        let http_client = Client::new();
        let health_url = format!("{}/health", settings.api.public_url);
        for attempt in 1..=20 {
            match http_client.get(&health_url).send().await {
                Ok(response) if response.status().is_success() => {
                    info!("API is healthy after {attempt} attempt(s).");
                    return Ok(());
                }
                Ok(response) => {
                    warn!("Health check returned {}", response.status());
                }
                Err(e) => {
                    warn!("Health check attempt {attempt} failed: {e}");
                }
            }
            tokio::time::sleep(Duration::from_millis(500)).await;
        }
        Err(eyre!("API did not become healthy within the timeout period."))
    }

    /// Absolute url for an api path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.settings.api.public_url)
    }

    /// A fresh browser-like client: keeps its own cookies and does not follow redirects,
    /// so tests can assert where the server sends them.
    pub fn client() -> Result<Client> {
        Ok(Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .build()?)
    }

    /// Stops the server and drops the test database.
    pub async fn teardown(self) -> Result<()> {
        self.api_handle.abort();
        self.pool.close().await;
        info!("Dropping test database: {}", self.db_name);
        force_drop_db(&self.management_pool, &self.db_name).await?;
        info!("Teardown complete.");
        Ok(())
    }
}
