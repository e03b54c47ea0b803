use serde::Deserialize;
use std::path::PathBuf;

/// Settings exactly as they appear in `settings.yaml` / the environment, before validation.
#[derive(Debug, Deserialize, Clone)]
pub struct RawSettings {
    pub environment: Environment,
    pub api: ApiSettings,
    pub secrets: SecretSettings,
    pub auth: AuthSettings,
    pub database: DatabaseSettings,
    pub uploads: RawUploadSettings,
    pub email: EmailSettings,
    pub maps: MapsSettings,
    pub rate_limiting: RateLimitingSettings,
    pub logging: LoggingSettings,
    #[serde(default)]
    pub export: ExportSettings,
}

/// Deployment mode. Development mounts the API docs and logs more verbosely.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

/// Configuration for the API server.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub public_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SecretSettings {
    pub jwt: String,
    pub database_url: String,
    /// Key for the recommendation model. Recommendations are skipped without it.
    pub maps_api_key: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthSettings {
    /// One of `HS256`, `HS384`, `HS512`.
    pub token_algorithm: String,
    pub access_token_expiry_minutes: i64,
    /// Marks the session cookie `Secure`. Only disable for plain-http local development.
    pub secure_cookies: bool,
}

/// Database connection pool configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub max_connections: u32,
    pub min_connections: u32,
    pub max_lifetime_seconds: u64,
    pub idle_timeout_seconds: u64,
    pub acquire_timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RawUploadSettings {
    pub folder: PathBuf,
    pub max_upload_bytes: usize,
    pub image_extensions: Vec<String>,
    pub video_extensions: Vec<String>,
}

/// Outbound mail settings. Read and validated, but nothing sends mail yet.
#[derive(Debug, Deserialize, Clone)]
pub struct EmailSettings {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_user: String,
    pub smtp_password: String,
    pub from_address: String,
}

/// Endpoints for the geocoding, routing and recommendation services behind the map view.
#[derive(Debug, Deserialize, Clone)]
pub struct MapsSettings {
    pub geocoding_url: String,
    pub routing_url: String,
    /// Base url of an OpenAI-compatible chat completions api.
    pub llm_url: String,
    pub llm_model: String,
    pub user_agent: String,
    pub request_timeout_seconds: u64,
}

/// Report rendering. DejaVu Sans is bundled; `fallback_fonts` lists extra TrueType files tried
/// in order for characters it lacks, e.g. Noto Sans Devanagari for names in Hindi.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ExportSettings {
    #[serde(default)]
    pub fallback_fonts: Vec<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RateLimitingSettings {
    pub enabled: bool,
    pub per_second: u64,
    pub burst_size: u32,
}

/// Logging configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}
