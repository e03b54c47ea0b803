use crate::{
    ApiSettings, AuthSettings, DatabaseSettings, EmailSettings, Environment, ExportSettings,
    LoggingSettings, MapsSettings, RateLimitingSettings, RawSettings, SecretSettings,
};
use color_eyre::eyre::{Report, bail};
use std::path::{Path, PathBuf, absolute};

const HMAC_ALGORITHMS: [&str; 3] = ["HS256", "HS384", "HS512"];

/// Validated, immutable application settings. Built once at startup and handed to every
/// component that needs configuration.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub environment: Environment,
    pub api: ApiSettings,
    pub secrets: SecretSettings,
    pub auth: AuthSettings,
    pub database: DatabaseSettings,
    pub uploads: UploadSettings,
    pub email: EmailSettings,
    pub maps: MapsSettings,
    pub rate_limiting: RateLimitingSettings,
    pub logging: LoggingSettings,
    pub export: ExportSettings,
}

/// Upload limits with an absolute folder and normalized (lowercase, dotless) extensions.
#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub folder: PathBuf,
    pub max_upload_bytes: usize,
    pub image_extensions: Vec<String>,
    pub video_extensions: Vec<String>,
}

impl TryFrom<RawSettings> for AppSettings {
    type Error = Report;

    fn try_from(raw: RawSettings) -> Result<Self, Self::Error> {
        if raw.secrets.jwt.trim().is_empty() {
            bail!("secrets.jwt must not be empty");
        }
        if !HMAC_ALGORITHMS.contains(&raw.auth.token_algorithm.as_str()) {
            bail!(
                "auth.token_algorithm must be one of {HMAC_ALGORITHMS:?}, got {}",
                raw.auth.token_algorithm
            );
        }
        if raw.auth.access_token_expiry_minutes <= 0 {
            bail!("auth.access_token_expiry_minutes must be positive");
        }
        if raw.uploads.max_upload_bytes == 0 {
            bail!("uploads.max_upload_bytes must be positive");
        }

        let uploads = UploadSettings {
            folder: absolute(&raw.uploads.folder)?,
            max_upload_bytes: raw.uploads.max_upload_bytes,
            image_extensions: normalize_extensions(&raw.uploads.image_extensions),
            video_extensions: normalize_extensions(&raw.uploads.video_extensions),
        };

        Ok(Self {
            environment: raw.environment,
            api: raw.api,
            secrets: raw.secrets,
            auth: raw.auth,
            database: raw.database,
            uploads,
            email: raw.email,
            maps: raw.maps,
            rate_limiting: raw.rate_limiting,
            logging: raw.logging,
            export: raw.export,
        })
    }
}

impl AppSettings {
    #[must_use]
    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}

impl UploadSettings {
    #[must_use]
    pub fn is_image_file(&self, file: &Path) -> bool {
        extension_of(file).is_some_and(|ext| self.image_extensions.contains(&ext))
    }

    #[must_use]
    pub fn is_video_file(&self, file: &Path) -> bool {
        extension_of(file).is_some_and(|ext| self.video_extensions.contains(&ext))
    }

    /// Folder holding the uploads of one trip.
    #[must_use]
    pub fn trip_folder(&self, trip_id: i32) -> PathBuf {
        self.folder.join(trip_id.to_string())
    }
}

/// Lowercase extension of a path, without the leading dot.
#[must_use]
pub fn extension_of(file: &Path) -> Option<String> {
    file.extension().map(|e| e.to_string_lossy().to_lowercase())
}

fn normalize_extensions(extensions: &[String]) -> Vec<String> {
    extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}
