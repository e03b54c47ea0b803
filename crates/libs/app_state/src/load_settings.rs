use crate::{AppSettings, RawSettings};
use color_eyre::eyre::Result;
use config::{Config, Environment, File, FileFormat};
use std::path::Path;
use tracing::info;

/// Loads `config/settings.yaml`, overridden by `APP__*` environment variables (and `.env`).
pub fn load_app_settings() -> Result<AppSettings> {
    // Need to load from dotenv to get it to overwrite the db url from env.
    dotenv::from_path(".env").ok();
    let config_path = Path::new("config/settings.yaml").canonicalize()?;
    load_settings_from_path(&config_path, true)
}

/// Loads settings from a specific yaml file, optionally layering environment variables on top.
pub fn load_settings_from_path(path: &Path, use_env: bool) -> Result<AppSettings> {
    info!("Loading settings from {}", path.display());
    let mut builder = Config::builder().add_source(File::from(path));
    if use_env {
        builder = builder.add_source(
            Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        );
    }

    let raw_settings = builder.build()?.try_deserialize::<RawSettings>()?;
    AppSettings::try_from(raw_settings)
}

/// Loads settings from an in-memory yaml document.
pub fn load_settings_from_str(yaml: &str) -> Result<AppSettings> {
    let raw_settings = Config::builder()
        .add_source(File::from_str(yaml, FileFormat::Yaml))
        .build()?
        .try_deserialize::<RawSettings>()?;
    AppSettings::try_from(raw_settings)
}
