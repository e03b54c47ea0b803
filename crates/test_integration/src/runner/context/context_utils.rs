use app_state::AppSettings;
use color_eyre::eyre::{Result, eyre};
use common_services::database::{get_db_pool, run_migrations};
use sqlx::PgPool;
use std::net::TcpListener;
use tempfile::TempDir;
use tracing::info;
use url::Url;

/// Asks the OS for a port nobody is listening on.
pub fn get_free_port() -> Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}

/// Points `database_url` at another database on the same server.
pub fn database_url_for(database_url: &str, db_name: &str) -> Result<String> {
    let mut url = Url::parse(database_url)?;
    url.set_path(db_name);
    Ok(url.to_string())
}

/// Derives the settings for one run: its own database, port and uploads folder.
pub fn create_test_settings(
    db_name: &str,
    base_settings: &AppSettings,
) -> Result<(AppSettings, TempDir)> {
    let mut settings = base_settings.clone();

    let port = get_free_port()?;
    settings.api.port = port;
    settings.api.public_url = format!("http://{}:{port}", settings.api.host);
    settings.secrets.database_url = database_url_for(&base_settings.secrets.database_url, db_name)?;

    let uploads_dir = tempfile::tempdir()?;
    settings.uploads.folder = uploads_dir.path().to_path_buf();

    Ok((settings, uploads_dir))
}

/// Recreates `db_name` from scratch and migrates it.
///
/// Returns the pool for the new database and a management pool on the server's
/// `postgres` database, which is needed to drop it again afterwards.
pub async fn create_test_database(
    settings: &AppSettings,
    db_name: &str,
) -> Result<(PgPool, PgPool)> {
    if !db_name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(eyre!("Refusing to create database with name {db_name:?}"));
    }

    let management_url = database_url_for(&settings.secrets.database_url, "postgres")?;
    let management_pool = get_db_pool(&management_url, &settings.database).await?;

    force_drop_db(&management_pool, db_name).await?;
    info!("Creating test database: {db_name}");
    sqlx::query(&format!("CREATE DATABASE \"{db_name}\""))
        .execute(&management_pool)
        .await?;

    let db_url = database_url_for(&settings.secrets.database_url, db_name)?;
    let pool = get_db_pool(&db_url, &settings.database).await?;
    run_migrations(&pool).await?;

    Ok((pool, management_pool))
}

/// Drops `db_name`, disconnecting anyone still attached to it.
pub async fn force_drop_db(management_pool: &PgPool, db_name: &str) -> Result<()> {
    sqlx::query(&format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE)"))
        .execute(management_pool)
        .await?;
    Ok(())
}
