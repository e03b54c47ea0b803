use app_state::DatabaseSettings;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Pool, Postgres};
use std::time::Duration;
use tracing::info;

/// Build the connection pool from the configured url and pool limits.
/// # Errors
///
/// * `PgPoolOptions::connect` can return an error if the database connection fails.
pub async fn get_db_pool(
    database_url: &str,
    db_settings: &DatabaseSettings,
) -> color_eyre::Result<Pool<Postgres>> {
    info!("Connecting to database.");
    let pool = PgPoolOptions::new()
        .max_connections(db_settings.max_connections)
        .min_connections(db_settings.min_connections)
        .max_lifetime(Duration::from_secs(db_settings.max_lifetime_seconds))
        .idle_timeout(Duration::from_secs(db_settings.idle_timeout_seconds))
        .acquire_timeout(Duration::from_secs(db_settings.acquire_timeout_seconds))
        .test_before_acquire(true)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Apply any pending migrations from the workspace `migrations` folder.
/// # Errors
///
/// * `sqlx::migrate` can return an error if a migration fails or was modified after being applied.
pub async fn run_migrations(pool: &PgPool) -> color_eyre::Result<()> {
    info!("Running database migrations.");
    sqlx::migrate!("../../../migrations").run(pool).await?;
    Ok(())
}
