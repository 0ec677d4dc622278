use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;
use tracing::info;

use super::SqliteConfig;
use crate::common::{DatabaseError, RetryConfig, retry, retry_with_backoff};

/// Connect to a SQLite database with the default pool settings
///
/// # Example
/// ```ignore
/// use database::sqlite::connect;
///
/// let pool = connect("sqlite://catalog.db").await?;
/// ```
pub async fn connect(database_url: &str) -> Result<SqlitePool, DatabaseError> {
    connect_from_config(&SqliteConfig::new(database_url)).await
}

/// Connect using a SqliteConfig
///
/// # Example
/// ```ignore
/// use database::sqlite::{SqliteConfig, connect_from_config};
/// use core_config::FromEnv;
///
/// let config = SqliteConfig::from_env()?;
/// let pool = connect_from_config(&config).await?;
/// ```
pub async fn connect_from_config(config: &SqliteConfig) -> Result<SqlitePool, DatabaseError> {
    let options = config.connect_options()?;
    let pool = config.pool_options().connect_with(options).await?;

    info!(
        max_connections = config.max_connections,
        in_memory = config.is_in_memory(),
        "Successfully connected to SQLite database"
    );

    Ok(pool)
}

/// Connect from config with automatic retry on failure
///
/// Uses exponential backoff with jitter. Configuration errors are retried as
/// well; they fail fast enough that the extra attempts are harmless.
///
/// # Example
/// ```ignore
/// use database::sqlite::{SqliteConfig, connect_from_config_with_retry};
/// use database::common::RetryConfig;
///
/// let config = SqliteConfig::from_env()?;
/// let pool = connect_from_config_with_retry(&config, Some(RetryConfig::new().with_max_retries(5))).await?;
/// ```
pub async fn connect_from_config_with_retry(
    config: &SqliteConfig,
    retry_config: Option<RetryConfig>,
) -> Result<SqlitePool, DatabaseError> {
    match retry_config {
        Some(retry_config) => retry_with_backoff(|| connect_from_config(config), retry_config).await,
        None => retry(|| connect_from_config(config)).await,
    }
}

/// Apply every pending migration from `migrator`
///
/// The migration files live with the crate that owns the schema; this only
/// runs them.
///
/// # Example
/// ```ignore
/// use database::sqlite::run_migrations;
///
/// run_migrations(&pool, &domain_products::MIGRATOR, "catalog_api").await?;
/// ```
pub async fn run_migrations(
    pool: &SqlitePool,
    migrator: &Migrator,
    app_name: &str,
) -> Result<(), DatabaseError> {
    info!("Running {} database migrations...", app_name);
    migrator.run(pool).await?;
    info!("Migrations completed successfully for {}", app_name);
    Ok(())
}

/// Close the pool, waiting for checked-out connections to be returned
pub async fn close(pool: &SqlitePool) {
    pool.close().await;
    info!("SQLite pool closed");
}
