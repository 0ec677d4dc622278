use sqlx::sqlite::SqlitePool;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::common::DatabaseError;

/// Check SQLite database health
///
/// Executes `SELECT 1` through the pool. Used by the readiness probe.
///
/// # Example
/// ```ignore
/// use database::sqlite::check_health;
///
/// check_health(&pool).await?;
/// ```
pub async fn check_health(pool: &SqlitePool) -> Result<(), DatabaseError> {
    debug!("Running SQLite health check");

    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(|e| DatabaseError::HealthCheckFailed(format!("SQLite health check failed: {}", e)))?;

    debug!("SQLite health check passed");
    Ok(())
}

/// Health report including latency and pool occupancy
#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub healthy: bool,
    pub latency: Duration,
    pub pool_size: u32,
    pub idle_connections: usize,
    pub error: Option<String>,
}

/// Like [`check_health`] but never fails; the outcome is in the report
pub async fn check_health_detailed(pool: &SqlitePool) -> HealthStatus {
    let started = Instant::now();
    let result = check_health(pool).await;

    HealthStatus {
        healthy: result.is_ok(),
        latency: started.elapsed(),
        pool_size: pool.size(),
        idle_connections: pool.num_idle(),
        error: result.err().map(|e| e.to_string()),
    }
}
