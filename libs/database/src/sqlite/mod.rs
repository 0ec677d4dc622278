//! SQLite connector and utilities
//!
//! Provides pool construction, migration running, and health checks.

mod config;
mod connector;
mod health;

pub use config::SqliteConfig;
pub use connector::{
    close, connect, connect_from_config, connect_from_config_with_retry, run_migrations,
};
pub use health::{check_health, check_health_detailed, HealthStatus};

// Re-export sqlx types for convenience
pub use sqlx::migrate::Migrator;
pub use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
