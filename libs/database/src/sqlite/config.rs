use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_or_default, env_parse};

use crate::common::DatabaseError;

/// SQLite pool configuration
///
/// Timeouts of `None` disable the corresponding limit, which is what an
/// in-memory database needs: closing its last connection discards the data.
///
/// # Example
///
/// ```ignore
/// use database::sqlite::SqliteConfig;
///
/// // Manual construction
/// let config = SqliteConfig::new("sqlite://catalog.db");
///
/// // From environment variables (requires `config` feature)
/// let config = SqliteConfig::from_env()?;
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SqliteConfig {
    /// Database URL, e.g. `sqlite://catalog.db` or `sqlite::memory:`
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections kept open
    pub min_connections: u32,

    /// How long to wait for a pooled connection
    pub acquire_timeout: Duration,

    /// Close connections idle for longer than this
    pub idle_timeout: Option<Duration>,

    /// Recycle connections older than this
    pub max_lifetime: Option<Duration>,

    /// Create the database file when it does not exist
    pub create_if_missing: bool,
}

impl SqliteConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Single long-lived connection to a private in-memory database
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: None,
            max_lifetime: None,
            create_if_missing: false,
        }
    }

    pub fn with_pool_size(mut self, max_connections: u32, min_connections: u32) -> Self {
        self.max_connections = max_connections;
        self.min_connections = min_connections.min(max_connections);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }

    /// Parse the URL into sqlx connect options
    pub fn connect_options(&self) -> Result<SqliteConnectOptions, DatabaseError> {
        let options = SqliteConnectOptions::from_str(&self.url)
            .map_err(|e| DatabaseError::ConfigError(format!("invalid DATABASE_URL: {}", e)))?
            .create_if_missing(self.create_if_missing)
            .foreign_keys(true);

        Ok(if self.is_in_memory() {
            options
        } else {
            options.journal_mode(SqliteJournalMode::Wal)
        })
    }

    pub fn pool_options(&self) -> SqlitePoolOptions {
        SqlitePoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(self.acquire_timeout)
            .idle_timeout(self.idle_timeout)
            .max_lifetime(self.max_lifetime)
    }
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://catalog.db".to_string(),
            max_connections: 100,
            min_connections: 5,
            acquire_timeout: Duration::from_secs(8),
            idle_timeout: Some(Duration::from_secs(300)),
            max_lifetime: Some(Duration::from_secs(300)),
            create_if_missing: true,
        }
    }
}

/// Zero disables the limit
#[cfg(feature = "config")]
fn optional_secs(key: &str, default: &str) -> Result<Option<Duration>, ConfigError> {
    let secs: u64 = env_parse(key, default)?;
    Ok((secs > 0).then(|| Duration::from_secs(secs)))
}

/// Load SqliteConfig from environment variables
///
/// Environment variables:
/// - `DATABASE_URL` (optional, default: `sqlite://catalog.db`)
/// - `DB_MAX_CONNECTIONS` (optional, default: 100)
/// - `DB_MIN_CONNECTIONS` (optional, default: 5)
/// - `DB_ACQUIRE_TIMEOUT_SECS` (optional, default: 8)
/// - `DB_IDLE_TIMEOUT_SECS` (optional, default: 300, 0 disables)
/// - `DB_MAX_LIFETIME_SECS` (optional, default: 300, 0 disables)
/// - `DB_CREATE_IF_MISSING` (optional, default: true)
#[cfg(feature = "config")]
impl FromEnv for SqliteConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = env_or_default("DATABASE_URL", "sqlite://catalog.db");
        let max_connections: u32 = env_parse("DB_MAX_CONNECTIONS", "100")?;
        let min_connections: u32 = env_parse("DB_MIN_CONNECTIONS", "5")?;

        if max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                key: "DB_MAX_CONNECTIONS".to_string(),
                details: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            url,
            max_connections,
            min_connections: min_connections.min(max_connections),
            acquire_timeout: Duration::from_secs(env_parse("DB_ACQUIRE_TIMEOUT_SECS", "8")?),
            idle_timeout: optional_secs("DB_IDLE_TIMEOUT_SECS", "300")?,
            max_lifetime: optional_secs("DB_MAX_LIFETIME_SECS", "300")?,
            create_if_missing: env_parse("DB_CREATE_IF_MISSING", "true")?,
        })
    }
}
