//! Configuration for Catalog API

use core_config::{app_info, server::ServerConfig, AppInfo, FromEnv};
use database::sqlite::SqliteConfig;
use database::GateConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: SqliteConfig,
    pub gate: GateConfig,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = SqliteConfig::from_env()?;
        let gate = GateConfig::from_env()?;
        let server = ServerConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            database,
            gate,
            server,
            environment,
        })
    }
}
