//! Application state management

use database::sqlite::SqlitePool;
use database::AdmissionGate;

/// Shared application state
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: crate::config::Config,
    pub pool: SqlitePool,
    pub gate: AdmissionGate,
}
