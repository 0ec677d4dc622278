//! Database library: SQLite connectivity plus the request-scoped primitives
//! every repository shares.
//!
//! # Features
//!
//! - `sqlite` (default) - SQLite support with sqlx
//! - `config` - Configuration support with `core_config::FromEnv`
//! - `all` - All features
//!
//! # Examples
//!
//! ## Connecting
//!
//! ```ignore
//! use database::sqlite::{self, SqliteConfig};
//!
//! let pool = sqlite::connect_from_config(&SqliteConfig::new("sqlite://catalog.db")).await?;
//! sqlite::run_migrations(&pool, &MIGRATOR, "catalog").await?;
//! ```
//!
//! ## Gating store access
//!
//! ```ignore
//! use database::{AdmissionGate, RequestContext};
//!
//! let gate = AdmissionGate::new(200);
//! let ctx = RequestContext::new().with_timeout(Duration::from_secs(5));
//!
//! let _permit = gate.acquire(&ctx).await?;
//! // ... talk to the store; the permit is released when it goes out of scope
//! ```

// Always available modules
pub mod common;
pub mod gate;

#[cfg(feature = "sqlite")]
pub mod sqlite;

// Re-exports for convenience
pub use common::{ContextError, DatabaseError, DatabaseResult, RequestContext};
pub use gate::{AdmissionGate, GateConfig, GateMetrics, GatePermit, NoopGateMetrics};
