//! Server infrastructure module.
//!
//! This module provides:
//! - Router assembly with OpenAPI document, tracing and compression
//! - Health and readiness endpoints
//! - Graceful shutdown with post-drain cleanup
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//! use core_config::app_info;
//!
//! let router = create_router::<ApiDoc>(api_routes).merge(health_router(app_info!()));
//!
//! create_production_app(router, &config, Duration::from_secs(30), ShutdownCoordinator::new(), async {
//!     pool.close().await;
//! })
//! .await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_production_app, create_router};
pub use health::{HealthCheckFuture, HealthResponse, health_router, run_health_checks};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
