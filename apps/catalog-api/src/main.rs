//! Catalog API - REST server for the product catalog

use axum::{middleware, routing::get};
use axum_helpers::server::{create_production_app, health_router, ShutdownCoordinator};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::{sqlite, AdmissionGate};
use domain_products::MIGRATOR;
use observability::{metrics_handler, metrics_middleware, GateMetricsRecorder};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);
    observability::init_metrics()?;

    info!("Connecting to SQLite at {}", config.database.url());

    let pool = sqlite::connect_from_config_with_retry(&config.database, None).await?;
    sqlite::run_migrations(&pool, &MIGRATOR, config.app.name).await?;

    let gate = AdmissionGate::from_config(config.gate, Arc::new(GateMetricsRecorder));
    info!(
        capacity = gate.capacity(),
        pool_size = config.database.max_connections,
        "Admission gate ready"
    );

    let state = AppState {
        config: config.clone(),
        pool: pool.clone(),
        gate: gate.clone(),
    };

    // Build REST router
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api::routes(&state));
    let app = router
        .merge(health_router(config.app))
        .merge(api::health::router(state))
        .route("/metrics", get(metrics_handler))
        .layer(middleware::from_fn(metrics_middleware));

    info!(
        "Starting Catalog API on port {} (request timeout {:?})",
        config.server.port, config.server.request_timeout
    );

    create_production_app(
        app,
        &config.server,
        Duration::from_secs(30),
        ShutdownCoordinator::new(),
        async move {
            info!("Shutting down: closing admission gate and SQLite pool");
            gate.close();
            sqlite::close(&pool).await;
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Catalog API shutdown complete");
    Ok(())
}
