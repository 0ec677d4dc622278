//! Readiness endpoint backed by a real store round-trip

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use axum_helpers::server::{run_health_checks, HealthCheckFuture};
use database::sqlite;

use crate::state::AppState;

/// Readiness check: the pool answers `SELECT 1` and the gate is still open
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![
        (
            "database",
            Box::pin(async {
                sqlite::check_health(&state.pool)
                    .await
                    .map_err(|e| format!("Database ping failed: {}", e))
            }),
        ),
        (
            "gate",
            Box::pin(async {
                if state.gate.is_closed() {
                    Err("Admission gate closed".to_string())
                } else {
                    Ok(())
                }
            }),
        ),
    ];

    match run_health_checks(checks).await {
        Ok((status, json)) => (status, json).into_response(),
        Err((status, json)) => (status, json).into_response(),
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(ready_handler))
        .with_state(state)
}
