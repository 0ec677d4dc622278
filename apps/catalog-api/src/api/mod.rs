//! API routes module

pub mod health;

use axum::Router;
use domain_products::{handlers, ProductService, SqliteProductRepository};

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    let repository = SqliteProductRepository::new(state.pool.clone(), state.gate.clone());
    let service = ProductService::new(repository);

    Router::new().nest(
        "/products",
        handlers::router(service, state.config.server.request_timeout),
    )
}
