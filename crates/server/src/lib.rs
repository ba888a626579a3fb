//! Shopfeed catalog service library.
//!
//! This crate provides the catalog service as a library, allowing the
//! router to be booted in-process by integration tests and reused by the
//! CLI's fixture tooling.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod simulate;
pub mod state;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Build the full application router over `state`.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/products", routes::product_routes())
        .layer(axum::middleware::from_fn(
            middleware::request_id_middleware,
        ))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}
