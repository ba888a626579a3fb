//! HTTP route handlers for the catalog service.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//! GET  /api/products           - Paginated, filterable product listing
//! ```

pub mod products;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the product listing router.
pub fn product_routes() -> Router<AppState> {
    Router::new().route("/", get(products::list))
}
