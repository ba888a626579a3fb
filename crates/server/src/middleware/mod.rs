//! HTTP middleware for the catalog service.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. `TraceLayer` (request tracing)
//! 2. Request ID (add unique ID to each request)

pub mod request_id;

pub use request_id::request_id_middleware;
