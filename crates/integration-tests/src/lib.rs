//! Integration tests for Shopfeed.
//!
//! Each test boots the real catalog router in-process on an ephemeral port
//! and drives it over HTTP, so the full wire contract is exercised without
//! any external setup. Catalogs are seeded, which keeps the page walks and
//! count assertions deterministic.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfeed-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `products_api` - Wire-level listing API tests
//! - `feed_flow` - Full feed client flows over HTTP

#![cfg_attr(not(test), forbid(unsafe_code))]

use shopfeed_server::config::ServerConfig;
use shopfeed_server::simulate::SimulationConfig;
use shopfeed_server::state::AppState;

/// Seed used by every test catalog.
pub const TEST_SEED: u64 = 7;

/// Boot a seeded catalog service on an ephemeral port; returns its base URL.
///
/// # Panics
///
/// Panics if the listener cannot bind (tests only).
pub async fn spawn_service(product_count: usize, simulation: SimulationConfig) -> String {
    let config = ServerConfig {
        product_count,
        seed: Some(TEST_SEED),
        simulation,
        ..ServerConfig::default()
    };
    let app = shopfeed_server::app(AppState::new(config));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("listener has an address");

    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("test server error");
    });

    format!("http://{addr}")
}

/// Boot the default 131-product service without simulation.
pub async fn spawn_default_service() -> String {
    spawn_service(131, SimulationConfig::default()).await
}
