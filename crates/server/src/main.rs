//! Shopfeed catalog service - mock product listing backend.
//!
//! This binary serves the product listing API on port 3000.
//!
//! # Architecture
//!
//! - Axum web framework, JSON responses only
//! - In-memory catalog generated at startup (optionally seeded)
//! - Opt-in latency/failure simulation for demo parity

#![cfg_attr(not(test), forbid(unsafe_code))]

use shopfeed_server::config::ServerConfig;
use shopfeed_server::state::AppState;

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = ServerConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopfeed_server=info,tower_http=debug".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // Generate the catalog and build application state
    let state = AppState::new(config.clone());
    tracing::info!(
        products = state.catalog().len(),
        seeded = config.seed.is_some(),
        simulation = config.simulation.is_enabled(),
        "catalog generated"
    );

    let app = shopfeed_server::app(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("catalog service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
