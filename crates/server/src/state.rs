//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::ServerConfig;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The catalog is generated once at startup
/// and is immutable afterwards.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    catalog: Catalog,
}

impl AppState {
    /// Create a new application state, generating the catalog from the
    /// configured count and seed.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let catalog = Catalog::generate(config.product_count, config.seed);
        Self::with_catalog(config, catalog)
    }

    /// Create application state over an existing catalog.
    #[must_use]
    pub fn with_catalog(config: ServerConfig, catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, catalog }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the generated catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }
}
