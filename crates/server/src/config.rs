//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `SHOPFEED_HOST` - Bind address (default: 127.0.0.1)
//! - `SHOPFEED_PORT` - Listen port (default: 3000)
//! - `SHOPFEED_PRODUCT_COUNT` - Catalog size (default: 131)
//! - `SHOPFEED_SEED` - Generator seed for a reproducible catalog
//! - `SHOPFEED_LATENCY_MS` - Simulated latency range, e.g. `300-1000`
//! - `SHOPFEED_FAILURE_RATE` - Simulated failure probability, 0.0 to 1.0

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

use crate::catalog::DEFAULT_PRODUCT_COUNT;
use crate::simulate::{LatencyRange, SimulationConfig};

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Catalog service configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Number of products to generate at startup
    pub product_count: usize,
    /// Optional generator seed for a reproducible catalog
    pub seed: Option<u64>,
    /// Simulated latency/failure behavior
    pub simulation: SimulationConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            product_count: DEFAULT_PRODUCT_COUNT,
            seed: None,
            simulation: SimulationConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("SHOPFEED_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SHOPFEED_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("SHOPFEED_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SHOPFEED_PORT".to_string(), e.to_string()))?;
        let product_count = get_env_or_default(
            "SHOPFEED_PRODUCT_COUNT",
            &DEFAULT_PRODUCT_COUNT.to_string(),
        )
        .parse::<usize>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("SHOPFEED_PRODUCT_COUNT".to_string(), e.to_string())
        })?;
        let seed = get_optional_env("SHOPFEED_SEED")
            .map(|s| {
                s.parse::<u64>().map_err(|e| {
                    ConfigError::InvalidEnvVar("SHOPFEED_SEED".to_string(), e.to_string())
                })
            })
            .transpose()?;

        let latency = get_optional_env("SHOPFEED_LATENCY_MS")
            .map(|s| parse_latency_range(&s))
            .transpose()?;
        let failure_rate = get_optional_env("SHOPFEED_FAILURE_RATE")
            .map(|s| parse_failure_rate(&s))
            .transpose()?
            .unwrap_or(0.0);

        Ok(Self {
            host,
            port,
            product_count,
            seed,
            simulation: SimulationConfig {
                latency,
                failure_rate,
            },
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Parse a `min-max` millisecond range.
fn parse_latency_range(value: &str) -> Result<LatencyRange, ConfigError> {
    let invalid = |msg: &str| {
        ConfigError::InvalidEnvVar("SHOPFEED_LATENCY_MS".to_string(), msg.to_string())
    };

    let (min, max) = value
        .split_once('-')
        .ok_or_else(|| invalid("expected a range like 300-1000"))?;
    let min_ms = min
        .trim()
        .parse::<u64>()
        .map_err(|e| invalid(&e.to_string()))?;
    let max_ms = max
        .trim()
        .parse::<u64>()
        .map_err(|e| invalid(&e.to_string()))?;

    LatencyRange::new(min_ms, max_ms)
        .ok_or_else(|| invalid(&format!("minimum {min_ms} exceeds maximum {max_ms}")))
}

/// Parse a failure probability in `[0.0, 1.0]`.
fn parse_failure_rate(value: &str) -> Result<f64, ConfigError> {
    let rate = value.trim().parse::<f64>().map_err(|e| {
        ConfigError::InvalidEnvVar("SHOPFEED_FAILURE_RATE".to_string(), e.to_string())
    })?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::InvalidEnvVar(
            "SHOPFEED_FAILURE_RATE".to_string(),
            format!("must be between 0.0 and 1.0, got {rate}"),
        ));
    }
    Ok(rate)
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
