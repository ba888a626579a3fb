//! Latency and failure simulation for the mock backend.
//!
//! The demo contract is a 300-1000 ms delay and a 5% failure rate. Both are
//! opt-in here and disabled by default; production-shaped deployments run
//! without them, and tests enable them explicitly to pin the error path.

use std::time::Duration;

use rand::Rng;

use crate::error::ApiError;

/// Inclusive latency bounds in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyRange {
    min_ms: u64,
    max_ms: u64,
}

impl LatencyRange {
    /// The demo's 300-1000 ms window.
    pub const DEMO: Self = Self {
        min_ms: 300,
        max_ms: 1000,
    };

    /// Create a range. Returns `None` if `min_ms > max_ms`.
    #[must_use]
    pub const fn new(min_ms: u64, max_ms: u64) -> Option<Self> {
        if min_ms > max_ms {
            return None;
        }
        Some(Self { min_ms, max_ms })
    }

    /// Lower bound in milliseconds.
    #[must_use]
    pub const fn min_ms(self) -> u64 {
        self.min_ms
    }

    /// Upper bound in milliseconds.
    #[must_use]
    pub const fn max_ms(self) -> u64 {
        self.max_ms
    }
}

/// Simulated request behavior applied before a listing response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    /// Artificial delay range; `None` disables latency.
    pub latency: Option<LatencyRange>,
    /// Probability of a simulated 500 per request, 0.0 to 1.0.
    pub failure_rate: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            latency: None,
            failure_rate: 0.0,
        }
    }
}

impl SimulationConfig {
    /// The demo behavior: 300-1000 ms latency and a 5% failure rate.
    #[must_use]
    pub const fn demo() -> Self {
        Self {
            latency: Some(LatencyRange::DEMO),
            failure_rate: 0.05,
        }
    }

    /// Whether any simulation is active.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.latency.is_some() || self.failure_rate > 0.0
    }

    /// Draw the delay for one request, if latency is enabled.
    pub fn draw_latency(&self, rng: &mut impl Rng) -> Option<Duration> {
        self.latency
            .map(|range| Duration::from_millis(rng.random_range(range.min_ms..=range.max_ms)))
    }

    /// Draw whether this request fails.
    pub fn draw_failure(&self, rng: &mut impl Rng) -> bool {
        self.failure_rate > 0.0 && rng.random::<f64>() < self.failure_rate
    }

    /// Apply the simulation to the current request: sleep through the drawn
    /// delay, then fail with the configured probability.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::SimulatedFailure` when the failure draw fires.
    pub async fn induce(&self) -> Result<(), ApiError> {
        let (latency, failed) = {
            let mut rng = rand::rng();
            (self.draw_latency(&mut rng), self.draw_failure(&mut rng))
        };

        if let Some(delay) = latency {
            tracing::debug!(delay_ms = delay.as_millis() as u64, "simulated latency");
            tokio::time::sleep(delay).await;
        }

        if failed {
            tracing::debug!("simulated failure fired");
            return Err(ApiError::SimulatedFailure);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_latency_range_rejects_inverted_bounds() {
        assert!(LatencyRange::new(1000, 300).is_none());
        assert!(LatencyRange::new(300, 300).is_some());
    }

    #[test]
    fn test_default_is_disabled() {
        let config = SimulationConfig::default();
        assert!(!config.is_enabled());
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(config.draw_latency(&mut rng), None);
        assert!(!config.draw_failure(&mut rng));
    }

    #[test]
    fn test_demo_matches_contract() {
        let config = SimulationConfig::demo();
        assert_eq!(config.latency, Some(LatencyRange::DEMO));
        assert!((config.failure_rate - 0.05).abs() < f64::EPSILON);
        assert!(config.is_enabled());
    }

    #[test]
    fn test_drawn_latency_stays_in_range() {
        let config = SimulationConfig::demo();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let delay = config.draw_latency(&mut rng).unwrap();
            assert!(delay >= Duration::from_millis(300));
            assert!(delay <= Duration::from_millis(1000));
        }
    }

    #[test]
    fn test_failure_rate_extremes() {
        let mut rng = StdRng::seed_from_u64(23);

        let always = SimulationConfig {
            latency: None,
            failure_rate: 1.0,
        };
        assert!((0..50).all(|_| always.draw_failure(&mut rng)));

        let never = SimulationConfig {
            latency: None,
            failure_rate: 0.0,
        };
        assert!((0..50).all(|_| !never.draw_failure(&mut rng)));
    }

    #[tokio::test]
    async fn test_induce_disabled_is_ok() {
        let config = SimulationConfig::default();
        assert!(config.induce().await.is_ok());
    }

    #[tokio::test]
    async fn test_induce_certain_failure() {
        let config = SimulationConfig {
            latency: None,
            failure_rate: 1.0,
        };
        assert!(matches!(
            config.induce().await,
            Err(ApiError::SimulatedFailure)
        ));
    }
}
