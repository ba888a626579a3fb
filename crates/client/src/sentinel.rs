//! The scroll-marker visibility gate.
//!
//! The browser original watches an off-screen marker with an intersection
//! observer and fetches the next page when at least 10% of it enters the
//! viewport. This is that gate made explicit: the presentation layer
//! reports the marker's visible ratio, and the sentinel decides whether a
//! scroll trigger should fire.

/// Fraction of the marker that must be visible to trigger.
pub const VISIBILITY_THRESHOLD: f64 = 0.1;

/// Edge-triggered visibility gate for the next-page fetch.
///
/// Fires when the visible ratio crosses the threshold while more pages
/// exist and no fetch is in flight. After firing it re-arms only once the
/// marker leaves the threshold again, so a marker that stays visible while
/// a page loads cannot spam triggers (the controller would no-op them, but
/// the gate keeps the noise out entirely).
#[derive(Debug, Clone)]
pub struct ScrollSentinel {
    threshold: f64,
    armed: bool,
}

impl Default for ScrollSentinel {
    fn default() -> Self {
        Self::new(VISIBILITY_THRESHOLD)
    }
}

impl ScrollSentinel {
    /// Gate with a custom visibility threshold in `(0.0, 1.0]`.
    #[must_use]
    pub const fn new(threshold: f64) -> Self {
        Self {
            threshold,
            armed: true,
        }
    }

    /// Report the marker's visible ratio and the feed's readiness.
    /// Returns `true` when the next-page fetch should be triggered.
    pub fn observe(&mut self, visible_ratio: f64, has_more: bool, fetching: bool) -> bool {
        if visible_ratio < self.threshold {
            self.armed = true;
            return false;
        }
        if !self.armed || !has_more || fetching {
            return false;
        }
        self.armed = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_at_threshold() {
        let mut sentinel = ScrollSentinel::default();
        assert!(sentinel.observe(0.1, true, false));
    }

    #[test]
    fn test_does_not_fire_below_threshold() {
        let mut sentinel = ScrollSentinel::default();
        assert!(!sentinel.observe(0.05, true, false));
    }

    #[test]
    fn test_gated_while_fetch_in_flight() {
        let mut sentinel = ScrollSentinel::default();
        assert!(!sentinel.observe(0.5, true, true));
        // Still armed: fires once the fetch completes.
        assert!(sentinel.observe(0.5, true, false));
    }

    #[test]
    fn test_gated_when_exhausted() {
        let mut sentinel = ScrollSentinel::default();
        assert!(!sentinel.observe(0.5, false, false));
    }

    #[test]
    fn test_does_not_refire_while_marker_stays_visible() {
        let mut sentinel = ScrollSentinel::default();
        assert!(sentinel.observe(0.5, true, false));
        assert!(!sentinel.observe(0.9, true, false));
    }

    #[test]
    fn test_rearms_after_marker_leaves() {
        let mut sentinel = ScrollSentinel::default();
        assert!(sentinel.observe(0.5, true, false));
        assert!(!sentinel.observe(0.0, true, false));
        assert!(sentinel.observe(0.5, true, false));
    }
}
