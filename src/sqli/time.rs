//! Time-based channel

use crate::validation::baseline::LatencyProfile;

/// Added to the baseline mean to form the confirmation threshold
pub const DELAY_MARGIN_SECS: f64 = 5.0;

/// Allowed shortfall against the expected delay
pub const DELAY_TOLERANCE_SECS: f64 = 1.0;

/// Jitter from which the margin is widened
pub const UNSTABLE_JITTER_SECS: f64 = 1.0;

/// Extra request budget on top of the scan timeout so a sleep can finish
pub const TIMEOUT_HEADROOM_SECS: u64 = 10;

/// Baseline latency requests per target
pub const BASELINE_SAMPLES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelayThreshold {
    pub average: f64,
    pub threshold: f64,
}

impl DelayThreshold {
    pub fn calibrate(latency: &LatencyProfile) -> Self {
        let jitter = latency.jitter();
        let margin = if jitter >= UNSTABLE_JITTER_SECS {
            DELAY_MARGIN_SECS + jitter
        } else {
            DELAY_MARGIN_SECS
        };
        Self {
            average: latency.mean,
            threshold: latency.mean + margin,
        }
    }

    /// First measurement: the delay over the baseline mean must reach the
    /// expected sleep, less the tolerance.
    pub fn first_hit(&self, elapsed: f64, expected_delay: f64) -> bool {
        elapsed - self.average >= expected_delay - DELAY_TOLERANCE_SECS
    }

    /// Independent repeat: must clear the calibrated threshold, less the tolerance.
    /// On a calm 0.3s baseline the repeat therefore needs 4.3s, not 5.3s.
    pub fn repeat_hit(&self, elapsed: f64) -> bool {
        elapsed >= self.threshold - DELAY_TOLERANCE_SECS
    }

    pub fn confirms(&self, first: f64, second: f64, expected_delay: f64) -> bool {
        self.first_hit(first, expected_delay) && self.repeat_hit(second)
    }
}
