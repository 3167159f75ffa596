//! Retry policy and backoff schedule

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Delay before a given retry
pub trait BackoffPolicy {
    /// Delay before retry number `retry` (1-based)
    fn delay_for_retry(&self, retry: u32) -> Duration;
}

/// Bounded exponential backoff for transient failures
///
/// `max_attempts` counts every call to the backend, the first one
/// included, so the default of 3 means one initial call and two retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total backend calls per load
    pub max_attempts: u32,
    /// Delay before the first retry
    pub base_delay_ms: u64,
    /// Upper bound on any single delay
    pub max_delay_ms: u64,
    /// Pending time after which a fetch counts as slow
    pub slow_threshold_ms: u64,
}

impl RetryPolicy {
    /// Create default policy
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Never retry
    #[inline]
    #[must_use]
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// With total attempts (at least one)
    #[inline]
    #[must_use]
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// With base and cap delays
    #[inline]
    #[must_use]
    pub fn with_delays(mut self, base: Duration, cap: Duration) -> Self {
        self.base_delay_ms = duration_ms(base);
        self.max_delay_ms = duration_ms(cap);
        self
    }

    /// With slow-connection threshold
    #[inline]
    #[must_use]
    pub fn with_slow_threshold(mut self, threshold: Duration) -> Self {
        self.slow_threshold_ms = duration_ms(threshold);
        self
    }

    /// Slow-connection threshold
    #[inline]
    #[must_use]
    pub fn slow_threshold(&self) -> Duration {
        Duration::from_millis(self.slow_threshold_ms)
    }

    /// Delays before each retry this policy allows, in order
    pub fn delays(&self) -> impl Iterator<Item = Duration> + '_ {
        (1..self.max_attempts.max(1)).map(|retry| self.delay_for_retry(retry))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1_000,
            max_delay_ms: 8_000,
            slow_threshold_ms: 5_000,
        }
    }
}

impl BackoffPolicy for RetryPolicy {
    /// `base * 2^(retry - 1)`, capped at `max_delay_ms`
    fn delay_for_retry(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(63);
        let factor = 1u64.checked_shl(exponent).unwrap_or(u64::MAX);
        let ms = self
            .base_delay_ms
            .saturating_mul(factor)
            .min(self.max_delay_ms);
        Duration::from_millis(ms)
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_schedule_doubles() {
        let policy = RetryPolicy::default();
        let delays: Vec<u64> = policy.delays().map(|d| d.as_millis() as u64).collect();
        assert_eq!(delays, vec![1_000, 2_000]);
    }

    #[test]
    fn delays_hit_the_cap() {
        let policy = RetryPolicy::new()
            .with_max_attempts(8)
            .with_delays(Duration::from_millis(500), Duration::from_secs(3));
        let delays: Vec<u64> = policy.delays().map(|d| d.as_millis() as u64).collect();
        assert_eq!(delays, vec![500, 1_000, 2_000, 3_000, 3_000, 3_000, 3_000]);
    }

    #[test]
    fn no_retry_has_no_delays() {
        assert_eq!(RetryPolicy::no_retry().delays().count(), 0);
        assert_eq!(RetryPolicy::new().with_max_attempts(0).max_attempts, 1);
    }

    #[test]
    fn huge_retry_numbers_saturate() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for_retry(200), Duration::from_millis(8_000));
    }

    proptest! {
        #[test]
        fn prop_delays_are_monotone_and_capped(
            attempts in 1u32..40,
            base in 0u64..10_000,
            cap in 0u64..60_000
        ) {
            let policy = RetryPolicy::new()
                .with_max_attempts(attempts)
                .with_delays(Duration::from_millis(base), Duration::from_millis(cap));
            let delays: Vec<Duration> = policy.delays().collect();
            prop_assert_eq!(delays.len() as u32, attempts - 1);
            for pair in delays.windows(2) {
                prop_assert!(pair[0] <= pair[1]);
            }
            for d in &delays {
                prop_assert!(*d <= Duration::from_millis(cap));
            }
        }
    }
}
