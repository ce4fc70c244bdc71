//! Exponential backoff policy for transient transport failures.
//!
//! Any failed call is retried after a bounded exponential wait:
//! `multiplier * 2^attempt`, clamped to `[min_delay, max_delay]`. The
//! default policy (multiplier 1, min 4s, max 10s, no attempt cap) retries
//! until the surrounding operation is cancelled.

use std::time::Duration;

/// Backoff and retry configuration for one client.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Scales the exponential term (seconds)
    pub multiplier: u64,

    /// Floor for the wait between attempts
    pub min_delay: Duration,

    /// Ceiling for the wait between attempts
    pub max_delay: Duration,

    /// Maximum attempts before giving up; `None` retries indefinitely
    pub max_attempts: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            multiplier: 1,
            min_delay: Duration::from_secs(4),
            max_delay: Duration::from_secs(10),
            max_attempts: None,
        }
    }
}

impl RetryPolicy {
    /// The wait before retrying after `attempt` failures (0-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponential = self
            .multiplier
            .saturating_mul(2u64.saturating_pow(attempt))
            .saturating_mul(1000);
        Duration::from_millis(exponential)
            .clamp(self.min_delay, self.max_delay)
    }

    /// Whether another attempt is allowed after `attempts` failures.
    pub fn allows(&self, attempts: u32) -> bool {
        match self.max_attempts {
            Some(cap) => attempts < cap,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_delays_bounded_and_non_decreasing() {
        let policy = RetryPolicy::default();
        let mut previous = Duration::ZERO;
        for attempt in 0..8 {
            let delay = policy.delay_for(attempt);
            assert!(delay >= Duration::from_secs(4), "attempt {attempt}: {delay:?}");
            assert!(delay <= Duration::from_secs(10), "attempt {attempt}: {delay:?}");
            assert!(delay >= previous, "delays must be non-decreasing");
            previous = delay;
        }
    }

    #[test]
    fn test_default_delay_sequence() {
        // multiplier 1: 1s, 2s, 4s, 8s, 16s... clamped to [4, 10]
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(0), Duration::from_secs(4));
        assert_eq!(policy.delay_for(1), Duration::from_secs(4));
        assert_eq!(policy.delay_for(2), Duration::from_secs(4));
        assert_eq!(policy.delay_for(3), Duration::from_secs(8));
        assert_eq!(policy.delay_for(4), Duration::from_secs(10));
        assert_eq!(policy.delay_for(20), Duration::from_secs(10));
    }

    #[test]
    fn test_unbounded_by_default() {
        let policy = RetryPolicy::default();
        assert!(policy.allows(0));
        assert!(policy.allows(1_000_000));
    }

    #[test]
    fn test_attempt_cap() {
        let policy = RetryPolicy {
            max_attempts: Some(3),
            ..Default::default()
        };
        assert!(policy.allows(2));
        assert!(!policy.allows(3));
    }

    #[test]
    fn test_no_overflow_on_large_attempt() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(u32::MAX), Duration::from_secs(10));
    }
}
