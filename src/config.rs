//! # Retry configuration.
//!
//! Provides [`Config`] centralized settings for the stock exponential policy.
//!
//! Config is used in two ways:
//! 1. **Policy creation**: `config.backoff()` → boxed [`Backoff`]
//! 2. **Direct access**: `config.exponential()` → [`ExponentialBackoff`] without a retry cap
//!
//! ## Sentinel values
//! - `max_retries = 0` → unlimited (no [`WithMaxRetries`] wrapper)
//! - `max_elapsed = 0s` → no elapsed-time budget

use std::time::Duration;

use crate::policies::{Backoff, ExponentialBackoff, JitterPolicy, WithMaxRetries};

/// Settings for building a retry policy.
///
/// ## Field semantics
/// - `first`: delay before the first retry
/// - `max`: cap on any single delay
/// - `factor`: growth per retry (`1.0` = constant)
/// - `jitter`: randomization of each delay
/// - `max_elapsed`: total budget since reset (`0s` = unbounded)
/// - `max_retries`: retry cap (`0` = unlimited)
///
/// ## Notes
/// All fields are public. Prefer the accessors over sprinkling sentinel checks (`0`).
#[derive(Clone, Debug)]
pub struct Config {
    /// Delay before the first retry.
    pub first: Duration,

    /// Maximum single delay.
    pub max: Duration,

    /// Multiplicative growth factor.
    pub factor: f64,

    /// Jitter applied to each delay.
    pub jitter: JitterPolicy,

    /// Total retry budget measured from the policy reset.
    ///
    /// - `Duration::ZERO` = unbounded
    /// - `> 0` = stop once elapsed time plus the next delay would exceed it
    pub max_elapsed: Duration,

    /// Maximum number of retries (the operation runs at most `max_retries + 1` times).
    ///
    /// - `0` = unlimited
    pub max_retries: u32,
}

impl Config {
    /// Returns the retry cap as an `Option`.
    ///
    /// - `None` → unlimited
    /// - `Some(n)` → at most `n` retries
    #[inline]
    pub fn retry_limit(&self) -> Option<u32> {
        if self.max_retries == 0 {
            None
        } else {
            Some(self.max_retries)
        }
    }

    /// Returns the elapsed-time budget as an `Option`.
    #[inline]
    pub fn elapsed_limit(&self) -> Option<Duration> {
        if self.max_elapsed == Duration::ZERO {
            None
        } else {
            Some(self.max_elapsed)
        }
    }

    /// Builds the exponential policy described by this config, ignoring `max_retries`.
    pub fn exponential(&self) -> ExponentialBackoff {
        ExponentialBackoff::new()
            .with_first(self.first)
            .with_max(self.max)
            .with_factor(self.factor)
            .with_jitter(self.jitter)
            .with_max_elapsed(self.elapsed_limit())
    }

    /// Builds the full policy: exponential, capped by `max_retries` when set.
    pub fn backoff(&self) -> Box<dyn Backoff + Send> {
        let exp = self.exponential();
        match self.retry_limit() {
            Some(n) => Box::new(WithMaxRetries::new(exp, n)),
            None => Box::new(exp),
        }
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `first = 500ms`
    /// - `max = 60s`
    /// - `factor = 1.5`
    /// - `jitter = JitterPolicy::Equal`
    /// - `max_elapsed = 15min`
    /// - `max_retries = 0` (unlimited)
    fn default() -> Self {
        let exp = ExponentialBackoff::default();
        Self {
            first: exp.first,
            max: exp.max,
            factor: exp.factor,
            jitter: exp.jitter,
            max_elapsed: exp.max_elapsed.unwrap_or(Duration::ZERO),
            max_retries: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policies::STOP;

    #[test]
    fn test_sentinels() {
        let cfg = Config::default();
        assert_eq!(cfg.retry_limit(), None);
        assert_eq!(cfg.elapsed_limit(), Some(Duration::from_secs(900)));

        let cfg = Config {
            max_retries: 3,
            max_elapsed: Duration::ZERO,
            ..Config::default()
        };
        assert_eq!(cfg.retry_limit(), Some(3));
        assert_eq!(cfg.elapsed_limit(), None);
    }

    #[test]
    fn test_exponential_matches_fields() {
        let cfg = Config {
            first: Duration::from_millis(100),
            factor: 2.0,
            jitter: JitterPolicy::None,
            max_elapsed: Duration::ZERO,
            ..Config::default()
        };
        let exp = cfg.exponential();
        assert_eq!(exp.max_elapsed, None);
        assert_eq!(exp.base(2), Duration::from_millis(400));
    }

    #[test]
    fn test_backoff_honors_retry_cap() {
        let cfg = Config {
            first: Duration::from_millis(1),
            jitter: JitterPolicy::None,
            max_retries: 2,
            ..Config::default()
        };
        let mut b = cfg.backoff();
        b.reset();
        assert!(b.next_backoff().is_some());
        assert!(b.next_backoff().is_some());
        assert_eq!(b.next_backoff(), STOP);
    }
}
