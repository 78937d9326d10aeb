//! # Exponential backoff with jitter and an elapsed-time budget.
//!
//! [`ExponentialBackoff`] grows retry delays geometrically. It is parameterized by:
//! - [`ExponentialBackoff::first`] the initial delay;
//! - [`ExponentialBackoff::factor`] the multiplicative growth factor;
//! - [`ExponentialBackoff::max`] the maximum delay cap;
//! - [`ExponentialBackoff::jitter`] randomization of each delay;
//! - [`ExponentialBackoff::max_elapsed`] total time budget since the last reset.
//!
//! The base delay for the n-th call after a reset is `first × factor^n`, clamped to `max`.
//! Jitter is applied to the clamped base; for every variant except `Decorrelated` the
//! jittered value never feeds back into later calculations.
//!
//! Elapsed time is measured with `tokio::time::Instant`, so it follows a paused test clock.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use retryvisor::{Backoff, ExponentialBackoff, JitterPolicy};
//!
//! let mut backoff = ExponentialBackoff::new()
//!     .with_first(Duration::from_millis(100))
//!     .with_max(Duration::from_secs(10))
//!     .with_factor(2.0)
//!     .with_jitter(JitterPolicy::None)
//!     .with_max_elapsed(None);
//!
//! backoff.reset();
//! assert_eq!(backoff.next_backoff(), Some(Duration::from_millis(100)));
//! assert_eq!(backoff.next_backoff(), Some(Duration::from_millis(200)));
//! assert_eq!(backoff.next_backoff(), Some(Duration::from_millis(400)));
//! ```

use std::time::Duration;

use tokio::time::Instant;

use crate::policies::jitter::JitterPolicy;
use crate::policies::policy::{Backoff, STOP};

/// Exponential retry policy.
///
/// Configuration fields are public; the attempt counter and clock are private
/// state cleared by [`Backoff::reset`].
#[derive(Clone, Debug)]
pub struct ExponentialBackoff {
    /// Delay before the first retry.
    pub first: Duration,
    /// Maximum delay cap.
    pub max: Duration,
    /// Multiplicative growth factor (`>= 1.0` recommended).
    pub factor: f64,
    /// Randomization applied to each delay.
    pub jitter: JitterPolicy,
    /// Stop once `elapsed + next delay` would exceed this (`None` = never).
    pub max_elapsed: Option<Duration>,

    attempt: u32,
    prev: Option<Duration>,
    started: Instant,
}

impl Default for ExponentialBackoff {
    /// Returns a policy with:
    /// - `first = 500ms`;
    /// - `factor = 1.5`;
    /// - `max = 60s`;
    /// - `jitter = Equal`;
    /// - `max_elapsed = 15min`.
    fn default() -> Self {
        Self {
            first: Duration::from_millis(500),
            max: Duration::from_secs(60),
            factor: 1.5,
            jitter: JitterPolicy::default(),
            max_elapsed: Some(Duration::from_secs(15 * 60)),
            attempt: 0,
            prev: None,
            started: Instant::now(),
        }
    }
}

impl ExponentialBackoff {
    /// Same as [`ExponentialBackoff::default`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_first(mut self, first: Duration) -> Self {
        self.first = first;
        self
    }

    pub fn with_max(mut self, max: Duration) -> Self {
        self.max = max;
        self
    }

    pub fn with_factor(mut self, factor: f64) -> Self {
        self.factor = factor;
        self
    }

    pub fn with_jitter(mut self, jitter: JitterPolicy) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn with_max_elapsed(mut self, max_elapsed: Option<Duration>) -> Self {
        self.max_elapsed = max_elapsed;
        self
    }

    /// Time since the last [`Backoff::reset`] (or construction).
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Computes the un-jittered delay for the given attempt number (0-indexed).
    ///
    /// # Notes
    /// - If `factor` is less than 1.0, delays decrease with higher attempts (not typical).
    /// - If `factor` equals 1.0, delay remains constant at `first` (up to `max`).
    /// - Overflow and non-finite results clamp to `max`.
    pub fn base(&self, attempt: u32) -> Duration {
        let max_secs = self.max.as_secs_f64();
        let exp = attempt.min(i32::MAX as u32) as i32;
        let unclamped = self.first.as_secs_f64() * self.factor.powi(exp);

        if !unclamped.is_finite() || unclamped < 0.0 || unclamped > max_secs {
            self.max
        } else {
            Duration::from_secs_f64(unclamped)
        }
    }
}

impl Backoff for ExponentialBackoff {
    fn reset(&mut self) {
        self.attempt = 0;
        self.prev = None;
        self.started = Instant::now();
    }

    fn next_backoff(&mut self) -> Option<Duration> {
        let base = self.base(self.attempt);
        let delay = match self.jitter {
            JitterPolicy::Decorrelated => {
                let first = self.first.min(self.max);
                self.jitter
                    .apply_decorrelated(first, self.prev.unwrap_or(first), self.max)
            }
            _ => self.jitter.apply(base),
        };

        if let Some(budget) = self.max_elapsed {
            if self.elapsed().saturating_add(delay) > budget {
                return STOP;
            }
        }

        self.attempt = self.attempt.saturating_add(1);
        self.prev = Some(delay);
        Some(delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(first_ms: u64, max: Duration, factor: f64) -> ExponentialBackoff {
        ExponentialBackoff::new()
            .with_first(Duration::from_millis(first_ms))
            .with_max(max)
            .with_factor(factor)
            .with_jitter(JitterPolicy::None)
            .with_max_elapsed(None)
    }

    #[test]
    fn test_exponential_growth_no_jitter() {
        let mut b = plain(100, Duration::from_secs(30), 2.0);
        b.reset();
        for ms in [100, 200, 400, 800, 1600] {
            assert_eq!(b.next_backoff(), Some(Duration::from_millis(ms)));
        }
    }

    #[test]
    fn test_reset_restarts_sequence() {
        let mut b = plain(100, Duration::from_secs(30), 2.0);
        b.reset();
        b.next_backoff();
        b.next_backoff();
        b.reset();
        assert_eq!(b.next_backoff(), Some(Duration::from_millis(100)));
    }

    #[test]
    fn test_constant_factor() {
        let mut b = plain(500, Duration::from_secs(30), 1.0);
        for attempt in 0..10 {
            assert_eq!(
                b.next_backoff(),
                Some(Duration::from_millis(500)),
                "attempt {} should be constant at 500ms",
                attempt
            );
        }
    }

    #[test]
    fn test_clamped_to_max() {
        let b = plain(100, Duration::from_secs(1), 2.0);
        assert_eq!(b.base(10), Duration::from_secs(1));
    }

    #[test]
    fn test_first_exceeds_max() {
        let mut b = plain(10_000, Duration::from_secs(5), 2.0);
        assert_eq!(b.next_backoff(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_non_finite_overflow_clamps_to_max() {
        let b = plain(100, Duration::from_secs(10), 2.0);
        assert_eq!(b.base(u32::MAX), Duration::from_secs(10));
    }

    #[test]
    fn test_equal_jitter_no_negative_feedback() {
        let mut b = plain(100, Duration::from_secs(30), 2.0).with_jitter(JitterPolicy::Equal);
        for attempt in 0..15 {
            let base_ms = (100.0 * 2.0f64.powi(attempt)).min(30_000.0);
            let delay = b.next_backoff().unwrap();
            assert!(
                delay >= Duration::from_millis((base_ms / 2.0) as u64),
                "attempt {}: delay {:?} < half of base {}ms",
                attempt,
                delay,
                base_ms
            );
            assert!(
                delay <= Duration::from_millis(base_ms as u64),
                "attempt {}: delay {:?} > base {}ms",
                attempt,
                delay,
                base_ms
            );
        }
    }

    #[test]
    fn test_decorrelated_stays_within_bounds() {
        let mut b =
            plain(100, Duration::from_secs(5), 2.0).with_jitter(JitterPolicy::Decorrelated);
        let mut prev = Duration::from_millis(100);
        for _ in 0..50 {
            let delay = b.next_backoff().unwrap();
            assert!(delay >= Duration::from_millis(100));
            assert!(delay <= (prev * 3).min(Duration::from_secs(5)).max(Duration::from_millis(100)));
            prev = delay;
        }
    }

    #[test]
    fn test_sub_millisecond_first_survives_jitter() {
        let first = Duration::from_micros(900);
        for jitter in [JitterPolicy::None, JitterPolicy::Equal] {
            let mut b = ExponentialBackoff::new()
                .with_first(first)
                .with_factor(1.0)
                .with_jitter(jitter);
            b.reset();
            for _ in 0..20 {
                let delay = b.next_backoff().unwrap();
                assert!(delay >= Duration::from_micros(450), "{jitter:?}: {delay:?}");
                assert!(delay <= first, "{jitter:?}: {delay:?}");
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_max_elapsed_stops() {
        let mut b = plain(100, Duration::from_secs(30), 1.0)
            .with_max_elapsed(Some(Duration::from_millis(350)));
        b.reset();

        assert_eq!(b.next_backoff(), Some(Duration::from_millis(100)));
        tokio::time::advance(Duration::from_millis(100)).await;
        assert_eq!(b.next_backoff(), Some(Duration::from_millis(100)));
        tokio::time::advance(Duration::from_millis(100)).await;
        assert_eq!(b.next_backoff(), Some(Duration::from_millis(100)));
        tokio::time::advance(Duration::from_millis(100)).await;
        // 300ms elapsed + 100ms > 350ms
        assert_eq!(b.next_backoff(), STOP);

        b.reset();
        assert_eq!(b.next_backoff(), Some(Duration::from_millis(100)));
    }
}
