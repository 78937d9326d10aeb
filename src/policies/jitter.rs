//! # Jitter for exponential retry delays.
//!
//! [`JitterPolicy`] adds randomness to backoff delays so that many callers retrying
//! the same dependency do not hit it in lockstep.
//!
//! - [`JitterPolicy::None`]: no randomization, predictable delays
//! - [`JitterPolicy::Full`]: random delay in [0, delay]
//! - [`JitterPolicy::Equal`]: delay/2 + random[0, delay/2]
//! - [`JitterPolicy::Decorrelated`]: random[first, prev * 3], capped at max

use rand::Rng;
use std::time::Duration;

/// Policy controlling randomization of retry delays.
///
/// ## Trade-offs
/// - **None**: predictable, but callers retry in lockstep
/// - **Full**: maximum spread, can cut the delay to almost nothing
/// - **Equal**: keeps at least half of the delay (default)
/// - **Decorrelated**: grows from the previous jittered delay instead of the attempt number
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum JitterPolicy {
    /// Use the exact backoff delay.
    None,

    /// Random delay in [0, delay].
    Full,

    /// delay/2 + random[0, delay/2]. Preserves ~75% of the delay on average.
    #[default]
    Equal,

    /// random[first, prev * 3], capped at max.
    ///
    /// Needs the previous delay; see [`apply_decorrelated`](Self::apply_decorrelated).
    Decorrelated,
}

impl JitterPolicy {
    /// Applies jitter to the given delay.
    ///
    /// ### Note
    /// For `Decorrelated`, this method returns the input unchanged.
    /// Use [`apply_decorrelated`](Self::apply_decorrelated) instead.
    pub fn apply(&self, delay: Duration) -> Duration {
        match self {
            JitterPolicy::None => delay,
            JitterPolicy::Full => full_jitter(delay),
            JitterPolicy::Equal => equal_jitter(delay),
            JitterPolicy::Decorrelated => delay,
        }
    }

    /// Applies decorrelated jitter: random in `[first, min(prev * 3, max)]`.
    ///
    /// Falls back to `apply(prev)` on any other variant.
    pub fn apply_decorrelated(&self, first: Duration, prev: Duration, max: Duration) -> Duration {
        if !matches!(self, JitterPolicy::Decorrelated) {
            return self.apply(prev);
        }

        let upper = prev.saturating_mul(3).min(max).max(first);
        first + pick_up_to(upper - first)
    }
}

/// Uniform pick in `[0, span]` at nanosecond resolution.
fn pick_up_to(span: Duration) -> Duration {
    let nanos = span.as_nanos();
    if nanos == 0 {
        return Duration::ZERO;
    }
    let picked = rand::rng().random_range(0..=nanos);
    // `picked <= span`, so the seconds part always fits in a u64.
    Duration::new(
        (picked / NANOS_PER_SEC) as u64,
        (picked % NANOS_PER_SEC) as u32,
    )
}

const NANOS_PER_SEC: u128 = 1_000_000_000;

fn full_jitter(delay: Duration) -> Duration {
    pick_up_to(delay)
}

fn equal_jitter(delay: Duration) -> Duration {
    let half = delay / 2;
    half + pick_up_to(delay - half)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_is_identity() {
        let d = Duration::from_millis(1234);
        assert_eq!(JitterPolicy::None.apply(d), d);
    }

    #[test]
    fn test_full_bounds() {
        let d = Duration::from_millis(1000);
        for _ in 0..200 {
            assert!(JitterPolicy::Full.apply(d) <= d);
        }
    }

    #[test]
    fn test_equal_bounds() {
        let d = Duration::from_millis(1000);
        for _ in 0..200 {
            let j = JitterPolicy::Equal.apply(d);
            assert!(j >= Duration::from_millis(500), "{j:?} below half");
            assert!(j <= d, "{j:?} above delay");
        }
    }

    #[test]
    fn test_zero_delay_stays_zero() {
        for p in [JitterPolicy::Full, JitterPolicy::Equal] {
            assert_eq!(p.apply(Duration::ZERO), Duration::ZERO);
        }
    }

    #[test]
    fn test_decorrelated_range() {
        let first = Duration::from_millis(100);
        let prev = Duration::from_millis(400);
        let max = Duration::from_secs(1);
        for _ in 0..200 {
            let j = JitterPolicy::Decorrelated.apply_decorrelated(first, prev, max);
            assert!(j >= first);
            assert!(j <= Duration::from_millis(1000));
        }
    }

    #[test]
    fn test_decorrelated_floor_when_first_exceeds_upper() {
        let first = Duration::from_secs(2);
        let j = JitterPolicy::Decorrelated.apply_decorrelated(
            first,
            Duration::from_millis(10),
            Duration::from_secs(1),
        );
        assert_eq!(j, first);
    }

    #[test]
    fn test_sub_millisecond_delays_keep_resolution() {
        let d = Duration::from_micros(900);
        for _ in 0..200 {
            let e = JitterPolicy::Equal.apply(d);
            assert!(e >= Duration::from_micros(450), "{e:?} below half");
            assert!(e <= d, "{e:?} above delay");
            assert!(JitterPolicy::Full.apply(d) <= d);
        }
    }

    #[test]
    fn test_full_jitter_spreads_below_one_millisecond() {
        let d = Duration::from_micros(900);
        let nonzero = (0..200)
            .map(|_| JitterPolicy::Full.apply(d))
            .filter(|j| !j.is_zero())
            .count();
        assert!(nonzero > 0);
    }

    #[test]
    fn test_huge_delays_do_not_wrap() {
        let d = Duration::MAX;
        for _ in 0..50 {
            assert!(JitterPolicy::Equal.apply(d) >= d / 2);
            let j = JitterPolicy::Decorrelated.apply_decorrelated(
                Duration::from_secs(1),
                Duration::MAX,
                Duration::MAX,
            );
            assert!(j >= Duration::from_secs(1));
        }
    }

    #[test]
    fn test_decorrelated_sub_millisecond() {
        let first = Duration::from_micros(200);
        let prev = Duration::from_micros(300);
        for _ in 0..200 {
            let j = JitterPolicy::Decorrelated.apply_decorrelated(first, prev, Duration::from_secs(1));
            assert!(j >= first, "{j:?} below first");
            assert!(j <= Duration::from_micros(900), "{j:?} above prev * 3");
        }
    }
}
