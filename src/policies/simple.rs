//! # Stateless policies.
//!
//! - [`StopBackoff`] never retries.
//! - [`ZeroBackoff`] retries immediately, forever.
//! - [`ConstantBackoff`] retries forever with a fixed interval.
//!
//! Combine with [`WithMaxRetries`](crate::WithMaxRetries) to bound the unbounded ones.

use std::time::Duration;

use crate::policies::policy::{Backoff, STOP};

/// Zero-retry policy: every call returns [`STOP`].
#[derive(Clone, Copy, Debug, Default)]
pub struct StopBackoff;

impl Backoff for StopBackoff {
    fn reset(&mut self) {}

    fn next_backoff(&mut self) -> Option<Duration> {
        STOP
    }
}

/// Retries immediately: every call returns `Duration::ZERO`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZeroBackoff;

impl Backoff for ZeroBackoff {
    fn reset(&mut self) {}

    fn next_backoff(&mut self) -> Option<Duration> {
        Some(Duration::ZERO)
    }
}

/// Retries with the same delay every time.
#[derive(Clone, Copy, Debug)]
pub struct ConstantBackoff {
    /// Delay between attempts.
    pub interval: Duration,
}

impl ConstantBackoff {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Backoff for ConstantBackoff {
    fn reset(&mut self) {}

    fn next_backoff(&mut self) -> Option<Duration> {
        Some(self.interval)
    }
}
