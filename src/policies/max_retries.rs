//! # Retry-count cap.
//!
//! [`WithMaxRetries`] wraps any [`Backoff`] and returns [`STOP`] once the inner
//! policy has produced `max` delays since the last reset.
//!
//! ```text
//! max = 2:  next → d1, next → d2, next → STOP, ...
//! max = 0:  next → STOP  (operation runs exactly once)
//! ```

use std::time::Duration;

use crate::policies::policy::{Backoff, STOP};

/// Caps the number of retries of an inner policy.
#[derive(Clone, Debug)]
pub struct WithMaxRetries<B> {
    inner: B,
    max: u32,
    used: u32,
}

impl<B: Backoff> WithMaxRetries<B> {
    /// Wraps `inner`, allowing at most `max` retries per reset.
    pub fn new(inner: B, max: u32) -> Self {
        Self {
            inner,
            max,
            used: 0,
        }
    }

    /// Retries handed out since the last reset.
    pub fn used(&self) -> u32 {
        self.used
    }

    pub fn inner(&self) -> &B {
        &self.inner
    }

    pub fn into_inner(self) -> B {
        self.inner
    }
}

impl<B: Backoff> Backoff for WithMaxRetries<B> {
    fn reset(&mut self) {
        self.used = 0;
        self.inner.reset();
    }

    fn next_backoff(&mut self) -> Option<Duration> {
        if self.used >= self.max {
            return STOP;
        }
        self.used += 1;
        self.inner.next_backoff()
    }
}
