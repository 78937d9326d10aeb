//! # Backoff capability consumed by the retry driver.
//!
//! [`Backoff`] is the only thing the driver knows about delays: it resets the
//! policy once per [`drive`](crate::drive) call and then asks for one delay per
//! failed attempt. How the delay is derived is entirely up to the implementor.
//!
//! ## Contract
//! ```text
//! reset()         → back to the initial state (attempt count, elapsed time, ...)
//! next_backoff()  → Some(delay)  wait `delay`, then retry
//!                 → None (STOP)  retry budget exhausted, do not wait
//! ```
//!
//! After `reset`, the first `next_backoff` returns the policy's initial delay
//! (or [`STOP`] straight away for a zero-retry policy).

use std::time::Duration;

/// Sentinel returned by [`Backoff::next_backoff`] meaning "do not retry again".
pub const STOP: Option<Duration> = None;

/// Stateful strategy producing successive retry delays or [`STOP`].
///
/// A policy is mutable sequential state. The driver borrows it as `&mut`, so
/// one policy cannot be driven by two concurrent retry loops at once.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use retryvisor::{Backoff, STOP};
///
/// /// Retries twice, 10ms apart.
/// struct Twice(u8);
///
/// impl Backoff for Twice {
///     fn reset(&mut self) { self.0 = 0; }
///
///     fn next_backoff(&mut self) -> Option<Duration> {
///         self.0 += 1;
///         if self.0 > 2 { STOP } else { Some(Duration::from_millis(10)) }
///     }
/// }
///
/// let mut b = Twice(0);
/// b.reset();
/// assert_eq!(b.next_backoff(), Some(Duration::from_millis(10)));
/// assert_eq!(b.next_backoff(), Some(Duration::from_millis(10)));
/// assert_eq!(b.next_backoff(), STOP);
/// ```
pub trait Backoff {
    /// Returns the policy to its initial state.
    fn reset(&mut self);

    /// Returns the delay before the next attempt, or [`STOP`].
    fn next_backoff(&mut self) -> Option<Duration>;
}

impl<B: Backoff + ?Sized> Backoff for Box<B> {
    fn reset(&mut self) {
        (**self).reset();
    }

    fn next_backoff(&mut self) -> Option<Duration> {
        (**self).next_backoff()
    }
}

impl<B: Backoff + ?Sized> Backoff for &mut B {
    fn reset(&mut self) {
        (**self).reset();
    }

    fn next_backoff(&mut self) -> Option<Duration> {
        (**self).next_backoff()
    }
}
