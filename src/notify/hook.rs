//! # Notify hook.
//!
//! Provides [`Notify`] the observability callback fired once per **retried** failure,
//! synchronously on the retry path, right before the backoff wait.
//!
//! ## Rules
//! - Called with the failed attempt's error and the delay about to be waited.
//! - Never called for the terminal failure (policy returned `STOP`).
//! - Never called on success.
//! - Runs inline: a slow notifier delays the next wait. Panics propagate to the caller.

use std::time::Duration;

/// Notify-on-error callback.
///
/// Implemented for every `FnMut(&E, Duration)`. Annotate the error parameter's
/// type in closures (`|err: &MyError, delay| ...`) so the closure is general over
/// the borrow's lifetime.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use retryvisor::Notify;
///
/// let mut seen = Vec::new();
/// let mut hook = |err: &String, delay: Duration| seen.push((err.clone(), delay));
/// hook.notify(&"boom".to_string(), Duration::from_millis(50));
/// drop(hook);
/// assert_eq!(seen, vec![("boom".to_string(), Duration::from_millis(50))]);
/// ```
pub trait Notify<E: ?Sized> {
    /// Observes a failed attempt that is about to be retried after `delay`.
    fn notify(&mut self, err: &E, delay: Duration);
}

impl<E: ?Sized, F> Notify<E> for F
where
    F: FnMut(&E, Duration),
{
    fn notify(&mut self, err: &E, delay: Duration) {
        self(err, delay)
    }
}

/// Absent notifier: does nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoNotify;

impl<E: ?Sized> Notify<E> for NoNotify {
    fn notify(&mut self, _err: &E, _delay: Duration) {}
}
