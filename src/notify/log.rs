//! # LogNotify: retried failures as `tracing` events
//!
//! A ready-made [`Notify`] that emits one `WARN` event per retried failure.
//! The crate never installs a subscriber; wire one up in the binary.
//!
//! ## Example output (with `tracing_subscriber::fmt`)
//! ```text
//! WARN retryvisor::notify::log: [backoff] operation failed, retrying operation="fetch" retry=1 delay=500ms error=connection refused
//! WARN retryvisor::notify::log: [backoff] operation failed, retrying operation="fetch" retry=2 delay=750ms error=connection refused
//! ```

use std::borrow::Cow;
use std::fmt::Display;
use std::time::Duration;

use crate::notify::Notify;

/// Logging notifier.
#[derive(Debug, Default)]
pub struct LogNotify {
    name: Cow<'static, str>,
    retries: u64,
}

impl LogNotify {
    /// Creates a notifier labelling its events with `name`.
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            retries: 0,
        }
    }

    /// Retries observed so far.
    pub fn retries(&self) -> u64 {
        self.retries
    }
}

impl<E: Display + ?Sized> Notify<E> for LogNotify {
    fn notify(&mut self, err: &E, delay: Duration) {
        self.retries += 1;
        tracing::warn!(
            operation = %self.name,
            retry = self.retries,
            ?delay,
            error = %err,
            "[backoff] operation failed, retrying"
        );
    }
}
