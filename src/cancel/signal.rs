//! # Cancellation signal with an optional deadline.
//!
//! [`CancelSignal`] wraps a [`CancellationToken`] and optionally a deadline. It is
//! done when either the token is cancelled or the deadline passes, whichever
//! happens first, and keeps reporting the reason of whichever won.
//!
//! ```text
//! cancel()              ─► reason = Canceled          (first writer wins)
//! deadline observed     ─► reason = DeadlineExceeded  (first writer wins) + token cancelled
//! parent fired          ─► reason = parent's reason (or DeadlineExceeded if
//!                           the inherited deadline passed, else Canceled)
//! ```
//!
//! Clones share state, so one signal can be handed to many concurrent retry loops.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use async_trait::async_trait;
use tokio::{select, time::Instant};
use tokio_util::sync::CancellationToken;

use crate::cancel::Cancel;
use crate::error::CancelReason;

/// Cancellation signal: explicit cancel, deadline, or both.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use retryvisor::{Cancel, CancelReason, CancelSignal};
///
/// let sig = CancelSignal::new();
/// assert_eq!(sig.reason(), None);
///
/// sig.cancel();
/// assert_eq!(sig.reason(), Some(CancelReason::Canceled));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CancelSignal {
    token: CancellationToken,
    deadline: Option<Instant>,
    cause: Arc<OnceLock<CancelReason>>,
    parent: Option<Arc<CancelSignal>>,
}

impl CancelSignal {
    /// Creates a signal that only fires on [`CancelSignal::cancel`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a signal that fires on cancel or once `deadline` passes.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            ..Self::default()
        }
    }

    /// Creates a signal that fires on cancel or `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// Wraps an existing token; cancelling the token fires the signal.
    pub fn from_token(token: CancellationToken) -> Self {
        Self {
            token,
            ..Self::default()
        }
    }

    /// Derives a child signal.
    ///
    /// The child fires when the parent fires (and inherits its deadline), but
    /// cancelling the child does not affect the parent.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
            cause: Arc::default(),
            parent: Some(Arc::new(self.clone())),
        }
    }

    /// Fires the signal with [`CancelReason::Canceled`].
    ///
    /// No-op if the signal already fired.
    pub fn cancel(&self) {
        self.fire(CancelReason::Canceled);
    }

    /// Returns the deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns the underlying token (e.g. to hand to the operation itself).
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    fn fire(&self, reason: CancelReason) -> CancelReason {
        let reason = *self.cause.get_or_init(|| reason);
        self.token.cancel();
        reason
    }

    fn deadline_passed(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Resolves the reason once the token is cancelled from outside this signal
    /// (parent signal or a wrapped token) and records it.
    fn inherited(&self) -> CancelReason {
        if let Some(reason) = self.cause.get() {
            return *reason;
        }
        let reason = match self.parent.as_deref().and_then(|p| p.reason()) {
            Some(reason) => reason,
            None if self.deadline_passed() => CancelReason::DeadlineExceeded,
            None => CancelReason::Canceled,
        };
        self.fire(reason)
    }
}

#[async_trait]
impl Cancel for CancelSignal {
    fn reason(&self) -> Option<CancelReason> {
        if let Some(reason) = self.cause.get() {
            return Some(*reason);
        }
        if self.token.is_cancelled() {
            return Some(self.inherited());
        }
        if self.deadline_passed() {
            return Some(self.fire(CancelReason::DeadlineExceeded));
        }
        None
    }

    async fn done(&self) -> CancelReason {
        if let Some(reason) = self.reason() {
            return reason;
        }
        match self.deadline {
            Some(deadline) => {
                select! {
                    _ = self.token.cancelled() => self.inherited(),
                    _ = tokio::time::sleep_until(deadline) => {
                        self.fire(CancelReason::DeadlineExceeded)
                    }
                }
            }
            None => {
                self.token.cancelled().await;
                self.inherited()
            }
        }
    }
}
