//! # Cancellation capability.
//!
//! [`Cancel`] is a read-only, level-triggered "done" signal with a reason.
//! The driver checks it in exactly two places: before the first attempt
//! ([`Cancel::reason`], non-blocking) and while waiting out a backoff delay
//! ([`Cancel::done`], raced against the timer).
//!
//! Implemented for:
//! - [`CancellationToken`]: reason is always [`CancelReason::Canceled`];
//! - [`CancelSignal`](crate::CancelSignal): adds a deadline ([`CancelReason::DeadlineExceeded`]).

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::CancelReason;

/// # Read-only cancellation signal.
///
/// Once done, a signal stays done and keeps reporting the same reason.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use retryvisor::{Cancel, CancelReason};
///
/// /// Never fires.
/// struct Never;
///
/// #[async_trait]
/// impl Cancel for Never {
///     fn reason(&self) -> Option<CancelReason> { None }
///
///     async fn done(&self) -> CancelReason {
///         std::future::pending().await
///     }
/// }
/// ```
#[async_trait]
pub trait Cancel: Send + Sync {
    /// Returns the reason if the signal is already done, without waiting.
    fn reason(&self) -> Option<CancelReason>;

    /// Completes when the signal is done. Must not busy-spin.
    async fn done(&self) -> CancelReason;
}

#[async_trait]
impl Cancel for CancellationToken {
    fn reason(&self) -> Option<CancelReason> {
        self.is_cancelled().then_some(CancelReason::Canceled)
    }

    async fn done(&self) -> CancelReason {
        self.cancelled().await;
        CancelReason::Canceled
    }
}

#[async_trait]
impl<C: Cancel + ?Sized> Cancel for Arc<C> {
    fn reason(&self) -> Option<CancelReason> {
        (**self).reason()
    }

    async fn done(&self) -> CancelReason {
        (**self).done().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_token_reason_follows_state() {
        let token = CancellationToken::new();
        assert_eq!(Cancel::reason(&token), None);
        token.cancel();
        assert_eq!(Cancel::reason(&token), Some(CancelReason::Canceled));
    }

    #[tokio::test(start_paused = true)]
    async fn test_token_done_wakes_on_cancel() {
        let token = CancellationToken::new();
        let trigger = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });
        assert_eq!(Cancel::done(&token).await, CancelReason::Canceled);
    }

    #[tokio::test]
    async fn test_arc_delegates() {
        let token = Arc::new(CancellationToken::new());
        token.cancel();
        assert_eq!(token.reason(), Some(CancelReason::Canceled));
        assert_eq!(token.done().await, CancelReason::Canceled);
    }
}
