//! Error types returned by the retry driver.
//!
//! This module defines two types:
//!
//! - [`RetryError`]: the terminal outcome of a failed [`drive`](crate::drive) call.
//! - [`CancelReason`]: why a cancellation signal fired.
//!
//! Both provide `as_label` for logs/metrics, in the same stable snake_case style.

use thiserror::Error;

/// # Why a cancellation signal is done.
///
/// Returned inside [`RetryError::Canceled`] when cancellation wins over the retry loop.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CancelReason {
    /// The signal was fired explicitly (or by a parent signal).
    #[error("operation canceled")]
    Canceled,

    /// The signal's deadline passed.
    #[error("deadline exceeded")]
    DeadlineExceeded,
}

impl CancelReason {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use retryvisor::CancelReason;
    ///
    /// assert_eq!(CancelReason::DeadlineExceeded.as_label(), "deadline_exceeded");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            CancelReason::Canceled => "canceled",
            CancelReason::DeadlineExceeded => "deadline_exceeded",
        }
    }
}

/// # Terminal error of a retry loop.
///
/// Exactly one of two outcomes:
/// - [`RetryError::Operation`]: the policy stopped; holds the **last** operation error, untouched.
/// - [`RetryError::Canceled`]: the cancellation signal fired first; holds its reason.
///
/// `Operation` is transparent: its `Display` and `source` are those of the wrapped error.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RetryError<E> {
    /// Backoff policy returned `Stop`; the last attempt's error is passed through.
    #[error(transparent)]
    Operation(E),

    /// Cancellation signal was done before the first attempt or during a wait.
    #[error("retry aborted: {0}")]
    Canceled(CancelReason),
}

impl<E> RetryError<E> {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use retryvisor::{CancelReason, RetryError};
    ///
    /// let err: RetryError<std::io::Error> = RetryError::Canceled(CancelReason::Canceled);
    /// assert_eq!(err.as_label(), "retry_canceled");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RetryError::Operation(_) => "retry_exhausted",
            RetryError::Canceled(_) => "retry_canceled",
        }
    }

    /// Returns `true` if cancellation ended the loop.
    pub fn is_canceled(&self) -> bool {
        matches!(self, RetryError::Canceled(_))
    }

    /// Returns the cancellation reason, if cancellation ended the loop.
    pub fn cancel_reason(&self) -> Option<CancelReason> {
        match self {
            RetryError::Canceled(reason) => Some(*reason),
            RetryError::Operation(_) => None,
        }
    }

    /// Borrows the last operation error, if the policy ended the loop.
    pub fn operation(&self) -> Option<&E> {
        match self {
            RetryError::Operation(err) => Some(err),
            RetryError::Canceled(_) => None,
        }
    }

    /// Unwraps the last operation error, if the policy ended the loop.
    pub fn into_operation(self) -> Option<E> {
        match self {
            RetryError::Operation(err) => Some(err),
            RetryError::Canceled(_) => None,
        }
    }
}
