//! # Retry builder and convenience entry points.
//!
//! [`Retry`] bundles the borrowed policy with an optional notifier and an optional
//! cancellation signal, then hands everything to [`drive`].
//!
//! ```text
//! Retry::new(&mut backoff)        policy (required)
//!     .notify(|err: &E, d| ..)    hook   (optional, default NoNotify)
//!     .cancel_on(&signal)         cancel (optional, default none)
//!     .run(operation).await       → Result<T, RetryError<E>>
//! ```
//!
//! The free functions [`retry`], [`retry_notify`] and [`retry_notify_with_cancel`]
//! are shorthands for the common combinations.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::{
    cancel::Cancel,
    core::driver::drive,
    error::RetryError,
    notify::{NoNotify, Notify},
    policies::Backoff,
};

/// One retry invocation, ready to run.
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use tokio_util::sync::CancellationToken;
/// use retryvisor::{ConstantBackoff, Retry, WithMaxRetries};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut backoff = WithMaxRetries::new(ConstantBackoff::new(Duration::from_millis(1)), 3);
/// let shutdown = CancellationToken::new();
/// let mut attempts = 0;
///
/// let res = Retry::new(&mut backoff)
///     .notify(|err: &String, delay: Duration| eprintln!("{err}, retrying in {delay:?}"))
///     .cancel_on(&shutdown)
///     .run(|| {
///         attempts += 1;
///         let n = attempts;
///         async move { if n < 3 { Err(format!("attempt {n} failed")) } else { Ok(n) } }
///     })
///     .await;
///
/// assert_eq!(res.unwrap(), 3);
/// # }
/// ```
#[must_use = "a Retry does nothing until `run` is awaited"]
pub struct Retry<'a, B: ?Sized, N = NoNotify, C: ?Sized = CancellationToken> {
    backoff: &'a mut B,
    notify: N,
    cancel: Option<&'a C>,
}

impl<'a, B: Backoff + ?Sized> Retry<'a, B> {
    /// Starts a retry invocation over `backoff`, with no notifier and no cancellation.
    pub fn new(backoff: &'a mut B) -> Self {
        Self {
            backoff,
            notify: NoNotify,
            cancel: None,
        }
    }
}

impl<'a, B: Backoff + ?Sized, N, C: Cancel + ?Sized> Retry<'a, B, N, C> {
    /// Sets the notifier fired before each backoff wait.
    pub fn notify<N2>(self, notify: N2) -> Retry<'a, B, N2, C> {
        Retry {
            backoff: self.backoff,
            notify,
            cancel: self.cancel,
        }
    }

    /// Makes the pre-entry check and every backoff wait observe `cancel`.
    pub fn cancel_on<C2: Cancel + ?Sized>(self, cancel: &'a C2) -> Retry<'a, B, N, C2> {
        Retry {
            backoff: self.backoff,
            notify: self.notify,
            cancel: Some(cancel),
        }
    }

    /// Runs `operation` under the configured policy. See [`drive`].
    pub async fn run<F, Fut, T, E>(self, operation: F) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        N: Notify<E>,
    {
        let Retry {
            backoff,
            mut notify,
            cancel,
        } = self;
        drive(operation, backoff, &mut notify, cancel).await
    }
}

/// Retries `operation` until it succeeds or `backoff` stops.
///
/// `operation` runs at least once.
pub async fn retry<F, Fut, T, E, B>(operation: F, backoff: &mut B) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    B: Backoff + ?Sized,
{
    Retry::new(backoff).run(operation).await
}

/// Like [`retry`], calling `notify` with the error and delay before each wait.
pub async fn retry_notify<F, Fut, T, E, B, N>(
    operation: F,
    backoff: &mut B,
    notify: N,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    B: Backoff + ?Sized,
    N: Notify<E>,
{
    Retry::new(backoff).notify(notify).run(operation).await
}

/// Like [`retry_notify`], returning early if `cancel` is done at entry or fires during a wait.
pub async fn retry_notify_with_cancel<F, Fut, T, E, B, N, C>(
    cancel: &C,
    operation: F,
    backoff: &mut B,
    notify: N,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    B: Backoff + ?Sized,
    N: Notify<E>,
    C: Cancel + ?Sized,
{
    Retry::new(backoff)
        .notify(notify)
        .cancel_on(cancel)
        .run(operation)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CancelReason, CancelSignal, ConstantBackoff, WithMaxRetries};
    use std::time::Duration;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_retry_without_notify() {
        let mut backoff = WithMaxRetries::new(ConstantBackoff::new(Duration::from_millis(10)), 2);
        let mut calls = 0;
        let res: Result<(), _> = retry(
            || {
                calls += 1;
                async { Err("down") }
            },
            &mut backoff,
        )
        .await;
        assert_eq!(res.unwrap_err().into_operation(), Some("down"));
        assert_eq!(calls, 3);
        assert_eq!(backoff.used(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_cuts_constant_backoff() {
        let sig = CancelSignal::with_timeout(Duration::from_millis(250));
        let mut backoff = ConstantBackoff::new(Duration::from_millis(100));
        let mut calls = 0;
        let mut notified = Vec::new();
        let start = Instant::now();

        let res: Result<(), _> = retry_notify_with_cancel(
            &sig,
            || {
                calls += 1;
                async { Err(()) }
            },
            &mut backoff,
            |_: &(), d: Duration| notified.push(d),
        )
        .await;

        assert_eq!(res.unwrap_err().cancel_reason(), Some(CancelReason::DeadlineExceeded));
        assert_eq!(calls, 3);
        assert_eq!(notified.len(), 3);
        assert_eq!(start.elapsed(), Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dyn_policy_and_boxed_notifier() {
        let mut backoff: Box<dyn Backoff + Send> =
            Box::new(WithMaxRetries::new(ConstantBackoff::new(Duration::from_millis(1)), 1));
        let mut seen = 0u32;
        let hook: Box<dyn FnMut(&String, Duration) + Send + '_> = Box::new(|_, _| seen += 1);

        let res: Result<(), _> = retry_notify(
            || async { Err("x".to_string()) },
            &mut backoff,
            hook,
        )
        .await;

        assert!(res.is_err());
        assert_eq!(seen, 1);
    }
}
