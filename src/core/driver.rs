//! # The retry loop.
//!
//! Runs one operation under a [`Backoff`] policy until success, `STOP`, or cancellation.
//!
//! ## Flow
//! ```text
//! drive()
//!   ├─► cancel already done? ──► Err(Canceled(reason))   (operation never runs)
//!   ├─► backoff.reset()
//!   └─► loop {
//!         ├─► operation().await
//!         │     └─ Ok(v) ──► return Ok(v)
//!         ├─► backoff.next_backoff()
//!         │     └─ STOP  ──► return Err(Operation(last error))
//!         ├─► notify(&err, delay)
//!         └─► select! {
//!               sleep(delay)   ──► continue
//!               cancel.done()  ──► return Err(Canceled(reason))
//!             }
//!       }
//! ```
//!
//! ## Rules
//! - Attempts run **sequentially** (never concurrent)
//! - Cancellation is checked **only** before the first attempt and during waits;
//!   a running operation is never interrupted
//! - Notify happens-before the wait it announces
//! - Operation errors are returned verbatim, never inspected

use std::future::Future;

use tokio::{select, time};
use tracing::debug;

use crate::{cancel::Cancel, error::RetryError, notify::Notify, policies::Backoff};

/// Runs `operation` until it succeeds, `backoff` returns `STOP`, or `cancel` fires.
///
/// ### Outcomes
/// - `Ok(value)`: an attempt succeeded
/// - `Err(RetryError::Operation(e))`: the policy stopped; `e` is the last attempt's error
/// - `Err(RetryError::Canceled(reason))`: `cancel` was done at entry or fired during a wait
///
/// ### Policy ownership
/// `backoff` is reset on entry (unless cancelled at entry) and left in whatever
/// state the loop reached; it belongs to the caller again afterwards.
///
/// ### Notify
/// `notify` runs inline once per retried failure, never for the terminal one.
/// Pass [`NoNotify`](crate::NoNotify) for none.
///
/// ### Cancellation
/// `None` makes every wait run to completion.
pub async fn drive<F, Fut, T, E, B, N, C>(
    mut operation: F,
    backoff: &mut B,
    notify: &mut N,
    cancel: Option<&C>,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    B: Backoff + ?Sized,
    N: Notify<E> + ?Sized,
    C: Cancel + ?Sized,
{
    if let Some(reason) = cancel.and_then(|c| c.reason()) {
        debug!(reason = reason.as_label(), "retry canceled before first attempt");
        return Err(RetryError::Canceled(reason));
    }

    backoff.reset();
    let mut attempt: u64 = 0;

    loop {
        attempt += 1;
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        let Some(delay) = backoff.next_backoff() else {
            debug!(attempt, "backoff stopped, giving up");
            return Err(RetryError::Operation(err));
        };

        debug!(attempt, ?delay, "attempt failed, retry scheduled");
        notify.notify(&err, delay);

        match cancel {
            Some(cancel) => {
                let sleep = time::sleep(delay);
                tokio::pin!(sleep);
                select! {
                    biased;
                    reason = cancel.done() => {
                        debug!(attempt, reason = reason.as_label(), "retry canceled during backoff");
                        return Err(RetryError::Canceled(reason));
                    }
                    _ = &mut sleep => {}
                }
            }
            None => time::sleep(delay).await,
        }
    }
}
