//! # retryvisor
//!
//! **Retryvisor** runs a fallible async operation again and again until it succeeds,
//! a backoff policy says stop, or a cancellation signal fires.
//!
//! The driver is decoupled from how delays are computed: it only consumes the
//! [`Backoff`] capability (`reset` + `next_backoff`). Stock policies are provided
//! for convenience, but nothing in the loop depends on them.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │  Operation   │   │   Backoff    │   │    Notify    │   │    Cancel    │
//!     │ FnMut → Fut  │   │ reset/next   │   │ (&err, delay)│   │ reason/done  │
//!     │  (required)  │   │  (required)  │   │  (optional)  │   │  (optional)  │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼                  ▼
//! ┌──────────────────────────────────────────────────────────────────────────┐
//! │  Retry / drive()   (single logical thread of control, sequential)        │
//! └──────────────────────────────────┬───────────────────────────────────────┘
//!                                    ▼
//!                 Ok(T) | Err(Operation(last err)) | Err(Canceled(reason))
//! ```
//!
//! ### Lifecycle
//! ```text
//! Start ──► cancel already done? ──► Cancelled
//!   │
//!   ├─► backoff.reset()
//!   │
//! loop {
//!   ├─► operation().await
//!   │       ├─ Ok  ──► Success
//!   │       └─ Err ──► backoff.next_backoff()
//!   │                    ├─ STOP        ──► PolicyStopped (last error returned)
//!   │                    └─ Some(delay) ──► notify(&err, delay)
//!   │                                       └─► wait(delay) racing cancel.done()
//!   │                                             ├─ elapsed ──► next attempt
//!   │                                             └─ fired   ──► Cancelled
//! }
//! ```
//!
//! ## Features
//! | Area              | Description                                                    | Key types / traits                          |
//! |-------------------|----------------------------------------------------------------|---------------------------------------------|
//! | **Driver**        | The retry loop and its builder.                                | [`drive`], [`Retry`], [`retry`]             |
//! | **Policies**      | Delay capability plus stock implementations.                   | [`Backoff`], [`ExponentialBackoff`]         |
//! | **Notify**        | Hook fired before each backoff wait.                           | [`Notify`], [`NoNotify`]                    |
//! | **Cancellation**  | Level-triggered abort, optional deadline.                      | [`Cancel`], [`CancelSignal`]                |
//! | **Errors**        | Terminal outcome: last operation error or cancel reason.       | [`RetryError`], [`CancelReason`]            |
//! | **Configuration** | Build the stock policy from one settings struct.               | [`Config`]                                  |
//!
//! ## Optional features
//! - `logging`: exports [`LogNotify`], a notifier that emits `tracing` events.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use retryvisor::{CancelSignal, Config, Retry, RetryError};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let cfg = Config {
//!         first: Duration::from_millis(1),
//!         max_retries: 4,
//!         ..Config::default()
//!     };
//!     let mut backoff = cfg.backoff();
//!     let deadline = CancelSignal::with_timeout(Duration::from_secs(5));
//!
//!     let mut calls = 0;
//!     let res: Result<(), RetryError<&str>> = Retry::new(&mut backoff)
//!         .cancel_on(&deadline)
//!         .run(|| {
//!             calls += 1;
//!             async { Err("service unavailable") }
//!         })
//!         .await;
//!
//!     // 1 attempt + 4 retries, then the last error comes back untouched.
//!     assert_eq!(calls, 5);
//!     assert_eq!(res.unwrap_err().into_operation(), Some("service unavailable"));
//! }
//! ```
mod cancel;
mod config;
mod core;
mod error;
mod notify;
mod policies;

// ---- Public re-exports ----

pub use cancel::{Cancel, CancelSignal};
pub use config::Config;
pub use crate::core::{Retry, drive, retry, retry_notify, retry_notify_with_cancel};
pub use error::{CancelReason, RetryError};
pub use notify::{NoNotify, Notify};
pub use policies::{
    Backoff, ConstantBackoff, ExponentialBackoff, JitterPolicy, STOP, StopBackoff, WithMaxRetries,
    ZeroBackoff,
};

// Optional: expose a tracing-backed notifier.
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use notify::LogNotify;
