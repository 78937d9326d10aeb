//! Backoff capability and stock policies.
//!
//! The driver only sees the [`Backoff`] trait. Everything else in this module is
//! an ordinary implementor that callers may use or ignore.
//!
//! ## Contents
//! - [`Backoff`], [`STOP`]     the capability: `reset` + `next_backoff`
//! - [`StopBackoff`]           never retry
//! - [`ZeroBackoff`]           retry immediately, forever
//! - [`ConstantBackoff`]       fixed interval, forever
//! - [`ExponentialBackoff`]    first × factor^n, capped, jittered, time-budgeted
//! - [`JitterPolicy`]          randomization used by the exponential policy
//! - [`WithMaxRetries`]        caps any policy to `n` retries
//!
//! ## Defaults
//! - `ExponentialBackoff::default()` → first=500ms, factor=1.5, max=60s, jitter=Equal, max_elapsed=15min.
//! - `JitterPolicy::Equal` by default.

mod exponential;
mod jitter;
mod max_retries;
mod policy;
mod simple;

pub use exponential::ExponentialBackoff;
pub use jitter::JitterPolicy;
pub use max_retries::WithMaxRetries;
pub use policy::{Backoff, STOP};
pub use simple::{ConstantBackoff, StopBackoff, ZeroBackoff};
