//! Retry core.
//!
//! - [`driver`]: the loop itself ([`drive`]): attempt, ask the policy, notify, wait (cancellable);
//! - [`retry`]: the [`Retry`] builder and the `retry*` shorthands over [`drive`].

mod driver;
mod retry;

pub use driver::drive;
pub use retry::{Retry, retry, retry_notify, retry_notify_with_cancel};
