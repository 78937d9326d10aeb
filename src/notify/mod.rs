//! # Retry notifications.
//!
//! ```text
//! drive() ── attempt failed, policy returned delay ──► Notify::notify(&err, delay) ──► wait(delay)
//!                                                           │
//!                                                     ┌─────┴──────┐
//!                                                     ▼            ▼
//!                                                  closure     LogNotify
//! ```
//!
//! - [`Notify`] the hook trait (blanket impl for `FnMut(&E, Duration)`)
//! - [`NoNotify`] the absent hook
//! - `LogNotify` a `tracing`-backed hook (feature `logging`)

mod hook;
#[cfg(feature = "logging")]
mod log;

pub use hook::{NoNotify, Notify};
#[cfg(feature = "logging")]
pub use log::LogNotify;
