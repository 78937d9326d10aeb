//! # Cancellation signals.
//!
//! - [`Cancel`] the capability the driver consumes (`reason` + `done`)
//! - [`CancelSignal`] token + optional deadline, reporting why it fired
//!
//! A bare [`CancellationToken`](tokio_util::sync::CancellationToken) also implements
//! [`Cancel`] and is the default signal type of [`Retry`](crate::Retry).

mod capability;
mod signal;

pub use capability::Cancel;
pub use signal::CancelSignal;
