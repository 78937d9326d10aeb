//! # Example: flaky
//!
//! Demonstrates how [`Retry`] re-runs a failing operation according to an
//! [`ExponentialBackoff`], logging each retry through [`LogNotify`].
//!
//! The operation fails twice before succeeding.
//!
//! ## Flow
//! ```text
//! Retry::run()
//!   ├─► operation() → Err("boom #1")
//!   ├─► next_backoff() → ~100ms
//!   ├─► LogNotify: WARN retry=1 delay≈100ms
//!   ├─► sleep(delay)
//!   ├─► operation() → Err("boom #2")
//!   ├─► next_backoff() → ~200ms
//!   ├─► LogNotify: WARN retry=2 delay≈200ms
//!   ├─► sleep(delay)
//!   └─► operation() → Ok(3)
//! ```
//!
//! Ctrl-C during a wait aborts the loop with `CancelReason::Canceled`.
//!
//! ## Run
//! ```bash
//! cargo run --example flaky --features logging
//! ```

use std::time::Duration;

use retryvisor::{CancelSignal, ExponentialBackoff, JitterPolicy, LogNotify, Retry};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "debug".into()))
        .init();

    // 1. Backoff: 100ms doubling, equal jitter, 10s budget
    let mut backoff = ExponentialBackoff::new()
        .with_first(Duration::from_millis(100))
        .with_max(Duration::from_secs(2))
        .with_factor(2.0)
        .with_jitter(JitterPolicy::Equal)
        .with_max_elapsed(Some(Duration::from_secs(10)));

    // 2. Cancellation: Ctrl-C fires the signal
    let shutdown = CancelSignal::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            trigger.cancel();
        }
    });

    // 3. Operation failing twice before succeeding
    let mut attempt = 0u32;
    let value = Retry::new(&mut backoff)
        .notify(LogNotify::new("flaky"))
        .cancel_on(&shutdown)
        .run(|| {
            attempt += 1;
            let n = attempt;
            async move {
                if n <= 2 {
                    Err(format!("boom #{n}"))
                } else {
                    Ok(n)
                }
            }
        })
        .await
        .map_err(|e| e.to_string())?;

    println!("[main] succeeded on attempt {value}");
    Ok(())
}
