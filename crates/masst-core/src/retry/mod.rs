//! Policy-based retry engine
//!
//! Drives bounded retry loops such as datastore readiness polling. Delays are
//! computed from a [`RetryPolicy`](crate::types::RetryPolicy), every attempt is
//! reported to a [`RetryObserver`], and sleeping uses `tokio::time` so the loop
//! is cancelled simply by dropping its future.
//!
//! # Example
//!
//! ```rust,no_run
//! use masst_core::retry::{RetryExecutor, TracingObserver};
//! use masst_core::types::RetryPolicy;
//!
//! async fn wait_for_it() -> bool {
//!     RetryExecutor::builder()
//!         .with_policy(RetryPolicy::fixed(15, 1000))
//!         .with_observer(TracingObserver::new("readiness"))
//!         .with_jitter(false)
//!         .build()
//!         .execute(|| async { Ok::<_, std::io::Error>(()) })
//!         .await
//!         .is_ok()
//! }
//! ```

mod error;
mod executor;
mod observer;
mod strategies;

pub use error::RetryError;
pub use executor::{RetryExecutor, RetryExecutorBuilder};
pub use observer::{NoOpObserver, RetryObserver, StatsObserver, TracingObserver};
pub use strategies::calculate_delay;
