//! Retry execution engine

use std::fmt::Display;
use std::future::Future;

use tokio::time::Instant;

use crate::types::RetryPolicy;

use super::error::RetryError;
use super::observer::{NoOpObserver, RetryObserver};
use super::strategies::calculate_delay;

/// Builder for configuring a `RetryExecutor`
///
/// # Example
///
/// ```rust
/// use masst_core::retry::{RetryExecutorBuilder, TracingObserver};
/// use masst_core::types::RetryPolicy;
///
/// let executor = RetryExecutorBuilder::new()
///     .with_policy(RetryPolicy::fixed(15, 1000))
///     .with_observer(TracingObserver::new("readiness"))
///     .with_jitter(false)
///     .build();
/// ```
pub struct RetryExecutorBuilder<O = NoOpObserver> {
    policy: RetryPolicy,
    observer: O,
    jitter: bool,
}

impl Default for RetryExecutorBuilder<NoOpObserver> {
    fn default() -> Self {
        Self::new()
    }
}

impl RetryExecutorBuilder<NoOpObserver> {
    pub fn new() -> Self {
        Self {
            policy: RetryPolicy::default(),
            observer: NoOpObserver,
            jitter: true,
        }
    }
}

impl<O> RetryExecutorBuilder<O> {
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the observer that receives per-attempt callbacks
    pub fn with_observer<O2>(self, observer: O2) -> RetryExecutorBuilder<O2> {
        RetryExecutorBuilder {
            policy: self.policy,
            observer,
            jitter: self.jitter,
        }
    }

    /// Enable or disable jitter. Enabled by default.
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn build(self) -> RetryExecutor<O> {
        RetryExecutor {
            policy: self.policy,
            observer: self.observer,
            jitter: self.jitter,
        }
    }
}

/// A retry executor with a fixed policy and observer
pub struct RetryExecutor<O = NoOpObserver> {
    policy: RetryPolicy,
    observer: O,
    jitter: bool,
}

impl RetryExecutor<NoOpObserver> {
    pub fn builder() -> RetryExecutorBuilder<NoOpObserver> {
        RetryExecutorBuilder::new()
    }
}

impl<O: RetryObserver> RetryExecutor<O> {
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run `op` until it succeeds or the attempt budget is spent.
    ///
    /// No delay follows the final attempt.
    pub async fn execute<F, Fut, T, E>(&self, mut op: F) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let start = Instant::now();
        let max_attempts = self.policy.max_attempts;

        for attempt in 1..=max_attempts {
            self.observer.on_attempt_start(attempt, max_attempts);

            match op().await {
                Ok(value) => {
                    self.observer.on_success(attempt, start.elapsed());
                    return Ok(value);
                }
                Err(err) => {
                    if attempt >= max_attempts {
                        self.observer.on_exhausted(attempt, &err);
                        return Err(RetryError::Exhausted {
                            attempts: attempt,
                            source: err,
                            total_duration: start.elapsed(),
                        });
                    }

                    let delay = calculate_delay(&self.policy, attempt, self.jitter);
                    self.observer.on_attempt_failed(attempt, &err, delay);
                    tokio::time::sleep(delay).await;
                }
            }
        }

        Err(RetryError::NoAttempts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retry::StatsObserver;
    use std::io;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_after_failures() {
        let stats = Arc::new(StatsObserver::new());
        let calls = AtomicU32::new(0);

        let executor = RetryExecutor::builder()
            .with_policy(RetryPolicy::fixed(5, 1000))
            .with_observer(stats.clone())
            .with_jitter(false)
            .build();

        let started = Instant::now();
        let result = executor
            .execute(|| {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    if n < 3 {
                        Err(io::Error::other("not ready"))
                    } else {
                        Ok(n)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(stats.attempt_starts(), 3);
        assert_eq!(stats.failures(), 2);
        assert_eq!(stats.successes(), 1);
        assert_eq!(started.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_skips_trailing_delay() {
        let stats = Arc::new(StatsObserver::new());
        let executor = RetryExecutor::builder()
            .with_policy(RetryPolicy::fixed(15, 1000))
            .with_observer(stats.clone())
            .with_jitter(false)
            .build();

        let started = Instant::now();
        let result: Result<(), _> = executor
            .execute(|| async { Err(io::Error::other("refused")) })
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.attempts(), 15);
        assert_eq!(stats.exhaustions(), 1);
        assert_eq!(stats.failures(), 14);
        // 14 delays between 15 attempts
        assert_eq!(started.elapsed(), Duration::from_secs(14));
    }

    #[tokio::test]
    async fn test_zero_attempts() {
        let executor = RetryExecutor::builder()
            .with_policy(RetryPolicy::fixed(0, 10))
            .build();
        let result: Result<(), RetryError<io::Error>> =
            executor.execute(|| async { Ok(()) }).await;
        assert!(matches!(result, Err(RetryError::NoAttempts)));
    }
}
