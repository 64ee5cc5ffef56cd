//! Delay calculation for retry strategies

use crate::types::{RetryPolicy, RetryStrategy};
use rand::Rng;
use std::time::Duration;

/// Delay to wait after `attempt` (1-indexed) fails.
///
/// The result is capped at `max_delay_ms`; jitter adds up to 25% on top.
pub fn calculate_delay(policy: &RetryPolicy, attempt: u32, jitter: bool) -> Duration {
    let index = attempt.saturating_sub(1);

    let base_ms = match policy.strategy {
        RetryStrategy::None => 0,
        RetryStrategy::FixedDelay => policy.initial_delay_ms,
        RetryStrategy::LinearBackoff => policy.initial_delay_ms.saturating_mul(index as u64 + 1),
        RetryStrategy::ExponentialBackoff => {
            let factor = policy.backoff_multiplier.powf(index as f64);
            (policy.initial_delay_ms as f64 * factor) as u64
        }
    };

    let capped_ms = base_ms.min(policy.max_delay_ms);

    let final_ms = if jitter && capped_ms > 0 {
        capped_ms + rand::rng().random_range(0..=capped_ms / 4)
    } else {
        capped_ms
    };

    Duration::from_millis(final_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(strategy: RetryStrategy) -> RetryPolicy {
        RetryPolicy {
            max_attempts: 5,
            strategy,
            backoff_multiplier: 2.0,
            initial_delay_ms: 100,
            max_delay_ms: 1000,
        }
    }

    #[test]
    fn test_none_strategy_never_waits() {
        let p = policy(RetryStrategy::None);
        for attempt in 1..=5 {
            assert_eq!(calculate_delay(&p, attempt, true), Duration::ZERO);
        }
    }

    #[test]
    fn test_fixed_delay_is_constant() {
        let p = RetryPolicy::fixed(15, 1000);
        for attempt in 1..=15 {
            assert_eq!(calculate_delay(&p, attempt, false), Duration::from_secs(1));
        }
    }

    #[test]
    fn test_linear_and_exponential_growth() {
        let linear = policy(RetryStrategy::LinearBackoff);
        assert_eq!(calculate_delay(&linear, 1, false), Duration::from_millis(100));
        assert_eq!(calculate_delay(&linear, 3, false), Duration::from_millis(300));

        let exp = policy(RetryStrategy::ExponentialBackoff);
        assert_eq!(calculate_delay(&exp, 1, false), Duration::from_millis(100));
        assert_eq!(calculate_delay(&exp, 3, false), Duration::from_millis(400));
        // capped
        assert_eq!(calculate_delay(&exp, 6, false), Duration::from_millis(1000));
    }

    #[test]
    fn test_jitter_stays_within_quarter() {
        let p = RetryPolicy::fixed(3, 400);
        for _ in 0..50 {
            let delay = calculate_delay(&p, 1, true).as_millis();
            assert!((400..=500).contains(&delay), "delay {} out of range", delay);
        }
    }
}
