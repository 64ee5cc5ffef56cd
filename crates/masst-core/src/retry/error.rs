//! Errors produced by the retry engine

use std::fmt;
use std::time::Duration;

/// Why a retried operation ultimately failed
#[derive(Debug)]
pub enum RetryError<E> {
    /// Every attempt failed
    Exhausted {
        /// Attempts made, equal to the policy's budget
        attempts: u32,
        /// Error from the last attempt
        source: E,
        /// Wall time spent including delays
        total_duration: Duration,
    },

    /// The policy allowed no attempts at all
    NoAttempts,
}

impl<E> RetryError<E> {
    pub fn is_exhausted(&self) -> bool {
        matches!(self, RetryError::Exhausted { .. })
    }

    /// Number of attempts made before giving up
    pub fn attempts(&self) -> u32 {
        match self {
            RetryError::Exhausted { attempts, .. } => *attempts,
            RetryError::NoAttempts => 0,
        }
    }

    /// Error from the final attempt, if one ran
    pub fn last_error(&self) -> Option<&E> {
        match self {
            RetryError::Exhausted { source, .. } => Some(source),
            RetryError::NoAttempts => None,
        }
    }
}

impl<E: fmt::Display> fmt::Display for RetryError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetryError::Exhausted {
                attempts,
                source,
                total_duration,
            } => write!(
                f,
                "gave up after {} attempts over {:.1}s: {}",
                attempts,
                total_duration.as_secs_f64(),
                source
            ),
            RetryError::NoAttempts => write!(f, "retry policy allows zero attempts"),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for RetryError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RetryError::Exhausted { source, .. } => Some(source),
            RetryError::NoAttempts => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_exhausted_display_mentions_attempts() {
        let err = RetryError::Exhausted {
            attempts: 15,
            source: io::Error::other("pg_isready: no response"),
            total_duration: Duration::from_secs(14),
        };
        let msg = err.to_string();
        assert!(msg.contains("15 attempts"));
        assert!(msg.contains("no response"));
        assert_eq!(err.attempts(), 15);
        assert!(err.is_exhausted());
    }

    #[test]
    fn test_no_attempts() {
        let err: RetryError<io::Error> = RetryError::NoAttempts;
        assert_eq!(err.attempts(), 0);
        assert!(err.last_error().is_none());
    }
}
