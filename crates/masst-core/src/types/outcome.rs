//! Tri-state step outcome used by the dev orchestrator and platform dispatch

use std::fmt;

/// Result of one side-effecting step.
///
/// Once a step yields `Fatal`, no later step may run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Step completed, continue
    Success,
    /// Step degraded, continue anyway
    Warning(String),
    /// Step failed, abort with a non-zero exit
    Fatal(String),
}

impl StepOutcome {
    pub fn warning(message: impl Into<String>) -> Self {
        Self::Warning(message.into())
    }

    pub fn fatal(message: impl Into<String>) -> Self {
        Self::Fatal(message.into())
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal(_))
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Self::Warning(_))
    }

    /// Message attached to a warning or fatal outcome
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success => None,
            Self::Warning(msg) | Self::Fatal(msg) => Some(msg),
        }
    }
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Warning(msg) => write!(f, "warning: {}", msg),
            Self::Fatal(msg) => write!(f, "fatal: {}", msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_predicates() {
        assert!(StepOutcome::fatal("boom").is_fatal());
        assert!(StepOutcome::warning("slow").is_warning());
        assert!(!StepOutcome::Success.is_fatal());
        assert_eq!(StepOutcome::Success.message(), None);
        assert_eq!(StepOutcome::warning("slow").message(), Some("slow"));
    }
}
