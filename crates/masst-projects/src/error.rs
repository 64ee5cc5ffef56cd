//! Error types for masst-projects

use masst_core::ErrorCategory;
use thiserror::Error;

/// Result type alias using masst-projects's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Scaffolding error types
#[derive(Error, Debug)]
pub enum Error {
    /// No project name given
    #[error("Project name is required")]
    NameRequired,

    /// Name violates the charset rule
    #[error("Invalid project name \"{name}\": use lowercase letters, numbers, and dashes only")]
    InvalidName { name: String },

    /// Destination directory already exists
    #[error("Directory {path} already exists")]
    DestinationExists { path: String },

    /// A template placeholder has no value
    #[error("Unresolved template token {{{{{token}}}}} in {path}")]
    UnresolvedToken { token: String, path: String },

    /// Template tree could not be located
    #[error("Template not found: {name}")]
    TemplateNotFound { name: String },

    /// Filesystem failure while reading a template or writing the destination
    #[error("Failed to {action} {path}: {source}")]
    Io {
        action: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error bubbled up from masst-core
    #[error(transparent)]
    Core(#[from] masst_core::Error),
}

impl Error {
    /// Create an invalid name error
    pub fn invalid_name(name: impl Into<String>) -> Self {
        Self::InvalidName { name: name.into() }
    }

    /// Create a destination exists error
    pub fn destination_exists(path: impl Into<String>) -> Self {
        Self::DestinationExists { path: path.into() }
    }

    /// Wrap an IO error with what was being done and where
    pub fn io(action: &'static str, path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Which failure class this error belongs to
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::NameRequired | Error::InvalidName { .. } | Error::DestinationExists { .. } => {
                ErrorCategory::Validation
            }
            Error::UnresolvedToken { .. } | Error::TemplateNotFound { .. } => ErrorCategory::Config,
            Error::Io { .. } => ErrorCategory::Io,
            Error::Core(err) => err.category(),
        }
    }

    /// True when the user backed out of a prompt
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Core(err) if err.is_cancelled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_token_renders_placeholder() {
        let err = Error::UnresolvedToken {
            token: "REPO_URL".into(),
            path: "README.md".into(),
        };
        assert_eq!(err.to_string(), "Unresolved template token {{REPO_URL}} in README.md");
    }

    #[test]
    fn test_categories() {
        assert_eq!(Error::NameRequired.category(), ErrorCategory::Validation);
        assert_eq!(
            Error::from(masst_core::Error::Cancelled).category(),
            ErrorCategory::Validation
        );
        assert!(Error::from(masst_core::Error::Cancelled).is_cancelled());
    }
}
