//! Error types for masst-core

use thiserror::Error;

/// Result type alias using masst-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Broad failure classes every command reports against.
///
/// Validation and precondition failures are always raised before the first
/// mutating external call of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Precondition,
    ExternalTool,
    Io,
    Config,
}

/// Core error types for masst
#[derive(Error, Debug)]
pub enum Error {
    /// Current directory is not a generated project root
    #[error("Not a masst project ({marker} not found). Run this command from your project root.")]
    NotProjectRoot { marker: String },

    /// The project has no container manifest
    #[error("No {manifest} found")]
    NoContainerManifest { manifest: String },

    /// A required external CLI is not installed
    #[error("{tool} not found. {hint}")]
    MissingTool { tool: String, hint: String },

    /// Unknown package manager requested explicitly
    #[error("Invalid package manager \"{name}\". Use pnpm, yarn, or npm.")]
    InvalidPackageManager { name: String },

    /// An external tool exited unsuccessfully
    #[error("`{command}` failed ({status})")]
    ToolFailed { command: String, status: String },

    /// An external tool could not be started at all
    #[error("Failed to launch `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration value
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Embedded configuration missing from the binary
    #[error("Embedded config not found: {name}")]
    EmbeddedConfigNotFound { name: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Interactive prompt failed (terminal gone)
    #[error("Prompt failed: {0}")]
    Prompt(String),

    /// The user cancelled an interactive prompt
    #[error("Operation cancelled.")]
    Cancelled,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a not-a-project-root error for the given marker file
    pub fn not_project_root(marker: impl Into<String>) -> Self {
        Self::NotProjectRoot {
            marker: marker.into(),
        }
    }

    /// Create a missing container manifest error
    pub fn no_container_manifest(manifest: impl Into<String>) -> Self {
        Self::NoContainerManifest {
            manifest: manifest.into(),
        }
    }

    /// Create a missing tool error with an install hint
    pub fn missing_tool(tool: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::MissingTool {
            tool: tool.into(),
            hint: hint.into(),
        }
    }

    /// Create a tool failure error
    pub fn tool_failed(command: impl Into<String>, status: impl Into<String>) -> Self {
        Self::ToolFailed {
            command: command.into(),
            status: status.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Which failure class this error belongs to
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::InvalidPackageManager { .. } => ErrorCategory::Validation,
            Error::NotProjectRoot { .. }
            | Error::NoContainerManifest { .. }
            | Error::MissingTool { .. } => ErrorCategory::Precondition,
            Error::ToolFailed { .. } | Error::Spawn { .. } => ErrorCategory::ExternalTool,
            Error::InvalidConfig { .. }
            | Error::EmbeddedConfigNotFound { .. }
            | Error::YamlParse(_)
            | Error::JsonParse(_) => ErrorCategory::Config,
            Error::Cancelled => ErrorCategory::Validation,
            Error::Prompt(_) | Error::Io(_) => ErrorCategory::Io,
        }
    }
}

impl Error {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        match err {
            dialoguer::Error::IO(e) if e.kind() == std::io::ErrorKind::Interrupted => Error::Cancelled,
            other => Error::Prompt(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_project_root_message_names_marker() {
        let err = Error::not_project_root("turbo.json");
        let msg = err.to_string();
        assert!(msg.contains("turbo.json"));
        assert!(msg.contains("project root"));
        assert_eq!(err.category(), ErrorCategory::Precondition);
    }

    #[test]
    fn test_missing_tool_carries_hint() {
        let err = Error::missing_tool("Fly CLI", "Install it from: https://fly.io/docs/hands-on/install-flyctl/");
        assert!(err.to_string().contains("https://fly.io"));
        assert_eq!(err.category(), ErrorCategory::Precondition);
    }

    #[test]
    fn test_tool_failed_is_external() {
        let err = Error::tool_failed("pnpm db:push", "exit status: 1");
        assert_eq!(err.category(), ErrorCategory::ExternalTool);
        assert_eq!(err.to_string(), "`pnpm db:push` failed (exit status: 1)");
    }
}
