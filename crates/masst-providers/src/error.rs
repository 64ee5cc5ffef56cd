//! Error types for masst-providers

use masst_core::ErrorCategory;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Target string outside the supported set
    #[error("Unknown platform: {target}. Supported: {supported}")]
    UnknownTarget { target: String, supported: String },

    #[error(transparent)]
    Core(#[from] masst_core::Error),
}

impl Error {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::UnknownTarget { .. } => ErrorCategory::Validation,
            Error::Core(e) => e.category(),
        }
    }
}
