//! Template trees
//!
//! A template is a flat list of entries with `/`-separated relative paths,
//! sorted so every walk yields the same order. Templates are either compiled
//! into the binary or read from a directory on disk.

mod directory;
mod embedded;

pub use directory::DirectorySource;
pub use embedded::{EmbeddedSource, DEFAULT_TEMPLATE};

use crate::error::Result;

/// One node of a template tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateEntry {
    Directory { path: String },
    File { path: String, contents: Vec<u8> },
}

impl TemplateEntry {
    pub fn path(&self) -> &str {
        match self {
            TemplateEntry::Directory { path } | TemplateEntry::File { path, .. } => path,
        }
    }
}

/// Something that can enumerate a template tree
pub trait TemplateSource {
    /// Human-readable name for messages
    fn name(&self) -> &str;

    /// All entries, sorted by path
    fn entries(&self) -> Result<Vec<TemplateEntry>>;
}
