//! Templates compiled into the binary

use super::{TemplateEntry, TemplateSource};
use crate::error::{Error, Result};
use rust_embed::RustEmbed;
use std::collections::BTreeSet;

#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/templates/"]
struct EmbeddedTemplates;

/// Name of the template `init` uses
pub const DEFAULT_TEMPLATE: &str = "saas";

/// A named subtree of the embedded templates
#[derive(Debug, Clone)]
pub struct EmbeddedSource {
    name: String,
}

impl EmbeddedSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Names of all embedded templates
    pub fn available() -> Vec<String> {
        EmbeddedTemplates::iter()
            .filter_map(|path| path.split('/').next().map(str::to_string))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl Default for EmbeddedSource {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

impl TemplateSource for EmbeddedSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn entries(&self) -> Result<Vec<TemplateEntry>> {
        let prefix = format!("{}/", self.name);
        let mut directories = BTreeSet::new();
        let mut files = Vec::new();

        for path in EmbeddedTemplates::iter() {
            let Some(relative) = path.strip_prefix(&prefix) else {
                continue;
            };
            let Some(file) = EmbeddedTemplates::get(&path) else {
                continue;
            };

            // rust-embed only lists files; recover their parent directories
            let mut parent = relative;
            while let Some((dir, _)) = parent.rsplit_once('/') {
                directories.insert(dir.to_string());
                parent = dir;
            }

            files.push(TemplateEntry::File {
                path: relative.to_string(),
                contents: file.data.into_owned(),
            });
        }

        if files.is_empty() {
            return Err(Error::TemplateNotFound {
                name: self.name.clone(),
            });
        }

        let mut entries: Vec<TemplateEntry> = directories
            .into_iter()
            .map(|path| TemplateEntry::Directory { path })
            .chain(files)
            .collect();
        entries.sort_by(|a, b| a.path().cmp(b.path()));
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_is_embedded() {
        assert!(EmbeddedSource::available().contains(&DEFAULT_TEMPLATE.to_string()));

        let entries = EmbeddedSource::default().entries().unwrap();
        let paths: Vec<&str> = entries.iter().map(|e| e.path()).collect();
        assert!(paths.contains(&"turbo.json"));
        assert!(paths.contains(&"docker-compose.yml"));
        assert!(paths.contains(&"_gitignore"));
        assert!(paths.contains(&"apps"));
        assert!(paths.contains(&"apps/web"));

        let mut sorted = paths.clone();
        sorted.sort();
        assert_eq!(paths, sorted);
    }

    #[test]
    fn test_unknown_template() {
        let err = EmbeddedSource::new("nope").entries().unwrap_err();
        assert!(matches!(err, Error::TemplateNotFound { .. }));
    }
}
