//! Templates read from a directory on disk

use super::{TemplateEntry, TemplateSource};
use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use walkdir::WalkDir;

/// A template tree rooted at a directory
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: Utf8PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

impl TemplateSource for DirectorySource {
    fn name(&self) -> &str {
        self.root.as_str()
    }

    fn entries(&self) -> Result<Vec<TemplateEntry>> {
        if !self.root.is_dir() {
            return Err(Error::TemplateNotFound {
                name: self.root.to_string(),
            });
        }

        let mut entries = Vec::new();
        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                let path = e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| self.root.to_string());
                Error::io("read", path, e.into())
            })?;

            let relative = entry
                .path()
                .strip_prefix(&self.root)
                .map_err(|_| Error::TemplateNotFound {
                    name: entry.path().display().to_string(),
                })?;
            let relative = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            if entry.file_type().is_dir() {
                entries.push(TemplateEntry::Directory { path: relative });
            } else {
                let contents = fs::read(entry.path())
                    .map_err(|e| Error::io("read", entry.path().display().to_string(), e))?;
                entries.push(TemplateEntry::File {
                    path: relative,
                    contents,
                });
            }
        }

        entries.sort_by(|a, b| a.path().cmp(b.path()));
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_lists_nested_tree_sorted() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("apps/web")).unwrap();
        fs::write(dir.path().join("apps/web/page.tsx"), "x").unwrap();
        fs::write(dir.path().join("_env"), "y").unwrap();

        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let entries = DirectorySource::new(root).entries().unwrap();
        let paths: Vec<&str> = entries.iter().map(|e| e.path()).collect();
        assert_eq!(paths, vec!["_env", "apps", "apps/web", "apps/web/page.tsx"]);
    }

    #[test]
    fn test_missing_root() {
        let err = DirectorySource::new("/definitely/not/here").entries().unwrap_err();
        assert!(matches!(err, Error::TemplateNotFound { .. }));
    }
}
