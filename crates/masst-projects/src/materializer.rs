//! Template materialization
//!
//! Copies a template tree into a destination, substituting `{{TOKEN}}`
//! placeholders in file contents and turning a leading `_` in file names into
//! a dot. Every file is rendered in memory before the first write, so an
//! unresolved token aborts without touching the destination. Writes are not
//! transactional: an IO failure leaves a partial tree behind.

use crate::error::{Error, Result};
use crate::template::{TemplateEntry, TemplateSource};
use crate::tokens::TokenSet;
use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;
use std::fs;
use std::sync::LazyLock;
use tracing::debug;

/// Marks a template file that becomes a dotfile
pub const HIDDEN_FILE_MARKER: char = '_';

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{([A-Z][A-Z0-9_]*)\}\}").expect("placeholder regex is valid")
});

/// `_gitignore` -> `.gitignore`; applies to the last path component only
pub fn destination_name(relative: &str) -> String {
    let (dir, file) = match relative.rsplit_once('/') {
        Some((dir, file)) => (Some(dir), file),
        None => (None, relative),
    };
    let file = match file.strip_prefix(HIDDEN_FILE_MARKER) {
        Some(rest) if !rest.is_empty() => format!(".{}", rest),
        _ => file.to_string(),
    };
    match dir {
        Some(dir) => format!("{}/{}", dir, file),
        None => file,
    }
}

/// What a materialization produced, relative to the destination
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    pub directories: Vec<Utf8PathBuf>,
    pub files: Vec<Utf8PathBuf>,
}

enum Planned {
    Directory(Utf8PathBuf),
    File(Utf8PathBuf, Vec<u8>),
}

/// Renders template trees with a fixed token set
#[derive(Debug, Clone)]
pub struct Materializer {
    tokens: TokenSet,
}

impl Materializer {
    pub fn new(tokens: TokenSet) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &TokenSet {
        &self.tokens
    }

    /// Substitute tokens in one file's text, failing on any leftover placeholder
    pub fn render(&self, path: &str, text: &str) -> Result<String> {
        let rendered = self.tokens.apply(text);
        if let Some(caps) = PLACEHOLDER_RE.captures(&rendered) {
            return Err(Error::UnresolvedToken {
                token: caps[1].to_string(),
                path: path.to_string(),
            });
        }
        Ok(rendered)
    }

    /// Copy `source` into `destination`.
    ///
    /// The destination root may already exist; anything below it is created.
    /// Non-UTF-8 files are copied byte for byte.
    pub fn materialize(
        &self,
        source: &dyn TemplateSource,
        destination: &Utf8Path,
    ) -> Result<MaterializeReport> {
        debug!(template = source.name(), %destination, "materializing");

        let mut plan = Vec::new();
        for entry in source.entries()? {
            match entry {
                TemplateEntry::Directory { path } => {
                    plan.push(Planned::Directory(Utf8PathBuf::from(path)));
                }
                TemplateEntry::File { path, contents } => {
                    let target = Utf8PathBuf::from(destination_name(&path));
                    let contents = match String::from_utf8(contents) {
                        Ok(text) => self.render(&path, &text)?.into_bytes(),
                        Err(binary) => binary.into_bytes(),
                    };
                    plan.push(Planned::File(target, contents));
                }
            }
        }

        fs::create_dir_all(destination)
            .map_err(|e| Error::io("create directory", destination.as_str(), e))?;

        let mut report = MaterializeReport::default();
        for item in plan {
            match item {
                Planned::Directory(relative) => {
                    let path = destination.join(&relative);
                    fs::create_dir_all(&path)
                        .map_err(|e| Error::io("create directory", path.as_str(), e))?;
                    report.directories.push(relative);
                }
                Planned::File(relative, contents) => {
                    let path = destination.join(&relative);
                    if let Some(parent) = path.parent() {
                        fs::create_dir_all(parent)
                            .map_err(|e| Error::io("create directory", parent.as_str(), e))?;
                    }
                    fs::write(&path, contents).map_err(|e| Error::io("write", path.as_str(), e))?;
                    report.files.push(relative);
                }
            }
        }

        debug!(
            files = report.files.len(),
            directories = report.directories.len(),
            "materialized"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::DirectorySource;
    use crate::tokens::ProjectSpec;
    use tempfile::TempDir;

    fn utf8(path: &std::path::Path) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(path.to_path_buf()).unwrap()
    }

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("apps/_web")).unwrap();
        fs::create_dir_all(dir.path().join("empty")).unwrap();
        fs::write(dir.path().join("_env"), "DATABASE_URL={{DATABASE_URL}}\n").unwrap();
        fs::write(dir.path().join("apps/_web/name.txt"), "{{PROJECT_NAME}}-{{PROJECT_NAME}}").unwrap();
        fs::write(dir.path().join("logo.bin"), [0xff_u8, 0xfe, 0x00]).unwrap();
        dir
    }

    #[test]
    fn test_destination_name() {
        assert_eq!(destination_name("_gitignore"), ".gitignore");
        assert_eq!(destination_name("apps/web/_env.example"), "apps/web/.env.example");
        assert_eq!(destination_name("_dir/file"), "_dir/file");
        assert_eq!(destination_name("_"), "_");
        assert_eq!(destination_name("README.md"), "README.md");
    }

    #[test]
    fn test_materialize_substitutes_and_renames() {
        let src = fixture();
        let out = TempDir::new().unwrap();
        let dest = utf8(out.path()).join("shop");

        let tokens = TokenSet::from_spec(&ProjectSpec::new("shop"));
        let report = Materializer::new(tokens)
            .materialize(&DirectorySource::new(utf8(src.path())), &dest)
            .unwrap();

        let env = fs::read_to_string(dest.join(".env")).unwrap();
        assert!(env.contains("/shop_db?schema=public"));
        assert!(!dest.join("_env").exists());
        assert_eq!(fs::read_to_string(dest.join("apps/_web/name.txt")).unwrap(), "shop-shop");
        assert!(dest.join("empty").is_dir());
        assert_eq!(fs::read(dest.join("logo.bin")).unwrap(), vec![0xff, 0xfe, 0x00]);
        assert_eq!(report.files.len(), 3);
    }

    #[test]
    fn test_structure_is_deterministic() {
        let src = fixture();
        let source = DirectorySource::new(utf8(src.path()));
        let tokens = TokenSet::from_spec(&ProjectSpec::new("shop"));
        let materializer = Materializer::new(tokens);

        let out = TempDir::new().unwrap();
        let first = materializer
            .materialize(&source, &utf8(out.path()).join("a"))
            .unwrap();
        let second = materializer
            .materialize(&source, &utf8(out.path()).join("b"))
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unresolved_token_writes_nothing() {
        let src = TempDir::new().unwrap();
        fs::write(src.path().join("a.txt"), "ok").unwrap();
        fs::write(src.path().join("b.txt"), "{{MISSING_TOKEN}}").unwrap();

        let out = TempDir::new().unwrap();
        let dest = utf8(out.path()).join("proj");
        let err = Materializer::new(TokenSet::default())
            .materialize(&DirectorySource::new(utf8(src.path())), &dest)
            .unwrap_err();

        assert!(matches!(err, Error::UnresolvedToken { ref token, .. } if token == "MISSING_TOKEN"));
        assert!(!dest.exists());
    }

    #[test]
    fn test_non_token_braces_survive() {
        let materializer = Materializer::new(TokenSet::default());
        let jsx = "<div style={{ color: 'red' }} />";
        assert_eq!(materializer.render("page.tsx", jsx).unwrap(), jsx);
    }
}
