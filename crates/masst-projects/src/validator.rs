//! Project identity rules
//!
//! Applied in order, first failure wins: non-empty, charset, destination free.
//! Both spec collectors go through these functions.

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;
use std::sync::LazyLock;

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("project name regex is valid"));

/// Check the name alone (rules 1 and 2)
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::NameRequired);
    }
    if !NAME_RE.is_match(name) {
        return Err(Error::invalid_name(name));
    }
    Ok(())
}

/// Check the name and that `parent/name` does not exist yet.
///
/// Returns the destination directory on success.
pub fn validate(name: &str, parent: &Utf8Path) -> Result<Utf8PathBuf> {
    validate_name(name)?;
    let destination = parent.join(name);
    if destination.exists() {
        return Err(Error::destination_exists(destination.as_str()));
    }
    Ok(destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parent() -> (TempDir, Utf8PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_accepts_well_formed_names() {
        let (_dir, parent) = parent();
        for name in ["my-app", "app2", "a", "0-0", "-"] {
            let dest = validate(name, &parent).unwrap();
            assert_eq!(dest, parent.join(name));
        }
    }

    #[test]
    fn test_rejects_bad_charset() {
        let (_dir, parent) = parent();
        for name in ["MyApp", "my app", "my_app", "app!", "ünï", "app.js", " app"] {
            let err = validate(name, &parent).unwrap_err();
            assert!(matches!(err, Error::InvalidName { .. }), "{name}");
            assert!(err.to_string().contains("lowercase"));
        }
    }

    #[test]
    fn test_empty_name_checked_first() {
        let (_dir, parent) = parent();
        assert!(matches!(validate("", &parent), Err(Error::NameRequired)));
    }

    #[test]
    fn test_existing_destination() {
        let (_dir, parent) = parent();
        std::fs::create_dir(parent.join("taken")).unwrap();
        let err = validate("taken", &parent).unwrap_err();
        assert!(err.to_string().contains("already exists"));

        // charset wins over collision
        std::fs::create_dir(parent.join("Taken")).unwrap();
        assert!(matches!(
            validate("Taken", &parent),
            Err(Error::InvalidName { .. })
        ));
    }
}
