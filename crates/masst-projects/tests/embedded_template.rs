//! Materializing the embedded template end to end

use camino::Utf8PathBuf;
use masst_projects::{
    ArgumentCollector, EmbeddedSource, Materializer, PartialSpec, SpecCollector, TemplateEntry,
    TemplateSource, TokenSet,
};
use std::fs;
use tempfile::TempDir;
use walkdir::WalkDir;

fn parent(dir: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap()
}

fn scaffold(dir: &TempDir) -> (Utf8PathBuf, TokenSet) {
    let partial = PartialSpec {
        name: Some("my-app".into()),
        database_name: Some("my_db".into()),
        ..PartialSpec::default()
    };
    let collected = ArgumentCollector.collect(&partial, &parent(dir)).unwrap();
    let tokens = TokenSet::from_spec(&collected.spec);
    Materializer::new(tokens.clone())
        .materialize(&EmbeddedSource::default(), &collected.destination)
        .unwrap();
    (collected.destination, tokens)
}

#[test]
fn test_project_contains_identity_and_secrets() {
    let dir = TempDir::new().unwrap();
    let (dest, tokens) = scaffold(&dir);

    let env = fs::read_to_string(dest.join(".env")).unwrap();
    assert!(env.contains("my_db"));

    let auth = tokens.get("AUTH_SECRET").unwrap();
    let jwt = tokens.get("JWT_SECRET").unwrap();
    assert!(!auth.is_empty() && !jwt.is_empty());
    assert_ne!(auth, jwt);
    assert!(env.contains(auth));
    assert!(env.contains(jwt));

    let manifest = fs::read_to_string(dest.join("package.json")).unwrap();
    assert!(manifest.contains("\"name\": \"my-app\""));
}

#[test]
fn test_no_placeholders_survive() {
    let dir = TempDir::new().unwrap();
    let (dest, _) = scaffold(&dir);

    for entry in WalkDir::new(&dest).into_iter().filter_map(|e| e.ok()) {
        if entry.file_type().is_file() {
            let content = fs::read_to_string(entry.path()).unwrap();
            for token in ["{{PROJECT_NAME", "{{DATABASE", "{{AUTH_SECRET", "{{JWT_SECRET", "{{INCLUDE_CACHE", "{{REPO_URL"] {
                assert!(!content.contains(token), "{} in {}", token, entry.path().display());
            }
        }
    }
}

#[test]
fn test_hidden_markers_become_dotfiles() {
    let dir = TempDir::new().unwrap();
    let (dest, _) = scaffold(&dir);

    assert!(dest.join(".gitignore").is_file());
    assert!(dest.join(".env.example").is_file());
    assert!(!dest.join("_gitignore").exists());
}

#[test]
fn test_container_manifest_keeps_shape() {
    let dir = TempDir::new().unwrap();
    let (dest, _) = scaffold(&dir);

    let template = EmbeddedSource::default()
        .entries()
        .unwrap()
        .into_iter()
        .find_map(|entry| match entry {
            TemplateEntry::File { path, contents } if path == "docker-compose.yml" => {
                Some(String::from_utf8(contents).unwrap())
            }
            _ => None,
        })
        .unwrap();
    let rendered = fs::read_to_string(dest.join("docker-compose.yml")).unwrap();

    assert_eq!(template.lines().count(), rendered.lines().count());
    for (before, after) in template.lines().zip(rendered.lines()) {
        let key = |line: &str| line.split(':').next().unwrap_or_default().to_string();
        assert_eq!(key(before), key(after));
    }
    assert!(rendered.contains("POSTGRES_DB: my_db"));
}

#[test]
fn test_second_run_into_same_name_is_rejected() {
    let dir = TempDir::new().unwrap();
    scaffold(&dir);

    let partial = PartialSpec {
        name: Some("my-app".into()),
        ..PartialSpec::default()
    };
    let err = ArgumentCollector.collect(&partial, &parent(&dir)).unwrap_err();
    assert!(err.to_string().contains("already exists"));
}
