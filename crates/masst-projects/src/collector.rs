//! Gathering a [`ProjectSpec`] from arguments or prompts
//!
//! Both collectors validate through [`crate::validator`], so the rules are the
//! same whether a script or a person supplies the values.

use crate::error::{Error, Result};
use crate::tokens::{default_database_name, ProjectSpec};
use crate::validator;
use camino::{Utf8Path, Utf8PathBuf};
use dialoguer::{Confirm, Input};

/// Values already known from the command line
#[derive(Debug, Clone, Default)]
pub struct PartialSpec {
    pub name: Option<String>,
    pub database_name: Option<String>,
    /// `Some(false)` when caching was explicitly disabled
    pub include_cache: Option<bool>,
    pub repo_url: Option<String>,
}

/// A validated spec plus where it will be materialized
#[derive(Debug, Clone)]
pub struct CollectedSpec {
    pub spec: ProjectSpec,
    pub destination: Utf8PathBuf,
}

/// Produces a validated [`ProjectSpec`]
pub trait SpecCollector {
    fn collect(&self, partial: &PartialSpec, parent: &Utf8Path) -> Result<CollectedSpec>;
}

/// Non-interactive collection: the name must be given, everything else defaults
#[derive(Debug, Clone, Copy, Default)]
pub struct ArgumentCollector;

impl SpecCollector for ArgumentCollector {
    fn collect(&self, partial: &PartialSpec, parent: &Utf8Path) -> Result<CollectedSpec> {
        let name = partial.name.as_deref().ok_or(Error::NameRequired)?;
        let destination = validator::validate(name, parent)?;

        let mut spec = ProjectSpec::new(name)
            .with_cache(partial.include_cache.unwrap_or(true))
            .with_repo_url(partial.repo_url.clone());
        if let Some(db) = partial.database_name.as_deref().filter(|db| !db.is_empty()) {
            spec = spec.with_database_name(db);
        }

        Ok(CollectedSpec { spec, destination })
    }
}

/// Interactive collection on the terminal; asks only for what is missing
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptCollector;

impl PromptCollector {
    fn ask_name(parent: &Utf8Path) -> Result<String> {
        let parent = parent.to_path_buf();
        let name: String = Input::new()
            .with_prompt("Project name")
            .default("my-saas".to_string())
            .validate_with(move |input: &String| -> std::result::Result<(), String> {
                validator::validate(input, &parent)
                    .map(|_| ())
                    .map_err(|e| e.to_string())
            })
            .interact_text()
            .map_err(masst_core::Error::from)?;
        Ok(name)
    }
}

impl SpecCollector for PromptCollector {
    fn collect(&self, partial: &PartialSpec, parent: &Utf8Path) -> Result<CollectedSpec> {
        let name = match partial.name.as_deref() {
            Some(name) => {
                validator::validate(name, parent)?;
                name.to_string()
            }
            None => Self::ask_name(parent)?,
        };
        let destination = validator::validate(&name, parent)?;

        let database_name = match partial.database_name.as_deref() {
            Some(db) if !db.is_empty() => db.to_string(),
            _ => Input::new()
                .with_prompt("Database name")
                .default(default_database_name(&name))
                .interact_text()
                .map_err(masst_core::Error::from)?,
        };

        let include_cache = match partial.include_cache {
            Some(include) => include,
            None => Confirm::new()
                .with_prompt("Include Redis for caching?")
                .default(true)
                .interact_opt()
                .map_err(masst_core::Error::from)?
                .ok_or(masst_core::Error::Cancelled)?,
        };

        let repo_url = match &partial.repo_url {
            Some(url) => Some(url.clone()),
            None => {
                let url: String = Input::new()
                    .with_prompt("Git repository URL (optional)")
                    .allow_empty(true)
                    .interact_text()
                    .map_err(masst_core::Error::from)?;
                Some(url)
            }
        };

        let spec = ProjectSpec::new(name)
            .with_database_name(database_name)
            .with_cache(include_cache)
            .with_repo_url(repo_url);
        Ok(CollectedSpec { spec, destination })
    }
}
