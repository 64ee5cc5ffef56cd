//! # masst-projects
//!
//! Project scaffolding library for the masst CLI providing:
//! - Project identity validation
//! - Token sets with freshly generated secrets
//! - Embedded and on-disk template trees
//! - Template materialization
//! - Interactive and argument-driven spec collection
//! - Workspace dependency scanning
//!
//! # Example
//!
//! ```no_run
//! use masst_projects::{Materializer, EmbeddedSource, ProjectSpec, TokenSet};
//! use camino::Utf8Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let spec = ProjectSpec::new("my-app");
//! let materializer = Materializer::new(TokenSet::from_spec(&spec));
//! materializer.materialize(&EmbeddedSource::default(), Utf8Path::new("./my-app"))?;
//! # Ok(())
//! # }
//! ```

pub mod collector;
pub mod error;
pub mod materializer;
pub mod scanner;
pub mod template;
pub mod tokens;
pub mod validator;

pub use collector::{ArgumentCollector, CollectedSpec, PartialSpec, PromptCollector, SpecCollector};
pub use error::{Error, Result};
pub use materializer::{MaterializeReport, Materializer};
pub use scanner::{DependencyScanner, DependencySet};
pub use template::{DirectorySource, EmbeddedSource, TemplateEntry, TemplateSource};
pub use tokens::{ProjectSpec, TokenSet};
