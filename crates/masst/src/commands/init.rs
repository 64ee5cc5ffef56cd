//! Init command

use anyhow::{Context, Result};
use camino::Utf8Path;
use masst_core::{Invocation, OutputMode, PackageManager};
use masst_projects::{
    ArgumentCollector, CollectedSpec, DirectorySource, EmbeddedSource, Materializer, PartialSpec,
    PromptCollector, SpecCollector, TemplateSource, TokenSet,
};
use tracing::debug;

use crate::app::App;
use crate::cli::InitArgs;
use crate::output;

pub async fn run(args: InitArgs, app: &App) -> Result<()> {
    let partial = PartialSpec {
        name: args.name.clone(),
        database_name: args.database_name.clone(),
        include_cache: args.no_cache.then_some(false),
        repo_url: args.repo_url.clone(),
    };

    let collector: &dyn SpecCollector = if app.prompter.is_interactive() {
        &PromptCollector
    } else {
        &ArgumentCollector
    };
    let CollectedSpec { spec, destination } = collector.collect(&partial, app.directory())?;

    output::header("Creating your SaaS project");
    output::kv("Project", &spec.name);
    output::kv("Database", &spec.database_name);
    output::kv("Cache", if spec.include_cache { "yes" } else { "no" });

    let source: Box<dyn TemplateSource> = match &args.template {
        Some(dir) => Box::new(DirectorySource::new(dir.clone())),
        None => Box::new(EmbeddedSource::default()),
    };
    let materializer = Materializer::new(TokenSet::from_spec(&spec));

    let spinner = output::spinner("Creating project structure...");
    let created = materializer.materialize(source.as_ref(), &destination);
    spinner.finish_and_clear();
    let report = created.context("Failed to create project structure")?;
    debug!(files = report.files.len(), "template materialized");
    output::success("Project structure created");

    if !args.skip_git {
        init_git(app, &destination).await;
    }

    if !args.skip_install {
        install_dependencies(app, &destination).await;
    }

    output::success("Project created successfully!");
    output::steps(
        "Next steps:",
        &[format!("cd {}", spec.name), "mst dev".to_string()],
    );
    println!();
    output::hint(&format!(
        "Demo credentials: {} / {}",
        app.config.handoff.demo_email, app.config.handoff.demo_password
    ));
    Ok(())
}

/// `git init` in the new project; failure only warns
async fn init_git(app: &App, destination: &Utf8Path) {
    let git = Invocation::new("git").arg("init").current_dir(destination.to_path_buf());
    let spinner = output::spinner("Initializing git repository...");
    let result = app.runner.run(&git, OutputMode::Capture).await;
    spinner.finish_and_clear();

    match result.and_then(|out| out.check(&git)) {
        Ok(_) => output::success("Git repository initialized"),
        Err(e) => {
            debug!(error = %e, "git init failed");
            output::warning("Git initialization skipped");
        }
    }
}

/// Install dependencies with the project's package manager; failure only warns
async fn install_dependencies(app: &App, destination: &Utf8Path) {
    let pm = PackageManager::detect(destination);
    let install = pm.install().current_dir(destination.to_path_buf());
    let spinner = output::spinner("Installing dependencies (this may take a few minutes)...");
    let result = app.runner.run(&install, OutputMode::Capture).await;
    spinner.finish_and_clear();

    match result.and_then(|out| out.check(&install)) {
        Ok(_) => output::success("Dependencies installed"),
        Err(e) => {
            debug!(error = %e, "dependency install failed");
            output::warning("Failed to install dependencies");
            output::hint(&format!(
                "Run \"{} install\" manually in the project directory",
                pm
            ));
        }
    }
}
