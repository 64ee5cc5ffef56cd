//! Upgrade command

use anyhow::{Context, Result};
use masst_projects::DependencyScanner;

use crate::app::App;
use crate::cli::UpgradeArgs;
use crate::output;

pub async fn run(args: UpgradeArgs, app: &App) -> Result<()> {
    let namespace = &app.config.workspace.namespace;
    output::info(&format!("Checking for {} package updates...", namespace));

    let scanner = DependencyScanner::new(namespace.clone(), app.config.workspace.roots.clone());
    let packages = scanner.scan(app.workspace.root());

    if packages.is_empty() {
        output::warning(&format!("No {} packages found.", namespace));
        return Ok(());
    }

    println!("Found packages:");
    for package in &packages {
        output::hint(&format!("- {}", package));
    }

    if args.check {
        println!();
        output::info("Run without --check to upgrade.");
        return Ok(());
    }

    let packages: Vec<&str> = packages.iter().map(String::as_str).collect();
    let upgrade = app
        .workspace
        .at_root(app.workspace.package_manager().upgrade_latest(&packages));

    output::info("Upgrading packages...");
    app.run_inherit(&upgrade).await.context("Upgrade failed")?;
    output::success("Packages upgraded!");
    Ok(())
}
