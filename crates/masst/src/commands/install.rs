//! Install command (`mst i`)

use anyhow::{Context, Result};
use masst_core::PackageManager;

use crate::app::App;
use crate::cli::InstallArgs;
use crate::output;

pub async fn run(args: InstallArgs, app: &App) -> Result<()> {
    let pm = match &args.package_manager {
        Some(name) => name.to_lowercase().parse::<PackageManager>()?,
        None => app.workspace.package_manager(),
    };
    let package = qualified_name(
        &args.package,
        &app.config.workspace.namespace,
        args.skip_namespace,
    );

    output::info(&format!("Installing {} using {}...", package, pm));
    app.run_inherit(&app.workspace.at_root(pm.add(&[package.as_str()])))
        .await
        .with_context(|| format!("Failed to install {} with {}", package, pm))?;

    output::success(&format!("Successfully installed {}", package));
    Ok(())
}

/// Prefix `package` with the namespace unless opted out or already prefixed
fn qualified_name(package: &str, namespace: &str, skip_namespace: bool) -> String {
    if skip_namespace || package.starts_with(namespace) {
        package.to_string()
    } else {
        format!("{}{}", namespace, package)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_applied_once() {
        assert_eq!(qualified_name("ui", "@masst/", false), "@masst/ui");
        assert_eq!(qualified_name("@masst/ui", "@masst/", false), "@masst/ui");
        assert_eq!(qualified_name("zod", "@masst/", true), "zod");
    }
}
