//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// masst - scaffold, run, and ship full-stack SaaS projects
#[derive(Parser, Debug)]
#[command(name = "mst")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Run as if started in this directory
    #[arg(short = 'C', long, global = true, default_value = ".")]
    pub directory: Utf8PathBuf,

    /// Never prompt; use defaults and flags only
    #[arg(short = 'y', long = "yes", visible_alias = "non-interactive", global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new project from the SaaS template
    Init(InitArgs),

    /// Start containers, prepare the database, and run the dev servers
    Dev(DevArgs),

    /// Build every app for production
    Build,

    /// Deploy to a hosting platform
    Deploy(DeployArgs),

    /// Stop the project's containers
    Stop,

    /// Show container logs
    Logs(LogsArgs),

    /// Database management
    #[command(subcommand)]
    Db(DbCommands),

    /// Upgrade @masst packages to their latest versions
    Upgrade(UpgradeArgs),

    /// Add an integration to the project
    #[command(subcommand)]
    Add(AddCommands),

    /// Install a package with the project's package manager
    #[command(name = "i", visible_alias = "install")]
    Install(InstallArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project name (lowercase letters, numbers, and dashes)
    pub name: Option<String>,

    /// Skip installing dependencies
    #[arg(long)]
    pub skip_install: bool,

    /// Skip git initialization
    #[arg(long, visible_alias = "skip-vcs-init")]
    pub skip_git: bool,

    /// Database name (defaults to <name>_db with dashes as underscores)
    #[arg(long, visible_alias = "db")]
    pub database_name: Option<String>,

    /// Leave out the Redis cache
    #[arg(long, visible_alias = "no-redis")]
    pub no_cache: bool,

    /// Git repository URL used by CI/CD
    #[arg(long)]
    pub repo_url: Option<String>,

    /// Use a template directory on disk instead of the built-in template
    #[arg(long)]
    pub template: Option<Utf8PathBuf>,
}

#[derive(Args, Debug)]
pub struct DevArgs {
    /// Skip starting containers (use an external database)
    #[arg(long, visible_alias = "no-docker")]
    pub no_containers: bool,

    /// Force database seeding even if data exists
    #[arg(long)]
    pub seed: bool,

    /// Reset the database schema and seed fresh data
    #[arg(long, visible_alias = "fresh")]
    pub reset: bool,
}

#[derive(Args, Debug)]
pub struct DeployArgs {
    /// Target platform (docker, railway, render, fly)
    #[arg(long, visible_alias = "platform", default_value = "docker")]
    pub target: String,

    /// Container image tag
    #[arg(long, default_value = "latest")]
    pub tag: String,
}

#[derive(Args, Debug)]
pub struct LogsArgs {
    /// Follow log output
    #[arg(short, long)]
    pub follow: bool,

    /// Only show logs for this service (postgres, redis, web, api)
    #[arg(short, long)]
    pub service: Option<String>,

    /// Number of lines to show
    #[arg(short = 'n', long = "tail", default_value_t = 100)]
    pub tail_lines: u32,
}

#[derive(Subcommand, Debug)]
pub enum DbCommands {
    /// Open Prisma Studio to browse the database
    Studio,

    /// Create and apply a migration, or apply pending ones
    Migrate {
        /// Migration name
        #[arg(long, default_value = "migration")]
        name: String,

        /// Apply pending migrations instead of creating one
        #[arg(long)]
        deploy: bool,
    },

    /// Drop all data and re-apply migrations
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },

    /// Push the schema without creating a migration
    Push,

    /// Seed demo data
    Seed {
        /// Seed even if data exists
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug)]
pub struct UpgradeArgs {
    /// Only list packages, do not upgrade
    #[arg(long, visible_alias = "check-only")]
    pub check: bool,
}

#[derive(Subcommand, Debug)]
pub enum AddCommands {
    /// Stripe billing
    Stripe,
    /// Transactional email with Resend
    Emails,
    /// Product analytics with PostHog
    Analytics,
}

#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Package to install; `ui` installs `@masst/ui`
    pub package: String,

    /// Install the name as given, without the @masst/ prefix
    #[arg(long, visible_alias = "skip-scope")]
    pub skip_namespace: bool,

    /// Package manager to use instead of the detected one (pnpm, yarn, npm)
    #[arg(long, visible_alias = "pm")]
    pub package_manager: Option<String>,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
