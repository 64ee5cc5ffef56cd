//! CLI command implementations

pub mod add;
pub mod build;
pub mod completions;
pub mod db;
pub mod deploy;
pub mod dev;
pub mod init;
pub mod install;
pub mod logs;
pub mod stop;
pub mod upgrade;
