//! Type definitions shared across masst crates

mod outcome;
mod runtime_config;

pub use outcome::*;
pub use runtime_config::*;
