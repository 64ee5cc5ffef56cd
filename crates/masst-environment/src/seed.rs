//! Best-effort classification of seed script output
//!
//! The seed script owns idempotence; this only reads what it printed. A
//! wording change in the script silently yields `Indeterminate`.

use masst_core::types::SeedMarkers;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    AlreadySeeded,
    FreshlySeeded,
    Indeterminate,
}

impl fmt::Display for SeedOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SeedOutcome::AlreadySeeded => "database already has demo data",
            SeedOutcome::FreshlySeeded => "database seeded with demo data",
            SeedOutcome::Indeterminate => "seed finished",
        };
        f.write_str(text)
    }
}

/// The "already has data" marker wins if both appear
pub fn classify_seed_output(output: &str, markers: &SeedMarkers) -> SeedOutcome {
    if output.contains(&markers.existing) {
        SeedOutcome::AlreadySeeded
    } else if output.contains(&markers.seeded) {
        SeedOutcome::FreshlySeeded
    } else {
        SeedOutcome::Indeterminate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let markers = SeedMarkers::default();
        assert_eq!(
            classify_seed_output("Database already has data. Use --force to re-seed.", &markers),
            SeedOutcome::AlreadySeeded
        );
        assert_eq!(
            classify_seed_output("Demo credentials:\n   Email: demo@example.com", &markers),
            SeedOutcome::FreshlySeeded
        );
        assert_eq!(classify_seed_output("", &markers), SeedOutcome::Indeterminate);
    }
}
