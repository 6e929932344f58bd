//! Check command.
//!
//! Exits with status 2 when any published code moved or disappeared.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use mws_events::{CodeDrift, Registry};
use tracing::debug;

use crate::output::{print_success, print_warning};

const DRIFT_EXIT_CODE: i32 = 2;

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Catalog document (TOML).
    catalog: PathBuf,

    /// Previously published codes, as printed by `mws-events codes`.
    #[arg(long)]
    previous: PathBuf,
}

impl CheckCommand {
    pub fn run(self) -> Result<i32> {
        let registry = super::load_registry(&self.catalog)?;
        let previous = load_codes(&self.previous)?;
        let drift = check(&registry, &previous);

        if drift.is_empty() {
            print_success(&format!(
                "catalog '{}' keeps all {} published codes",
                registry.catalog(),
                previous.len()
            ));
            return Ok(0);
        }

        for d in &drift {
            print_warning(&describe(d));
        }
        Ok(DRIFT_EXIT_CODE)
    }
}

fn load_codes(path: &Path) -> Result<BTreeMap<String, u32>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read published codes: {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("invalid published codes: {}", path.display()))
}

fn check(registry: &Registry, previous: &BTreeMap<String, u32>) -> Vec<CodeDrift> {
    let drift = registry.check_codes(previous);
    debug!(
        catalog = registry.catalog(),
        published = previous.len(),
        drifted = drift.len(),
        "Compared published codes"
    );
    drift
}

fn describe(drift: &CodeDrift) -> String {
    match drift {
        CodeDrift::Moved {
            name,
            previous,
            current,
        } => format!("event '{name}' moved from code {previous} to {current}"),
        CodeDrift::Removed { name, previous } => {
            format!("event '{name}' (code {previous}) was removed")
        }
    }
}
