//! CLI commands.

mod check;
mod codes;
mod dictionary;

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mws_events::Registry;
use tracing::info;

/// Inspect MWS plugin event catalogs.
#[derive(Debug, Parser)]
#[command(name = "mws-events")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error). Overrides MWS_LOG_LEVEL.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List every event of a catalog with its derived identifiers.
    Dictionary(dictionary::DictionaryCommand),

    /// Print the name to code map of a catalog for publication.
    Codes(codes::CodesCommand),

    /// Compare a catalog against previously published codes.
    Check(check::CheckCommand),
}

impl Cli {
    pub fn log_level(&self) -> Option<&str> {
        self.log_level.as_deref()
    }

    /// Runs the command and returns the process exit code.
    pub fn run(self) -> Result<i32> {
        match self.command {
            Commands::Dictionary(cmd) => cmd.run(),
            Commands::Codes(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
        }
    }
}

pub(crate) fn load_registry(path: &Path) -> Result<Registry> {
    let registry = mws_events::registry_from_path(path)
        .with_context(|| format!("failed to load catalog: {}", path.display()))?;
    info!(
        catalog = registry.catalog(),
        path = %path.display(),
        events = registry.len(),
        "Catalog loaded"
    );
    Ok(registry)
}
