//! Codes command.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct CodesCommand {
    /// Catalog document (TOML).
    catalog: PathBuf,
}

impl CodesCommand {
    pub fn run(self) -> Result<i32> {
        let registry = super::load_registry(&self.catalog)?;
        crate::output::print_json(&registry.codes())?;
        Ok(0)
    }
}
