//! Dictionary command.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use mws_events::{DictionaryEntry, Registry};
use tabled::Tabled;

use crate::output::{print_json, print_table, OutputFormat};

#[derive(Debug, Args)]
pub struct DictionaryCommand {
    /// Catalog document (TOML).
    catalog: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Debug, Tabled)]
struct DictionaryRow {
    #[tabled(rename = "CODE")]
    code: u32,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "SEVERITY")]
    severity: String,
    #[tabled(rename = "ESCALATION")]
    escalation_level: String,
    #[tabled(rename = "TYPE")]
    event_type: String,
    #[tabled(rename = "ORIGIN SUFFIX")]
    origin_suffix: String,
    #[tabled(rename = "MESSAGE CODE")]
    message_code: String,
}

impl From<DictionaryEntry> for DictionaryRow {
    fn from(entry: DictionaryEntry) -> Self {
        Self {
            code: entry.code,
            name: entry.name,
            severity: entry.severity,
            escalation_level: entry.escalation_level,
            event_type: entry.event_type,
            origin_suffix: entry.origin_suffix,
            message_code: entry.message_code,
        }
    }
}

impl DictionaryCommand {
    pub fn run(self) -> Result<i32> {
        let registry = super::load_registry(&self.catalog)?;
        match self.format {
            OutputFormat::Json => print_json(&registry.dictionary())?,
            OutputFormat::Table => print_table(&rows(&registry)),
        }
        Ok(0)
    }
}

fn rows(registry: &Registry) -> Vec<DictionaryRow> {
    registry.dictionary().into_iter().map(Into::into).collect()
}
