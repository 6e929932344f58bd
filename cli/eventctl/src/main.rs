//! mws-events - inspect plugin event catalogs.
//!
//! Lists the event dictionary of a catalog document and checks that event
//! codes did not move since they were last published.

use anyhow::Result;
use clap::Parser;
use mws_event_service::Config;

mod commands;
mod output;

use commands::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            output::print_error(&e);
            std::process::exit(1);
        }
    };

    let level = cli.log_level().unwrap_or(&config.log_level);
    if let Err(e) = mws_event_service::logging::init(level, config.log_json) {
        eprintln!("failed to initialize logging: {e}");
    }

    match cli.run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            output::print_error(&e);
            std::process::exit(1);
        }
    }
}
