//! Command-line interface for dlna-cast
//!
//! This module wires argument parsing, log setup and command execution.

pub mod args;
pub mod commands;

pub use args::{Cast, Cli, Control, List};
pub use commands::Commands;

use std::env;

use clap::Parser;
use log::LevelFilter;
use simple_logger::SimpleLogger;

use crate::config::{Config, LOG_LEVEL_ENV_VAR};
use crate::error::Result;

/// Parses arguments and runs the selected command
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    cli.command.run(&cli).await
}

/// Initializes the logger from the config, honoring the environment
/// variable override.
pub(crate) fn setup_log(config: &Config) {
    let log_level = if let Ok(level) = env::var(LOG_LEVEL_ENV_VAR) {
        match level.as_str() {
            "trace" => LevelFilter::Trace,
            "debug" => LevelFilter::Debug,
            "info" => LevelFilter::Info,
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            _ => LevelFilter::Info,
        }
    } else {
        config.log_level
    };

    SimpleLogger::new()
        .with_level(log_level)
        .init()
        .unwrap_or_else(|_| eprintln!("Warning: Logger already initialized"));
}
