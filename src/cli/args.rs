//! CLI argument parsing for dlna-cast
//!
//! This module contains the CLI argument definitions and parsing logic
//! using the clap crate.

use clap::{Args, Parser};
use log::LevelFilter;

use crate::config::{Config, DEFAULT_DISCOVERY_TIMEOUT};

/// A resilient UPnP/DLNA cast controller
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Time in seconds to search and discover renderers
    #[arg(short, long, default_value_t = DEFAULT_DISCOVERY_TIMEOUT)]
    pub timeout: u64,

    /// Log level
    #[arg(long, value_name = "LEVEL", global = true, default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,

    /// The command to execute
    #[command(subcommand)]
    pub command: super::Commands,
}

impl Cli {
    /// Build a Config from CLI arguments
    pub fn build_config(&self) -> Config {
        Config::new()
            .with_discovery_timeout(self.timeout)
            .with_log_level(self.log_level)
    }
}

/// List command arguments
#[derive(Args)]
pub struct List;

/// Cast command arguments
#[derive(Args)]
pub struct Cast {
    /// The target renderer, by identifier (UDN) or name substring
    pub device: String,

    /// The URL of the media to play
    pub url: String,

    /// Title shown on the renderer
    #[arg(short = 'T', long)]
    pub title: Option<String>,
}

/// Control command arguments
#[derive(Args)]
pub struct Control {
    /// The target renderer, by identifier (UDN) or name substring
    pub device: String,

    /// The action to perform: play, pause or stop
    pub action: String,
}
