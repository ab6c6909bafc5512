//! CLI command implementations for dlna-cast
//!
//! This module contains the implementation of the list, cast and control
//! commands, plus the renderer selection shared between them.

mod cast;
mod control;
mod list;

pub use cast::CastCommand;
pub use control::ControlCommand;
pub use list::ListCommand;

use std::time::Duration;

use clap::Subcommand;
use tokio::time::sleep;

use crate::{
    config::Config,
    devices::Device,
    error::{Error, Result},
    service::DlnaService,
};

/// Friendly name this host advertises while participating in the registry
const CLI_SERVICE_NAME: &str = "dlna-cast";

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Scan and list renderers in the network capable of playing media
    List(super::List),

    /// Cast a media URL to a renderer
    Cast(super::Cast),

    /// Send a single play/pause/stop command to a renderer
    Control(super::Control),
}

impl Commands {
    /// Execute the command
    pub async fn run(&self, cli: &super::Cli) -> Result<()> {
        let config = cli.build_config();
        super::setup_log(&config);
        match self {
            Self::List(list) => ListCommand::new(list).run(&config).await,
            Self::Cast(cast) => CastCommand::new(cast).run(&config).await,
            Self::Control(control) => ControlCommand::new(control).run(&config).await,
        }
    }
}

/// Starts a service and waits for one discovery scan to complete
pub(super) async fn start_and_scan(config: &Config) -> DlnaService {
    let service = DlnaService::new(config.clone());
    service.start_service(CLI_SERVICE_NAME);
    sleep(Duration::from_secs(config.discovery_timeout + 1)).await;
    service
}

/// Selects a renderer by exact identifier, falling back to a name
/// substring match.
pub(super) async fn select_renderer(service: &DlnaService, query: &str) -> Result<Device> {
    let renderers = service.list_renderers().await?;
    renderers
        .iter()
        .find(|device| device.id == query)
        .or_else(|| renderers.iter().find(|device| device.name.contains(query)))
        .cloned()
        .ok_or_else(|| Error::DeviceNotFound {
            device_id: query.to_string(),
            context: format!("{} renderer(s) currently known", renderers.len()),
        })
}
