//! Control command implementation for dlna-cast
//!
//! Sends a single play/pause/stop command to a renderer.

use log::info;

use crate::{config::Config, error::Result};

/// Control command implementation
pub struct ControlCommand<'a> {
    args: &'a super::super::Control,
}

impl<'a> ControlCommand<'a> {
    /// Create a new control command
    pub fn new(args: &'a super::super::Control) -> Self {
        Self { args }
    }

    /// Execute the control command
    pub async fn run(&self, config: &Config) -> Result<()> {
        let service = super::start_and_scan(config).await;
        let device = super::select_renderer(&service, &self.args.device).await?;
        info!("Sending '{}' to {device}", self.args.action);

        let outcome = service.control(&device.id, &self.args.action).await;
        service.stop_service();

        outcome?;
        println!("'{}' accepted by {}", self.args.action, device.name);
        Ok(())
    }
}
