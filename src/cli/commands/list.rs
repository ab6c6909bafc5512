//! List command implementation for dlna-cast
//!
//! Discovers and displays available renderers on the network.

use log::info;

use crate::{
    config::{Config, LOG_MSG_LIST_DEVICES},
    error::Result,
};

/// List command implementation
pub struct ListCommand<'a> {
    _args: &'a super::super::List,
}

impl<'a> ListCommand<'a> {
    /// Create a new list command
    pub fn new(args: &'a super::super::List) -> Self {
        Self { _args: args }
    }

    /// Execute the list command
    pub async fn run(&self, config: &Config) -> Result<()> {
        info!("{LOG_MSG_LIST_DEVICES}");
        let service = super::start_and_scan(config).await;
        for renderer in service.list_renderers().await? {
            println!("{renderer}");
        }
        service.stop_service();
        Ok(())
    }
}
