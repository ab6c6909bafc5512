//! Cast command implementation for dlna-cast
//!
//! Selects a renderer, prints cast progress as it arrives, and drives a
//! media URL to the playing state.

use log::info;

use crate::{
    config::Config,
    error::Result,
    events::DlnaEvent,
    utils::format_progress_line,
};

/// Cast command implementation
pub struct CastCommand<'a> {
    args: &'a super::super::Cast,
}

impl<'a> CastCommand<'a> {
    /// Create a new cast command
    pub fn new(args: &'a super::super::Cast) -> Self {
        Self { args }
    }

    /// Execute the cast command
    pub async fn run(&self, config: &Config) -> Result<()> {
        let service = super::start_and_scan(config).await;
        let device = super::select_renderer(&service, &self.args.device).await?;
        info!("Casting to {device}");

        let mut events = service.subscribe();
        let printer = tokio::spawn(async move {
            while let Ok(event) = events.recv().await {
                if let DlnaEvent::CastProgress(progress) = event {
                    println!("{}", format_progress_line(&progress));
                }
            }
        });

        let outcome = service
            .cast(&device.id, &self.args.url, self.args.title.as_deref())
            .await;
        printer.abort();
        service.stop_service();

        outcome?;
        println!("Playback confirmed on {}", device.name);
        Ok(())
    }
}
