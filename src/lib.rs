//! dlna-cast: a resilient UPnP/DLNA cast controller.
//!
//! Discovers media renderers on the local network and drives them to play
//! remote media, tolerating flaky wireless networks and slow-responding
//! devices: per-attempt deadlines, retry with exponential backoff, and
//! progress notifications over a broadcast event bus.
//!
//! # Usage
//!
//! ```no_run
//! use dlna_cast::{Config, DlnaService};
//!
//! #[tokio::main]
//! async fn main() -> dlna_cast::Result<()> {
//!     let service = DlnaService::new(Config::default());
//!     service.start_service("my-app");
//!
//!     // give the background scan a moment to populate the registry
//!     tokio::time::sleep(std::time::Duration::from_secs(6)).await;
//!
//!     let renderers = service.list_renderers().await?;
//!     let tv = renderers.first().expect("no renderer found");
//!     service
//!         .cast(&tv.id, "http://example.com/movie.mp4", Some("Movie Night"))
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod devices;
pub mod dlna;
pub mod error;
pub mod events;
pub mod service;
pub mod utils;

pub use config::Config;
pub use devices::{Device, DeviceRegistry, RendererRegistry};
pub use dlna::{
    ActionDispatcher, CastOrchestrator, PlaybackController, RetryPolicy, RupnpDispatcher,
    TransportAction, encode_didl_metadata,
};
pub use error::{Error, Result};
pub use events::{CastProgress, CastStage, DlnaEvent, EventBus};
pub use service::DlnaService;
