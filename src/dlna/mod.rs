//! DLNA control-point functionality for dlna-cast
//!
//! This module provides the cast orchestrator, playback control, metadata
//! generation, and the action dispatch seam over the UPnP transport.

pub mod cast;
pub mod control;
pub mod dispatcher;
pub mod metadata;

pub use cast::{CastOrchestrator, RetryPolicy};
pub use control::PlaybackController;
pub use dispatcher::{ActionDispatcher, RupnpDispatcher, TransportAction};
pub use metadata::encode_didl_metadata;
