//! Outward notification channel for dlna-cast
//!
//! Hosts subscribe to a broadcast stream of device and playback events.
//! Delivery is best-effort: emitting with no subscriber attached is not an
//! error and never affects the outcome of the operation that emitted it.

use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::broadcast;

use crate::devices::Device;

/// Capacity of the broadcast channel backing the event bus
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Stage of an in-flight cast attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastStage {
    /// The orchestrator resolved the device and is about to dispatch
    Connecting,
    /// The source URI was accepted, playback is starting
    Buffering,
    /// Playback was confirmed by the renderer
    Playing,
}

impl CastStage {
    /// The stage name as emitted to hosts
    pub fn as_str(&self) -> &'static str {
        match self {
            CastStage::Connecting => "connecting",
            CastStage::Buffering => "buffering",
            CastStage::Playing => "playing",
        }
    }
}

impl std::fmt::Display for CastStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress notification for an in-flight cast
#[derive(Debug, Clone)]
pub struct CastProgress {
    /// Current stage of the attempt
    pub stage: CastStage,
    /// Human-readable description of the stage
    pub message: String,
    /// Friendly name of the target device
    pub device_name: String,
    /// Milliseconds since the Unix epoch
    pub timestamp_ms: u64,
}

/// Event payloads published to subscribed hosts
#[derive(Debug, Clone)]
pub enum DlnaEvent {
    /// A renderer appeared in the registry
    DeviceFound(Device),
    /// A renderer left the network or its advertisement expired
    DeviceLost {
        /// Identifier of the lost device
        id: String,
    },
    /// Progress of an in-flight cast
    CastProgress(CastProgress),
    /// Media pushed to this host while acting as a renderer
    InboundMedia {
        /// URL of the inbound media
        url: String,
        /// Title of the inbound media
        title: String,
        /// Declared media type
        media_type: String,
    },
}

/// Broadcast bus carrying [`DlnaEvent`]s to any number of subscribers
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<DlnaEvent>,
}

impl EventBus {
    /// Create a new event bus with a bounded broadcast channel.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Subscribe to the event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<DlnaEvent> {
        self.sender.subscribe()
    }

    /// Notify subscribers that a renderer was found.
    pub fn device_found(&self, device: Device) {
        let _ = self.sender.send(DlnaEvent::DeviceFound(device));
    }

    /// Notify subscribers that a renderer was lost.
    pub fn device_lost(&self, id: String) {
        let _ = self.sender.send(DlnaEvent::DeviceLost { id });
    }

    /// Notify subscribers about cast progress.
    pub fn cast_progress(&self, stage: CastStage, message: &str, device_name: &str) {
        let _ = self.sender.send(DlnaEvent::CastProgress(CastProgress {
            stage,
            message: message.to_string(),
            device_name: device_name.to_string(),
            timestamp_ms: now_millis(),
        }));
    }

    /// Notify subscribers about media pushed to the local renderer.
    pub fn inbound_media(&self, url: String, title: String, media_type: String) {
        let _ = self.sender.send(DlnaEvent::InboundMedia {
            url,
            title,
            media_type,
        });
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
