//! Configuration constants for dlna-cast
//!
//! This module contains all hardcoded constants used throughout the crate,
//! organized by functionality and following Rust naming conventions.

// =============================================================================
// Device Discovery Constants
// =============================================================================

/// Default duration of a single SSDP search window in seconds
pub const DEFAULT_DISCOVERY_TIMEOUT: u64 = 5;

/// Default interval between background discovery scans in seconds
pub const DEFAULT_DISCOVERY_INTERVAL: u64 = 10;

/// SSDP search attempts per scan
pub const SSDP_SEARCH_ATTEMPTS: usize = 3;

/// TTL (Time To Live) for SSDP multicast packets
pub const SSDP_TTL: Option<u32> = Some(3);

/// Number of consecutive scans a device may miss before it is considered lost
pub const DEFAULT_MAX_MISSED_SCANS: u32 = 2;

// =============================================================================
// Cast Orchestration Constants
// =============================================================================

/// Maximum number of attempts for a single cast call
pub const MAX_CAST_ATTEMPTS: u32 = 3;

/// Deadline for a single cast attempt in seconds
pub const CAST_ATTEMPT_TIMEOUT_SECS: u64 = 30;

/// Delay before the first cast retry in milliseconds (doubled per attempt)
pub const CAST_RETRY_INITIAL_DELAY_MS: u64 = 1000;

// =============================================================================
// DLNA Protocol Constants
// =============================================================================

/// DLNA instance ID used in payloads
pub const DLNA_INSTANCE_ID: u32 = 0;

/// DLNA default playback speed
pub const DLNA_DEFAULT_SPEED: u32 = 1;

/// DLNA action name for setting AV transport URI
pub const DLNA_ACTION_SET_AV_TRANSPORT_URI: &str = "SetAVTransportURI";

/// DLNA action name for play
pub const DLNA_ACTION_PLAY: &str = "Play";

/// DLNA action name for pause
pub const DLNA_ACTION_PAUSE: &str = "Pause";

/// DLNA action name for stop
pub const DLNA_ACTION_STOP: &str = "Stop";

// =============================================================================
// DLNA Metadata Constants
// =============================================================================

/// Title substituted when the caller provides none
pub const DEFAULT_MEDIA_TITLE: &str = "Video";

/// Protocol info for HLS (adaptive streaming) content
pub const PROTOCOL_INFO_HLS: &str = "http-get:*:application/vnd.apple.mpegurl:*";

/// Protocol info for MP4 content
pub const PROTOCOL_INFO_MP4: &str = "http-get:*:video/mp4:*";

/// Protocol info for generic video content
pub const PROTOCOL_INFO_GENERIC: &str = "http-get:*:video/*:*";

// =============================================================================
// Progress Messages
// =============================================================================

/// Progress message emitted when an attempt starts
pub const PROGRESS_MSG_CONNECTING: &str = "Connecting to device...";

/// Progress message emitted after the source URI is accepted
pub const PROGRESS_MSG_BUFFERING: &str = "Loading media on the renderer...";

/// Progress message emitted once playback is confirmed
pub const PROGRESS_MSG_PLAYING: &str = "Media is now playing";

// =============================================================================
// Error and Status Messages
// =============================================================================

/// Context message for a registry miss during cast or control
pub const DEVICE_OFFLINE_MSG: &str = "device may have gone offline, re-run discovery";

/// Log message for the list command
pub const LOG_MSG_LIST_DEVICES: &str = "Listing known renderers";

// =============================================================================
// Logging Constants
// =============================================================================

/// Environment variable name for custom log level
pub const LOG_LEVEL_ENV_VAR: &str = "DLNACAST_LOG";
