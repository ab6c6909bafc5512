//! Formatting utilities for dlna-cast
//!
//! Display strings for device information and cast progress lines.

use crate::events::CastProgress;

/// Formats a renderer description for display
pub fn format_renderer_description(
    device_type: &str,
    friendly_name: &str,
    manufacturer: &str,
    model_name: &str,
    device_id: &str,
) -> String {
    format!("[{device_type}] {friendly_name} ({manufacturer} {model_name}) @ {device_id}")
}

/// Formats a cast progress event as a single display line
pub fn format_progress_line(progress: &CastProgress) -> String {
    format!(
        "[{}] {} ({})",
        progress.stage, progress.message, progress.device_name
    )
}
