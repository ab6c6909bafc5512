//! Device-related types for dlna-cast
//!
//! This module contains the device information structure exposed to hosts
//! and the normalization applied to vendor-supplied descriptor fields.

use crate::utils::format_renderer_description;

/// Fallback for vendor fields the device descriptor leaves empty
const UNKNOWN_FIELD: &str = "Unknown";

/// A media renderer known to the registry.
///
/// Carries only descriptor information; the transport endpoint used to
/// dispatch actions stays inside the registry. Identifiers are the device's
/// advertised UDN and are treated as opaque tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    /// Unique device name (UDN), stable for the advertised session
    pub id: String,
    /// Friendly name from the device descriptor
    pub name: String,
    /// Manufacturer, or "Unknown" when the descriptor omits it
    pub manufacturer: String,
    /// Model name, or "Unknown" when the descriptor omits it
    pub model_name: String,
    /// Device type URN from the descriptor
    pub device_type: String,
    /// Whether the device exposes the AVTransport service
    pub has_av_transport: bool,
}

/// Normalizes a vendor-supplied descriptor field, substituting "Unknown"
/// for empty or whitespace-only values.
pub(crate) fn normalize_field(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        UNKNOWN_FIELD.to_string()
    } else {
        trimmed.to_string()
    }
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            format_renderer_description(
                &self.device_type,
                &self.name,
                &self.manufacturer,
                &self.model_name,
                &self.id,
            )
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_field() {
        assert_eq!(normalize_field("Samsung"), "Samsung");
        assert_eq!(normalize_field("  Samsung  "), "Samsung");
        assert_eq!(normalize_field(""), "Unknown");
        assert_eq!(normalize_field("   "), "Unknown");
    }

    #[test]
    fn test_device_display() {
        let device = Device {
            id: "uuid:1234".to_string(),
            name: "Living Room TV".to_string(),
            manufacturer: "Samsung".to_string(),
            model_name: "Q80".to_string(),
            device_type: "MediaRenderer".to_string(),
            has_av_transport: true,
        };
        let text = device.to_string();
        assert!(text.contains("Living Room TV"));
        assert!(text.contains("uuid:1234"));
        assert!(text.contains("MediaRenderer"));
    }
}
