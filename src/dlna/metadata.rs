//! DLNA metadata generation for dlna-cast
//!
//! Builds the DIDL-Lite document sent alongside the playback URL. Pure and
//! deterministic: no I/O, no failure path.

use quick_xml::escape::escape;

use crate::config::{
    DEFAULT_MEDIA_TITLE, PROTOCOL_INFO_GENERIC, PROTOCOL_INFO_HLS, PROTOCOL_INFO_MP4,
};

/// Selects the protocol info descriptor from the URL suffix.
///
/// A heuristic, not a content-type probe: neither bytes nor server headers
/// are inspected.
pub fn protocol_info_for(url: &str) -> &'static str {
    if url.ends_with(".m3u8") || url.contains(".m3u8?") {
        PROTOCOL_INFO_HLS
    } else if url.ends_with(".mp4") {
        PROTOCOL_INFO_MP4
    } else {
        PROTOCOL_INFO_GENERIC
    }
}

/// Builds the DIDL-Lite metadata document for a media URL.
///
/// An empty title falls back to "Video". Title and URL are XML-escaped
/// before embedding.
pub fn encode_didl_metadata(url: &str, title: &str) -> String {
    let title = if title.trim().is_empty() {
        DEFAULT_MEDIA_TITLE
    } else {
        title
    };
    let escaped_title = escape(title);
    let escaped_url = escape(url);
    let protocol_info = protocol_info_for(url);

    format!(
        r#"<DIDL-Lite xmlns="urn:schemas-upnp-org:metadata-1-0/DIDL-Lite/" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:upnp="urn:schemas-upnp-org:metadata-1-0/upnp/" xmlns:dlna="urn:schemas-dlna-org:metadata-1-0/"><item id="1" parentID="0" restricted="1"><dc:title>{escaped_title}</dc:title><upnp:class>object.item.videoItem</upnp:class><res protocolInfo="{protocol_info}">{escaped_url}</res></item></DIDL-Lite>"#
    )
}
