//! DLNA action dispatch for dlna-cast
//!
//! Wraps the UPnP action-invocation primitive behind a uniform asynchronous
//! call. Each invocation is a single request completing with exactly one
//! outcome; retry and timeout enforcement live in the orchestrator above.

use log::debug;

use crate::{
    config::{
        DLNA_ACTION_PAUSE, DLNA_ACTION_PLAY, DLNA_ACTION_SET_AV_TRANSPORT_URI, DLNA_ACTION_STOP,
        DLNA_DEFAULT_SPEED, DLNA_INSTANCE_ID, DEVICE_OFFLINE_MSG,
    },
    devices::DeviceRegistry,
    error::{Error, Result},
};

/// A transport command understood by a renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportAction {
    /// Tell the renderer which URL to load, prior to play
    SetSource {
        /// The media URL
        uri: String,
        /// The DIDL-Lite metadata document
        metadata: String,
    },
    /// Start or resume playback
    Play,
    /// Pause playback
    Pause,
    /// Stop playback
    Stop,
}

impl TransportAction {
    /// The UPnP action name on the AVTransport service
    pub fn name(&self) -> &'static str {
        match self {
            TransportAction::SetSource { .. } => DLNA_ACTION_SET_AV_TRANSPORT_URI,
            TransportAction::Play => DLNA_ACTION_PLAY,
            TransportAction::Pause => DLNA_ACTION_PAUSE,
            TransportAction::Stop => DLNA_ACTION_STOP,
        }
    }

    /// Builds the SOAP argument payload for this action
    fn payload(&self) -> String {
        match self {
            TransportAction::SetSource { uri, metadata } => {
                let escaped_uri = quick_xml::escape::escape(uri.as_str());
                let escaped_metadata = quick_xml::escape::escape(metadata.as_str());
                format!(
                    r#"
    <InstanceID>{DLNA_INSTANCE_ID}</InstanceID>
    <CurrentURI>{escaped_uri}</CurrentURI>
    <CurrentURIMetaData>{escaped_metadata}</CurrentURIMetaData>
"#
                )
            }
            TransportAction::Play => format!(
                r#"
    <InstanceID>{DLNA_INSTANCE_ID}</InstanceID>
    <Speed>{DLNA_DEFAULT_SPEED}</Speed>
"#
            ),
            TransportAction::Pause | TransportAction::Stop => format!(
                r#"
    <InstanceID>{DLNA_INSTANCE_ID}</InstanceID>
"#
            ),
        }
    }
}

/// Uniform asynchronous invocation of a transport action.
///
/// Implementations report exactly one outcome per call: success or a typed
/// failure, never both, never neither.
#[allow(async_fn_in_trait)]
pub trait ActionDispatcher {
    /// Invokes a single action against the identified device.
    async fn invoke(&self, device_id: &str, action: TransportAction) -> Result<()>;
}

/// Dispatcher backed by the rupnp SOAP transport
#[derive(Debug, Clone)]
pub struct RupnpDispatcher {
    registry: DeviceRegistry,
}

impl RupnpDispatcher {
    /// Creates a dispatcher resolving endpoints from the given registry
    pub fn new(registry: DeviceRegistry) -> Self {
        Self { registry }
    }
}

impl ActionDispatcher for RupnpDispatcher {
    async fn invoke(&self, device_id: &str, action: TransportAction) -> Result<()> {
        let endpoint = self
            .registry
            .endpoint(device_id)
            .ok_or_else(|| Error::DeviceNotFound {
                device_id: device_id.to_string(),
                context: DEVICE_OFFLINE_MSG.to_string(),
            })?;

        let name = action.name();
        let payload = action.payload();
        debug!("Invoking {name} on '{device_id}'");

        endpoint
            .service
            .action(&endpoint.url, name, &payload)
            .await
            .map_err(|err| Error::DispatchFailure {
                action: name.to_string(),
                message: err.to_string(),
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_names() {
        let set_source = TransportAction::SetSource {
            uri: "http://example.com/a.mp4".to_string(),
            metadata: String::new(),
        };
        assert_eq!(set_source.name(), "SetAVTransportURI");
        assert_eq!(TransportAction::Play.name(), "Play");
        assert_eq!(TransportAction::Pause.name(), "Pause");
        assert_eq!(TransportAction::Stop.name(), "Stop");
    }

    #[test]
    fn test_set_source_payload_embeds_escaped_arguments() {
        let action = TransportAction::SetSource {
            uri: "http://example.com/a.mp4?x=1&y=2".to_string(),
            metadata: "<DIDL-Lite/>".to_string(),
        };
        let payload = action.payload();
        assert!(payload.contains("<InstanceID>0</InstanceID>"));
        assert!(payload.contains("a.mp4?x=1&amp;y=2"));
        assert!(payload.contains("<CurrentURIMetaData>&lt;DIDL-Lite/&gt;</CurrentURIMetaData>"));
    }

    #[test]
    fn test_play_payload_has_speed() {
        let payload = TransportAction::Play.payload();
        assert!(payload.contains("<InstanceID>0</InstanceID>"));
        assert!(payload.contains("<Speed>1</Speed>"));
    }

    #[test]
    fn test_pause_and_stop_payloads() {
        for action in [TransportAction::Pause, TransportAction::Stop] {
            let payload = action.payload();
            assert!(payload.contains("<InstanceID>0</InstanceID>"));
            assert!(!payload.contains("Speed"));
        }
    }
}
