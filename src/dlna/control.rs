//! Playback control for dlna-cast
//!
//! A thin pass-through issuing a single transport command against a resolved
//! device. No retry, no timeout beyond the dispatcher's single-shot
//! behavior; failures map to distinct kinds so the caller can tell "nothing
//! to control" from "control attempt rejected".

use log::debug;

use crate::{
    config::DEVICE_OFFLINE_MSG,
    devices::RendererRegistry,
    error::{Error, Result},
};

use super::dispatcher::{ActionDispatcher, TransportAction};

/// Issues single play/pause/stop commands against renderers
pub struct PlaybackController<R, D> {
    registry: R,
    dispatcher: D,
}

impl<R, D> PlaybackController<R, D>
where
    R: RendererRegistry,
    D: ActionDispatcher,
{
    /// Creates a controller over the given collaborators
    pub fn new(registry: R, dispatcher: D) -> Self {
        Self {
            registry,
            dispatcher,
        }
    }

    /// Executes one control action (`play`, `pause` or `stop`,
    /// case-insensitive) against the identified device.
    ///
    /// Any other action string fails with [`Error::InvalidAction`] before
    /// any dispatcher call.
    pub async fn control(&self, device_id: &str, action: &str) -> Result<()> {
        let action = match action.to_ascii_lowercase().as_str() {
            "play" => TransportAction::Play,
            "pause" => TransportAction::Pause,
            "stop" => TransportAction::Stop,
            _ => {
                return Err(Error::InvalidAction {
                    action: action.to_string(),
                });
            }
        };

        let device = self
            .registry
            .resolve(device_id)
            .ok_or_else(|| Error::DeviceNotFound {
                device_id: device_id.to_string(),
                context: DEVICE_OFFLINE_MSG.to_string(),
            })?;

        if !device.has_av_transport {
            return Err(Error::CapabilityUnavailable {
                device_name: device.name,
            });
        }

        debug!("Controlling '{}' with {}", device.name, action.name());
        self.dispatcher.invoke(device_id, action).await
    }
}
