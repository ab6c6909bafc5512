//! Service façade for dlna-cast
//!
//! [`DlnaService`] brackets registry participation: `start_service` spawns
//! the background discovery loop and `stop_service` tears it down. All core
//! operations fail with [`Error::ServiceNotStarted`] outside that bracket.

use std::sync::Mutex;

use log::{debug, info};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::{
    config::Config,
    devices::{Device, DeviceRegistry, RendererRegistry, discovery},
    dlna::{CastOrchestrator, PlaybackController, RetryPolicy, RupnpDispatcher},
    error::{Error, Result},
    events::{DlnaEvent, EventBus},
};

struct Started {
    registry: DeviceRegistry,
    discovery: JoinHandle<()>,
}

/// Discovery, cast and control entry point for host applications.
///
/// Any number of `cast` calls may be in flight concurrently; the service
/// does not serialize across calls.
pub struct DlnaService {
    config: Config,
    events: EventBus,
    state: Mutex<Option<Started>>,
}

impl DlnaService {
    /// Creates a stopped service with the given configuration
    pub fn new(config: Config) -> Self {
        Self {
            config,
            events: EventBus::new(),
            state: Mutex::new(None),
        }
    }

    /// Subscribes to device and playback notifications
    pub fn subscribe(&self) -> broadcast::Receiver<DlnaEvent> {
        self.events.subscribe()
    }

    /// The event bus carrying this service's notifications
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Starts registry participation under the given friendly name.
    ///
    /// Spawns the background discovery loop; must be called from within a
    /// tokio runtime. Calling it while already started is a no-op.
    pub fn start_service(&self, friendly_name: &str) {
        let mut state = self.state.lock().expect("service lock poisoned");
        if state.is_some() {
            debug!("DLNA service already started");
            return;
        }

        let registry = DeviceRegistry::new();
        let discovery = tokio::spawn(discovery::run_discovery_loop(
            registry.clone(),
            self.events.clone(),
            self.config.clone(),
        ));
        *state = Some(Started {
            registry,
            discovery,
        });
        info!("DLNA service started as '{friendly_name}'");
    }

    /// Stops registry participation and forgets all known devices.
    ///
    /// Idempotent; in-flight casts against the stopped registry finish their
    /// current attempt and then fail.
    pub fn stop_service(&self) {
        let mut state = self.state.lock().expect("service lock poisoned");
        if let Some(started) = state.take() {
            started.discovery.abort();
            info!("DLNA service stopped");
        }
    }

    fn registry(&self, operation: &'static str) -> Result<DeviceRegistry> {
        let state = self.state.lock().expect("service lock poisoned");
        state
            .as_ref()
            .map(|started| started.registry.clone())
            .ok_or(Error::ServiceNotStarted { operation })
    }

    /// Returns every currently-known renderer with the AVTransport
    /// capability.
    pub async fn list_renderers(&self) -> Result<Vec<Device>> {
        let registry = self.registry("list renderers")?;
        Ok(registry.list_renderers())
    }

    /// Casts a media URL to a renderer, resolving once playback is
    /// confirmed. See [`CastOrchestrator::cast`] for retry semantics.
    pub async fn cast(&self, device_id: &str, url: &str, title: Option<&str>) -> Result<()> {
        let registry = self.registry("cast")?;
        let orchestrator = CastOrchestrator::new(
            registry.clone(),
            RupnpDispatcher::new(registry),
            self.events.clone(),
            RetryPolicy::from(&self.config),
        );
        orchestrator.cast(device_id, url, title).await
    }

    /// Issues a single play/pause/stop command against a renderer
    pub async fn control(&self, device_id: &str, action: &str) -> Result<()> {
        let registry = self.registry("control playback")?;
        let controller = PlaybackController::new(registry.clone(), RupnpDispatcher::new(registry));
        controller.control(device_id, action).await
    }
}

impl Drop for DlnaService {
    fn drop(&mut self) {
        self.stop_service();
    }
}
