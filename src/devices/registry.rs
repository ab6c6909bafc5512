//! Device registry adapter for dlna-cast
//!
//! The registry is a process-wide, read-mostly table of renderers populated
//! by the background discovery loop. Callers see it through the
//! [`RendererRegistry`] trait: a point-in-time view with no active re-scan.
//! The orchestrator never mutates it, only reads.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use super::types::Device;

/// Read access to the renderer table.
///
/// `resolve` is a point-in-time lookup; absence means the device is not in
/// the registry's current knowledge, and it is the caller's decision whether
/// to wait for a re-scan.
pub trait RendererRegistry {
    /// Returns every known device exposing the AVTransport capability.
    fn list_renderers(&self) -> Vec<Device>;

    /// Looks up a device by identifier, capable or not.
    fn resolve(&self, device_id: &str) -> Option<Device>;
}

/// Transport endpoint needed to dispatch actions against a renderer
#[derive(Debug, Clone)]
pub(crate) struct RendererEndpoint {
    /// Base URL of the device
    pub url: http::Uri,
    /// The AVTransport service handle
    pub service: rupnp::Service,
}

#[derive(Debug)]
struct RegisteredRenderer {
    info: Device,
    endpoint: Option<RendererEndpoint>,
    missed_scans: u32,
}

#[derive(Debug, Default)]
struct RegistryState {
    renderers: HashMap<String, RegisteredRenderer>,
}

/// Shared renderer table backing the service and the real dispatcher
#[derive(Debug, Clone, Default)]
pub struct DeviceRegistry {
    state: Arc<RwLock<RegistryState>>,
}

impl DeviceRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or refreshes a renderer, returning true when it is new.
    ///
    /// Repeat advertisements update the record in place and reset its
    /// missed-scan counter.
    pub(crate) fn upsert(&self, info: Device, endpoint: Option<RendererEndpoint>) -> bool {
        let mut state = self.state.write().expect("registry lock poisoned");
        let id = info.id.clone();
        let newly_added = !state.renderers.contains_key(&id);
        state.renderers.insert(
            id,
            RegisteredRenderer {
                info,
                endpoint,
                missed_scans: 0,
            },
        );
        newly_added
    }

    /// Updates missed-scan counters after a scan and removes expired
    /// renderers, returning the identifiers of the removed ones.
    pub(crate) fn expire_missing(
        &self,
        seen_ids: &HashSet<String>,
        max_missed_scans: u32,
    ) -> Vec<String> {
        let mut state = self.state.write().expect("registry lock poisoned");
        let mut lost = Vec::new();
        for (id, entry) in state.renderers.iter_mut() {
            if seen_ids.contains(id) {
                entry.missed_scans = 0;
            } else {
                entry.missed_scans += 1;
                if entry.missed_scans >= max_missed_scans {
                    lost.push(id.clone());
                }
            }
        }
        for id in &lost {
            state.renderers.remove(id);
        }
        lost
    }

    /// Returns the transport endpoint for a renderer, if it is still known
    /// and capable.
    pub(crate) fn endpoint(&self, device_id: &str) -> Option<RendererEndpoint> {
        let state = self.state.read().expect("registry lock poisoned");
        state
            .renderers
            .get(device_id)
            .and_then(|entry| entry.endpoint.clone())
    }
}

impl RendererRegistry for DeviceRegistry {
    fn list_renderers(&self) -> Vec<Device> {
        let state = self.state.read().expect("registry lock poisoned");
        state
            .renderers
            .values()
            .filter(|entry| entry.info.has_av_transport)
            .map(|entry| entry.info.clone())
            .collect()
    }

    fn resolve(&self, device_id: &str) -> Option<Device> {
        let state = self.state.read().expect("registry lock poisoned");
        state
            .renderers
            .get(device_id)
            .map(|entry| entry.info.clone())
    }
}
