//! Background device discovery for dlna-cast
//!
//! A spawned task periodically searches the network for renderers using SSDP
//! (Simple Service Discovery Protocol), feeds the registry, and forwards
//! add/remove notifications to the event surface.

use std::collections::HashSet;
use std::pin::pin;
use std::time::Duration;

use futures_util::stream::{Stream, StreamExt, TryStreamExt};
use log::{debug, info, warn};
use rupnp::ssdp::{SearchTarget, URN};
use tokio::time::{MissedTickBehavior, interval};

use crate::{config::Config, error::Result, events::EventBus};

use super::registry::{DeviceRegistry, RendererEndpoint};
use super::types::{Device, normalize_field};

/// UPnP service URN for AVTransport
pub const AV_TRANSPORT: URN = URN::service("schemas-upnp-org", "AVTransport", 1);

/// Runs periodic discovery scans until the task is aborted.
pub(crate) async fn run_discovery_loop(registry: DeviceRegistry, events: EventBus, config: Config) {
    let mut ticker = interval(Duration::from_secs(config.discovery_interval));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        if let Err(err) = scan_once(&registry, &events, &config).await {
            warn!("Renderer scan failed: {err}");
        }
    }
}

/// Performs a single SSDP search window and reconciles the registry.
async fn scan_once(registry: &DeviceRegistry, events: &EventBus, config: &Config) -> Result<()> {
    debug!(
        "Scanning for renderers ({} second window)...",
        config.discovery_timeout
    );
    let search_target = SearchTarget::URN(AV_TRANSPORT);
    let devices = upnp_discover(
        &search_target,
        Duration::from_secs(config.discovery_timeout),
        config.ssdp_search_attempts,
        config.ssdp_ttl,
    )
    .await?;

    let mut devices = pin!(devices);
    let mut seen_ids = HashSet::new();

    while let Some(result) = devices.next().await {
        match result {
            Ok(device) => {
                let (info, endpoint) = describe_renderer(&device);
                if !seen_ids.insert(info.id.clone()) {
                    debug!("Skipping duplicate device: {info}");
                    continue;
                }
                if registry.upsert(info.clone(), endpoint) {
                    info!("Found renderer: {info}");
                    events.device_found(info);
                }
            }
            Err(e) => {
                debug!("A device returned error while discovering it: {e}");
            }
        }
    }

    for id in registry.expire_missing(&seen_ids, config.max_missed_scans) {
        info!("Renderer left the network: {id}");
        events.device_lost(id);
    }

    Ok(())
}

/// Extracts normalized descriptor fields and the AVTransport endpoint from
/// a discovered UPnP device.
fn describe_renderer(device: &rupnp::Device) -> (Device, Option<RendererEndpoint>) {
    let service = device.find_service(&AV_TRANSPORT);
    if service.is_none() {
        warn!(
            "No AVTransport service found on '{}'",
            device.friendly_name()
        );
    }

    let info = Device {
        id: device.udn().to_string(),
        name: normalize_field(device.friendly_name()),
        manufacturer: normalize_field(device.manufacturer()),
        model_name: normalize_field(device.model_name()),
        device_type: device.device_type().to_string(),
        has_av_transport: service.is_some(),
    };
    let endpoint = service.map(|service| RendererEndpoint {
        url: device.url().clone(),
        service: service.clone(),
    });
    (info, endpoint)
}

/// Discovers UPnP devices answering the given search target
async fn upnp_discover(
    search_target: &SearchTarget,
    timeout: Duration,
    search_attempts: usize,
    ttl: Option<u32>,
) -> Result<impl Stream<Item = Result<rupnp::Device, rupnp::Error>>> {
    Ok(
        ssdp_client::search(search_target, timeout, search_attempts, ttl)
            .await?
            .map_err(rupnp::Error::SSDPError)
            .map(|res| Ok(res?.location().parse()?))
            .and_then(rupnp::Device::from_url),
    )
}
