//! Device discovery and registry for dlna-cast
//!
//! This module maintains the process-wide table of known renderers: a
//! background SSDP scan loop feeds the registry, and the registry adapter
//! exposes read-only resolution to the rest of the crate.

pub mod discovery;
pub mod registry;
pub mod types;

pub use registry::{DeviceRegistry, RendererRegistry};
pub use types::Device;
