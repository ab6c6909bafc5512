//! Configuration module for dlna-cast
//!
//! This module provides configuration constants, default values, and
//! configuration types for discovery and cast orchestration.

mod constants;
mod types;

// Re-export all constants and types
pub use constants::*;
pub use types::*;
