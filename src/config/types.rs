//! Configuration types for dlna-cast
//!
//! This module contains configuration structures and related types
//! used throughout the crate.

use log::LevelFilter;
use std::time::Duration;

use super::constants::*;

/// Configuration for discovery and cast orchestration
#[derive(Debug, Clone)]
pub struct Config {
    /// Duration of a single SSDP search window in seconds
    pub discovery_timeout: u64,
    /// Interval between background discovery scans in seconds
    pub discovery_interval: u64,
    /// Number of SSDP search attempts per scan
    pub ssdp_search_attempts: usize,
    /// TTL for SSDP discovery packets
    pub ssdp_ttl: Option<u32>,
    /// Consecutive missed scans before a device is reported lost
    pub max_missed_scans: u32,
    /// Maximum number of attempts for a single cast call
    pub max_cast_attempts: u32,
    /// Deadline for a single cast attempt
    pub cast_attempt_timeout: Duration,
    /// Delay before the first cast retry (doubled per subsequent attempt)
    pub cast_retry_initial_delay: Duration,
    /// Log level
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            discovery_timeout: DEFAULT_DISCOVERY_TIMEOUT,
            discovery_interval: DEFAULT_DISCOVERY_INTERVAL,
            ssdp_search_attempts: SSDP_SEARCH_ATTEMPTS,
            ssdp_ttl: SSDP_TTL,
            max_missed_scans: DEFAULT_MAX_MISSED_SCANS,
            max_cast_attempts: MAX_CAST_ATTEMPTS,
            cast_attempt_timeout: Duration::from_secs(CAST_ATTEMPT_TIMEOUT_SECS),
            cast_retry_initial_delay: Duration::from_millis(CAST_RETRY_INITIAL_DELAY_MS),
            log_level: LevelFilter::Info,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the SSDP search window
    pub fn with_discovery_timeout(mut self, timeout: u64) -> Self {
        self.discovery_timeout = timeout;
        self
    }

    /// Sets the interval between discovery scans
    pub fn with_discovery_interval(mut self, interval: u64) -> Self {
        self.discovery_interval = interval;
        self
    }

    /// Sets the maximum number of cast attempts
    pub fn with_max_cast_attempts(mut self, attempts: u32) -> Self {
        self.max_cast_attempts = attempts;
        self
    }

    /// Sets the per-attempt cast deadline
    pub fn with_cast_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.cast_attempt_timeout = timeout;
        self
    }

    /// Sets the initial cast retry delay
    pub fn with_cast_retry_initial_delay(mut self, delay: Duration) -> Self {
        self.cast_retry_initial_delay = delay;
        self
    }

    /// Sets the log level
    pub fn with_log_level(mut self, level: LevelFilter) -> Self {
        self.log_level = level;
        self
    }
}
