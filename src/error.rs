use std::fmt;
use std::time::Duration;

/// Errors that can happen inside dlna-cast
#[derive(Debug)]
pub enum Error {
    // Input validation errors
    /// The caller passed a malformed media URL or an empty device identifier
    InvalidInput {
        /// Why the input was rejected
        reason: String,
    },
    /// A core operation was invoked before the service was started
    ServiceNotStarted {
        /// The operation that was attempted
        operation: &'static str,
    },
    /// A control request used an action outside play/pause/stop
    InvalidAction {
        /// The rejected action string
        action: String,
    },

    // Device resolution errors
    /// The identifier did not resolve in the registry
    DeviceNotFound {
        /// The identifier that was searched for
        device_id: String,
        /// Additional context about the lookup
        context: String,
    },
    /// The device resolved but does not expose the AVTransport service
    CapabilityUnavailable {
        /// The friendly name of the device
        device_name: String,
    },

    // Dispatch and orchestration errors
    /// The underlying UPnP action invocation reported failure
    DispatchFailure {
        /// The action that failed
        action: String,
        /// The failure reported by the transport
        message: String,
    },
    /// A cast attempt exceeded its deadline with no terminal outcome
    Timeout {
        /// The attempt number that timed out
        attempt: u32,
        /// The deadline that elapsed
        limit: Duration,
    },
    /// Terminal failure after exhausting the cast retry budget
    MaxRetriesExceeded {
        /// Total number of attempts made
        attempts: u32,
        /// The error from the final attempt
        last_error: Box<Error>,
    },

    // Discovery errors
    /// Failed to discover DLNA devices on the network
    DeviceDiscoveryFailed {
        /// The underlying UPnP error
        source: rupnp::Error,
        /// Additional context about the discovery attempt
        context: String,
    },
}

impl Error {
    /// Whether the cast orchestrator may retry after this failure.
    ///
    /// Only resolution misses, dispatch failures and deadline expiries are
    /// retried; validation and capability errors are terminal.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::DeviceNotFound { .. } | Error::DispatchFailure { .. } | Error::Timeout { .. }
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidInput { reason } => {
                write!(f, "Invalid input: {reason}")
            }
            Error::ServiceNotStarted { operation } => {
                write!(
                    f,
                    "Cannot {operation}: DLNA service not started, call start_service first"
                )
            }
            Error::InvalidAction { action } => {
                write!(
                    f,
                    "Invalid action '{action}': valid actions are 'play', 'pause' and 'stop'"
                )
            }
            Error::DeviceNotFound { device_id, context } => {
                write!(f, "Device '{device_id}' not found: {context}")
            }
            Error::CapabilityUnavailable { device_name } => {
                write!(
                    f,
                    "Device '{device_name}' does not support the AVTransport service and cannot play media"
                )
            }
            Error::DispatchFailure { action, message } => {
                write!(f, "Action '{action}' failed: {message}")
            }
            Error::Timeout { attempt, limit } => {
                write!(
                    f,
                    "Cast attempt {attempt} timed out after {} seconds",
                    limit.as_secs()
                )
            }
            Error::MaxRetriesExceeded {
                attempts,
                last_error,
            } => {
                write!(
                    f,
                    "Casting failed after {attempts} attempts ({last_error}); the device may be offline or incompatible"
                )
            }
            Error::DeviceDiscoveryFailed { source, context } => {
                write!(f, "Failed to discover devices: {source} ({context})")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::MaxRetriesExceeded { last_error, .. } => Some(last_error.as_ref()),
            Error::DeviceDiscoveryFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ssdp_client::Error> for Error {
    fn from(err: ssdp_client::Error) -> Self {
        Error::DeviceDiscoveryFailed {
            source: rupnp::Error::SSDPError(err),
            context: "SSDP discovery failed".to_string(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
