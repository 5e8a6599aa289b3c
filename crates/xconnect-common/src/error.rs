//! Error types for port provisioning.
//!
//! [`ApiError`] is what the remote collaborator reports. [`PortResourceError`]
//! is what a lifecycle operation reports to its host; every variant that wraps
//! a collaborator failure keeps it as its `source`.

use std::fmt;
use std::io;
use std::time::Duration;

use thiserror::Error;

use crate::model::PortId;

/// Result type alias for collaborator calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type alias for lifecycle operations.
pub type PortResourceResult<T> = Result<T, PortResourceError>;

/// Errors reported by the remote provisioning API collaborator.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("Network error during {operation}: {message}")]
    Network {
        /// The API operation (e.g., "get_port_details").
        operation: String,
        /// Error message.
        message: String,
    },

    /// The API answered with a non-success status.
    #[error("API returned status {status} for {operation}: {message}")]
    Status {
        /// The API operation.
        operation: String,
        /// HTTP status code.
        status: u16,
        /// Response body or reason.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("Failed to decode response for {operation}: {message}")]
    Decode {
        /// The API operation.
        operation: String,
        /// Error message.
        message: String,
    },

    /// The requested object does not exist.
    #[error("{kind} '{id}' not found")]
    NotFound {
        /// Object kind (e.g., "location", "port").
        kind: &'static str,
        /// The identifier that was looked up.
        id: String,
    },

    /// A bounded wait gave up.
    #[error("Timed out after {}s waiting for {operation}", waited.as_secs())]
    Timeout {
        /// What was being waited for.
        operation: String,
        /// How long the caller waited.
        waited: Duration,
    },

    /// The API accepted the request but refused to act on it.
    #[error("Request rejected during {operation}: {message}")]
    Rejected {
        /// The API operation.
        operation: String,
        /// Error message.
        message: String,
    },
}

impl ApiError {
    /// Creates a network error.
    pub fn network(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Network {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Creates a status error.
    pub fn status(operation: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            operation: operation.into(),
            status,
            message: message.into(),
        }
    }

    /// Creates a decode error.
    pub fn decode(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Creates a not-found error.
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Creates a timeout error.
    pub fn timeout(operation: impl Into<String>, waited: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            waited,
        }
    }

    /// Creates a rejection error.
    pub fn rejected(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Rejected {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Returns true if the remote object is known not to exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            ApiError::NotFound { .. } => true,
            ApiError::Status { status, .. } => *status == 404,
            _ => false,
        }
    }

    /// Returns true if this error indicates a transient condition
    /// that may succeed on retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Network { .. } | ApiError::Timeout { .. } => true,
            ApiError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// How a port leaves the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteAction {
    /// Immediate, irreversible removal.
    Delete,
    /// Decommission at the end of the contract term.
    Cancel,
}

impl DeleteAction {
    /// Selects the action from the process-wide delete policy.
    pub fn from_policy(delete_ports: bool) -> Self {
        if delete_ports {
            DeleteAction::Delete
        } else {
            DeleteAction::Cancel
        }
    }

    /// Returns the `immediate` argument of the remote delete call.
    pub fn is_immediate(&self) -> bool {
        matches!(self, DeleteAction::Delete)
    }

    /// Returns the gerund used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeleteAction::Delete => "deleting",
            DeleteAction::Cancel => "cancelling",
        }
    }
}

impl fmt::Display for DeleteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by the port lifecycle operations.
#[derive(Debug, Error)]
pub enum PortResourceError {
    /// The location could not be resolved; nothing was mutated remotely.
    #[error("Failed to resolve location {location_id}: {source}")]
    LocationResolution {
        /// The requested location id.
        location_id: u32,
        /// The underlying lookup error.
        #[source]
        source: ApiError,
    },

    /// The remote API rejected the buy request.
    #[error("Failed to provision {variant} port '{name}': {source}")]
    Provisioning {
        /// The provisioning variant that was attempted.
        variant: &'static str,
        /// The requested port name.
        name: String,
        /// The underlying API error.
        #[source]
        source: ApiError,
    },

    /// The port was ordered but never reported as provisioned.
    #[error("Port {port_id} did not finish provisioning: {source}")]
    ProvisioningWait {
        /// The identifier assigned by the buy request.
        port_id: PortId,
        /// The underlying wait error.
        #[source]
        source: ApiError,
    },

    /// Fetching the remote record failed.
    #[error("Failed to read port {port_id}: {source}")]
    Fetch {
        /// The port identifier.
        port_id: PortId,
        /// The underlying API error.
        #[source]
        source: ApiError,
    },

    /// The name/visibility update was rejected.
    #[error("Failed to modify port {port_id}: {source}")]
    Modification {
        /// The port identifier.
        port_id: PortId,
        /// The underlying API error.
        #[source]
        source: ApiError,
    },

    /// The lock or unlock call itself failed.
    #[error("Failed to change lock state of port {port_id}: {source}")]
    LockRequest {
        /// The port identifier.
        port_id: PortId,
        /// The underlying API error.
        #[source]
        source: ApiError,
    },

    /// The lock call succeeded but the port is not locked.
    #[error("Port {port_id} was not locked")]
    PortNotLocked {
        /// The port identifier.
        port_id: PortId,
    },

    /// The unlock call succeeded but the port is still locked.
    #[error("Port {port_id} was not unlocked")]
    PortNotUnlocked {
        /// The port identifier.
        port_id: PortId,
    },

    /// The delete or cancel call failed or reported `false`.
    #[error("Error {action} resource {port_id}: {cause}")]
    Deletion {
        /// Whether this was a delete or a cancel.
        action: DeleteAction,
        /// The port identifier.
        port_id: PortId,
        /// Human-readable cause.
        cause: String,
        /// The underlying API error, absent when the call only returned `false`.
        #[source]
        source: Option<ApiError>,
    },

    /// The operation needs an identifier the local state does not carry.
    #[error("No port identifier in local state for {operation}")]
    MissingIdentifier {
        /// The lifecycle operation.
        operation: &'static str,
    },

    /// Create was invoked on state that is already bound to a port.
    #[error("Local state is already bound to port {port_id}")]
    AlreadyCreated {
        /// The identifier already recorded.
        port_id: PortId,
    },
}

impl PortResourceError {
    /// Creates a deletion error from a failed call.
    pub fn deletion_failed(action: DeleteAction, port_id: PortId, source: ApiError) -> Self {
        Self::Deletion {
            action,
            port_id,
            cause: source.to_string(),
            source: Some(source),
        }
    }

    /// Creates a deletion error for a call that returned `false` without error.
    pub fn deletion_refused(action: DeleteAction, port_id: PortId) -> Self {
        Self::Deletion {
            action,
            port_id,
            cause: "remote API reported failure".to_string(),
            source: None,
        }
    }

    /// Returns the collaborator error behind this failure, if any.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            PortResourceError::LocationResolution { source, .. }
            | PortResourceError::Provisioning { source, .. }
            | PortResourceError::ProvisioningWait { source, .. }
            | PortResourceError::Fetch { source, .. }
            | PortResourceError::Modification { source, .. }
            | PortResourceError::LockRequest { source, .. } => Some(source),
            PortResourceError::Deletion { source, .. } => source.as_ref(),
            _ => None,
        }
    }
}

/// Errors loading the provider configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read configuration file '{path}': {source}")]
    Io {
        /// The file path.
        path: String,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid TOML for the expected schema.
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// A value is out of range.
    #[error("Invalid configuration for {field}: {message}")]
    Invalid {
        /// The field that failed validation.
        field: String,
        /// Error message.
        message: String,
    },
}

impl ConfigError {
    /// Creates an invalid configuration error.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}
