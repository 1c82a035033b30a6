use thiserror::Error;

/// Result type alias using WardError
pub type Result<T> = std::result::Result<T, WardError>;

/// Stable classification of every error in the engine
///
/// Matches the propagation policy: `Validation` and `Conflict` are resolved
/// locally and reported synchronously, `Transport` is always surfaced with a
/// human-readable message and leaves the operation retryable, `Stale` means
/// the referenced node/snapshot no longer exists and the caller should
/// silently refresh instead of reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Conflict,
    Transport,
    Stale,
    State,
    Internal,
}

impl ErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "ERR_VALIDATION",
            ErrorKind::Conflict => "ERR_CONFLICT",
            ErrorKind::Transport => "ERR_TRANSPORT",
            ErrorKind::Stale => "ERR_STALE",
            ErrorKind::State => "ERR_STATE",
            ErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// A single pre-flight validation failure
///
/// Produced by `rules::validation::validate`; a non-empty list blocks any
/// save before the transport is contacted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Which part of the configuration failed (mapping key, group/field, ...)
    pub field: String,
    /// Human-readable description of the failure
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Canonical error type for the DNSWard engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WardError {
    // ===== Conflict Errors =====
    /// Attempted create/rename onto an existing group name
    #[error("Group '{name}' already exists")]
    GroupExists { name: String },

    /// Group name was empty or whitespace-only after trimming
    #[error("Group name cannot be empty or whitespace-only")]
    InvalidGroupName,

    // ===== Validation Errors =====
    /// Pre-flight validation failed; the save was never attempted
    #[error("Validation failed: {}", first_message(.errors))]
    ValidationFailed { errors: Vec<ValidationError> },

    /// Destructive operation invoked without explicit confirmation
    #[error("Restore requires explicit confirmation")]
    ConfirmationRequired,

    // ===== State Errors =====
    /// No node/method is currently selected
    #[error("No configuration is loaded")]
    NoSelection,

    /// Draft has unsaved changes and the caller did not ask to discard them
    #[error("Unsaved changes for node '{node_id}' ({method}) must be saved or discarded")]
    UnsavedChanges { node_id: String, method: String },

    /// A save for this node is already in flight
    #[error("A save is already in progress for node '{node_id}'")]
    SaveInProgress { node_id: String },

    /// Secondary nodes are read-only while clustering is active
    #[error("Node '{node_id}' is a secondary node and cannot be edited while clustering is active")]
    NodeNotEditable { node_id: String },

    // ===== Stale References =====
    /// Node no longer exists in the latest node list
    #[error("Node '{node_id}' no longer exists")]
    NodeNotFound { node_id: String },

    /// Snapshot no longer exists on the node
    #[error("Snapshot '{snapshot_id}' no longer exists on node '{node_id}'")]
    SnapshotNotFound {
        node_id: String,
        snapshot_id: String,
    },

    /// The node has no configuration for the requested method
    #[error("No {method} configuration found for node '{node_id}'")]
    ConfigNotFound { node_id: String, method: String },

    // ===== Transport Errors =====
    /// Network boundary failure; the operation is retryable
    #[error("Transport error during {op}: {message}")]
    Transport { op: String, message: String },

    // ===== Generic Errors =====
    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

fn first_message(errors: &[ValidationError]) -> String {
    errors
        .first()
        .map(|e| e.to_string())
        .unwrap_or_else(|| "no errors recorded".to_string())
}

impl WardError {
    /// Classify this error into the stable taxonomy
    pub fn kind(&self) -> ErrorKind {
        match self {
            WardError::GroupExists { .. } | WardError::InvalidGroupName => ErrorKind::Conflict,
            WardError::ValidationFailed { .. } | WardError::ConfirmationRequired => {
                ErrorKind::Validation
            }
            WardError::NoSelection
            | WardError::UnsavedChanges { .. }
            | WardError::SaveInProgress { .. }
            | WardError::NodeNotEditable { .. } => ErrorKind::State,
            WardError::NodeNotFound { .. }
            | WardError::SnapshotNotFound { .. }
            | WardError::ConfigNotFound { .. } => ErrorKind::Stale,
            WardError::Transport { .. } => ErrorKind::Transport,
            WardError::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Stable error code for programmatic handling
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// Whether the caller may retry the operation as-is
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Transport)
    }

    /// Convenience constructor for transport failures
    pub fn transport(op: impl Into<String>, message: impl Into<String>) -> Self {
        WardError::Transport {
            op: op.into(),
            message: message.into(),
        }
    }
}
