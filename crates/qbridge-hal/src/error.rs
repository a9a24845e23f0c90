//! Error types for backend operations.

use thiserror::Error;

/// Errors that can occur when resolving or running backends.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// No backend registered under the requested name.
    #[error("Unknown backend: '{0}'")]
    UnknownBackend(String),

    /// Backend exists but cannot currently execute circuits.
    #[error("Backend '{backend}' is unavailable: {reason}")]
    BackendUnavailable { backend: String, reason: String },

    /// The circuit uses a gate the backend cannot translate.
    #[error("Backend '{backend}' does not support gate '{gate}'")]
    UnsupportedGate { backend: String, gate: String },

    /// The circuit is wider than the backend can simulate.
    #[error("Circuit has {requested} qubits but backend '{backend}' supports at most {max}")]
    TooManyQubits {
        backend: String,
        requested: usize,
        max: u32,
    },

    /// Shot count outside the accepted range.
    #[error("Invalid shot count: {0}")]
    InvalidShots(u64),

    /// Execution exceeded the orchestrator deadline.
    #[error("Backend '{0}' timed out")]
    Timeout(String),

    /// Remote backend transport failure.
    #[error("Network error talking to backend '{backend}': {reason}")]
    Network { backend: String, reason: String },

    /// Backend-side execution failure.
    #[error("Execution failed: {0}")]
    Execution(String),

    /// Circuit construction or validation error.
    #[error("Circuit error: {0}")]
    Circuit(#[from] qbridge_ir::IrError),

    /// Result payload could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for backend operations.
pub type HalResult<T> = Result<T, HalError>;
