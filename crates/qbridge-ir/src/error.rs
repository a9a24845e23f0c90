//! Error types for the IR crate.

use thiserror::Error;

use crate::qubit::{ClbitId, QubitId};

/// Errors raised while validating or building circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Circuit must contain at least one qubit.
    #[error("Circuit must have at least 1 qubit, got {0}")]
    InvalidQubitCount(u32),

    /// Gate name is not in the supported gate set.
    #[error("Unknown gate type: '{0}'")]
    UnknownGate(String),

    /// Gate was applied to the wrong number of qubits.
    #[error("Gate '{gate}' requires {expected} qubit(s), got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate: &'static str,
        /// Number of qubits the gate acts on.
        expected: usize,
        /// Number of qubit operands provided.
        got: usize,
    },

    /// Gate was given the wrong number of parameters.
    #[error("Gate '{gate}' requires {expected} parameter(s), got {got}")]
    ParameterCountMismatch {
        /// Name of the gate.
        gate: String,
        /// Number of parameters the gate takes.
        expected: usize,
        /// Number of parameters provided.
        got: usize,
    },

    /// A gate parameter is NaN or infinite.
    #[error("Gate '{gate}' has a non-finite parameter")]
    NonFiniteParameter {
        /// Name of the gate.
        gate: String,
    },

    /// Qubit index is outside `[0, num_qubits)`.
    #[error("Qubit {qubit} out of range for {num_qubits}-qubit circuit (gate: {gate})")]
    QubitOutOfRange {
        /// Name of the gate.
        gate: &'static str,
        /// The offending qubit index.
        qubit: QubitId,
        /// Number of qubits in the circuit.
        num_qubits: u32,
    },

    /// The same qubit appears twice in one gate.
    #[error("Duplicate qubit {qubit} in gate '{gate}'")]
    DuplicateQubit {
        /// Name of the gate.
        gate: &'static str,
        /// The duplicated qubit index.
        qubit: QubitId,
    },

    /// Classical bit index is outside `[0, num_clbits)`.
    #[error("Classical bit {clbit} out of range for circuit with {num_clbits} classical bit(s)")]
    ClbitOutOfRange {
        /// The offending classical bit index.
        clbit: ClbitId,
        /// Number of classical bits in the circuit.
        num_clbits: u32,
    },
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
