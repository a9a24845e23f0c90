//! Error types for the QASM parser and emitter.

use thiserror::Error;

/// Errors that can occur while parsing QASM 2.0 source.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// Lexer error (invalid token).
    #[error("Lexer error at line {line}: {message}")]
    LexerError { line: usize, message: String },

    /// Unexpected token.
    #[error("Unexpected token at line {line}: expected {expected}, found {found}")]
    UnexpectedToken {
        line: usize,
        expected: String,
        found: String,
    },

    /// Unexpected end of input.
    #[error("Unexpected end of input: expected {0}")]
    UnexpectedEof(String),

    /// Version other than 2.0.
    #[error("Unsupported OPENQASM version: {0} (only 2.0 is supported)")]
    UnsupportedVersion(String),

    /// Reference to a register that was never declared.
    #[error("Unknown register '{name}' at line {line}")]
    UnknownRegister { name: String, line: usize },

    /// The same register name declared twice.
    #[error("Duplicate register declaration: '{0}'")]
    DuplicateRegister(String),

    /// Register index out of bounds.
    #[error("Index {index} out of bounds for register '{register}' of size {size}")]
    IndexOutOfBounds {
        register: String,
        index: usize,
        size: usize,
    },

    /// Register operands of a broadcast gate call have mismatched sizes.
    #[error("Mismatched register sizes in '{gate}' call at line {line}")]
    BroadcastMismatch { gate: String, line: usize },

    /// Gate or measure statement before any qreg declaration.
    #[error("No quantum register declared before line {0}")]
    MissingQreg(usize),

    /// IR error during circuit construction.
    #[error("Circuit error: {0}")]
    CircuitError(#[from] qbridge_ir::IrError),
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;
