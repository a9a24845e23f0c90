//! Tool-level error type.

use thiserror::Error;

/// Any failure surfaced through the tool boundary.
///
/// Tools never propagate this to callers as `Err`; it is rendered into a
/// `{"success": false, "error": ...}` payload at the boundary.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error(transparent)]
    Circuit(#[from] qbridge_ir::IrError),

    #[error(transparent)]
    Backend(#[from] qbridge_hal::HalError),

    #[error(transparent)]
    Qasm(#[from] qbridge_qasm::ParseError),

    #[error("{0}")]
    Invalid(String),
}

pub type ToolResult<T> = Result<T, ToolError>;
