//! JSON tool surface for qbridge.
//!
//! Exposes circuit construction, execution, multi-backend comparison, QASM
//! serialization, prebuilt demonstrations, and benchmarking as typed
//! request handlers returning JSON payloads. Every handler catches its own
//! failures, so the surface never panics or leaks `Err` to the transport.

pub mod error;
pub mod requests;
pub mod tools;

pub use error::{ToolError, ToolResult};
pub use requests::{
    BenchmarkRequest, CircuitRequest, ExecuteMultiRequest, ExecuteRequest, GhzRequest,
    TemplateRequest,
};
pub use tools::{Tools, execution_payload};
