//! Hardware abstraction layer for qbridge backends.
//!
//! Defines the [`Adapter`] trait every backend implements, the
//! [`BackendRegistry`] used for discovery, and the shared result types
//! ([`Counts`], [`ExecutionResult`]) with the canonical bitstring
//! convention all adapters normalize to.

pub mod adapter;
pub mod error;
pub mod registry;
pub mod result;

pub use adapter::{Adapter, MAX_SHOTS};
pub use error::{HalError, HalResult};
pub use registry::BackendRegistry;
pub use result::{
    BackendDescriptor, CircuitInfo, Counts, ExecutionResult, outcome_to_bitstring, remap_outcome,
};
