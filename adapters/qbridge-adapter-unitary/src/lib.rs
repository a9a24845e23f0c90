//! Full unitary matrix simulator backend.
//!
//! Builds the complete circuit unitary with `ndarray` and samples readout
//! from its action on |0...0>. The engine's native basis ordering is
//! big-endian, which makes this the backend that exercises bit-order
//! normalization in the adapter layer.

pub mod adapter;
pub mod unitary;

pub use adapter::{MAX_QUBITS, UnitaryAdapter, UnitaryOp};
pub use unitary::UnitaryBuilder;
