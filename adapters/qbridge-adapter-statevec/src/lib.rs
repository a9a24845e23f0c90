//! Dense statevector simulator backend.
//!
//! Simulates circuits exactly by tracking all 2^n complex amplitudes, then
//! samples the readout distribution. Supports the full gate vocabulary up
//! to [`MAX_QUBITS`] qubits.

pub mod adapter;
pub mod statevector;

pub use adapter::{MAX_QUBITS, StatevectorAdapter, SvOp};
pub use statevector::Statevector;
