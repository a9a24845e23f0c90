//! Stabilizer tableau simulator backend.
//!
//! Simulates Clifford circuits in polynomial time using the
//! Aaronson-Gottesman tableau representation. Non-Clifford gates are
//! rejected at translation, making this the backend that exercises the
//! unsupported-gate path in multi-backend runs.

pub mod adapter;
pub mod tableau;

pub use adapter::{ChpOp, MAX_QUBITS, TableauAdapter};
pub use tableau::Tableau;
