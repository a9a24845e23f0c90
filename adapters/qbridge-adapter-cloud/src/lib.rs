//! Remote cloud execution backend.
//!
//! Serializes circuits to QASM 2.0 and submits them to a hosted service
//! over HTTPS. Availability is gated on credentials being present in the
//! environment.

pub mod adapter;

pub use adapter::{CloudAdapter, ENDPOINT_VAR, MAX_QUBITS, TOKEN_VAR};
