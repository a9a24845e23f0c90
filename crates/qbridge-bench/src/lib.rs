//! Backend benchmarking.
//!
//! Builds circuits from reproducible families (Bell, GHZ, seeded random),
//! runs them repeatedly on selected backends through the orchestrator, and
//! reports per-backend timing statistics.

pub mod family;
pub mod runner;

pub use family::{CircuitFamily, random_circuit};
pub use runner::{
    BackendBenchmark, BenchmarkConfig, BenchmarkReport, BenchmarkRunner, TimingSummary,
};
