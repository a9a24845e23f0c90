//! Execution orchestration for qbridge.
//!
//! The [`Orchestrator`] dispatches circuits to registered backends,
//! enforces per-backend deadlines, fans out multi-backend runs
//! concurrently, and computes pairwise agreement between the successful
//! results.

pub mod compare;
pub mod orchestrator;
pub mod registry;

pub use compare::{PairComparison, distribution_similarity, pair_key, time_ratio};
pub use orchestrator::{DEFAULT_TIMEOUT, MultiBackendResult, Orchestrator};
pub use registry::default_registry;
