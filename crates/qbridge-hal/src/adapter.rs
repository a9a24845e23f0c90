//! The backend adapter trait.
//!
//! An [`Adapter`] wraps one execution engine behind a uniform surface:
//! translate the canonical circuit to the engine's native form, run it, and
//! normalize the outcome counts back to the shared bitstring convention.
//!
//! # Contract
//!
//! - `is_available()` MUST be synchronous and cheap. Availability is probed
//!   once at construction and cached; callers may poll it in hot paths.
//! - `run()` returns counts already normalized to the convention documented
//!   in [`crate::result`] (rightmost bit is classical bit 0).
//! - `execute()` never returns `Err`: every failure mode is folded into a
//!   failed [`ExecutionResult`] so multi-backend fan-out can always report
//!   one entry per requested backend.

use std::time::Instant;

use async_trait::async_trait;
use qbridge_ir::Circuit;
use tracing::debug;

use crate::error::{HalError, HalResult};
use crate::result::{BackendDescriptor, CircuitInfo, Counts, ExecutionResult};

/// Largest shot count a single execution will accept.
pub const MAX_SHOTS: u64 = 1_000_000;

/// Trait for backend adapters.
#[async_trait]
pub trait Adapter: Send + Sync {
    /// Registry name of this backend.
    fn name(&self) -> &str;

    /// One-line description of the backend.
    fn description(&self) -> &str;

    /// Largest circuit width this backend accepts.
    fn max_qubits(&self) -> u32;

    /// Version string reported in discovery.
    ///
    /// Workspace crates share one version, so the default suits adapters
    /// that have no underlying engine version to report.
    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    /// Whether the backend can currently execute circuits.
    ///
    /// Cached at construction; never performs I/O.
    fn is_available(&self) -> bool;

    /// Translate and run the circuit, returning normalized counts.
    ///
    /// Implementations surface translation failures as
    /// [`HalError::UnsupportedGate`] and width overruns as
    /// [`HalError::TooManyQubits`].
    async fn run(&self, circuit: &Circuit, shots: u64) -> HalResult<Counts>;

    /// Execute a circuit, folding every failure into the result.
    async fn execute(&self, circuit: &Circuit, shots: u64) -> ExecutionResult {
        if shots == 0 || shots > MAX_SHOTS {
            return ExecutionResult::failed(
                self.name(),
                shots,
                0.0,
                HalError::InvalidShots(shots).to_string(),
            );
        }
        if !self.is_available() {
            return ExecutionResult::failed(
                self.name(),
                shots,
                0.0,
                HalError::BackendUnavailable {
                    backend: self.name().to_string(),
                    reason: "backend reported unavailable".to_string(),
                }
                .to_string(),
            );
        }
        if circuit.num_qubits() > self.max_qubits() as usize {
            return ExecutionResult::failed(
                self.name(),
                shots,
                0.0,
                HalError::TooManyQubits {
                    backend: self.name().to_string(),
                    requested: circuit.num_qubits(),
                    max: self.max_qubits(),
                }
                .to_string(),
            );
        }

        debug!(backend = self.name(), shots, "executing circuit");
        let start = Instant::now();
        match self.run(circuit, shots).await {
            Ok(counts) => {
                let elapsed = start.elapsed().as_secs_f64() * 1000.0;
                ExecutionResult::completed(self.name(), counts, shots, elapsed)
            }
            Err(e) => {
                let elapsed = start.elapsed().as_secs_f64() * 1000.0;
                debug!(backend = self.name(), error = %e, "execution failed");
                ExecutionResult::failed(self.name(), shots, elapsed, e.to_string())
            }
        }
    }

    /// Structural summary of the circuit as this backend sees it.
    ///
    /// All adapters share one depth definition so the number is comparable
    /// across backends.
    fn circuit_info(&self, circuit: &Circuit) -> CircuitInfo {
        CircuitInfo::from_circuit(circuit)
    }

    /// Registry-facing description of this backend.
    fn descriptor(&self) -> BackendDescriptor {
        BackendDescriptor {
            name: self.name().to_string(),
            description: self.description().to_string(),
            version: self.version().to_string(),
            available: self.is_available(),
            max_qubits: self.max_qubits(),
        }
    }
}
