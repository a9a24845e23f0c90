//! The tool operations.
//!
//! Each tool takes a typed request and returns a `serde_json::Value`
//! payload. Failures never escape as `Err`: the boundary renders every
//! error into `{"success": false, "error": "..."}` so callers always get a
//! well-formed response.

use serde_json::{Value, json};
use tracing::debug;

use qbridge_bench::{BenchmarkConfig, BenchmarkRunner, CircuitFamily};
use qbridge_exec::{Orchestrator, default_registry};
use qbridge_hal::{CircuitInfo, ExecutionResult};
use qbridge_ir::{Circuit, GateSpec};

use crate::error::{ToolError, ToolResult};
use crate::requests::{
    BenchmarkRequest, CircuitRequest, ExecuteMultiRequest, ExecuteRequest, GhzRequest,
    TemplateRequest,
};

/// The tool surface over an orchestrator.
pub struct Tools {
    orchestrator: Orchestrator,
}

fn error_payload(error: &ToolError) -> Value {
    json!({ "success": false, "error": error.to_string() })
}

fn backend_error_payload(error: &ToolError, backend: &str) -> Value {
    json!({ "success": false, "error": error.to_string(), "backend": backend })
}

/// Render an execution result as a flat response payload.
///
/// Counts and probabilities sit at the top level next to `success` and
/// `backend`; `error` appears only on failed results.
pub fn execution_payload(result: &ExecutionResult) -> Value {
    let mut payload = json!({
        "success": result.success,
        "backend": result.backend,
        "counts": result.counts,
        "probabilities": result.probabilities(),
        "shots": result.shots,
        "execution_time_ms": result.execution_time_ms,
    });
    if let Some(error) = &result.error {
        payload["error"] = json!(error);
    }
    payload
}

impl Tools {
    /// Create the tool surface over an existing orchestrator.
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self { orchestrator }
    }

    /// Create the tool surface with all built-in backends registered.
    pub fn with_default_backends() -> Self {
        Self::new(Orchestrator::new(default_registry()))
    }

    /// The orchestrator backing this surface.
    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    fn build_circuit(num_qubits: u32, gates: &[GateSpec]) -> ToolResult<Circuit> {
        Ok(Circuit::from_specs(num_qubits, gates)?)
    }

    /// Resolve the circuit from exactly one of the two request sources.
    fn circuit_from_source(
        num_qubits: Option<u32>,
        gates: &[GateSpec],
        qasm: Option<&str>,
    ) -> ToolResult<Circuit> {
        match (qasm, num_qubits) {
            (Some(source), None) => Ok(qbridge_qasm::parse(source)?),
            (None, Some(n)) => Self::build_circuit(n, gates),
            (Some(_), Some(_)) => Err(ToolError::Invalid(
                "provide either 'qasm' or 'num_qubits' + 'gates', not both".to_string(),
            )),
            (None, None) => Err(ToolError::Invalid(
                "either 'qasm' or 'num_qubits' is required".to_string(),
            )),
        }
    }

    fn backend_names(&self, requested: Option<Vec<String>>) -> Vec<String> {
        requested.unwrap_or_else(|| self.orchestrator.registry().names())
    }

    // =========================================================================
    // Discovery and circuit construction
    // =========================================================================

    /// List every registered backend with its availability.
    pub fn list_backends(&self) -> Value {
        let descriptors = self.orchestrator.registry().descriptors();
        let available = descriptors.iter().filter(|d| d.available).count();
        let backends: serde_json::Map<String, Value> = descriptors
            .iter()
            .map(|d| {
                (
                    d.name.clone(),
                    json!({
                        "available": d.available,
                        "version": d.version,
                        "description": d.description,
                        "max_qubits": d.max_qubits,
                    }),
                )
            })
            .collect();

        json!({
            "success": true,
            "total_backends": descriptors.len(),
            "available_backends": available,
            "backends": backends,
        })
    }

    /// Validate a circuit description and report its structure.
    pub fn create_circuit(&self, request: CircuitRequest) -> Value {
        match Self::build_circuit(request.num_qubits, &request.gates) {
            Ok(circuit) => json!({
                "success": true,
                "circuit_info": CircuitInfo::from_circuit(&circuit),
            }),
            Err(e) => error_payload(&e),
        }
    }

    /// Serialize a circuit description to QASM 2.0.
    pub fn get_circuit_qasm(&self, request: CircuitRequest) -> Value {
        match Self::build_circuit(request.num_qubits, &request.gates) {
            Ok(circuit) => json!({
                "success": true,
                "qasm": qbridge_qasm::emit(&circuit),
                "circuit_info": CircuitInfo::from_circuit(&circuit),
            }),
            Err(e) => error_payload(&e),
        }
    }

    // =========================================================================
    // Execution
    // =========================================================================

    /// Execute a circuit on one backend.
    pub async fn execute_circuit(&self, request: ExecuteRequest) -> Value {
        let outcome = async {
            let circuit = Self::circuit_from_source(
                request.num_qubits,
                &request.gates,
                request.qasm.as_deref(),
            )?;
            debug!(backend = %request.backend, "tool execute_circuit");
            let result = self
                .orchestrator
                .execute_single(&request.backend, &circuit, request.shots)
                .await?;
            Ok::<_, ToolError>(execution_payload(&result))
        }
        .await;

        outcome.unwrap_or_else(|e| backend_error_payload(&e, &request.backend))
    }

    /// Execute a circuit on several backends and compare the results.
    pub async fn execute_multi_backend(&self, request: ExecuteMultiRequest) -> Value {
        let circuit = match Self::build_circuit(request.num_qubits, &request.gates) {
            Ok(c) => c,
            Err(e) => return error_payload(&e),
        };
        let backends = self.backend_names(request.backends);
        debug!(backends = backends.len(), "tool execute_multi_backend");

        let outcome = self
            .orchestrator
            .execute_multi(&backends, &circuit, request.shots)
            .await;

        let results: serde_json::Map<String, Value> = outcome
            .results
            .iter()
            .map(|(name, result)| (name.clone(), execution_payload(result)))
            .collect();

        json!({
            "success": outcome.results.values().any(|r| r.success),
            "results": results,
            "comparison": outcome.comparisons,
        })
    }

    // =========================================================================
    // Prebuilt demonstrations
    // =========================================================================

    async fn run_template(&self, circuit: ToolResult<Circuit>, backend: &str, shots: u64) -> Value {
        let outcome = async {
            let circuit = circuit?;
            let result = self
                .orchestrator
                .execute_single(backend, &circuit, shots)
                .await?;
            Ok::<_, ToolError>(execution_payload(&result))
        }
        .await;

        outcome.unwrap_or_else(|e| backend_error_payload(&e, backend))
    }

    /// Prepare and measure a Bell pair.
    pub async fn create_bell_state(&self, request: TemplateRequest) -> Value {
        self.run_template(
            Circuit::bell().map_err(ToolError::from),
            &request.backend,
            request.shots,
        )
        .await
    }

    /// Prepare and measure a GHZ state.
    pub async fn create_ghz_state(&self, request: GhzRequest) -> Value {
        self.run_template(
            Circuit::ghz(request.num_qubits).map_err(ToolError::from),
            &request.backend,
            request.shots,
        )
        .await
    }

    /// Run the three-qubit teleportation demonstration.
    pub async fn quantum_teleportation(&self, request: TemplateRequest) -> Value {
        self.run_template(
            Circuit::teleportation().map_err(ToolError::from),
            &request.backend,
            request.shots,
        )
        .await
    }

    // =========================================================================
    // Benchmarking
    // =========================================================================

    /// Benchmark a circuit family across backends.
    pub async fn benchmark_backends(&self, request: BenchmarkRequest) -> Value {
        let outcome = async {
            let family: CircuitFamily = request
                .family
                .parse()
                .map_err(ToolError::Invalid)?;
            let config = BenchmarkConfig {
                family,
                num_qubits: request.num_qubits,
                shots: request.shots,
                repeats: request.repeats,
                seed: request.seed,
            };
            // Benchmarking an unavailable backend only measures failure, so
            // the default set is the available backends.
            let backends = request
                .backends
                .unwrap_or_else(|| self.orchestrator.registry().available_names());
            let runner = BenchmarkRunner::new(&self.orchestrator);
            let report = runner.run(&backends, &config).await?;
            Ok::<_, ToolError>(json!({ "success": true, "report": report }))
        }
        .await;

        outcome.unwrap_or_else(|e| error_payload(&e))
    }
}
