//! Typed request payloads for the tool surface.

use qbridge_ir::GateSpec;
use serde::Deserialize;

fn default_backend() -> String {
    "statevector".to_string()
}

fn default_shots() -> u64 {
    1024
}

fn default_ghz_qubits() -> u32 {
    3
}

fn default_repeats() -> u32 {
    1
}

fn default_family() -> String {
    "bell".to_string()
}

/// Request for `create_circuit` and `get_circuit_qasm`.
#[derive(Debug, Clone, Deserialize)]
pub struct CircuitRequest {
    pub num_qubits: u32,
    #[serde(default)]
    pub gates: Vec<GateSpec>,
}

/// Request for `execute_circuit`.
///
/// The circuit comes from exactly one source: `num_qubits` + `gates`, or
/// `qasm`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecuteRequest {
    #[serde(default)]
    pub num_qubits: Option<u32>,
    #[serde(default)]
    pub gates: Vec<GateSpec>,
    #[serde(default)]
    pub qasm: Option<String>,
    #[serde(default = "default_backend")]
    pub backend: String,
    #[serde(default = "default_shots")]
    pub shots: u64,
}

/// Request for `execute_multi_backend`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecuteMultiRequest {
    pub num_qubits: u32,
    #[serde(default)]
    pub gates: Vec<GateSpec>,
    /// Defaults to every registered backend.
    #[serde(default)]
    pub backends: Option<Vec<String>>,
    #[serde(default = "default_shots")]
    pub shots: u64,
}

/// Request for `create_bell_state` and `quantum_teleportation`.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateRequest {
    #[serde(default = "default_backend")]
    pub backend: String,
    #[serde(default = "default_shots")]
    pub shots: u64,
}

impl Default for TemplateRequest {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            shots: default_shots(),
        }
    }
}

/// Request for `create_ghz_state`.
#[derive(Debug, Clone, Deserialize)]
pub struct GhzRequest {
    #[serde(default = "default_ghz_qubits")]
    pub num_qubits: u32,
    #[serde(default = "default_backend")]
    pub backend: String,
    #[serde(default = "default_shots")]
    pub shots: u64,
}

/// Request for `benchmark_backends`.
#[derive(Debug, Clone, Deserialize)]
pub struct BenchmarkRequest {
    /// Circuit family; `family` is accepted as a shorthand.
    #[serde(
        rename = "circuit_type",
        alias = "family",
        default = "default_family"
    )]
    pub family: String,
    #[serde(default = "default_ghz_qubits")]
    pub num_qubits: u32,
    #[serde(default = "default_shots")]
    pub shots: u64,
    #[serde(default = "default_repeats")]
    pub repeats: u32,
    #[serde(default)]
    pub seed: Option<u64>,
    /// Defaults to every available backend.
    #[serde(default)]
    pub backends: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execute_request_defaults() {
        let req: ExecuteRequest =
            serde_json::from_str(r#"{"num_qubits": 2, "gates": []}"#).unwrap();
        assert_eq!(req.num_qubits, Some(2));
        assert_eq!(req.backend, "statevector");
        assert_eq!(req.shots, 1024);
        assert!(req.qasm.is_none());
    }

    #[test]
    fn test_ghz_request_defaults() {
        let req: GhzRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.num_qubits, 3);
    }

    #[test]
    fn test_benchmark_request_family_names() {
        let req: BenchmarkRequest =
            serde_json::from_str(r#"{"circuit_type": "ghz"}"#).unwrap();
        assert_eq!(req.family, "ghz");

        let req: BenchmarkRequest = serde_json::from_str(r#"{"family": "random"}"#).unwrap();
        assert_eq!(req.family, "random");
    }

    #[test]
    fn test_gate_specs_parse() {
        let req: CircuitRequest = serde_json::from_str(
            r#"{"num_qubits": 2, "gates": [
                {"type": "h", "qubits": [0]},
                {"type": "cx", "qubits": [0, 1]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(req.gates.len(), 2);
        assert_eq!(req.gates[1].gate_type, "cx");
    }
}
