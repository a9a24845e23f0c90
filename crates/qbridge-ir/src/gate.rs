//! Quantum gate types.
//!
//! The gate set is closed: the enum below is the complete vocabulary every
//! backend adapter must understand (or explicitly reject at translation).

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};

/// A gate from the supported set, with bound parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    /// Hadamard gate.
    H,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// S gate (sqrt(Z)).
    S,
    /// T gate (fourth root of Z).
    T,
    /// Rotation around the X axis.
    Rx(f64),
    /// Rotation around the Y axis.
    Ry(f64),
    /// Rotation around the Z axis.
    Rz(f64),
    /// Controlled-X (CNOT) gate.
    Cx,
    /// Controlled-Z gate.
    Cz,
    /// SWAP gate.
    Swap,
    /// Toffoli gate (CCX).
    Ccx,
}

impl Gate {
    /// Canonical name of this gate (the QASM spelling).
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Gate::H => "h",
            Gate::X => "x",
            Gate::Y => "y",
            Gate::Z => "z",
            Gate::S => "s",
            Gate::T => "t",
            Gate::Rx(_) => "rx",
            Gate::Ry(_) => "ry",
            Gate::Rz(_) => "rz",
            Gate::Cx => "cx",
            Gate::Cz => "cz",
            Gate::Swap => "swap",
            Gate::Ccx => "ccx",
        }
    }

    /// Number of qubits this gate acts on.
    #[inline]
    pub fn arity(&self) -> usize {
        match self {
            Gate::H
            | Gate::X
            | Gate::Y
            | Gate::Z
            | Gate::S
            | Gate::T
            | Gate::Rx(_)
            | Gate::Ry(_)
            | Gate::Rz(_) => 1,
            Gate::Cx | Gate::Cz | Gate::Swap => 2,
            Gate::Ccx => 3,
        }
    }

    /// Bound parameters of this gate.
    pub fn params(&self) -> Vec<f64> {
        match self {
            Gate::Rx(theta) | Gate::Ry(theta) | Gate::Rz(theta) => vec![*theta],
            _ => vec![],
        }
    }

    /// Number of parameters the named gate takes; `None` for unknown names.
    fn param_count(name: &str) -> Option<usize> {
        match name {
            "h" | "x" | "y" | "z" | "s" | "t" | "cx" | "cz" | "swap" | "ccx" => Some(0),
            "rx" | "ry" | "rz" => Some(1),
            _ => None,
        }
    }

    /// Resolve a gate from its wire-format name and parameter list.
    ///
    /// Accepts the aliases `cnot` (for `cx`) and `toffoli` (for `ccx`);
    /// matching is case-insensitive. The name is validated before the
    /// parameters so an unknown gate is always reported as such, whatever
    /// parameter list it arrived with.
    pub fn from_name(name: &str, params: &[f64]) -> IrResult<Gate> {
        let lower = name.to_ascii_lowercase();
        let canonical = match lower.as_str() {
            "cnot" => "cx",
            "toffoli" => "ccx",
            other => other,
        };

        let expected = Self::param_count(canonical)
            .ok_or_else(|| IrError::UnknownGate(name.to_string()))?;
        if params.len() != expected {
            return Err(IrError::ParameterCountMismatch {
                gate: canonical.to_string(),
                expected,
                got: params.len(),
            });
        }
        if params.iter().any(|p| !p.is_finite()) {
            return Err(IrError::NonFiniteParameter {
                gate: canonical.to_string(),
            });
        }

        Ok(match canonical {
            "h" => Gate::H,
            "x" => Gate::X,
            "y" => Gate::Y,
            "z" => Gate::Z,
            "s" => Gate::S,
            "t" => Gate::T,
            "rx" => Gate::Rx(params[0]),
            "ry" => Gate::Ry(params[0]),
            "rz" => Gate::Rz(params[0]),
            "cx" => Gate::Cx,
            "cz" => Gate::Cz,
            "swap" => Gate::Swap,
            "ccx" => Gate::Ccx,
            _ => return Err(IrError::UnknownGate(name.to_string())),
        })
    }
}

/// Wire-format gate description, as received from the tool caller.
///
/// ```json
/// {"type": "rx", "qubits": [0], "params": [1.57]}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateSpec {
    /// Gate type name (`h`, `cx`, `rx`, ...).
    #[serde(rename = "type")]
    pub gate_type: String,
    /// Qubit indices the gate acts on, in operand order.
    pub qubits: Vec<u32>,
    /// Parameters for parametric gates.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<f64>,
}

impl GateSpec {
    /// Create a parameterless gate spec.
    pub fn new(gate_type: impl Into<String>, qubits: impl Into<Vec<u32>>) -> Self {
        Self {
            gate_type: gate_type.into(),
            qubits: qubits.into(),
            params: vec![],
        }
    }

    /// Create a parametric gate spec.
    pub fn with_params(
        gate_type: impl Into<String>,
        qubits: impl Into<Vec<u32>>,
        params: impl Into<Vec<f64>>,
    ) -> Self {
        Self {
            gate_type: gate_type.into(),
            qubits: qubits.into(),
            params: params.into(),
        }
    }
}
