//! Circuit construction and the immutable circuit type.
//!
//! [`CircuitBuilder`] validates every operation as it is pushed; the
//! [`Circuit`] it produces is immutable, so adapters can share it freely
//! across threads without copying.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, GateSpec};
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{ClbitId, QubitId};

/// Builder for validated circuits.
#[derive(Debug)]
pub struct CircuitBuilder {
    num_qubits: u32,
    num_clbits: u32,
    instructions: Vec<Instruction>,
}

impl CircuitBuilder {
    /// Create a builder for a circuit with the given number of qubits.
    ///
    /// Classical bits default to the qubit count.
    pub fn new(num_qubits: u32) -> IrResult<Self> {
        if num_qubits == 0 {
            return Err(IrError::InvalidQubitCount(0));
        }
        Ok(Self {
            num_qubits,
            num_clbits: num_qubits,
            instructions: vec![],
        })
    }

    /// Override the number of classical bits.
    #[must_use]
    pub fn with_clbits(mut self, num_clbits: u32) -> Self {
        self.num_clbits = num_clbits;
        self
    }

    /// Apply a gate to the given qubits, validating arity and ranges.
    pub fn gate(&mut self, gate: Gate, qubits: &[u32]) -> IrResult<&mut Self> {
        if qubits.len() != gate.arity() {
            return Err(IrError::QubitCountMismatch {
                gate: gate.name(),
                expected: gate.arity(),
                got: qubits.len(),
            });
        }
        for (i, &q) in qubits.iter().enumerate() {
            if q >= self.num_qubits {
                return Err(IrError::QubitOutOfRange {
                    gate: gate.name(),
                    qubit: QubitId(q),
                    num_qubits: self.num_qubits,
                });
            }
            if qubits[..i].contains(&q) {
                return Err(IrError::DuplicateQubit {
                    gate: gate.name(),
                    qubit: QubitId(q),
                });
            }
        }
        self.instructions
            .push(Instruction::gate(gate, qubits.iter().map(|&q| QubitId(q))));
        Ok(self)
    }

    /// Apply a gate described in wire format (resolves name, params, qubits).
    pub fn push_spec(&mut self, spec: &GateSpec) -> IrResult<&mut Self> {
        let gate = Gate::from_name(&spec.gate_type, &spec.params)?;
        self.gate(gate, &spec.qubits)
    }

    // =========================================================================
    // Convenience gate methods
    // =========================================================================

    /// Apply a Hadamard gate.
    pub fn h(&mut self, q: u32) -> IrResult<&mut Self> {
        self.gate(Gate::H, &[q])
    }

    /// Apply a Pauli-X gate.
    pub fn x(&mut self, q: u32) -> IrResult<&mut Self> {
        self.gate(Gate::X, &[q])
    }

    /// Apply a Pauli-Y gate.
    pub fn y(&mut self, q: u32) -> IrResult<&mut Self> {
        self.gate(Gate::Y, &[q])
    }

    /// Apply a Pauli-Z gate.
    pub fn z(&mut self, q: u32) -> IrResult<&mut Self> {
        self.gate(Gate::Z, &[q])
    }

    /// Apply an S gate.
    pub fn s(&mut self, q: u32) -> IrResult<&mut Self> {
        self.gate(Gate::S, &[q])
    }

    /// Apply a T gate.
    pub fn t(&mut self, q: u32) -> IrResult<&mut Self> {
        self.gate(Gate::T, &[q])
    }

    /// Apply an Rx rotation.
    pub fn rx(&mut self, theta: f64, q: u32) -> IrResult<&mut Self> {
        self.gate(Gate::Rx(theta), &[q])
    }

    /// Apply an Ry rotation.
    pub fn ry(&mut self, theta: f64, q: u32) -> IrResult<&mut Self> {
        self.gate(Gate::Ry(theta), &[q])
    }

    /// Apply an Rz rotation.
    pub fn rz(&mut self, theta: f64, q: u32) -> IrResult<&mut Self> {
        self.gate(Gate::Rz(theta), &[q])
    }

    /// Apply a CNOT gate.
    pub fn cx(&mut self, control: u32, target: u32) -> IrResult<&mut Self> {
        self.gate(Gate::Cx, &[control, target])
    }

    /// Apply a controlled-Z gate.
    pub fn cz(&mut self, control: u32, target: u32) -> IrResult<&mut Self> {
        self.gate(Gate::Cz, &[control, target])
    }

    /// Apply a SWAP gate.
    pub fn swap(&mut self, q1: u32, q2: u32) -> IrResult<&mut Self> {
        self.gate(Gate::Swap, &[q1, q2])
    }

    /// Apply a Toffoli gate.
    pub fn ccx(&mut self, c1: u32, c2: u32, target: u32) -> IrResult<&mut Self> {
        self.gate(Gate::Ccx, &[c1, c2, target])
    }

    /// Measure a qubit into a classical bit.
    pub fn measure(&mut self, qubit: u32, clbit: u32) -> IrResult<&mut Self> {
        if qubit >= self.num_qubits {
            return Err(IrError::QubitOutOfRange {
                gate: "measure",
                qubit: QubitId(qubit),
                num_qubits: self.num_qubits,
            });
        }
        if clbit >= self.num_clbits {
            return Err(IrError::ClbitOutOfRange {
                clbit: ClbitId(clbit),
                num_clbits: self.num_clbits,
            });
        }
        self.instructions
            .push(Instruction::measure(QubitId(qubit), ClbitId(clbit)));
        Ok(self)
    }

    /// Measure every qubit into the like-indexed classical bit.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        for q in 0..self.num_qubits.min(self.num_clbits) {
            self.measure(q, q)?;
        }
        Ok(self)
    }

    /// Finish building, producing the immutable circuit.
    pub fn build(self) -> Circuit {
        Circuit {
            num_qubits: self.num_qubits,
            num_clbits: self.num_clbits,
            instructions: self.instructions,
        }
    }
}

/// An immutable, validated quantum circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    num_qubits: u32,
    num_clbits: u32,
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Build a circuit from wire-format gate specs.
    pub fn from_specs(num_qubits: u32, specs: &[GateSpec]) -> IrResult<Self> {
        let mut builder = CircuitBuilder::new(num_qubits)?;
        for spec in specs {
            builder.push_spec(spec)?;
        }
        Ok(builder.build())
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    /// Number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.num_clbits as usize
    }

    /// All instructions in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Iterate over gate instructions only.
    pub fn gates(&self) -> impl Iterator<Item = (&Gate, &[QubitId])> {
        self.instructions
            .iter()
            .filter_map(|inst| inst.as_gate().map(|g| (g, inst.qubits.as_slice())))
    }

    /// Number of gate operations (measures excluded).
    pub fn num_gates(&self) -> usize {
        self.instructions.iter().filter(|i| i.is_gate()).count()
    }

    /// Whether the circuit contains explicit measurements.
    pub fn has_measurements(&self) -> bool {
        self.instructions.iter().any(Instruction::is_measure)
    }

    /// Count of each instruction name.
    pub fn gate_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for inst in &self.instructions {
            *counts.entry(inst.name().to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Circuit depth: the length of the longest dependency chain.
    ///
    /// Instructions sharing a qubit (or classical bit) are ordered;
    /// instructions on disjoint wires may be concurrent. Every adapter
    /// reports depth through this one function so the number is comparable
    /// across backends.
    pub fn depth(&self) -> usize {
        let mut qubit_level = vec![0usize; self.num_qubits as usize];
        let mut clbit_level = vec![0usize; self.num_clbits as usize];
        let mut depth = 0;

        for inst in &self.instructions {
            let mut level = 0;
            for q in &inst.qubits {
                level = level.max(qubit_level[q.index()]);
            }
            for c in &inst.clbits {
                level = level.max(clbit_level[c.index()]);
            }
            let level = level + 1;
            for q in &inst.qubits {
                qubit_level[q.index()] = level;
            }
            for c in &inst.clbits {
                clbit_level[c.index()] = level;
            }
            depth = depth.max(level);
        }

        depth
    }

    /// Qubit-to-clbit readout map.
    ///
    /// Returns the explicit measurement operands in program order, or the
    /// identity map over all qubits when the circuit defines no
    /// measurements. Adapters use this to implement the append-measurements
    /// default uniformly.
    pub fn measurement_map(&self) -> Vec<(QubitId, ClbitId)> {
        let explicit: Vec<_> = self
            .instructions
            .iter()
            .filter(|i| i.is_measure())
            .map(|i| (i.qubits[0], i.clbits[0]))
            .collect();

        if explicit.is_empty() {
            (0..self.num_qubits.min(self.num_clbits))
                .map(|i| (QubitId(i), ClbitId(i)))
                .collect()
        } else {
            explicit
        }
    }

    // =========================================================================
    // Prebuilt circuit families
    // =========================================================================

    /// Bell state preparation: H(0), CX(0,1).
    pub fn bell() -> IrResult<Self> {
        let mut builder = CircuitBuilder::new(2)?;
        builder.h(0)?.cx(0, 1)?;
        Ok(builder.build())
    }

    /// GHZ state preparation over `n >= 2` qubits: H(0) then CX(0,i) fan-out.
    pub fn ghz(n: u32) -> IrResult<Self> {
        if n < 2 {
            return Err(IrError::InvalidQubitCount(n));
        }
        let mut builder = CircuitBuilder::new(n)?;
        builder.h(0)?;
        for i in 1..n {
            builder.cx(0, i)?;
        }
        Ok(builder.build())
    }

    /// Quantum teleportation template (3 qubits, |+> payload).
    ///
    /// Bell pair on qubits 1-2, payload on qubit 0, Bell measurement basis
    /// rotation on 0-1. Measurements are left to the adapter default.
    pub fn teleportation() -> IrResult<Self> {
        let mut builder = CircuitBuilder::new(3)?;
        builder
            .h(1)?
            .cx(1, 2)?
            .h(0)?
            .cx(0, 1)?
            .h(0)?;
        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_builder_rejects_zero_qubits() {
        assert!(matches!(
            CircuitBuilder::new(0),
            Err(IrError::InvalidQubitCount(0))
        ));
    }

    #[test]
    fn test_builder_fluent() {
        let mut builder = CircuitBuilder::new(2).unwrap();
        builder.h(0).unwrap().cx(0, 1).unwrap();
        let circuit = builder.build();
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.num_clbits(), 2);
        assert_eq!(circuit.num_gates(), 2);
    }

    #[test]
    fn test_out_of_range_qubit() {
        let mut builder = CircuitBuilder::new(2).unwrap();
        let err = builder.h(2).unwrap_err();
        assert!(matches!(err, IrError::QubitOutOfRange { .. }));
    }

    #[test]
    fn test_duplicate_qubit() {
        let mut builder = CircuitBuilder::new(2).unwrap();
        let err = builder.cx(1, 1).unwrap_err();
        assert!(matches!(err, IrError::DuplicateQubit { .. }));
    }

    #[test]
    fn test_arity_mismatch_from_spec() {
        // cx with a single operand must be a validation error, not a panic.
        let specs = [GateSpec::new("cx", [0])];
        let err = Circuit::from_specs(2, &specs).unwrap_err();
        assert!(matches!(
            err,
            IrError::QubitCountMismatch { expected: 2, got: 1, .. }
        ));
    }

    #[test]
    fn test_from_specs() {
        let specs = [
            GateSpec::new("h", [0]),
            GateSpec::new("cnot", [0, 1]),
            GateSpec::with_params("rx", [0], [PI / 2.0]),
        ];
        let circuit = Circuit::from_specs(2, &specs).unwrap();
        assert_eq!(circuit.num_gates(), 3);
        let names: Vec<_> = circuit.gates().map(|(g, _)| g.name()).collect();
        assert_eq!(names, vec!["h", "cx", "rx"]);
    }

    #[test]
    fn test_depth_parallel_gates() {
        // H(0) and H(1) are concurrent; CX orders them.
        let mut builder = CircuitBuilder::new(2).unwrap();
        builder.h(0).unwrap().h(1).unwrap().cx(0, 1).unwrap();
        assert_eq!(builder.build().depth(), 2);
    }

    #[test]
    fn test_depth_chain() {
        let mut builder = CircuitBuilder::new(1).unwrap();
        builder.h(0).unwrap().t(0).unwrap().h(0).unwrap();
        assert_eq!(builder.build().depth(), 3);
    }

    #[test]
    fn test_depth_counts_measures() {
        let mut builder = CircuitBuilder::new(2).unwrap();
        builder.h(0).unwrap().cx(0, 1).unwrap().measure_all().unwrap();
        // H, CX, then two parallel measures.
        assert_eq!(builder.build().depth(), 3);
    }

    #[test]
    fn test_measurement_map_default() {
        let circuit = Circuit::bell().unwrap();
        assert!(!circuit.has_measurements());
        assert_eq!(
            circuit.measurement_map(),
            vec![(QubitId(0), ClbitId(0)), (QubitId(1), ClbitId(1))]
        );
    }

    #[test]
    fn test_measurement_map_explicit() {
        let mut builder = CircuitBuilder::new(2).unwrap();
        builder.h(0).unwrap().measure(1, 0).unwrap();
        let circuit = builder.build();
        assert_eq!(circuit.measurement_map(), vec![(QubitId(1), ClbitId(0))]);
    }

    #[test]
    fn test_bell_template() {
        let circuit = Circuit::bell().unwrap();
        let names: Vec<_> = circuit.gates().map(|(g, _)| g.name()).collect();
        assert_eq!(names, vec!["h", "cx"]);
    }

    #[test]
    fn test_ghz_fanout() {
        let circuit = Circuit::ghz(4).unwrap();
        assert_eq!(circuit.num_qubits(), 4);
        assert_eq!(circuit.num_gates(), 4); // H + 3 CX
        let controls: Vec<_> = circuit
            .gates()
            .filter(|(g, _)| **g == Gate::Cx)
            .map(|(_, q)| q[0].0)
            .collect();
        assert_eq!(controls, vec![0, 0, 0]);
    }

    #[test]
    fn test_ghz_needs_two_qubits() {
        assert!(matches!(
            Circuit::ghz(1),
            Err(IrError::InvalidQubitCount(1))
        ));
    }

    #[test]
    fn test_teleportation_template() {
        let circuit = Circuit::teleportation().unwrap();
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_gates(), 5);
    }

    #[test]
    fn test_gate_counts() {
        let circuit = Circuit::ghz(3).unwrap();
        let counts = circuit.gate_counts();
        assert_eq!(counts["h"], 1);
        assert_eq!(counts["cx"], 2);
    }
}
