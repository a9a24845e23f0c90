//! Stabilizer tableau backend adapter.

use async_trait::async_trait;
use qbridge_hal::{Adapter, Counts, HalError, HalResult, outcome_to_bitstring};
use qbridge_ir::{Circuit, Gate};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::debug;

use crate::tableau::Tableau;

/// Largest circuit width the tableau simulator accepts.
pub const MAX_QUBITS: u32 = 32;

/// A primitive tableau update in the simulator's native program form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChpOp {
    H(usize),
    S(usize),
    X(usize),
    Y(usize),
    Z(usize),
    Cx(usize, usize),
}

/// Stabilizer tableau simulator backend.
///
/// Handles Clifford circuits only. Non-Clifford gates (`t`, rotations,
/// `ccx`) are rejected at translation with an unsupported-gate error, which
/// is exactly the behavior multi-backend comparison relies on to show
/// per-backend capability differences.
pub struct TableauAdapter {
    seed: Option<u64>,
}

impl TableauAdapter {
    /// Create an adapter sampling from entropy.
    pub fn new() -> Self {
        Self { seed: None }
    }

    /// Create an adapter with a fixed sampling seed.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// Translate a circuit into primitive tableau updates.
    ///
    /// `cz` and `swap` lower to the {H, CX} primitives; anything outside
    /// the Clifford set fails with [`HalError::UnsupportedGate`].
    pub fn translate(circuit: &Circuit) -> HalResult<Vec<ChpOp>> {
        let mut program = Vec::new();
        for (gate, qubits) in circuit.gates() {
            let q: Vec<usize> = qubits.iter().map(|q| q.index()).collect();
            match *gate {
                Gate::H => program.push(ChpOp::H(q[0])),
                Gate::S => program.push(ChpOp::S(q[0])),
                Gate::X => program.push(ChpOp::X(q[0])),
                Gate::Y => program.push(ChpOp::Y(q[0])),
                Gate::Z => program.push(ChpOp::Z(q[0])),
                Gate::Cx => program.push(ChpOp::Cx(q[0], q[1])),
                Gate::Cz => {
                    program.push(ChpOp::H(q[1]));
                    program.push(ChpOp::Cx(q[0], q[1]));
                    program.push(ChpOp::H(q[1]));
                }
                Gate::Swap => {
                    program.push(ChpOp::Cx(q[0], q[1]));
                    program.push(ChpOp::Cx(q[1], q[0]));
                    program.push(ChpOp::Cx(q[0], q[1]));
                }
                Gate::T | Gate::Rx(_) | Gate::Ry(_) | Gate::Rz(_) | Gate::Ccx => {
                    return Err(HalError::UnsupportedGate {
                        backend: "tableau".to_string(),
                        gate: gate.name().to_string(),
                    });
                }
            }
        }
        Ok(program)
    }

    fn simulate(circuit: &Circuit, shots: u64, seed: Option<u64>) -> HalResult<Counts> {
        let program = Self::translate(circuit)?;
        debug!(ops = program.len(), shots, "running tableau program");

        let mut rng = match seed {
            Some(s) => SmallRng::seed_from_u64(s),
            None => SmallRng::from_entropy(),
        };

        let map = circuit.measurement_map();
        let width = circuit.num_clbits();
        let mut counts = Counts::new();

        // Measurement collapses the tableau, so each shot replays the
        // program on a fresh state.
        for _ in 0..shots {
            let mut tableau = Tableau::new(circuit.num_qubits());
            for &op in &program {
                match op {
                    ChpOp::H(a) => tableau.h(a),
                    ChpOp::S(a) => tableau.s(a),
                    ChpOp::X(a) => tableau.x(a),
                    ChpOp::Y(a) => tableau.y(a),
                    ChpOp::Z(a) => tableau.z(a),
                    ChpOp::Cx(a, b) => tableau.cx(a, b),
                }
            }

            let mut outcome = 0usize;
            for &(q, c) in &map {
                if tableau.measure(q.index(), &mut rng) {
                    outcome |= 1 << c.index();
                }
            }
            counts.record(outcome_to_bitstring(outcome, width));
        }

        Ok(counts)
    }
}

impl Default for TableauAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Adapter for TableauAdapter {
    fn name(&self) -> &str {
        "tableau"
    }

    fn description(&self) -> &str {
        "Stabilizer tableau simulator (Clifford gates only, per-shot collapse)"
    }

    fn max_qubits(&self) -> u32 {
        MAX_QUBITS
    }

    fn is_available(&self) -> bool {
        true
    }

    async fn run(&self, circuit: &Circuit, shots: u64) -> HalResult<Counts> {
        let circuit = circuit.clone();
        let seed = self.seed;
        tokio::task::spawn_blocking(move || Self::simulate(&circuit, shots, seed))
            .await
            .map_err(|e| HalError::Execution(format!("simulation task failed: {e}")))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qbridge_ir::CircuitBuilder;

    #[tokio::test]
    async fn test_bell_counts_correlated() {
        let adapter = TableauAdapter::with_seed(11);
        let circuit = Circuit::bell().unwrap();
        let result = adapter.execute(&circuit, 400).await;

        assert!(result.success);
        assert_eq!(result.counts.get("00") + result.counts.get("11"), 400);
        assert!(result.counts.get("00") > 100);
        assert!(result.counts.get("11") > 100);
    }

    #[tokio::test]
    async fn test_t_gate_rejected() {
        let mut builder = CircuitBuilder::new(1).unwrap();
        builder.t(0).unwrap();
        let adapter = TableauAdapter::new();
        let result = adapter.execute(&builder.build(), 100).await;

        assert!(!result.success);
        let error = result.error.unwrap();
        assert!(error.contains("tableau"), "error names the backend: {error}");
        assert!(error.contains("'t'"), "error names the gate: {error}");
    }

    #[tokio::test]
    async fn test_rotation_rejected() {
        let mut builder = CircuitBuilder::new(1).unwrap();
        builder.rx(0.3, 0).unwrap();
        let adapter = TableauAdapter::new();
        let result = adapter.execute(&builder.build(), 10).await;
        assert!(!result.success);
    }

    #[tokio::test]
    async fn test_cz_lowering_preserves_semantics() {
        // CZ between |+> and |1> flips the plus state's phase; a final H
        // turns that into a deterministic 1 on qubit 0.
        let mut builder = CircuitBuilder::new(2).unwrap();
        builder.h(0).unwrap().x(1).unwrap().cz(0, 1).unwrap().h(0).unwrap();
        let adapter = TableauAdapter::with_seed(3);
        let result = adapter.execute(&builder.build(), 100).await;

        assert_eq!(result.counts.get("11"), 100);
    }

    #[tokio::test]
    async fn test_swap_lowering() {
        let mut builder = CircuitBuilder::new(2).unwrap();
        builder.x(0).unwrap().swap(0, 1).unwrap();
        let adapter = TableauAdapter::new();
        let result = adapter.execute(&builder.build(), 50).await;

        assert_eq!(result.counts.get("10"), 50);
    }

    #[test]
    fn test_translate_error_names_gate() {
        let mut builder = CircuitBuilder::new(3).unwrap();
        builder.ccx(0, 1, 2).unwrap();
        let err = TableauAdapter::translate(&builder.build()).unwrap_err();
        assert!(matches!(
            err,
            HalError::UnsupportedGate { ref gate, .. } if gate == "ccx"
        ));
    }
}
