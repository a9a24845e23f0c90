//! Statevector backend adapter.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use async_trait::async_trait;
use qbridge_hal::{Adapter, Counts, HalError, HalResult, outcome_to_bitstring, remap_outcome};
use qbridge_ir::{Circuit, Gate};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::statevector::Statevector;

/// Largest circuit width the dense simulator accepts (16 MiB of amplitudes).
pub const MAX_QUBITS: u32 = 20;

/// A single kernel operation in the simulator's native program form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SvOp {
    X(usize),
    Y(usize),
    Z(usize),
    H(usize),
    /// Phase shift on |1>. S and T lower to this.
    Phase(usize, f64),
    Rx(usize, f64),
    Ry(usize, f64),
    Rz(usize, f64),
    Cx(usize, usize),
    Cz(usize, usize),
    Swap(usize, usize),
    Ccx(usize, usize, usize),
}

/// Dense statevector simulator backend.
pub struct StatevectorAdapter {
    seed: Option<u64>,
}

impl StatevectorAdapter {
    /// Create an adapter sampling from entropy.
    pub fn new() -> Self {
        Self { seed: None }
    }

    /// Create an adapter with a fixed sampling seed.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// Translate a circuit into the simulator's kernel program.
    ///
    /// Total over the supported gate set: every gate in the vocabulary has
    /// a kernel, with S and T lowered to phase shifts.
    pub fn translate(circuit: &Circuit) -> Vec<SvOp> {
        circuit
            .gates()
            .map(|(gate, qubits)| {
                let q: Vec<usize> = qubits.iter().map(|q| q.index()).collect();
                match *gate {
                    Gate::H => SvOp::H(q[0]),
                    Gate::X => SvOp::X(q[0]),
                    Gate::Y => SvOp::Y(q[0]),
                    Gate::Z => SvOp::Z(q[0]),
                    Gate::S => SvOp::Phase(q[0], FRAC_PI_2),
                    Gate::T => SvOp::Phase(q[0], FRAC_PI_4),
                    Gate::Rx(theta) => SvOp::Rx(q[0], theta),
                    Gate::Ry(theta) => SvOp::Ry(q[0], theta),
                    Gate::Rz(theta) => SvOp::Rz(q[0], theta),
                    Gate::Cx => SvOp::Cx(q[0], q[1]),
                    Gate::Cz => SvOp::Cz(q[0], q[1]),
                    Gate::Swap => SvOp::Swap(q[0], q[1]),
                    Gate::Ccx => SvOp::Ccx(q[0], q[1], q[2]),
                }
            })
            .collect()
    }

    fn apply(state: &mut Statevector, op: SvOp) {
        match op {
            SvOp::X(q) => state.apply_x(q),
            SvOp::Y(q) => state.apply_y(q),
            SvOp::Z(q) => state.apply_z(q),
            SvOp::H(q) => state.apply_h(q),
            SvOp::Phase(q, theta) => state.apply_phase(q, theta),
            SvOp::Rx(q, theta) => state.apply_rx(q, theta),
            SvOp::Ry(q, theta) => state.apply_ry(q, theta),
            SvOp::Rz(q, theta) => state.apply_rz(q, theta),
            SvOp::Cx(c, t) => state.apply_cx(c, t),
            SvOp::Cz(c, t) => state.apply_cz(c, t),
            SvOp::Swap(a, b) => state.apply_swap(a, b),
            SvOp::Ccx(c1, c2, t) => state.apply_ccx(c1, c2, t),
        }
    }

    fn simulate(circuit: &Circuit, shots: u64, seed: Option<u64>) -> Counts {
        let program = Self::translate(circuit);
        debug!(ops = program.len(), "running statevector program");

        let mut state = Statevector::new(circuit.num_qubits());
        for op in program {
            Self::apply(&mut state, op);
        }

        let probs = state.probabilities();
        let mut cumulative = Vec::with_capacity(probs.len());
        let mut acc = 0.0;
        for p in &probs {
            acc += p;
            cumulative.push(acc);
        }

        let mut rng = match seed {
            Some(s) => SmallRng::seed_from_u64(s),
            None => SmallRng::from_entropy(),
        };

        let map = circuit.measurement_map();
        let width = circuit.num_clbits();
        let mut counts = Counts::new();
        for _ in 0..shots {
            let r: f64 = rng.gen_range(0.0..acc.max(f64::MIN_POSITIVE));
            let outcome = cumulative.partition_point(|&c| c <= r);
            let outcome = outcome.min(probs.len() - 1);
            let remapped = remap_outcome(outcome, &map);
            counts.record(outcome_to_bitstring(remapped, width));
        }
        counts
    }
}

impl Default for StatevectorAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Adapter for StatevectorAdapter {
    fn name(&self) -> &str {
        "statevector"
    }

    fn description(&self) -> &str {
        "Dense statevector simulator (exact amplitudes, sampled readout)"
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
            .map_err(|e| HalError::Execution(format!("simulation task failed: {e}")))
    }
}
