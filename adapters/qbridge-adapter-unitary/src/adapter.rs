//! Unitary matrix backend adapter.

use async_trait::async_trait;
use num_complex::Complex64;
use qbridge_hal::{Adapter, Counts, HalError, HalResult, outcome_to_bitstring, remap_outcome};
use qbridge_ir::{Circuit, Gate};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::Rng;
use tracing::debug;

use crate::unitary::UnitaryBuilder;

/// Largest circuit width the full-matrix engine accepts (2^10 x 2^10).
pub const MAX_QUBITS: u32 = 10;

/// A gate in the engine's native form: explicit matrices for single-qubit
/// gates, structural row operations for the multi-qubit ones.
#[derive(Debug, Clone, Copy)]
pub enum UnitaryOp {
    Single([[Complex64; 2]; 2], usize),
    Cx(usize, usize),
    Cz(usize, usize),
    Swap(usize, usize),
    Ccx(usize, usize, usize),
}

/// Full unitary matrix simulator backend.
pub struct UnitaryAdapter {
    seed: Option<u64>,
}

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

/// 2x2 matrix of a single-qubit gate. Multi-qubit gates are handled
/// structurally in [`UnitaryAdapter::translate`] and fall back to identity.
fn single_matrix(gate: &Gate) -> [[Complex64; 2]; 2] {
    let s = 1.0 / 2.0_f64.sqrt();
    match *gate {
        Gate::H => [[c(s, 0.0), c(s, 0.0)], [c(s, 0.0), c(-s, 0.0)]],
        Gate::X => [[c(0.0, 0.0), c(1.0, 0.0)], [c(1.0, 0.0), c(0.0, 0.0)]],
        Gate::Y => [[c(0.0, 0.0), c(0.0, -1.0)], [c(0.0, 1.0), c(0.0, 0.0)]],
        Gate::Z => [[c(1.0, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(-1.0, 0.0)]],
        Gate::S => [[c(1.0, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(0.0, 1.0)]],
        Gate::T => [
            [c(1.0, 0.0), c(0.0, 0.0)],
            [c(0.0, 0.0), Complex64::from_polar(1.0, std::f64::consts::FRAC_PI_4)],
        ],
        Gate::Rx(theta) => {
            let half = theta / 2.0;
            [
                [c(half.cos(), 0.0), c(0.0, -half.sin())],
                [c(0.0, -half.sin()), c(half.cos(), 0.0)],
            ]
        }
        Gate::Ry(theta) => {
            let half = theta / 2.0;
            [
                [c(half.cos(), 0.0), c(-half.sin(), 0.0)],
                [c(half.sin(), 0.0), c(half.cos(), 0.0)],
            ]
        }
        Gate::Rz(theta) => [
            [Complex64::from_polar(1.0, -theta / 2.0), c(0.0, 0.0)],
            [c(0.0, 0.0), Complex64::from_polar(1.0, theta / 2.0)],
        ],
        Gate::Cx | Gate::Cz | Gate::Swap | Gate::Ccx => {
            [[c(1.0, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(1.0, 0.0)]]
        }
    }
}

impl UnitaryAdapter {
    /// Create an adapter sampling from entropy.
    pub fn new() -> Self {
        Self { seed: None }
    }

    /// Create an adapter with a fixed sampling seed.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// Translate a circuit into the engine's native gate list.
    ///
    /// Total over the supported gate set.
    pub fn translate(circuit: &Circuit) -> Vec<UnitaryOp> {
        circuit
            .gates()
            .map(|(gate, qubits)| {
                let q: Vec<usize> = qubits.iter().map(|q| q.index()).collect();
                match *gate {
                    Gate::Cx => UnitaryOp::Cx(q[0], q[1]),
                    Gate::Cz => UnitaryOp::Cz(q[0], q[1]),
                    Gate::Swap => UnitaryOp::Swap(q[0], q[1]),
                    Gate::Ccx => UnitaryOp::Ccx(q[0], q[1], q[2]),
                    ref g => UnitaryOp::Single(single_matrix(g), q[0]),
                }
            })
            .collect()
    }

    /// Reverse the low `n` bits of `value`.
    ///
    /// The engine indexes basis states big-endian (qubit 0 is the most
    /// significant bit); the shared bitstring convention wants qubit 0 in
    /// the low bit, so sampled indices are reversed before remapping.
    fn reverse_bits(value: usize, n: usize) -> usize {
        (0..n).fold(0, |acc, k| acc | ((value >> k & 1) << (n - 1 - k)))
    }

    fn simulate(circuit: &Circuit, shots: u64, seed: Option<u64>) -> Counts {
        let n = circuit.num_qubits();
        let program = Self::translate(circuit);
        debug!(ops = program.len(), "building circuit unitary");

        let mut builder = UnitaryBuilder::new(n);
        for op in program {
            match op {
                UnitaryOp::Single(m, q) => builder.apply_single(m, q),
                UnitaryOp::Cx(a, b) => builder.apply_cx(a, b),
                UnitaryOp::Cz(a, b) => builder.apply_cz(a, b),
                UnitaryOp::Swap(a, b) => builder.apply_swap(a, b),
                UnitaryOp::Ccx(a, b, t) => builder.apply_ccx(a, b, t),
            }
        }

        let probs = builder.zero_state_probabilities();
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
            let index = cumulative.partition_point(|&cum| cum <= r);
            let index = index.min(probs.len() - 1);
            let qubit_outcome = Self::reverse_bits(index, n);
            let remapped = remap_outcome(qubit_outcome, &map);
            counts.record(outcome_to_bitstring(remapped, width));
        }
        counts
    }
}

impl Default for UnitaryAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Adapter for UnitaryAdapter {
    fn name(&self) -> &str {
        "unitary"
    }

    fn description(&self) -> &str {
        "Full unitary matrix simulator (builds the complete circuit matrix)"
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

#[cfg(test)]
mod tests {
    use super::*;
    use qbridge_ir::CircuitBuilder;

    #[tokio::test]
    async fn test_x_on_qubit_zero_normalized() {
        // Despite the engine's big-endian internals, the returned key must
        // put qubit 0 in the rightmost position.
        let mut builder = CircuitBuilder::new(3).unwrap();
        builder.x(0).unwrap();
        let adapter = UnitaryAdapter::new();
        let result = adapter.execute(&builder.build(), 100).await;

        assert_eq!(result.counts.get("001"), 100);
    }

    #[tokio::test]
    async fn test_bell_counts() {
        let adapter = UnitaryAdapter::with_seed(5);
        let circuit = Circuit::bell().unwrap();
        let result = adapter.execute(&circuit, 600).await;

        assert!(result.success);
        assert_eq!(result.counts.get("00") + result.counts.get("11"), 600);
    }

    #[tokio::test]
    async fn test_width_cap() {
        let adapter = UnitaryAdapter::new();
        let circuit = Circuit::ghz(12).unwrap();
        let result = adapter.execute(&circuit, 10).await;

        assert!(!result.success);
        assert!(result.error.unwrap().contains("at most 10"));
    }

    #[tokio::test]
    async fn test_toffoli() {
        let mut builder = CircuitBuilder::new(3).unwrap();
        builder.x(0).unwrap().x(1).unwrap().ccx(0, 1, 2).unwrap();
        let adapter = UnitaryAdapter::new();
        let result = adapter.execute(&builder.build(), 50).await;

        assert_eq!(result.counts.get("111"), 50);
    }

    #[test]
    fn test_reverse_bits() {
        assert_eq!(UnitaryAdapter::reverse_bits(0b100, 3), 0b001);
        assert_eq!(UnitaryAdapter::reverse_bits(0b110, 3), 0b011);
        assert_eq!(UnitaryAdapter::reverse_bits(0b1, 1), 0b1);
    }
}
