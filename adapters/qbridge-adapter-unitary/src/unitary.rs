//! Full unitary matrix construction engine.
//!
//! Builds the complete 2^n x 2^n circuit unitary by left-multiplying each
//! gate into an accumulator matrix. The engine uses the textbook tensor
//! ordering where qubit 0 is the MOST significant bit of the row index
//! (big-endian). That is the opposite of the adapter-level bitstring
//! convention; the adapter reverses bit order when extracting outcomes.

use ndarray::Array2;
use num_complex::Complex64;

/// Accumulator for the circuit unitary.
pub struct UnitaryBuilder {
    n: usize,
    dim: usize,
    matrix: Array2<Complex64>,
}

impl UnitaryBuilder {
    /// Start from the identity over `n` qubits.
    pub fn new(n: usize) -> Self {
        let dim = 1 << n;
        Self {
            n,
            dim,
            matrix: Array2::eye(dim),
        }
    }

    /// Row-index mask for a qubit in big-endian ordering.
    fn mask(&self, qubit: usize) -> usize {
        1 << (self.n - 1 - qubit)
    }

    /// Left-multiply a single-qubit gate acting on `qubit`.
    pub fn apply_single(&mut self, m: [[Complex64; 2]; 2], qubit: usize) {
        let mask = self.mask(qubit);
        for col in 0..self.dim {
            for i in 0..self.dim {
                if i & mask == 0 {
                    let j = i | mask;
                    let a = self.matrix[[i, col]];
                    let b = self.matrix[[j, col]];
                    self.matrix[[i, col]] = m[0][0] * a + m[0][1] * b;
                    self.matrix[[j, col]] = m[1][0] * a + m[1][1] * b;
                }
            }
        }
    }

    /// Left-multiply a CNOT.
    pub fn apply_cx(&mut self, control: usize, target: usize) {
        let cmask = self.mask(control);
        let tmask = self.mask(target);
        for col in 0..self.dim {
            for i in 0..self.dim {
                if (i & cmask != 0) && (i & tmask == 0) {
                    let j = i | tmask;
                    let tmp = self.matrix[[i, col]];
                    self.matrix[[i, col]] = self.matrix[[j, col]];
                    self.matrix[[j, col]] = tmp;
                }
            }
        }
    }

    /// Left-multiply a controlled-Z.
    pub fn apply_cz(&mut self, control: usize, target: usize) {
        let cmask = self.mask(control);
        let tmask = self.mask(target);
        for col in 0..self.dim {
            for i in 0..self.dim {
                if (i & cmask != 0) && (i & tmask != 0) {
                    self.matrix[[i, col]] = -self.matrix[[i, col]];
                }
            }
        }
    }

    /// Left-multiply a SWAP.
    pub fn apply_swap(&mut self, q1: usize, q2: usize) {
        let mask1 = self.mask(q1);
        let mask2 = self.mask(q2);
        for col in 0..self.dim {
            for i in 0..self.dim {
                let b1 = i & mask1 != 0;
                let b2 = i & mask2 != 0;
                if b1 && !b2 {
                    let j = (i & !mask1) | mask2;
                    let tmp = self.matrix[[i, col]];
                    self.matrix[[i, col]] = self.matrix[[j, col]];
                    self.matrix[[j, col]] = tmp;
                }
            }
        }
    }

    /// Left-multiply a Toffoli.
    pub fn apply_ccx(&mut self, c1: usize, c2: usize, target: usize) {
        let m1 = self.mask(c1);
        let m2 = self.mask(c2);
        let tmask = self.mask(target);
        for col in 0..self.dim {
            for i in 0..self.dim {
                if (i & m1 != 0) && (i & m2 != 0) && (i & tmask == 0) {
                    let j = i | tmask;
                    let tmp = self.matrix[[i, col]];
                    self.matrix[[i, col]] = self.matrix[[j, col]];
                    self.matrix[[j, col]] = tmp;
                }
            }
        }
    }

    /// Probabilities of each big-endian basis state for input |0...0>.
    ///
    /// The input state is the first basis vector, so this is the squared
    /// magnitude of the unitary's first column.
    pub fn zero_state_probabilities(&self) -> Vec<f64> {
        self.matrix.column(0).iter().map(|a| a.norm_sqr()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h() -> [[Complex64; 2]; 2] {
        let s = Complex64::new(1.0 / 2.0_f64.sqrt(), 0.0);
        [[s, s], [s, -s]]
    }

    fn x() -> [[Complex64; 2]; 2] {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        [[zero, one], [one, zero]]
    }

    #[test]
    fn test_identity_probabilities() {
        let builder = UnitaryBuilder::new(2);
        let probs = builder.zero_state_probabilities();
        assert!((probs[0] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_x_on_qubit_zero_is_big_endian() {
        // Qubit 0 is the most significant bit in this engine, so X(0) on
        // two qubits sends |00> to index 0b10.
        let mut builder = UnitaryBuilder::new(2);
        builder.apply_single(x(), 0);
        let probs = builder.zero_state_probabilities();
        assert!((probs[0b10] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_bell_unitary() {
        let mut builder = UnitaryBuilder::new(2);
        builder.apply_single(h(), 0);
        builder.apply_cx(0, 1);
        let probs = builder.zero_state_probabilities();
        assert!((probs[0b00] - 0.5).abs() < 1e-10);
        assert!((probs[0b11] - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_unitarity_preserved() {
        let mut builder = UnitaryBuilder::new(2);
        builder.apply_single(h(), 0);
        builder.apply_cz(0, 1);
        builder.apply_swap(0, 1);
        let total: f64 = builder.zero_state_probabilities().iter().sum();
        assert!((total - 1.0).abs() < 1e-10);
    }
}
