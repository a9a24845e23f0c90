//! Stabilizer tableau simulation engine.
//!
//! Tracks the stabilizer group of the state in the Aaronson-Gottesman
//! tableau form: `n` destabilizer rows, `n` stabilizer rows, and one scratch
//! row for deterministic measurement. Each row is a Pauli string stored as
//! per-qubit X and Z bits plus a sign bit. Clifford gates update rows in
//! O(n); measurement is O(n^2).

use rand::Rng;

/// One Pauli row of the tableau.
#[derive(Clone)]
struct Row {
    x: Vec<bool>,
    z: Vec<bool>,
    /// Sign bit: true means the Pauli carries a -1 phase.
    r: bool,
}

impl Row {
    fn zero(n: usize) -> Self {
        Self {
            x: vec![false; n],
            z: vec![false; n],
            r: false,
        }
    }
}

/// A stabilizer tableau over `n` qubits, initialized to |0...0>.
pub struct Tableau {
    n: usize,
    /// Rows 0..n are destabilizers, n..2n are stabilizers.
    rows: Vec<Row>,
}

impl Tableau {
    /// Create a tableau for the all-zeros state.
    pub fn new(n: usize) -> Self {
        let mut rows = vec![Row::zero(n); 2 * n];
        for q in 0..n {
            rows[q].x[q] = true; // destabilizer X_q
            rows[n + q].z[q] = true; // stabilizer Z_q
        }
        Self { n, rows }
    }

    /// Hadamard on qubit `a`.
    pub fn h(&mut self, a: usize) {
        for row in &mut self.rows {
            row.r ^= row.x[a] && row.z[a];
            let tmp = row.x[a];
            row.x[a] = row.z[a];
            row.z[a] = tmp;
        }
    }

    /// Phase gate S on qubit `a`.
    pub fn s(&mut self, a: usize) {
        for row in &mut self.rows {
            row.r ^= row.x[a] && row.z[a];
            row.z[a] ^= row.x[a];
        }
    }

    /// Pauli X on qubit `a`.
    pub fn x(&mut self, a: usize) {
        for row in &mut self.rows {
            row.r ^= row.z[a];
        }
    }

    /// Pauli Y on qubit `a`.
    pub fn y(&mut self, a: usize) {
        for row in &mut self.rows {
            row.r ^= row.x[a] ^ row.z[a];
        }
    }

    /// Pauli Z on qubit `a`.
    pub fn z(&mut self, a: usize) {
        for row in &mut self.rows {
            row.r ^= row.x[a];
        }
    }

    /// CNOT with control `a` and target `b`.
    pub fn cx(&mut self, a: usize, b: usize) {
        for row in &mut self.rows {
            row.r ^= row.x[a] && row.z[b] && (row.x[b] == row.z[a]);
            row.x[b] ^= row.x[a];
            row.z[a] ^= row.z[b];
        }
    }

    /// Phase exponent contribution of multiplying Pauli (x1,z1) into (x2,z2).
    ///
    /// Returns the exponent of i in {-1, 0, 1}.
    fn g(x1: bool, z1: bool, x2: bool, z2: bool) -> i32 {
        match (x1, z1) {
            (false, false) => 0,
            (true, true) => (z2 as i32) - (x2 as i32),
            (true, false) => (z2 as i32) * (2 * (x2 as i32) - 1),
            (false, true) => (x2 as i32) * (1 - 2 * (z2 as i32)),
        }
    }

    /// Multiply row `i` into row `h` (left-multiplication of Paulis).
    fn rowsum_into(target: &mut Row, source: &Row) {
        let mut phase = 2 * (target.r as i32) + 2 * (source.r as i32);
        for j in 0..source.x.len() {
            phase += Self::g(source.x[j], source.z[j], target.x[j], target.z[j]);
            target.x[j] ^= source.x[j];
            target.z[j] ^= source.z[j];
        }
        // A valid stabilizer product always has phase 0 or 2 mod 4.
        target.r = phase.rem_euclid(4) == 2;
    }

    fn rowsum(&mut self, h: usize, i: usize) {
        let source = self.rows[i].clone();
        Self::rowsum_into(&mut self.rows[h], &source);
    }

    /// Measure qubit `a` in the computational basis, collapsing the state.
    pub fn measure<R: Rng>(&mut self, a: usize, rng: &mut R) -> bool {
        let n = self.n;

        // A stabilizer anticommuting with Z_a makes the outcome random.
        let p = (n..2 * n).find(|&i| self.rows[i].x[a]);

        if let Some(p) = p {
            for i in 0..2 * n {
                if i != p && self.rows[i].x[a] {
                    self.rowsum(i, p);
                }
            }
            self.rows[p - n] = self.rows[p].clone();
            let mut new_row = Row::zero(n);
            new_row.z[a] = true;
            new_row.r = rng.gen_bool(0.5);
            let outcome = new_row.r;
            self.rows[p] = new_row;
            outcome
        } else {
            // Deterministic: accumulate into a scratch row.
            let mut scratch = Row::zero(n);
            for q in 0..n {
                if self.rows[q].x[a] {
                    let source = self.rows[q + n].clone();
                    Self::rowsum_into(&mut scratch, &source);
                }
            }
            scratch.r
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_fresh_state_measures_zero() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut tableau = Tableau::new(3);
        for q in 0..3 {
            assert!(!tableau.measure(q, &mut rng));
        }
    }

    #[test]
    fn test_x_flips_outcome() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut tableau = Tableau::new(2);
        tableau.x(0);
        assert!(tableau.measure(0, &mut rng));
        assert!(!tableau.measure(1, &mut rng));
    }

    #[test]
    fn test_hh_is_identity() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut tableau = Tableau::new(1);
        tableau.h(0);
        tableau.h(0);
        assert!(!tableau.measure(0, &mut rng));
    }

    #[test]
    fn test_ssss_is_identity() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut tableau = Tableau::new(1);
        tableau.x(0);
        for _ in 0..4 {
            tableau.s(0);
        }
        assert!(tableau.measure(0, &mut rng));
    }

    #[test]
    fn test_bell_outcomes_correlated() {
        let mut rng = SmallRng::seed_from_u64(17);
        for _ in 0..50 {
            let mut tableau = Tableau::new(2);
            tableau.h(0);
            tableau.cx(0, 1);
            let m0 = tableau.measure(0, &mut rng);
            let m1 = tableau.measure(1, &mut rng);
            assert_eq!(m0, m1, "Bell pair must measure equal bits");
        }
    }

    #[test]
    fn test_bell_both_outcomes_occur() {
        let mut rng = SmallRng::seed_from_u64(23);
        let mut saw = [false; 2];
        for _ in 0..100 {
            let mut tableau = Tableau::new(2);
            tableau.h(0);
            tableau.cx(0, 1);
            saw[tableau.measure(0, &mut rng) as usize] = true;
        }
        assert!(saw[0] && saw[1]);
    }

    #[test]
    fn test_measurement_collapse_is_sticky() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut tableau = Tableau::new(1);
        tableau.h(0);
        let first = tableau.measure(0, &mut rng);
        for _ in 0..10 {
            assert_eq!(tableau.measure(0, &mut rng), first);
        }
    }

    #[test]
    fn test_zh_gives_minus_state() {
        // HZH = X, so measuring after H Z H must give 1.
        let mut rng = SmallRng::seed_from_u64(2);
        let mut tableau = Tableau::new(1);
        tableau.h(0);
        tableau.z(0);
        tableau.h(0);
        assert!(tableau.measure(0, &mut rng));
    }
}
