//! Benchmark circuit families.

use rand::Rng;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use qbridge_ir::{Circuit, CircuitBuilder, IrResult};

/// The circuit shapes benchmarks are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CircuitFamily {
    /// Two-qubit Bell pair (qubit count ignored).
    Bell,
    /// GHZ fan-out over the requested width.
    Ghz,
    /// Seeded random circuit over the full gate vocabulary.
    Random,
}

impl std::str::FromStr for CircuitFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bell" => Ok(Self::Bell),
            "ghz" => Ok(Self::Ghz),
            "random" => Ok(Self::Random),
            other => Err(format!("unknown circuit family '{other}'")),
        }
    }
}

impl CircuitFamily {
    /// Build the family's circuit at the given width.
    ///
    /// The seed only influences the `Random` family; the same seed always
    /// reproduces the same circuit.
    pub fn build(self, num_qubits: u32, seed: u64) -> IrResult<Circuit> {
        match self {
            Self::Bell => Circuit::bell(),
            Self::Ghz => Circuit::ghz(num_qubits),
            Self::Random => random_circuit(num_qubits, seed),
        }
    }
}

/// Generate a reproducible random circuit.
///
/// One layer per qubit: each layer applies a random single-qubit gate to
/// every qubit, then one random two-qubit entangler.
pub fn random_circuit(num_qubits: u32, seed: u64) -> IrResult<Circuit> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut builder = CircuitBuilder::new(num_qubits)?;

    for _layer in 0..num_qubits {
        for q in 0..num_qubits {
            match rng.gen_range(0..6) {
                0 => builder.h(q)?,
                1 => builder.x(q)?,
                2 => builder.s(q)?,
                3 => builder.t(q)?,
                4 => builder.rx(rng.gen_range(0.0..std::f64::consts::TAU), q)?,
                _ => builder.rz(rng.gen_range(0.0..std::f64::consts::TAU), q)?,
            };
        }
        if num_qubits >= 2 {
            let control = rng.gen_range(0..num_qubits);
            let mut target = rng.gen_range(0..num_qubits - 1);
            if target >= control {
                target += 1;
            }
            builder.cx(control, target)?;
        }
    }

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_from_str() {
        assert_eq!("bell".parse::<CircuitFamily>().unwrap(), CircuitFamily::Bell);
        assert_eq!("GHZ".parse::<CircuitFamily>().unwrap(), CircuitFamily::Ghz);
        assert!("qft".parse::<CircuitFamily>().is_err());
    }

    #[test]
    fn test_random_circuit_reproducible() {
        let a = random_circuit(4, 1234).unwrap();
        let b = random_circuit(4, 1234).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_circuit_seed_sensitive() {
        let a = random_circuit(4, 1).unwrap();
        let b = random_circuit(4, 2).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_random_single_qubit_has_no_entanglers() {
        let circuit = random_circuit(1, 7).unwrap();
        assert!(circuit.gates().all(|(g, _)| g.arity() == 1));
    }

    #[test]
    fn test_ghz_family_width() {
        let circuit = CircuitFamily::Ghz.build(5, 0).unwrap();
        assert_eq!(circuit.num_qubits(), 5);
    }

    #[test]
    fn test_bell_family_ignores_width() {
        let circuit = CircuitFamily::Bell.build(9, 0).unwrap();
        assert_eq!(circuit.num_qubits(), 2);
    }
}
