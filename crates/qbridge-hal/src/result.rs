//! Execution results and measurement counts.
//!
//! # Bitstring convention
//!
//! Count keys are classical bitstrings with the RIGHTMOST character holding
//! classical bit 0. A Bell state measured into two bits therefore yields the
//! keys `"00"` and `"11"`, and an excited qubit 0 in a 3-bit circuit yields
//! `"001"`. Every adapter must normalize its native ordering to this
//! convention before returning counts.

use std::collections::BTreeMap;

use qbridge_ir::{Circuit, ClbitId, QubitId};
use serde::{Deserialize, Serialize};

/// Measurement counts keyed by classical bitstring.
///
/// Backed by a `BTreeMap` so serialized output is deterministically ordered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts(BTreeMap<String, u64>);

impl Counts {
    /// Create an empty counts map.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Add shots to an outcome.
    pub fn add(&mut self, bitstring: impl Into<String>, shots: u64) {
        *self.0.entry(bitstring.into()).or_insert(0) += shots;
    }

    /// Record a single shot for an outcome.
    pub fn record(&mut self, bitstring: impl Into<String>) {
        self.add(bitstring, 1);
    }

    /// Total number of shots across all outcomes.
    pub fn total_shots(&self) -> u64 {
        self.0.values().sum()
    }

    /// Number of distinct outcomes observed.
    pub fn num_outcomes(&self) -> usize {
        self.0.len()
    }

    /// Whether no outcomes were recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Shots recorded for a specific outcome.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.0.get(bitstring).copied().unwrap_or(0)
    }

    /// The most frequently observed outcome, if any.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.0
            .iter()
            .max_by_key(|&(_, &count)| count)
            .map(|(k, &v)| (k.as_str(), v))
    }

    /// Normalized outcome probabilities.
    pub fn probabilities(&self) -> BTreeMap<String, f64> {
        let total = self.total_shots();
        if total == 0 {
            return BTreeMap::new();
        }
        self.0
            .iter()
            .map(|(k, &v)| (k.clone(), v as f64 / total as f64))
            .collect()
    }

    /// Iterate over (bitstring, count) pairs in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

impl From<BTreeMap<String, u64>> for Counts {
    fn from(map: BTreeMap<String, u64>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Format a packed classical outcome as a bitstring.
///
/// Bit `k` of `outcome` is classical bit `k` and lands at string position
/// `width - 1 - k` (rightmost character is bit 0).
pub fn outcome_to_bitstring(outcome: usize, width: usize) -> String {
    (0..width)
        .rev()
        .map(|k| if outcome >> k & 1 == 1 { '1' } else { '0' })
        .collect()
}

/// Remap a packed per-qubit outcome through a measurement map.
///
/// Bit `q` of `qubit_outcome` moves to bit `c` of the returned value for
/// each `(q, c)` pair. Unmapped classical bits are zero.
pub fn remap_outcome(qubit_outcome: usize, map: &[(QubitId, ClbitId)]) -> usize {
    map.iter().fold(0, |acc, &(q, c)| {
        acc | ((qubit_outcome >> q.index() & 1) << c.index())
    })
}

/// The outcome of executing a circuit on one backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Name of the backend that produced this result.
    pub backend: String,
    /// Whether execution completed.
    pub success: bool,
    /// Measurement counts (empty on failure).
    pub counts: Counts,
    /// Number of shots requested.
    pub shots: u64,
    /// Wall-clock execution time in milliseconds.
    pub execution_time_ms: f64,
    /// Failure description when `success` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutionResult {
    /// Create a successful result.
    pub fn completed(
        backend: impl Into<String>,
        counts: Counts,
        shots: u64,
        execution_time_ms: f64,
    ) -> Self {
        Self {
            backend: backend.into(),
            success: true,
            counts,
            shots,
            execution_time_ms,
            error: None,
        }
    }

    /// Create a failed result.
    pub fn failed(
        backend: impl Into<String>,
        shots: u64,
        execution_time_ms: f64,
        error: impl Into<String>,
    ) -> Self {
        Self {
            backend: backend.into(),
            success: false,
            counts: Counts::new(),
            shots,
            execution_time_ms,
            error: Some(error.into()),
        }
    }

    /// Normalized outcome probabilities.
    pub fn probabilities(&self) -> BTreeMap<String, f64> {
        self.counts.probabilities()
    }
}

/// Structural summary of a circuit as a backend sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircuitInfo {
    /// Number of qubits.
    pub num_qubits: usize,
    /// Number of classical bits.
    pub num_clbits: usize,
    /// Number of gate operations.
    pub num_gates: usize,
    /// Longest dependency chain through the circuit.
    pub depth: usize,
    /// Count of each instruction name.
    pub gate_counts: BTreeMap<String, usize>,
}

impl CircuitInfo {
    /// Summarize a circuit.
    pub fn from_circuit(circuit: &Circuit) -> Self {
        Self {
            num_qubits: circuit.num_qubits(),
            num_clbits: circuit.num_clbits(),
            num_gates: circuit.num_gates(),
            depth: circuit.depth(),
            gate_counts: circuit.gate_counts(),
        }
    }
}

/// Registry-facing description of a backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendDescriptor {
    /// Registry name of the backend.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Version string reported in discovery.
    pub version: String,
    /// Whether the backend can currently execute circuits.
    pub available: bool,
    /// Largest circuit width the backend accepts.
    pub max_qubits: u32,
}
