//! Cross-backend result comparison.

use std::collections::BTreeSet;

use qbridge_hal::Counts;
use serde::{Deserialize, Serialize};

/// Agreement metrics for one pair of successful backends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairComparison {
    /// Distribution overlap in [0, 1]; 1.0 means identical distributions.
    pub similarity: f64,
    /// Slower execution time divided by the faster, when both are positive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_ratio: Option<f64>,
}

/// Overlap between two empirical outcome distributions.
///
/// Computed as `1 - TV(P, Q)` where TV is the total variation distance
/// over the union of observed outcomes. Identical distributions score
/// exactly 1.0 and disjoint ones exactly 0.0; the result is clamped so
/// floating point noise cannot push it outside [0, 1].
pub fn distribution_similarity(a: &Counts, b: &Counts) -> f64 {
    let pa = a.probabilities();
    let pb = b.probabilities();

    let keys: BTreeSet<&String> = pa.keys().chain(pb.keys()).collect();
    let tv: f64 = keys
        .into_iter()
        .map(|k| {
            let p = pa.get(k).copied().unwrap_or(0.0);
            let q = pb.get(k).copied().unwrap_or(0.0);
            (p - q).abs()
        })
        .sum::<f64>()
        / 2.0;

    (1.0 - tv).clamp(0.0, 1.0)
}

/// Ratio of the slower execution time to the faster.
///
/// `None` when either time is zero or negative, since the ratio would be
/// meaningless for unmeasured executions.
pub fn time_ratio(a_ms: f64, b_ms: f64) -> Option<f64> {
    if a_ms <= 0.0 || b_ms <= 0.0 {
        return None;
    }
    Some(a_ms.max(b_ms) / a_ms.min(b_ms))
}

/// Key for a backend pair, lexicographically ordered.
pub fn pair_key(a: &str, b: &str) -> String {
    if a <= b {
        format!("{a}_vs_{b}")
    } else {
        format!("{b}_vs_{a}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, u64)]) -> Counts {
        pairs
            .iter()
            .map(|&(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn test_identical_distributions_score_exactly_one() {
        let a = counts(&[("00", 500), ("11", 500)]);
        let b = counts(&[("00", 250), ("11", 250)]);
        assert_eq!(distribution_similarity(&a, &b), 1.0);
    }

    #[test]
    fn test_disjoint_distributions_score_exactly_zero() {
        let a = counts(&[("00", 100)]);
        let b = counts(&[("11", 100)]);
        assert_eq!(distribution_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_partial_overlap() {
        let a = counts(&[("00", 75), ("11", 25)]);
        let b = counts(&[("00", 25), ("11", 75)]);
        // TV = (0.5 + 0.5) / 2 = 0.5
        assert!((distribution_similarity(&a, &b) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_similarity_symmetric() {
        let a = counts(&[("00", 60), ("01", 40)]);
        let b = counts(&[("00", 10), ("10", 90)]);
        assert_eq!(
            distribution_similarity(&a, &b),
            distribution_similarity(&b, &a)
        );
    }

    #[test]
    fn test_time_ratio() {
        assert_eq!(time_ratio(10.0, 5.0), Some(2.0));
        assert_eq!(time_ratio(5.0, 10.0), Some(2.0));
        assert_eq!(time_ratio(0.0, 10.0), None);
        assert_eq!(time_ratio(10.0, 0.0), None);
    }

    #[test]
    fn test_pair_key_ordered() {
        assert_eq!(pair_key("tableau", "statevector"), "statevector_vs_tableau");
        assert_eq!(pair_key("statevector", "tableau"), "statevector_vs_tableau");
    }
}
