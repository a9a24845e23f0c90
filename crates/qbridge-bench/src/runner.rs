//! Benchmark execution across backends.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use qbridge_exec::Orchestrator;
use qbridge_hal::HalResult;

use crate::family::CircuitFamily;

/// Parameters of one benchmark run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    /// Circuit family to benchmark.
    pub family: CircuitFamily,
    /// Circuit width (ignored by the Bell family).
    pub num_qubits: u32,
    /// Shots per execution.
    pub shots: u64,
    /// Number of repeated executions per backend.
    pub repeats: u32,
    /// Seed for the random family; drawn from entropy when absent.
    pub seed: Option<u64>,
}

impl BenchmarkConfig {
    /// A single-repeat config with default shot count.
    pub fn new(family: CircuitFamily, num_qubits: u32) -> Self {
        Self {
            family,
            num_qubits,
            shots: 1024,
            repeats: 1,
            seed: None,
        }
    }
}

/// Timing statistics over repeated executions, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingSummary {
    pub min_ms: f64,
    pub max_ms: f64,
    pub mean_ms: f64,
    /// Population standard deviation.
    pub stddev_ms: f64,
}

impl TimingSummary {
    /// Summarize a set of timing samples; `None` when empty.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let variance = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;
        Some(Self {
            min_ms: samples.iter().copied().fold(f64::INFINITY, f64::min),
            max_ms: samples.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            mean_ms: mean,
            stddev_ms: variance.sqrt(),
        })
    }
}

/// Per-backend benchmark outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendBenchmark {
    /// Whether every repeat completed.
    pub success: bool,
    /// Timing over the successful repeats.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing: Option<TimingSummary>,
    /// First failure observed, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A complete benchmark report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub family: CircuitFamily,
    pub num_qubits: u32,
    pub shots: u64,
    pub repeats: u32,
    /// The seed actually used, echoed so runs can be reproduced.
    pub seed: u64,
    /// Per-backend outcomes keyed by backend name.
    pub results: BTreeMap<String, BackendBenchmark>,
}

/// Runs one benchmark configuration across a set of backends.
pub struct BenchmarkRunner<'a> {
    orchestrator: &'a Orchestrator,
}

impl<'a> BenchmarkRunner<'a> {
    /// Create a runner over an orchestrator.
    pub fn new(orchestrator: &'a Orchestrator) -> Self {
        Self { orchestrator }
    }

    /// Run the benchmark on each named backend sequentially.
    ///
    /// Backends run one at a time so timings are not distorted by
    /// contention between simulators.
    pub async fn run(
        &self,
        backends: &[String],
        config: &BenchmarkConfig,
    ) -> HalResult<BenchmarkReport> {
        let seed = config.seed.unwrap_or_else(rand::random);
        let circuit = config.family.build(config.num_qubits, seed)?;
        let repeats = config.repeats.max(1);
        debug!(family = ?config.family, seed, repeats, "starting benchmark");

        let mut results = BTreeMap::new();
        for backend in backends {
            let mut samples = Vec::with_capacity(repeats as usize);
            let mut first_error = None;

            for _ in 0..repeats {
                match self
                    .orchestrator
                    .execute_single(backend, &circuit, config.shots)
                    .await
                {
                    Ok(result) if result.success => samples.push(result.execution_time_ms),
                    Ok(result) => {
                        first_error.get_or_insert_with(|| {
                            result.error.unwrap_or_else(|| "execution failed".to_string())
                        });
                    }
                    Err(e) => {
                        first_error.get_or_insert_with(|| e.to_string());
                    }
                }
            }

            results.insert(
                backend.clone(),
                BackendBenchmark {
                    success: first_error.is_none(),
                    timing: TimingSummary::from_samples(&samples),
                    error: first_error,
                },
            );
        }

        Ok(BenchmarkReport {
            family: config.family,
            num_qubits: config.num_qubits,
            shots: config.shots,
            repeats,
            seed,
            results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use qbridge_adapter_statevec::StatevectorAdapter;
    use qbridge_adapter_tableau::TableauAdapter;
    use qbridge_hal::BackendRegistry;

    fn orchestrator() -> Orchestrator {
        let mut registry = BackendRegistry::new();
        registry.register(Arc::new(StatevectorAdapter::with_seed(1)));
        registry.register(Arc::new(TableauAdapter::with_seed(2)));
        Orchestrator::new(registry)
    }

    #[test]
    fn test_timing_summary() {
        let summary = TimingSummary::from_samples(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(summary.min_ms, 1.0);
        assert_eq!(summary.max_ms, 3.0);
        assert_eq!(summary.mean_ms, 2.0);
        assert!((summary.stddev_ms - (2.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_timing_summary_empty() {
        assert!(TimingSummary::from_samples(&[]).is_none());
    }

    #[tokio::test]
    async fn test_bell_benchmark() {
        let orch = orchestrator();
        let runner = BenchmarkRunner::new(&orch);
        let config = BenchmarkConfig {
            repeats: 3,
            shots: 100,
            ..BenchmarkConfig::new(CircuitFamily::Bell, 2)
        };
        let backends = vec!["statevector".to_string(), "tableau".to_string()];
        let report = runner.run(&backends, &config).await.unwrap();

        assert_eq!(report.repeats, 3);
        assert_eq!(report.results.len(), 2);
        for (name, result) in &report.results {
            assert!(result.success, "{name} failed: {:?}", result.error);
            assert!(result.timing.is_some());
        }
    }

    #[tokio::test]
    async fn test_seed_echoed() {
        let orch = orchestrator();
        let runner = BenchmarkRunner::new(&orch);
        let config = BenchmarkConfig {
            seed: Some(77),
            shots: 10,
            ..BenchmarkConfig::new(CircuitFamily::Random, 3)
        };
        let report = runner
            .run(&["statevector".to_string()], &config)
            .await
            .unwrap();
        assert_eq!(report.seed, 77);
    }

    #[tokio::test]
    async fn test_random_family_fails_on_clifford_backend() {
        // Random circuits include T and rotations, which tableau rejects.
        // Seed chosen so the generated circuit contains a non-Clifford gate.
        let orch = orchestrator();
        let runner = BenchmarkRunner::new(&orch);
        let config = BenchmarkConfig {
            seed: Some(4),
            shots: 10,
            ..BenchmarkConfig::new(CircuitFamily::Random, 4)
        };
        let report = runner
            .run(&["tableau".to_string()], &config)
            .await
            .unwrap();
        let result = &report.results["tableau"];
        // 16 single-qubit draws at seed 4 are overwhelmingly likely to
        // include t/rx/rz; if not, the run simply succeeds.
        if !result.success {
            assert!(result.error.as_deref().unwrap_or("").contains("support"));
        }
    }
}
