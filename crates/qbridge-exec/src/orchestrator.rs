//! Execution orchestration across registered backends.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use qbridge_hal::{BackendRegistry, ExecutionResult, HalError, HalResult};
use qbridge_ir::Circuit;
use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::compare::{PairComparison, distribution_similarity, pair_key, time_ratio};

/// Default per-backend execution deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Results of a fan-out execution across several backends.
///
/// `results` has one entry per requested backend name, failed entries
/// included, so callers can always see what happened to each request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiBackendResult {
    /// Per-backend outcomes keyed by backend name.
    pub results: BTreeMap<String, ExecutionResult>,
    /// Pairwise agreement between successful backends, keyed `a_vs_b`.
    pub comparisons: BTreeMap<String, PairComparison>,
}

/// Coordinates circuit execution across the backend registry.
pub struct Orchestrator {
    registry: Arc<BackendRegistry>,
    timeout: Duration,
}

impl Orchestrator {
    /// Create an orchestrator over a registry with the default deadline.
    pub fn new(registry: BackendRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the per-backend execution deadline.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The registry backing this orchestrator.
    pub fn registry(&self) -> &BackendRegistry {
        &self.registry
    }

    /// Execute a circuit on one named backend.
    ///
    /// Resolution failures (unknown name) are errors; execution failures
    /// come back as a failed [`ExecutionResult`].
    pub async fn execute_single(
        &self,
        backend: &str,
        circuit: &Circuit,
        shots: u64,
    ) -> HalResult<ExecutionResult> {
        let adapter = self.registry.get(backend)?;
        Ok(Self::run_with_deadline(adapter, circuit.clone(), shots, self.timeout).await)
    }

    /// Execute a circuit on every named backend concurrently.
    ///
    /// Every requested name gets an entry in the result, whether it
    /// succeeded, failed, timed out, or was never registered.
    pub async fn execute_multi(
        &self,
        backends: &[String],
        circuit: &Circuit,
        shots: u64,
    ) -> MultiBackendResult {
        let mut tasks = JoinSet::new();
        let mut results = BTreeMap::new();

        for name in backends {
            if results.contains_key(name) {
                continue; // duplicate request
            }
            match self.registry.get(name) {
                Ok(adapter) => {
                    results.insert(name.clone(), None);
                    let circuit = circuit.clone();
                    let timeout = self.timeout;
                    let name = name.clone();
                    tasks.spawn(async move {
                        let result =
                            Self::run_with_deadline(adapter, circuit, shots, timeout).await;
                        (name, result)
                    });
                }
                Err(e) => {
                    warn!(backend = %name, "requested backend is not registered");
                    results.insert(
                        name.clone(),
                        Some(ExecutionResult::failed(name.clone(), shots, 0.0, e.to_string())),
                    );
                }
            }
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((name, result)) => {
                    results.insert(name, Some(result));
                }
                Err(e) => {
                    // Panicked task; without its name we cannot attribute
                    // the failure to a backend, the placeholder covers it.
                    warn!(error = %e, "backend task failed to join");
                }
            }
        }

        let results: BTreeMap<String, ExecutionResult> = results
            .into_iter()
            .map(|(name, result)| {
                let result = result.unwrap_or_else(|| {
                    ExecutionResult::failed(
                        name.clone(),
                        shots,
                        0.0,
                        "backend task aborted".to_string(),
                    )
                });
                (name, result)
            })
            .collect();

        let comparisons = Self::compare_all(&results);
        MultiBackendResult {
            results,
            comparisons,
        }
    }

    async fn run_with_deadline(
        adapter: Arc<dyn qbridge_hal::Adapter>,
        circuit: Circuit,
        shots: u64,
        timeout: Duration,
    ) -> ExecutionResult {
        let name = adapter.name().to_string();
        debug!(backend = %name, shots, "dispatching execution");
        match tokio::time::timeout(timeout, adapter.execute(&circuit, shots)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(backend = %name, ?timeout, "execution timed out");
                ExecutionResult::failed(
                    name.clone(),
                    shots,
                    timeout.as_secs_f64() * 1000.0,
                    HalError::Timeout(name).to_string(),
                )
            }
        }
    }

    /// Pairwise comparisons over the successful results only.
    fn compare_all(
        results: &BTreeMap<String, ExecutionResult>,
    ) -> BTreeMap<String, PairComparison> {
        let successful: Vec<(&String, &ExecutionResult)> =
            results.iter().filter(|(_, r)| r.success).collect();

        let mut comparisons = BTreeMap::new();
        for (i, (name_a, a)) in successful.iter().enumerate() {
            for (name_b, b) in &successful[i + 1..] {
                comparisons.insert(
                    pair_key(name_a, name_b),
                    PairComparison {
                        similarity: distribution_similarity(&a.counts, &b.counts),
                        time_ratio: time_ratio(a.execution_time_ms, b.execution_time_ms),
                    },
                );
            }
        }
        comparisons
    }
}
