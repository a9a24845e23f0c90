//! Multi command implementation.

use anyhow::Result;
use serde_json::{Value, json};

use qbridge_exec::{Orchestrator, default_registry};
use qbridge_tools::execution_payload;

use super::common::{finish, load_circuit};

/// Execute the multi command.
pub async fn execute(input: &str, backends: &[String], shots: u64) -> Result<()> {
    let circuit = load_circuit(input)?;
    let orchestrator = Orchestrator::new(default_registry());

    let backends = if backends.is_empty() {
        orchestrator.registry().names()
    } else {
        backends.to_vec()
    };

    let outcome = orchestrator.execute_multi(&backends, &circuit, shots).await;
    let results: serde_json::Map<String, Value> = outcome
        .results
        .iter()
        .map(|(name, result)| (name.clone(), execution_payload(result)))
        .collect();

    finish(json!({
        "success": outcome.results.values().any(|r| r.success),
        "results": results,
        "comparison": outcome.comparisons,
    }))
}
