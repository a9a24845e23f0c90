//! Run command implementation.

use anyhow::Result;

use qbridge_exec::{Orchestrator, default_registry};
use qbridge_tools::execution_payload;

use super::common::{finish, load_circuit};

/// Execute the run command.
pub async fn execute(input: &str, backend: &str, shots: u64) -> Result<()> {
    let circuit = load_circuit(input)?;
    let orchestrator = Orchestrator::new(default_registry());

    let result = orchestrator.execute_single(backend, &circuit, shots).await?;
    finish(execution_payload(&result))
}
