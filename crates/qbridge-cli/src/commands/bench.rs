//! Bench command implementation.

use anyhow::Result;

use qbridge_tools::BenchmarkRequest;

use super::common::{finish, tools};

/// Execute the bench command.
pub async fn execute(
    family: &str,
    num_qubits: u32,
    shots: u64,
    repeats: u32,
    seed: Option<u64>,
    backends: &[String],
) -> Result<()> {
    let request = BenchmarkRequest {
        family: family.to_string(),
        num_qubits,
        shots,
        repeats,
        seed,
        backends: if backends.is_empty() {
            None
        } else {
            Some(backends.to_vec())
        },
    };
    finish(tools().benchmark_backends(request).await)
}
