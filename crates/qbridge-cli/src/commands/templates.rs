//! Template commands: bell, ghz, teleport.

use anyhow::Result;

use qbridge_tools::{GhzRequest, TemplateRequest};

use super::common::{finish, tools};

/// Execute the bell command.
pub async fn execute_bell(backend: &str, shots: u64) -> Result<()> {
    let request = TemplateRequest {
        backend: backend.to_string(),
        shots,
    };
    finish(tools().create_bell_state(request).await)
}

/// Execute the ghz command.
pub async fn execute_ghz(num_qubits: u32, backend: &str, shots: u64) -> Result<()> {
    let request = GhzRequest {
        num_qubits,
        backend: backend.to_string(),
        shots,
    };
    finish(tools().create_ghz_state(request).await)
}

/// Execute the teleport command.
pub async fn execute_teleport(backend: &str, shots: u64) -> Result<()> {
    let request = TemplateRequest {
        backend: backend.to_string(),
        shots,
    };
    finish(tools().quantum_teleportation(request).await)
}
