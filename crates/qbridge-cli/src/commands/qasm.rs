//! Qasm command implementation.

use anyhow::Result;
use serde_json::json;

use qbridge_hal::CircuitInfo;

use super::common::{finish, load_circuit};

/// Execute the qasm command: parse, summarize, and re-emit canonically.
pub fn execute(input: &str) -> Result<()> {
    let circuit = load_circuit(input)?;
    finish(json!({
        "success": true,
        "qasm": qbridge_qasm::emit(&circuit),
        "circuit_info": CircuitInfo::from_circuit(&circuit),
    }))
}
