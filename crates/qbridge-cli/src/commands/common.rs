//! Helpers shared by the CLI commands.

use anyhow::{Context, Result};

use qbridge_ir::Circuit;
use qbridge_tools::Tools;

/// Read and parse a QASM 2.0 source file.
pub fn load_circuit(input: &str) -> Result<Circuit> {
    let source =
        std::fs::read_to_string(input).with_context(|| format!("failed to read '{input}'"))?;
    let circuit =
        qbridge_qasm::parse(&source).with_context(|| format!("failed to parse '{input}'"))?;
    Ok(circuit)
}

/// The tool surface with every built-in backend registered.
pub fn tools() -> Tools {
    Tools::with_default_backends()
}

/// Print a JSON payload, pretty-printed, to stdout.
pub fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Exit code semantics: a payload with `"success": false` is an error.
pub fn finish(value: serde_json::Value) -> Result<()> {
    print_json(&value)?;
    if value["success"] == false {
        std::process::exit(1);
    }
    Ok(())
}
