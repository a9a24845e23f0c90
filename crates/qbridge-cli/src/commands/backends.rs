//! Backends command implementation.

use anyhow::Result;

use super::common::{finish, tools};

/// Execute the backends command.
pub async fn execute() -> Result<()> {
    finish(tools().list_backends())
}
