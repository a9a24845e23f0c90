//! CLI command implementations.

pub mod backends;
pub mod bench;
pub mod common;
pub mod multi;
pub mod qasm;
pub mod run;
pub mod templates;
