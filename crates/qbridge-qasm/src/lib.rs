//! OpenQASM 2.0 support for qbridge circuits.
//!
//! Provides a parser from QASM 2.0 source to the canonical [`Circuit`]
//! representation and an emitter back to QASM 2.0 text. Parsing and emitting
//! compose: for any circuit in the supported gate set,
//! `parse(&emit(&circuit))` reproduces the circuit exactly.
//!
//! ```rust
//! use qbridge_ir::Circuit;
//! use qbridge_qasm::{emit, parse};
//!
//! let circuit = Circuit::bell().unwrap();
//! let qasm = emit(&circuit);
//! assert_eq!(parse(&qasm).unwrap(), circuit);
//! ```
//!
//! [`Circuit`]: qbridge_ir::Circuit

pub mod emitter;
pub mod error;
pub mod lexer;
pub mod parser;

pub use emitter::emit;
pub use error::{ParseError, ParseResult};
pub use parser::parse;
