//! Canonical circuit representation for qbridge.
//!
//! Every backend adapter consumes circuits expressed in this one IR, so a
//! circuit built once can be translated to any registered backend. The IR is
//! intentionally small: a closed gate set, measurements, and nothing else.
//!
//! # Core Components
//!
//! - **Identifiers**: [`QubitId`], [`ClbitId`] for addressing quantum and
//!   classical bits
//! - **Gates**: [`Gate`] for the closed supported set, [`GateSpec`] for the
//!   wire format tool callers send
//! - **Instructions**: [`Instruction`] combining gates with their operands
//! - **Circuit**: [`CircuitBuilder`] validates as you build; [`Circuit`] is
//!   the immutable result
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use qbridge_ir::{Circuit, CircuitBuilder};
//!
//! let mut builder = CircuitBuilder::new(2).unwrap();
//! builder.h(0).unwrap();
//! builder.cx(0, 1).unwrap();
//! let circuit = builder.build();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 2);
//!
//! // Or use the prebuilt template.
//! assert_eq!(circuit, Circuit::bell().unwrap());
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `h` | 1 | Hadamard gate |
//! | `x`, `y`, `z` | 1 | Pauli gates |
//! | `s`, `t` | 1 | Phase gates |
//! | `rx`, `ry`, `rz` | 1 | Rotation gates (one angle parameter) |
//! | `cx` | 2 | Controlled-NOT (alias: `cnot`) |
//! | `cz` | 2 | Controlled-Z |
//! | `swap` | 2 | SWAP gate |
//! | `ccx` | 3 | Toffoli gate (alias: `toffoli`) |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::{Circuit, CircuitBuilder};
pub use error::{IrError, IrResult};
pub use gate::{Gate, GateSpec};
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{ClbitId, QubitId};
