//! QASM 2.0 emitter for serializing circuits.

use qbridge_ir::{Circuit, Instruction, InstructionKind};

/// Emit a circuit as QASM 2.0 source code.
///
/// The output declares one quantum register `q` and one classical register
/// `c`, and is self-contained modulo the standard `qelib1.inc` include.
/// Parameters are written with the shortest representation that parses back
/// to the same `f64`, so a parse of the output reproduces the circuit.
pub fn emit(circuit: &Circuit) -> String {
    let mut emitter = Emitter::new();
    emitter.emit_circuit(circuit)
}

/// QASM 2.0 emitter.
struct Emitter {
    output: String,
}

impl Emitter {
    fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }

    fn emit_circuit(&mut self, circuit: &Circuit) -> String {
        self.writeln("OPENQASM 2.0;");
        self.writeln("include \"qelib1.inc\";");

        self.writeln(&format!("qreg q[{}];", circuit.num_qubits()));
        if circuit.num_clbits() > 0 {
            self.writeln(&format!("creg c[{}];", circuit.num_clbits()));
        }

        for instruction in circuit.instructions() {
            self.emit_instruction(instruction);
        }

        self.output.clone()
    }

    fn emit_instruction(&mut self, instruction: &Instruction) {
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let name = gate.name();
                let qubits = instruction
                    .qubits
                    .iter()
                    .map(|q| format!("q[{}]", q.0))
                    .collect::<Vec<_>>()
                    .join(", ");

                let params = gate.params();
                if params.is_empty() {
                    self.writeln(&format!("{name} {qubits};"));
                } else {
                    let params = params
                        .iter()
                        .map(|p| format_param(*p))
                        .collect::<Vec<_>>()
                        .join(", ");
                    self.writeln(&format!("{name}({params}) {qubits};"));
                }
            }
            InstructionKind::Measure => {
                self.writeln(&format!(
                    "measure q[{}] -> c[{}];",
                    instruction.qubits[0].0, instruction.clbits[0].0
                ));
            }
        }
    }
}

/// Format a gate parameter so it survives a parse round trip.
///
/// `{:?}` picks the shortest representation that parses back to the same
/// `f64` and switches to exponent notation for extreme magnitudes, so every
/// finite value stays within the lexer's numeric token rules. Display
/// formatting would expand values like `1e300` into a 301-digit integer
/// literal, which no lexer rule accepts.
fn format_param(value: f64) -> String {
    format!("{value:?}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use qbridge_ir::CircuitBuilder;
    use std::f64::consts::PI;

    #[test]
    fn test_emit_bell_with_measures() {
        let mut builder = CircuitBuilder::new(2).unwrap();
        builder.h(0).unwrap().cx(0, 1).unwrap().measure_all().unwrap();
        let qasm = emit(&builder.build());

        assert_eq!(
            qasm,
            "OPENQASM 2.0;\n\
             include \"qelib1.inc\";\n\
             qreg q[2];\n\
             creg c[2];\n\
             h q[0];\n\
             cx q[0], q[1];\n\
             measure q[0] -> c[0];\n\
             measure q[1] -> c[1];\n"
        );
    }

    #[test]
    fn test_emit_parameterized() {
        let mut builder = CircuitBuilder::new(1).unwrap();
        builder.rx(PI / 2.0, 0).unwrap();
        let qasm = emit(&builder.build());
        assert!(qasm.contains("rx(1.5707963267948966) q[0];"));
    }

    #[test]
    fn test_extreme_params_round_trip() {
        // Exponent-notation cases: huge, tiny, and negative magnitudes.
        for theta in [1e300, -1e300, 5e-324, 1.5e17] {
            let mut builder = CircuitBuilder::new(1).unwrap();
            builder.rx(theta, 0).unwrap();
            let circuit = builder.build();

            let reparsed = parse(&emit(&circuit)).unwrap();
            assert_eq!(reparsed, circuit, "param {theta} did not survive");
        }
    }

    #[test]
    fn test_round_trip_preserves_structure() {
        let mut builder = CircuitBuilder::new(3).unwrap();
        builder
            .h(0)
            .unwrap()
            .cx(0, 1)
            .unwrap()
            .ccx(0, 1, 2)
            .unwrap()
            .rz(-PI / 4.0, 2)
            .unwrap()
            .measure_all()
            .unwrap();
        let circuit = builder.build();

        let reparsed = parse(&emit(&circuit)).unwrap();
        assert_eq!(reparsed, circuit);
    }
}
