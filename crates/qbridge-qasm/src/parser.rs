//! Parser for `OpenQASM` 2.0.
//!
//! Registers are flattened into the circuit's single qubit and clbit index
//! spaces in declaration order. Gate calls on whole registers broadcast
//! element-wise, as the QASM 2.0 semantics require. `barrier` statements are
//! accepted and ignored since the circuit model has no scheduling notion.

use std::collections::HashMap;

use qbridge_ir::{Circuit, CircuitBuilder, Gate};

use crate::error::{ParseError, ParseResult};
use crate::lexer::{SpannedToken, Token, tokenize};

/// Parse a QASM 2.0 source string into a [`Circuit`].
pub fn parse(source: &str) -> ParseResult<Circuit> {
    let mut parser = Parser::new(source)?;
    parser.parse_program()
}

/// A register operand in a gate or measure statement.
#[derive(Debug, Clone)]
enum Operand {
    /// A single element, `q[2]`.
    Indexed(String, usize),
    /// A whole register, `q`.
    Whole(String),
}

/// A statement that contributes instructions to the circuit.
#[derive(Debug)]
enum Op {
    Gate {
        name: String,
        params: Vec<f64>,
        operands: Vec<Operand>,
        line: usize,
    },
    Measure {
        qubit: Operand,
        clbit: Operand,
        line: usize,
    },
}

/// Parser state.
struct Parser {
    tokens: Vec<SpannedToken>,
    pos: usize,
    /// Quantum registers: name to (flat offset, size).
    qregs: HashMap<String, (u32, u32)>,
    /// Classical registers: name to (flat offset, size).
    cregs: HashMap<String, (u32, u32)>,
    num_qubits: u32,
    num_clbits: u32,
    ops: Vec<Op>,
}

impl Parser {
    fn new(source: &str) -> ParseResult<Self> {
        let mut tokens = Vec::new();
        for result in tokenize(source) {
            match result {
                Ok(t) => tokens.push(t),
                Err((line, message)) => {
                    return Err(ParseError::LexerError { line, message });
                }
            }
        }

        Ok(Self {
            tokens,
            pos: 0,
            qregs: HashMap::new(),
            cregs: HashMap::new(),
            num_qubits: 0,
            num_clbits: 0,
            ops: Vec::new(),
        })
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn line(&self) -> usize {
        self.tokens
            .get(self.pos.min(self.tokens.len().saturating_sub(1)))
            .map_or(1, |t| t.line)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    fn advance(&mut self) -> Option<Token> {
        if self.is_eof() {
            return None;
        }
        let token = self.tokens[self.pos].token.clone();
        self.pos += 1;
        Some(token)
    }

    fn expect(&mut self, expected: &Token) -> ParseResult<()> {
        let line = self.line();
        let found = self
            .advance()
            .ok_or_else(|| ParseError::UnexpectedEof(expected.to_string()))?;

        if std::mem::discriminant(&found) != std::mem::discriminant(expected) {
            return Err(ParseError::UnexpectedToken {
                line,
                expected: expected.to_string(),
                found: found.to_string(),
            });
        }
        Ok(())
    }

    fn consume(&mut self, token: &Token) -> bool {
        let matches = self
            .peek()
            .is_some_and(|t| std::mem::discriminant(t) == std::mem::discriminant(token));
        if matches {
            self.advance();
        }
        matches
    }

    fn parse_program(&mut self) -> ParseResult<Circuit> {
        self.expect(&Token::OpenQasm)?;
        self.parse_version()?;
        self.expect(&Token::Semicolon)?;

        while !self.is_eof() {
            self.parse_statement()?;
        }

        self.lower()
    }

    fn parse_version(&mut self) -> ParseResult<()> {
        match self.advance() {
            Some(Token::FloatLiteral(v)) if (v - 2.0).abs() < f64::EPSILON => Ok(()),
            Some(other) => Err(ParseError::UnsupportedVersion(other.to_string())),
            None => Err(ParseError::UnexpectedEof("version number".into())),
        }
    }

    fn parse_statement(&mut self) -> ParseResult<()> {
        let line = self.line();
        let token = self
            .peek()
            .cloned()
            .ok_or_else(|| ParseError::UnexpectedEof("statement".into()))?;

        match token {
            Token::Include => self.parse_include(),
            Token::Qreg => self.parse_register_decl(true),
            Token::Creg => self.parse_register_decl(false),
            Token::Measure => self.parse_measure(),
            Token::Barrier => self.parse_barrier(),
            Token::Identifier(_) => self.parse_gate_call(),
            _ => Err(ParseError::UnexpectedToken {
                line,
                expected: "statement".into(),
                found: token.to_string(),
            }),
        }
    }

    fn parse_include(&mut self) -> ParseResult<()> {
        self.expect(&Token::Include)?;
        self.expect(&Token::StringLiteral(String::new()))?;
        self.expect(&Token::Semicolon)
    }

    fn parse_register_decl(&mut self, quantum: bool) -> ParseResult<()> {
        self.advance(); // qreg / creg
        let name = self.parse_identifier()?;
        self.expect(&Token::LBracket)?;
        let size = self.parse_int()?;
        self.expect(&Token::RBracket)?;
        self.expect(&Token::Semicolon)?;

        if self.qregs.contains_key(&name) || self.cregs.contains_key(&name) {
            return Err(ParseError::DuplicateRegister(name));
        }

        if quantum {
            self.qregs.insert(name, (self.num_qubits, size));
            self.num_qubits += size;
        } else {
            self.cregs.insert(name, (self.num_clbits, size));
            self.num_clbits += size;
        }
        Ok(())
    }

    fn parse_measure(&mut self) -> ParseResult<()> {
        let line = self.line();
        self.expect(&Token::Measure)?;
        let qubit = self.parse_operand()?;
        self.expect(&Token::Arrow)?;
        let clbit = self.parse_operand()?;
        self.expect(&Token::Semicolon)?;
        self.ops.push(Op::Measure { qubit, clbit, line });
        Ok(())
    }

    fn parse_barrier(&mut self) -> ParseResult<()> {
        self.expect(&Token::Barrier)?;
        loop {
            self.parse_operand()?;
            if !self.consume(&Token::Comma) {
                break;
            }
        }
        self.expect(&Token::Semicolon)
    }

    fn parse_gate_call(&mut self) -> ParseResult<()> {
        let line = self.line();
        let name = self.parse_identifier()?;

        let mut params = Vec::new();
        if self.consume(&Token::LParen) {
            loop {
                params.push(self.parse_expr()?);
                if !self.consume(&Token::Comma) {
                    break;
                }
            }
            self.expect(&Token::RParen)?;
        }

        let mut operands = Vec::new();
        loop {
            operands.push(self.parse_operand()?);
            if !self.consume(&Token::Comma) {
                break;
            }
        }
        self.expect(&Token::Semicolon)?;

        self.ops.push(Op::Gate {
            name,
            params,
            operands,
            line,
        });
        Ok(())
    }

    fn parse_operand(&mut self) -> ParseResult<Operand> {
        let name = self.parse_identifier()?;
        if self.consume(&Token::LBracket) {
            let index = self.parse_int()? as usize;
            self.expect(&Token::RBracket)?;
            Ok(Operand::Indexed(name, index))
        } else {
            Ok(Operand::Whole(name))
        }
    }

    fn parse_identifier(&mut self) -> ParseResult<String> {
        let line = self.line();
        match self.advance() {
            Some(Token::Identifier(name)) => Ok(name),
            Some(other) => Err(ParseError::UnexpectedToken {
                line,
                expected: "identifier".into(),
                found: other.to_string(),
            }),
            None => Err(ParseError::UnexpectedEof("identifier".into())),
        }
    }

    fn parse_int(&mut self) -> ParseResult<u32> {
        let line = self.line();
        match self.advance() {
            Some(Token::IntLiteral(v)) => Ok(u32::try_from(v).unwrap_or(u32::MAX)),
            Some(other) => Err(ParseError::UnexpectedToken {
                line,
                expected: "integer".into(),
                found: other.to_string(),
            }),
            None => Err(ParseError::UnexpectedEof("integer".into())),
        }
    }

    // =========================================================================
    // Constant-folded parameter expressions
    // =========================================================================

    fn parse_expr(&mut self) -> ParseResult<f64> {
        let mut value = self.parse_term()?;
        loop {
            if self.consume(&Token::Plus) {
                value += self.parse_term()?;
            } else if self.consume(&Token::Minus) {
                value -= self.parse_term()?;
            } else {
                return Ok(value);
            }
        }
    }

    fn parse_term(&mut self) -> ParseResult<f64> {
        let mut value = self.parse_factor()?;
        loop {
            if self.consume(&Token::Star) {
                value *= self.parse_factor()?;
            } else if self.consume(&Token::Slash) {
                value /= self.parse_factor()?;
            } else {
                return Ok(value);
            }
        }
    }

    fn parse_factor(&mut self) -> ParseResult<f64> {
        let line = self.line();
        match self.advance() {
            Some(Token::Minus) => Ok(-self.parse_factor()?),
            Some(Token::LParen) => {
                let value = self.parse_expr()?;
                self.expect(&Token::RParen)?;
                Ok(value)
            }
            Some(Token::Pi) => Ok(std::f64::consts::PI),
            Some(Token::FloatLiteral(v)) => Ok(v),
            Some(Token::IntLiteral(v)) => Ok(v as f64),
            Some(other) => Err(ParseError::UnexpectedToken {
                line,
                expected: "expression".into(),
                found: other.to_string(),
            }),
            None => Err(ParseError::UnexpectedEof("expression".into())),
        }
    }

    // =========================================================================
    // Lowering to the circuit IR
    // =========================================================================

    /// Resolve an operand against a register table into flat indices.
    fn resolve(
        operand: &Operand,
        regs: &HashMap<String, (u32, u32)>,
        line: usize,
    ) -> ParseResult<Vec<u32>> {
        match operand {
            Operand::Indexed(name, index) => {
                let &(offset, size) = regs.get(name).ok_or_else(|| ParseError::UnknownRegister {
                    name: name.clone(),
                    line,
                })?;
                if *index >= size as usize {
                    return Err(ParseError::IndexOutOfBounds {
                        register: name.clone(),
                        index: *index,
                        size: size as usize,
                    });
                }
                Ok(vec![offset + *index as u32])
            }
            Operand::Whole(name) => {
                let &(offset, size) = regs.get(name).ok_or_else(|| ParseError::UnknownRegister {
                    name: name.clone(),
                    line,
                })?;
                Ok((offset..offset + size).collect())
            }
        }
    }

    /// Element-wise broadcast over resolved operands.
    ///
    /// Whole-register operands must all have the same length; indexed
    /// operands are repeated across the broadcast.
    fn broadcast(gate: &str, line: usize, resolved: &[Vec<u32>]) -> ParseResult<Vec<Vec<u32>>> {
        let width = resolved.iter().map(Vec::len).max().unwrap_or(0);
        if resolved.iter().any(|r| r.len() != 1 && r.len() != width) {
            return Err(ParseError::BroadcastMismatch {
                gate: gate.to_string(),
                line,
            });
        }

        Ok((0..width)
            .map(|k| {
                resolved
                    .iter()
                    .map(|r| if r.len() == 1 { r[0] } else { r[k] })
                    .collect()
            })
            .collect())
    }

    fn lower(&mut self) -> ParseResult<Circuit> {
        if self.num_qubits == 0 {
            let line = self.ops.first().map_or(1, |op| match op {
                Op::Gate { line, .. } | Op::Measure { line, .. } => *line,
            });
            return Err(ParseError::MissingQreg(line));
        }

        let mut builder = CircuitBuilder::new(self.num_qubits)?;
        if self.num_clbits > 0 {
            builder = builder.with_clbits(self.num_clbits);
        }

        for op in &self.ops {
            match op {
                Op::Gate {
                    name,
                    params,
                    operands,
                    line,
                } => {
                    let gate = Gate::from_name(name, params)?;
                    let resolved: Vec<Vec<u32>> = operands
                        .iter()
                        .map(|o| Self::resolve(o, &self.qregs, *line))
                        .collect::<ParseResult<_>>()?;
                    for qubits in Self::broadcast(name, *line, &resolved)? {
                        builder.gate(gate, &qubits)?;
                    }
                }
                Op::Measure { qubit, clbit, line } => {
                    let qubits = Self::resolve(qubit, &self.qregs, *line)?;
                    let clbits = Self::resolve(clbit, &self.cregs, *line)?;
                    if qubits.len() != clbits.len() {
                        return Err(ParseError::BroadcastMismatch {
                            gate: "measure".to_string(),
                            line: *line,
                        });
                    }
                    for (&q, &c) in qubits.iter().zip(&clbits) {
                        builder.measure(q, c)?;
                    }
                }
            }
        }

        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qbridge_ir::IrError;
    use std::f64::consts::PI;

    #[test]
    fn test_parse_bell() {
        let source = r#"
            OPENQASM 2.0;
            include "qelib1.inc";
            qreg q[2];
            creg c[2];
            h q[0];
            cx q[0], q[1];
            measure q[0] -> c[0];
            measure q[1] -> c[1];
        "#;
        let circuit = parse(source).unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.num_clbits(), 2);
        assert_eq!(circuit.num_gates(), 2);
        assert!(circuit.has_measurements());
    }

    #[test]
    fn test_parse_parameterized() {
        let source = "OPENQASM 2.0;\nqreg q[1];\nrx(pi/2) q[0];\nrz(-pi/4) q[0];\n";
        let circuit = parse(source).unwrap();
        let params: Vec<f64> = circuit.gates().flat_map(|(g, _)| g.params()).collect();
        assert!((params[0] - PI / 2.0).abs() < 1e-12);
        assert!((params[1] + PI / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_parse_expression_precedence() {
        let source = "OPENQASM 2.0;\nqreg q[1];\nry(1+2*3) q[0];\n";
        let circuit = parse(source).unwrap();
        let (gate, _) = circuit.gates().next().unwrap();
        assert_eq!(gate.params(), vec![7.0]);
    }

    #[test]
    fn test_broadcast_single_qubit_gate() {
        let source = "OPENQASM 2.0;\nqreg q[3];\nh q;\n";
        let circuit = parse(source).unwrap();
        assert_eq!(circuit.num_gates(), 3);
    }

    #[test]
    fn test_broadcast_measure() {
        let source = "OPENQASM 2.0;\nqreg q[2];\ncreg c[2];\nh q[0];\nmeasure q -> c;\n";
        let circuit = parse(source).unwrap();
        assert_eq!(circuit.measurement_map().len(), 2);
    }

    #[test]
    fn test_multiple_registers_flattened() {
        let source = "OPENQASM 2.0;\nqreg a[2];\nqreg b[2];\ncx a[1], b[0];\n";
        let circuit = parse(source).unwrap();
        assert_eq!(circuit.num_qubits(), 4);
        let (_, qubits) = circuit.gates().next().unwrap();
        assert_eq!(qubits[0].0, 1);
        assert_eq!(qubits[1].0, 2);
    }

    #[test]
    fn test_barrier_ignored() {
        let source = "OPENQASM 2.0;\nqreg q[2];\nh q[0];\nbarrier q;\ncx q[0], q[1];\n";
        let circuit = parse(source).unwrap();
        assert_eq!(circuit.num_gates(), 2);
    }

    #[test]
    fn test_wrong_version_rejected() {
        let err = parse("OPENQASM 3.0;\nqreg q[1];\n").unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedVersion(_)));
    }

    #[test]
    fn test_unknown_register() {
        let err = parse("OPENQASM 2.0;\nqreg q[1];\nh r[0];\n").unwrap_err();
        assert!(matches!(err, ParseError::UnknownRegister { ref name, .. } if name == "r"));
    }

    #[test]
    fn test_index_out_of_bounds() {
        let err = parse("OPENQASM 2.0;\nqreg q[2];\nh q[5];\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::IndexOutOfBounds { index: 5, size: 2, .. }
        ));
    }

    #[test]
    fn test_unknown_gate_reported() {
        let err = parse("OPENQASM 2.0;\nqreg q[1];\nu3(1,2,3) q[0];\n").unwrap_err();
        assert!(matches!(err, ParseError::CircuitError(IrError::UnknownGate(_))));
    }

    #[test]
    fn test_duplicate_register() {
        let err = parse("OPENQASM 2.0;\nqreg q[1];\ncreg q[1];\n").unwrap_err();
        assert!(matches!(err, ParseError::DuplicateRegister(ref name) if name == "q"));
    }

    #[test]
    fn test_error_carries_line() {
        let err = parse("OPENQASM 2.0;\nqreg q[1];\nh r[0];\n").unwrap_err();
        assert!(matches!(err, ParseError::UnknownRegister { line: 3, .. }));
    }

    #[test]
    fn test_no_creg_defaults_clbits() {
        let circuit = parse("OPENQASM 2.0;\nqreg q[2];\nh q[0];\n").unwrap();
        assert_eq!(circuit.num_clbits(), 2);
    }
}
