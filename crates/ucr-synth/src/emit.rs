//! OpenQASM 3 emitter for synthesized programs.

use crate::instruction::GateInstruction;
use crate::ladder::UcrProgram;

/// Formatting options for [`emit_qasm`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EmitOptions {
    /// Insert a barrier after the Hadamard layer, after every rotation and
    /// after every ladder.
    pub barriers: bool,
}

/// Emit a program as OpenQASM 3 source.
pub fn emit_qasm(program: &UcrProgram, options: EmitOptions) -> String {
    let mut emitter = Emitter::new(options);
    emitter.emit_program(program);
    emitter.output
}

struct Emitter {
    output: String,
    options: EmitOptions,
}

impl Emitter {
    fn new(options: EmitOptions) -> Self {
        Self {
            output: String::new(),
            options,
        }
    }

    fn emit_program(&mut self, program: &UcrProgram) {
        self.writeln("OPENQASM 3.0;");
        self.writeln("include \"stdgates.inc\";");
        self.writeln("");
        self.writeln(&format!("// UCR target q[{}]", program.target));
        self.writeln(&format!("qubit[{}] q;", program.num_qubits));
        self.writeln("");

        let mut gates = program.instructions.iter().peekable();
        while let Some(gate) = gates.next() {
            self.emit_instruction(gate);

            if !self.options.barriers {
                continue;
            }
            let ends_block = match (gate, gates.peek()) {
                (GateInstruction::Rotation { .. }, _) => true,
                (_, None) => true,
                (GateInstruction::Hadamard { .. }, Some(next)) => {
                    !matches!(next, GateInstruction::Hadamard { .. })
                }
                (GateInstruction::Cnot { .. }, Some(next)) => !next.is_two_qubit(),
            };
            if ends_block {
                self.writeln("barrier q;");
            }
        }
    }

    fn emit_instruction(&mut self, gate: &GateInstruction) {
        match *gate {
            GateInstruction::Rotation { kind, qubit, angle } => {
                self.writeln(&format!("{}({}) q[{qubit}];", kind.name(), format_angle(angle)));
            }
            GateInstruction::Cnot { control, target } => {
                self.writeln(&format!("cx q[{control}], q[{target}];"));
            }
            GateInstruction::Hadamard { qubit } => {
                self.writeln(&format!("h q[{qubit}];"));
            }
        }
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}

/// Format an angle so that it always parses as a float literal.
fn format_angle(angle: f64) -> String {
    let text = format!("{angle}");
    if text.contains(['.', 'e', 'E', 'N', 'i']) {
        text
    } else {
        format!("{text}.0")
    }
}
