//! Gate instructions emitted by the compiler.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Axis of the single-qubit rotation applied to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationKind {
    /// Rotation around X.
    Rx,
    /// Rotation around Y.
    #[default]
    Ry,
    /// Rotation around Z.
    Rz,
}

impl RotationKind {
    /// OpenQASM name of the rotation gate.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            RotationKind::Rx => "rx",
            RotationKind::Ry => "ry",
            RotationKind::Rz => "rz",
        }
    }
}

impl fmt::Display for RotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One gate of a synthesized circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "gate", rename_all = "snake_case")]
pub enum GateInstruction {
    /// Parameterized single-qubit rotation.
    Rotation {
        /// Rotation axis.
        kind: RotationKind,
        /// Qubit the rotation acts on.
        qubit: usize,
        /// Rotation angle in radians.
        angle: f64,
    },
    /// CNOT between two coupled qubits.
    Cnot {
        /// Control qubit.
        control: usize,
        /// Target qubit.
        target: usize,
    },
    /// Hadamard on one qubit.
    Hadamard {
        /// Qubit the gate acts on.
        qubit: usize,
    },
}

impl GateInstruction {
    /// Create a CNOT.
    #[inline]
    pub fn cnot(control: usize, target: usize) -> Self {
        GateInstruction::Cnot { control, target }
    }

    /// Create a rotation.
    #[inline]
    pub fn rotation(kind: RotationKind, qubit: usize, angle: f64) -> Self {
        GateInstruction::Rotation { kind, qubit, angle }
    }

    /// Check if this is a two-qubit gate.
    #[inline]
    pub fn is_two_qubit(&self) -> bool {
        matches!(self, GateInstruction::Cnot { .. })
    }

    /// Qubits the gate touches, control first.
    pub fn qubits(&self) -> Vec<usize> {
        match *self {
            GateInstruction::Rotation { qubit, .. } | GateInstruction::Hadamard { qubit } => {
                vec![qubit]
            }
            GateInstruction::Cnot { control, target } => vec![control, target],
        }
    }
}

impl fmt::Display for GateInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateInstruction::Rotation { kind, qubit, angle } => {
                write!(f, "{kind}({angle}) q{qubit}")
            }
            GateInstruction::Cnot { control, target } => write!(f, "cx q{control}, q{target}"),
            GateInstruction::Hadamard { qubit } => write!(f, "h q{qubit}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            GateInstruction::rotation(RotationKind::Ry, 2, 0.5).to_string(),
            "ry(0.5) q2"
        );
        assert_eq!(GateInstruction::cnot(0, 1).to_string(), "cx q0, q1");
        assert_eq!(GateInstruction::Hadamard { qubit: 3 }.to_string(), "h q3");
    }

    #[test]
    fn test_qubits() {
        assert_eq!(GateInstruction::cnot(4, 1).qubits(), vec![4, 1]);
        assert!(GateInstruction::cnot(4, 1).is_two_qubit());
        assert!(!GateInstruction::rotation(RotationKind::Rz, 0, 1.0).is_two_qubit());
    }

    #[test]
    fn test_serde_tagging() {
        let json = serde_json::to_string(&GateInstruction::cnot(0, 1)).unwrap();
        assert_eq!(json, r#"{"gate":"cnot","control":0,"target":1}"#);

        let rotation: GateInstruction =
            serde_json::from_str(r#"{"gate":"rotation","kind":"rz","qubit":1,"angle":0.25}"#)
                .unwrap();
        assert_eq!(rotation, GateInstruction::rotation(RotationKind::Rz, 1, 0.25));
    }
}
