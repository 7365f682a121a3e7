//! Path-to-ladder circuit compiler.
//!
//! Turns a fixed target, the committed shortest paths of a [`Topology`] and
//! the Gray-code schedule into the gate sequence of a topology-constrained
//! uniformly controlled rotation. Every step applies one rotation to the
//! target and then a CNOT ladder from the step's control to the target.
//!
//! # Ladder shape
//!
//! For a path `p[0] .. p[d]` from control to target, the ladder is the
//! forward sweep `(p[0],p[1]) .. (p[d-1],p[d])` followed by the backward
//! sweep `(p[d-2],p[d-1]) .. (p[0],p[1])`: `2d - 1` CNOTs. On basis states
//! it XORs the parity of `p[0] .. p[d-1]` into `p[d]` and restores every
//! intermediate qubit; with the intermediates at `|0>` it acts as a CNOT
//! from `p[0]` to `p[d]`.

use serde::{Deserialize, Serialize};

use crate::cost::control_for;
use crate::error::{SynthError, SynthResult};
use crate::graph::Topology;
use crate::gray::GrayWalk;
use crate::instruction::{GateInstruction, RotationKind};
use crate::observer::{NoopObserver, SynthesisObserver};
use crate::validate_qubit_count;

/// Emit the CNOT ladder along `path`.
///
/// Fails with [`SynthError::SelfControl`] when the path has a single vertex,
/// i.e. the control is the target.
pub fn ladder(path: &[usize]) -> SynthResult<Vec<GateInstruction>> {
    if path.len() < 2 {
        return Err(SynthError::SelfControl {
            qubit: path.first().copied().unwrap_or_default(),
        });
    }

    let d = path.len() - 1;
    let mut gates = Vec::with_capacity(2 * d - 1);
    for edge in path.windows(2) {
        gates.push(GateInstruction::cnot(edge[0], edge[1]));
    }
    for i in (0..d - 1).rev() {
        gates.push(GateInstruction::cnot(path[i], path[i + 1]));
    }
    Ok(gates)
}

/// A synthesized uniformly controlled rotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UcrProgram {
    /// Number of qubits in the topology.
    pub num_qubits: usize,
    /// Qubit receiving the rotations.
    pub target: usize,
    /// Rotation axis.
    pub rotation: RotationKind,
    /// Gates in application order.
    pub instructions: Vec<GateInstruction>,
}

impl UcrProgram {
    /// Number of instructions.
    #[inline]
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Check if the program has no instructions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Number of CNOTs.
    pub fn two_qubit_count(&self) -> usize {
        self.instructions.iter().filter(|g| g.is_two_qubit()).count()
    }

    /// Number of single-qubit rotations.
    pub fn rotation_count(&self) -> usize {
        self.instructions
            .iter()
            .filter(|g| matches!(g, GateInstruction::Rotation { .. }))
            .count()
    }

    /// Check that every CNOT acts on a coupled pair of `topology`.
    pub fn validate(&self, topology: &Topology) -> SynthResult<()> {
        for gate in &self.instructions {
            if let GateInstruction::Cnot { control, target } = *gate {
                if !topology.is_adjacent(control, target) {
                    return Err(SynthError::NonAdjacentGate { control, target });
                }
            }
        }
        Ok(())
    }
}

/// Compiles uniformly controlled rotations for one topology.
///
/// ```
/// use ucr_synth::{RotationKind, Topology, UcrCompiler};
///
/// let topology = Topology::linear(3).unwrap();
/// let program = UcrCompiler::new(&topology)
///     .with_rotation(RotationKind::Rz)
///     .compile(1, &[0.1, 0.2, 0.3, 0.4])
///     .unwrap();
///
/// assert_eq!(program.rotation_count(), 4);
/// assert_eq!(program.two_qubit_count(), 4);
/// ```
pub struct UcrCompiler<'a> {
    topology: &'a Topology,
    rotation: RotationKind,
    observer: &'a dyn SynthesisObserver,
}

impl<'a> UcrCompiler<'a> {
    /// Create a compiler emitting `Ry` rotations.
    pub fn new(topology: &'a Topology) -> Self {
        Self {
            topology,
            rotation: RotationKind::default(),
            observer: &NoopObserver,
        }
    }

    /// Set the rotation axis.
    #[must_use]
    pub fn with_rotation(mut self, rotation: RotationKind) -> Self {
        self.rotation = rotation;
        self
    }

    /// Report every emitted ladder to `observer`.
    #[must_use]
    pub fn with_observer(mut self, observer: &'a dyn SynthesisObserver) -> Self {
        self.observer = observer;
        self
    }

    /// Compile the UCR with the given target and `2^(n-1)` rotation angles.
    ///
    /// Step `i` of the Gray-code cycle rotates the target by `params[i]` and
    /// then emits the ladder for the control selected by the bit flipped
    /// between codeword `i` and codeword `i + 1`.
    pub fn compile(&self, target: usize, params: &[f64]) -> SynthResult<UcrProgram> {
        let n = self.topology.num_qubits();
        validate_qubit_count(n)?;
        if target >= n {
            return Err(SynthError::InvalidTarget {
                target,
                num_qubits: n,
            });
        }
        let expected = 1usize << (n - 1);
        if params.len() != expected {
            return Err(SynthError::ParameterCountMismatch {
                expected,
                got: params.len(),
            });
        }

        let mut instructions = Vec::new();
        let walk = GrayWalk::new((n - 1) as u32)?;
        for (step, ((_, position), &angle)) in walk.zip(params).enumerate() {
            instructions.push(GateInstruction::rotation(self.rotation, target, angle));

            let control = control_for(position as usize, target, n);
            let path = self.topology.path(control, target);
            self.observer.on_ladder(step, control, path);
            instructions.extend(ladder(path)?);
        }

        Ok(UcrProgram {
            num_qubits: n,
            target,
            rotation: self.rotation,
            instructions,
        })
    }
}

/// Compile a UCR without an observer.
pub fn compile_ucr(
    topology: &Topology,
    target: usize,
    params: &[f64],
    rotation: RotationKind,
) -> SynthResult<UcrProgram> {
    UcrCompiler::new(topology)
        .with_rotation(rotation)
        .compile(target, params)
}
