//! Quantum-hashing circuits.
//!
//! A hashing circuit puts every control qubit in superposition and then
//! applies a UCR whose angles encode the hashed value. The caller supplies
//! one coefficient per control pattern; [`modified_params`] maps those
//! coefficients to the per-step angles expected by the Gray-code schedule.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::error::{SynthError, SynthResult};
use crate::graph::Topology;
use crate::instruction::{GateInstruction, RotationKind};
use crate::ladder::{UcrCompiler, UcrProgram};
use crate::observer::SynthesisObserver;

/// Whether the hash is encoded in amplitudes or in phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashingForm {
    /// Encode in amplitudes with `Ry` rotations.
    Amplitude,
    /// Encode in phases with `Rz` rotations.
    Phase,
}

impl HashingForm {
    /// Rotation axis used for this form.
    pub fn rotation(self) -> RotationKind {
        match self {
            HashingForm::Amplitude => RotationKind::Ry,
            HashingForm::Phase => RotationKind::Rz,
        }
    }
}

/// The `2^k × 2^k` sign matrix `M[i][j] = (-1)^(popcount(i & gray(j)))`.
pub fn gray_parity_matrix(num_controls: u32) -> Array2<f64> {
    let size = 1usize << num_controls;
    Array2::from_shape_fn((size, size), |(i, j)| {
        let gray = j ^ (j >> 1);
        if (i & gray).count_ones() % 2 == 0 {
            1.0
        } else {
            -1.0
        }
    })
}

/// Map per-pattern coefficients to Gray-schedule angles: `2^-k · Mᵀ · a`.
pub fn modified_params(params: &[f64], num_controls: u32) -> SynthResult<Vec<f64>> {
    let expected = 1usize << num_controls;
    if params.len() != expected {
        return Err(SynthError::ParameterCountMismatch {
            expected,
            got: params.len(),
        });
    }
    let a = Array1::from_vec(params.to_vec());
    let scale = 1.0 / expected as f64;
    let transformed = gray_parity_matrix(num_controls).t().dot(&a) * scale;
    Ok(transformed.to_vec())
}

/// Build a hashing circuit: Hadamards on every non-target qubit followed by
/// the UCR of the transformed coefficients.
pub fn compile_hashing_circuit(
    topology: &Topology,
    target: usize,
    params: &[f64],
    form: HashingForm,
    observer: &dyn SynthesisObserver,
) -> SynthResult<UcrProgram> {
    let n = topology.num_qubits();
    crate::validate_qubit_count(n)?;
    let angles = modified_params(params, (n - 1) as u32)?;

    let ucr = UcrCompiler::new(topology)
        .with_rotation(form.rotation())
        .with_observer(observer)
        .compile(target, &angles)?;

    let mut instructions: Vec<GateInstruction> = (0..n)
        .filter(|&q| q != target)
        .map(|qubit| GateInstruction::Hadamard { qubit })
        .collect();
    instructions.extend(ucr.instructions);

    Ok(UcrProgram {
        instructions,
        ..ucr
    })
}
