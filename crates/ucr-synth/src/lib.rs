//! Topology-constrained synthesis of uniformly controlled rotations
//!
//! A uniformly controlled rotation (UCR) rotates a target qubit by a
//! different angle for every bit pattern of the remaining qubits. The
//! textbook decomposition alternates target rotations with CNOTs from each
//! control, ordered by a Gray code. On hardware with restricted coupling
//! most controls are not adjacent to the target, so every logical CNOT is
//! emulated by a ladder of adjacent-pair CNOTs along a shortest path.
//!
//! # Pipeline
//!
//! ```text
//! edges ──► graph::Topology ──► distances ──► cost::CostModel ──► target
//!                 │                                                 │
//!                 └──── paths ───► ladder::UcrCompiler ◄── gray ────┘
//!                                          │
//!                                          ▼
//!                               UcrProgram ──► emit::emit_qasm
//! ```
//!
//! [`bfs::find_target`] is an alternative selector that needs only an
//! adjacency list.
//!
//! # Example
//!
//! ```rust
//! use ucr_synth::{ClosedFormCost, CostModel, NoopObserver, RotationKind, Topology, UcrCompiler};
//!
//! // IBM Falcon r5.11L
//! let topology = Topology::new(5, &[(0, 1), (1, 2), (1, 3), (3, 4)]).unwrap();
//!
//! let table = ClosedFormCost
//!     .evaluate(topology.distances(), &NoopObserver)
//!     .unwrap();
//! assert_eq!(table.optimal_indices, vec![1]);
//!
//! let params = vec![0.1; 16];
//! let program = UcrCompiler::new(&topology)
//!     .with_rotation(RotationKind::Ry)
//!     .compile(1, &params)
//!     .unwrap();
//! assert_eq!(program.two_qubit_count() as u64, table.costs[1]);
//! ```

pub mod bfs;
pub mod cost;
pub mod emit;
pub mod error;
pub mod graph;
pub mod gray;
pub mod hashing;
pub mod instruction;
pub mod ladder;
pub mod observer;

pub use bfs::{AdjacencyList, BfsScore, BfsSelection, find_target};
pub use cost::{ClosedFormCost, CostModel, CostTable, Estimator, GrayWalkCost};
pub use emit::{EmitOptions, emit_qasm};
pub use error::{SynthError, SynthResult};
pub use graph::{DistanceMatrix, PathMatrix, Topology};
pub use hashing::{HashingForm, compile_hashing_circuit};
pub use instruction::{GateInstruction, RotationKind};
pub use ladder::{UcrCompiler, UcrProgram, compile_ucr};
pub use observer::{NoopObserver, SynthesisObserver, TracingObserver};

/// Fewest qubits a UCR can act on: one target and one control.
pub const MIN_QUBITS: usize = 2;

/// Most qubits supported; codewords and CNOT counts are 64-bit.
pub const MAX_QUBITS: usize = 32;

/// Reject qubit counts outside `MIN_QUBITS..=MAX_QUBITS`.
pub fn validate_qubit_count(num_qubits: usize) -> SynthResult<()> {
    if (MIN_QUBITS..=MAX_QUBITS).contains(&num_qubits) {
        Ok(())
    } else {
        Err(SynthError::InvalidQubitCount {
            num_qubits,
            min: MIN_QUBITS,
            max: MAX_QUBITS,
        })
    }
}
