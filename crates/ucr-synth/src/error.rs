//! Error types for UCR synthesis.

use thiserror::Error;

/// Errors that can occur while analysing a topology or synthesizing a UCR.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SynthError {
    /// An edge references a vertex outside `[0, num_vertices)`.
    #[error("Edge ({a}, {b}) references a vertex outside 0..{num_vertices}")]
    InvalidVertex {
        /// First endpoint of the offending edge.
        a: usize,
        /// Second endpoint of the offending edge.
        b: usize,
        /// Number of vertices in the graph.
        num_vertices: usize,
    },

    /// No path exists between two vertices.
    #[error("Graph is disconnected: no path from {from} to {to}")]
    DisconnectedGraph {
        /// Source vertex.
        from: usize,
        /// Destination vertex.
        to: usize,
    },

    /// Two codewords are not Gray-adjacent.
    #[error("Codewords {from} and {to} do not differ in exactly one bit")]
    InvalidTransition {
        /// First codeword, rendered as a bit string.
        from: String,
        /// Second codeword, rendered as a bit string.
        to: String,
    },

    /// A Gray code is wider than a codeword can hold.
    #[error("Gray code width {width} exceeds the maximum of {max}")]
    InvalidWidth {
        /// Requested width.
        width: u32,
        /// Widest supported code.
        max: u32,
    },

    /// A control resolved to the target qubit.
    #[error("Control qubit {qubit} resolves to the target")]
    SelfControl {
        /// The qubit used as both control and target.
        qubit: usize,
    },

    /// The qubit count is outside the supported range.
    #[error("A UCR needs between {min} and {max} qubits, got {num_qubits}")]
    InvalidQubitCount {
        /// Requested number of qubits.
        num_qubits: usize,
        /// Smallest supported count.
        min: usize,
        /// Largest supported count.
        max: usize,
    },

    /// The target index is not a qubit of the topology.
    #[error("Target qubit {target} is out of range for {num_qubits} qubits")]
    InvalidTarget {
        /// Requested target.
        target: usize,
        /// Number of qubits in the topology.
        num_qubits: usize,
    },

    /// The rotation angle vector has the wrong length.
    #[error("Expected {expected} rotation parameters, got {got}")]
    ParameterCountMismatch {
        /// Required number of parameters (`2^(n-1)`).
        expected: usize,
        /// Number of parameters supplied.
        got: usize,
    },

    /// Breadth-first path reconstruction could not reach the source.
    #[error("Vertex {to} is unreachable from {from}")]
    Unreachable {
        /// BFS root vertex.
        from: usize,
        /// Requested destination.
        to: usize,
    },

    /// A two-qubit gate was requested between qubits that are not coupled.
    #[error("Qubits {control} and {target} are not adjacent in the coupling map")]
    NonAdjacentGate {
        /// Control qubit.
        control: usize,
        /// Target qubit.
        target: usize,
    },
}

/// Result type for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;
