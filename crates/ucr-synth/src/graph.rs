//! Graph distance engine.
//!
//! Builds the adjacency matrix of an undirected, unweighted qubit coupling
//! graph and computes all-pairs shortest distances with a symmetric
//! Floyd–Warshall relaxation. The next-hop matrix produced alongside the
//! distances fixes exactly one shortest path per vertex pair; that choice is
//! reproducible and is what the ladder compiler routes along.
//!
//! # Example
//!
//! ```
//! use ucr_synth::graph::Topology;
//!
//! // 0-1-2-3-4
//! let topology = Topology::new(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]).unwrap();
//!
//! assert_eq!(topology.distances().get(0, 4), 4);
//! assert_eq!(topology.path(0, 4), &[0, 1, 2, 3, 4]);
//! ```

use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};

use crate::bfs::AdjacencyList;
use crate::error::{SynthError, SynthResult};
use crate::observer::{NoopObserver, SynthesisObserver};

/// Distance reported for vertex pairs with no connecting path.
pub const UNREACHABLE: u64 = 1_000_000_000_000;

/// Symmetric boolean adjacency matrix with a `false` diagonal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjacencyMatrix {
    cells: Vec<Vec<bool>>,
}

impl AdjacencyMatrix {
    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check whether the matrix has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Check whether `a` and `b` share an edge.
    #[inline]
    pub fn is_adjacent(&self, a: usize, b: usize) -> bool {
        self.cells
            .get(a)
            .and_then(|row| row.get(b))
            .copied()
            .unwrap_or(false)
    }

    /// Row `i` of the matrix, empty when `i` is out of range.
    pub fn row(&self, i: usize) -> &[bool] {
        self.cells.get(i).map_or(&[], Vec::as_slice)
    }
}

/// Build the adjacency matrix of an undirected graph from its edge list.
///
/// Self-loops are ignored so the diagonal stays `false`; repeated edges
/// collapse onto the same cell.
pub fn build_adjacency(num_vertices: usize, edges: &[(usize, usize)]) -> SynthResult<AdjacencyMatrix> {
    let mut cells = vec![vec![false; num_vertices]; num_vertices];
    for &(a, b) in edges {
        if a >= num_vertices || b >= num_vertices {
            return Err(SynthError::InvalidVertex { a, b, num_vertices });
        }
        if a == b {
            continue;
        }
        cells[a][b] = true;
        cells[b][a] = true;
    }
    Ok(AdjacencyMatrix { cells })
}

/// All-pairs shortest distances.
///
/// `get(i, j)` is the number of edges on a shortest path, or [`UNREACHABLE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceMatrix {
    rows: Vec<Vec<u64>>,
}

impl DistanceMatrix {
    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check whether the matrix has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Shortest distance between `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is out of range. Use [`DistanceMatrix::checked`]
    /// for a fallible lookup.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> u64 {
        self.rows[i][j]
    }

    /// Check whether `j` can be reached from `i`. Out-of-range pairs are not.
    #[inline]
    pub fn is_reachable(&self, i: usize, j: usize) -> bool {
        self.rows
            .get(i)
            .and_then(|row| row.get(j))
            .is_some_and(|&d| d != UNREACHABLE)
    }

    /// Shortest distance between `i` and `j`, failing on unreachable or
    /// out-of-range pairs.
    pub fn checked(&self, i: usize, j: usize) -> SynthResult<u64> {
        if self.is_reachable(i, j) {
            Ok(self.rows[i][j])
        } else {
            Err(SynthError::DisconnectedGraph { from: i, to: j })
        }
    }

    /// All rows of the matrix.
    pub fn rows(&self) -> &[Vec<u64>] {
        &self.rows
    }
}

/// Next-hop matrix produced by [`all_pairs_shortest`].
///
/// `hop(i, j)` is the vertex one step from `i` toward `j`; `hop(i, i) == i`
/// and unreachable pairs have no hop. Only [`materialize_paths`] reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextHopMatrix {
    hops: Vec<Vec<Option<usize>>>,
}

impl NextHopMatrix {
    #[inline]
    fn hop(&self, i: usize, j: usize) -> Option<usize> {
        self.hops[i][j]
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.hops.len()
    }

    /// Check whether the matrix has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }
}

/// Compute all-pairs shortest distances and next hops.
///
/// Floyd–Warshall restricted to the undirected, unweighted case: only the
/// upper triangle is relaxed and both halves are written on improvement.
/// Pivots that cannot reach either endpoint are skipped, so the
/// [`UNREACHABLE`] sentinel is never summed.
pub fn all_pairs_shortest(adjacency: &AdjacencyMatrix) -> (DistanceMatrix, NextHopMatrix) {
    let n = adjacency.len();
    let mut dist = vec![vec![UNREACHABLE; n]; n];
    let mut next = vec![vec![None; n]; n];

    for i in 0..n {
        for j in 0..n {
            if i == j {
                dist[i][j] = 0;
                next[i][j] = Some(i);
            } else if adjacency.is_adjacent(i, j) {
                dist[i][j] = 1;
                next[i][j] = Some(j);
            }
        }
    }

    for k in 0..n {
        for i in 0..n {
            if dist[i][k] == UNREACHABLE {
                continue;
            }
            for j in (i + 1)..n {
                if dist[k][j] == UNREACHABLE {
                    continue;
                }
                let through = dist[i][k] + dist[k][j];
                if dist[i][j] > through {
                    dist[i][j] = through;
                    dist[j][i] = through;
                    next[i][j] = next[i][k];
                    next[j][i] = next[j][k];
                }
            }
        }
    }

    (DistanceMatrix { rows: dist }, NextHopMatrix { hops: next })
}

/// One committed shortest path per ordered vertex pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathMatrix {
    paths: Vec<Vec<Vec<usize>>>,
}

impl PathMatrix {
    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Check whether the matrix has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Vertices on the committed shortest path from `i` to `j`, inclusive.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is out of range.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> &[usize] {
        &self.paths[i][j]
    }
}

/// Reconstruct every shortest path from the next-hop matrix.
///
/// Paths with `i <= j` are walked hop by hop; the lower triangle is the
/// reverse of the upper one, so `path[j][i] == reverse(path[i][j])` holds
/// exactly.
pub fn materialize_paths(next: &NextHopMatrix) -> SynthResult<PathMatrix> {
    let n = next.len();
    let mut paths = vec![vec![Vec::new(); n]; n];
    for i in 0..n {
        for j in i..n {
            let path = walk(next, i, j)?;
            let mut reversed = path.clone();
            reversed.reverse();
            paths[i][j] = path;
            paths[j][i] = reversed;
        }
    }
    Ok(PathMatrix { paths })
}

fn walk(next: &NextHopMatrix, from: usize, to: usize) -> SynthResult<Vec<usize>> {
    let disconnected = SynthError::DisconnectedGraph { from, to };
    let mut path = vec![from];
    let mut vertex = next.hop(from, to).ok_or_else(|| disconnected.clone())?;
    while vertex != to {
        path.push(vertex);
        // A shortest path visits each vertex at most once.
        if path.len() > next.len() {
            return Err(disconnected);
        }
        vertex = next.hop(vertex, to).ok_or_else(|| disconnected.clone())?;
    }
    if from != to {
        path.push(to);
    }
    Ok(path)
}

/// Count the connected components of a graph.
pub fn count_components(num_vertices: usize, edges: &[(usize, usize)]) -> SynthResult<usize> {
    let mut graph = UnGraph::<(), ()>::with_capacity(num_vertices, edges.len());
    for _ in 0..num_vertices {
        graph.add_node(());
    }
    for &(a, b) in edges {
        if a >= num_vertices || b >= num_vertices {
            return Err(SynthError::InvalidVertex { a, b, num_vertices });
        }
        graph.add_edge(NodeIndex::new(a), NodeIndex::new(b), ());
    }
    Ok(petgraph::algo::connected_components(&graph))
}

/// Check that every vertex is reachable from every other.
pub fn is_connected(num_vertices: usize, edges: &[(usize, usize)]) -> SynthResult<bool> {
    Ok(count_components(num_vertices, edges)? <= 1)
}

/// A qubit coupling graph with its shortest-path data precomputed.
///
/// The matrices are derived once on construction and never change, so a
/// single `Topology` serves every target evaluation and every compilation.
#[derive(Debug, Clone)]
pub struct Topology {
    edges: Vec<(usize, usize)>,
    adjacency: AdjacencyMatrix,
    distances: DistanceMatrix,
    paths: PathMatrix,
}

impl Topology {
    /// Build a topology from its edge list.
    ///
    /// Fails with [`SynthError::InvalidVertex`] on out-of-range edges and
    /// [`SynthError::DisconnectedGraph`] if some pair has no path.
    pub fn new(num_qubits: usize, edges: &[(usize, usize)]) -> SynthResult<Self> {
        Self::build(num_qubits, edges, &NoopObserver)
    }

    /// Build a topology, reporting the distance matrix to `observer`.
    pub fn build(
        num_qubits: usize,
        edges: &[(usize, usize)],
        observer: &dyn SynthesisObserver,
    ) -> SynthResult<Self> {
        let adjacency = build_adjacency(num_qubits, edges)?;
        let (distances, next) = all_pairs_shortest(&adjacency);
        observer.on_distances(&distances);
        let paths = materialize_paths(&next)?;

        let mut unique = Vec::with_capacity(edges.len());
        for &(a, b) in edges {
            if a != b && !unique.contains(&(a, b)) && !unique.contains(&(b, a)) {
                unique.push((a, b));
            }
        }

        Ok(Self {
            edges: unique,
            adjacency,
            distances,
            paths,
        })
    }

    /// Create a linear chain 0-1-2-...
    pub fn linear(num_qubits: usize) -> SynthResult<Self> {
        let edges: Vec<_> = (1..num_qubits).map(|i| (i - 1, i)).collect();
        Self::new(num_qubits, &edges)
    }

    /// Create a fully connected topology.
    pub fn full(num_qubits: usize) -> SynthResult<Self> {
        let mut edges = Vec::new();
        for i in 0..num_qubits {
            for j in (i + 1)..num_qubits {
                edges.push((i, j));
            }
        }
        Self::new(num_qubits, &edges)
    }

    /// Create a star topology centred on qubit 0.
    pub fn star(num_qubits: usize) -> SynthResult<Self> {
        let edges: Vec<_> = (1..num_qubits).map(|i| (0, i)).collect();
        Self::new(num_qubits, &edges)
    }

    /// Number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.adjacency.len()
    }

    /// Coupling edges, without duplicates or self-loops.
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// The adjacency matrix.
    pub fn adjacency(&self) -> &AdjacencyMatrix {
        &self.adjacency
    }

    /// Check if two qubits are directly coupled.
    #[inline]
    pub fn is_adjacent(&self, a: usize, b: usize) -> bool {
        self.adjacency.is_adjacent(a, b)
    }

    /// Neighbours of a qubit in increasing index order; none when `qubit` is
    /// out of range.
    pub fn neighbors(&self, qubit: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency
            .row(qubit)
            .iter()
            .enumerate()
            .filter_map(|(j, &adjacent)| adjacent.then_some(j))
    }

    /// The all-pairs distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// The committed shortest paths.
    pub fn paths(&self) -> &PathMatrix {
        &self.paths
    }

    /// Committed shortest path from `from` to `to`, inclusive.
    ///
    /// # Panics
    ///
    /// Panics if either qubit is out of range.
    #[inline]
    pub fn path(&self, from: usize, to: usize) -> &[usize] {
        self.paths.get(from, to)
    }

    /// Adjacency-list view for the breadth-first scorer.
    pub fn adjacency_list(&self) -> AdjacencyList {
        AdjacencyList::from_matrix(&self.adjacency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_adjacency_symmetric() {
        let adjacency = build_adjacency(3, &[(0, 1), (2, 1)]).unwrap();
        assert!(adjacency.is_adjacent(0, 1));
        assert!(adjacency.is_adjacent(1, 0));
        assert!(adjacency.is_adjacent(1, 2));
        assert!(!adjacency.is_adjacent(0, 2));
        assert!(!adjacency.is_adjacent(1, 1));
    }

    #[test]
    fn test_build_adjacency_rejects_out_of_range() {
        let err = build_adjacency(3, &[(0, 1), (1, 3)]).unwrap_err();
        assert_eq!(
            err,
            SynthError::InvalidVertex {
                a: 1,
                b: 3,
                num_vertices: 3
            }
        );
    }

    #[test]
    fn test_self_loop_ignored() {
        let adjacency = build_adjacency(2, &[(0, 0), (0, 1)]).unwrap();
        assert!(!adjacency.is_adjacent(0, 0));
        assert!(adjacency.is_adjacent(0, 1));
    }

    #[test]
    fn test_linear_distances() {
        let adjacency = build_adjacency(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]).unwrap();
        let (dist, _) = all_pairs_shortest(&adjacency);
        assert_eq!(dist.get(0, 4), 4);
        assert_eq!(dist.get(4, 0), 4);
        assert_eq!(dist.get(1, 3), 2);
        assert_eq!(dist.get(2, 2), 0);
    }

    #[test]
    fn test_unreachable_sentinel() {
        let adjacency = build_adjacency(4, &[(0, 1), (2, 3)]).unwrap();
        let (dist, _) = all_pairs_shortest(&adjacency);
        assert_eq!(dist.get(0, 1), 1);
        assert_eq!(dist.get(0, 2), UNREACHABLE);
        assert!(!dist.is_reachable(3, 1));
        assert_eq!(
            dist.checked(1, 2),
            Err(SynthError::DisconnectedGraph { from: 1, to: 2 })
        );
    }

    #[test]
    fn test_out_of_range_lookups() {
        let topology = Topology::linear(3).unwrap();
        assert!(topology.adjacency().row(3).is_empty());
        assert_eq!(topology.neighbors(5).count(), 0);
        assert!(!topology.is_adjacent(0, 3));
        assert!(!topology.distances().is_reachable(0, 3));
        assert_eq!(
            topology.distances().checked(3, 0),
            Err(SynthError::DisconnectedGraph { from: 3, to: 0 })
        );
    }

    #[test]
    #[should_panic]
    fn test_distance_get_out_of_range_panics() {
        let topology = Topology::linear(3).unwrap();
        let _ = topology.distances().get(0, 3);
    }

    #[test]
    fn test_materialize_paths_linear() {
        let adjacency = build_adjacency(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]).unwrap();
        let (_, next) = all_pairs_shortest(&adjacency);
        let paths = materialize_paths(&next).unwrap();
        assert_eq!(paths.get(0, 4), &[0, 1, 2, 3, 4]);
        assert_eq!(paths.get(4, 0), &[4, 3, 2, 1, 0]);
        assert_eq!(paths.get(3, 3), &[3]);
    }

    #[test]
    fn test_materialize_paths_disconnected() {
        let adjacency = build_adjacency(3, &[(0, 1)]).unwrap();
        let (_, next) = all_pairs_shortest(&adjacency);
        let err = materialize_paths(&next).unwrap_err();
        assert_eq!(err, SynthError::DisconnectedGraph { from: 0, to: 2 });
    }

    #[test]
    fn test_path_choice_is_first_pivot() {
        // Square 0-1-3-2-0: two shortest paths 0->3, the relaxation keeps
        // the one through the lowest pivot.
        let topology = Topology::new(4, &[(0, 1), (1, 3), (3, 2), (2, 0)]).unwrap();
        assert_eq!(topology.path(0, 3), &[0, 1, 3]);
        assert_eq!(topology.path(3, 0), &[3, 1, 0]);
    }

    #[test]
    fn test_topology_edges_deduplicated() {
        let topology = Topology::new(3, &[(0, 1), (1, 0), (1, 2), (2, 2)]).unwrap();
        assert_eq!(topology.edges(), &[(0, 1), (1, 2)]);
        assert_eq!(topology.neighbors(1).collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn test_topology_factories() {
        let star = Topology::star(5).unwrap();
        assert_eq!(star.distances().get(1, 4), 2);
        assert_eq!(star.path(1, 4), &[1, 0, 4]);

        let full = Topology::full(4).unwrap();
        assert!(full.distances().rows().iter().flatten().all(|&d| d <= 1));

        let linear = Topology::linear(3).unwrap();
        assert_eq!(linear.num_qubits(), 3);
        assert_eq!(linear.edges().len(), 2);
    }

    #[test]
    fn test_count_components() {
        assert_eq!(count_components(4, &[(0, 1), (2, 3)]).unwrap(), 2);
        assert_eq!(count_components(3, &[(0, 1), (1, 2)]).unwrap(), 1);
        assert!(count_components(2, &[(0, 5)]).is_err());
        assert!(is_connected(3, &[(0, 2), (2, 1)]).unwrap());
        assert!(!is_connected(3, &[(0, 1)]).unwrap());
    }
}
