//! Breadth-first target scorer.
//!
//! An alternative target-selection heuristic that needs only an adjacency
//! list. For a candidate target `v`, the other vertices are taken in BFS
//! order (nondecreasing distance) and paired with the weight vector `A` of
//! length `n - 2`, largest first:
//!
//! ```text
//! F(v) = Σ_j  A[j] · (2·d_j − 1),   A = [2^(n-2), …, 8, 4, 2]
//! ```
//!
//! The last vertex reached carries no weight. `A` is the Gray-code flip
//! weights with one of the two weight-2 positions removed, so `F(v)` stays
//! strictly below the closed-form cost of `v`. The two objectives do not
//! always pick the same target.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cost::CostModel;
use crate::error::{SynthError, SynthResult};
use crate::graph::{AdjacencyMatrix, DistanceMatrix};
use crate::validate_qubit_count;

/// Undirected graph stored as neighbour lists.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AdjacencyList {
    neighbors: Vec<Vec<usize>>,
}

impl AdjacencyList {
    /// Build from an edge list. Out-of-range edges are rejected.
    pub fn from_edges(num_vertices: usize, edges: &[(usize, usize)]) -> SynthResult<Self> {
        let mut neighbors = vec![Vec::new(); num_vertices];
        for &(a, b) in edges {
            if a >= num_vertices || b >= num_vertices {
                return Err(SynthError::InvalidVertex { a, b, num_vertices });
            }
            if a == b || neighbors[a].contains(&b) {
                continue;
            }
            neighbors[a].push(b);
            neighbors[b].push(a);
        }
        Ok(Self { neighbors })
    }

    /// Build from an adjacency matrix; neighbours are listed in index order.
    pub fn from_matrix(matrix: &AdjacencyMatrix) -> Self {
        let neighbors = (0..matrix.len())
            .map(|i| {
                matrix
                    .row(i)
                    .iter()
                    .enumerate()
                    .filter_map(|(j, &adjacent)| adjacent.then_some(j))
                    .collect()
            })
            .collect();
        Self { neighbors }
    }

    /// Recover the graph from a distance matrix: vertices at distance 1 are
    /// adjacent. Neighbours are listed in index order.
    pub fn from_distances(distances: &DistanceMatrix) -> Self {
        let neighbors = distances
            .rows()
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .filter_map(|(j, &d)| (d == 1).then_some(j))
                    .collect()
            })
            .collect();
        Self { neighbors }
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    /// Check whether the graph has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// Neighbours of `vertex`, empty when `vertex` is out of range.
    #[inline]
    pub fn neighbors(&self, vertex: usize) -> &[usize] {
        self.neighbors.get(vertex).map_or(&[], Vec::as_slice)
    }
}

/// Result of a single-source breadth-first search.
#[derive(Debug, Clone, Default)]
pub struct BfsTree {
    /// Hop count from the root to every reached vertex.
    pub distances: FxHashMap<usize, u64>,
    /// BFS parent of every reached vertex except the root.
    pub parents: FxHashMap<usize, usize>,
    /// Reached vertices in visiting order, root first.
    pub order: Vec<usize>,
}

/// Breadth-first search from `root`.
///
/// An out-of-range `root` yields an empty tree.
pub fn bfs(graph: &AdjacencyList, root: usize) -> BfsTree {
    let mut tree = BfsTree::default();
    if root >= graph.len() {
        return tree;
    }
    let mut queue = VecDeque::new();

    tree.distances.insert(root, 0);
    tree.order.push(root);
    queue.push_back(root);

    while let Some(current) = queue.pop_front() {
        let next_distance = tree.distances[&current] + 1;
        for &neighbor in graph.neighbors(current) {
            if tree.distances.contains_key(&neighbor) {
                continue;
            }
            tree.distances.insert(neighbor, next_distance);
            tree.parents.insert(neighbor, current);
            tree.order.push(neighbor);
            queue.push_back(neighbor);
        }
    }

    tree
}

/// Rebuild the BFS path from `root` to `dest` out of parent pointers.
pub fn reconstruct_path(
    root: usize,
    dest: usize,
    parents: &FxHashMap<usize, usize>,
) -> SynthResult<Vec<usize>> {
    let mut path = vec![dest];
    let mut vertex = dest;
    while vertex != root {
        vertex = *parents
            .get(&vertex)
            .ok_or(SynthError::Unreachable { from: root, to: dest })?;
        path.push(vertex);
        if path.len() > parents.len() + 1 {
            return Err(SynthError::Unreachable { from: root, to: dest });
        }
    }
    path.reverse();
    Ok(path)
}

/// Scorer weights for `n` vertices: `2^(n-1-i)` for `i` in `1..n-2`, then 2.
///
/// Empty below three vertices.
pub fn weight_vector(num_vertices: usize) -> Vec<u64> {
    if num_vertices < 3 {
        return vec![];
    }
    let mut weights: Vec<u64> = (1..num_vertices - 2)
        .map(|i| 1u64 << (num_vertices - 1 - i))
        .collect();
    weights.push(2);
    weights
}

/// Score `F(v)` of one candidate target.
pub fn score(graph: &AdjacencyList, target: usize, weights: &[u64]) -> SynthResult<u64> {
    if target >= graph.len() {
        return Err(SynthError::InvalidTarget {
            target,
            num_qubits: graph.len(),
        });
    }
    let tree = bfs(graph, target);
    if tree.order.len() != graph.len() {
        let missing = (0..graph.len())
            .find(|v| !tree.distances.contains_key(v))
            .unwrap_or(target);
        return Err(SynthError::DisconnectedGraph {
            from: target,
            to: missing,
        });
    }

    Ok(tree
        .order
        .iter()
        .skip(1)
        .zip(weights)
        .map(|(v, &w)| w * (2 * tree.distances[v] - 1))
        .sum())
}

/// Target chosen by the breadth-first scorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BfsSelection {
    /// Lowest-indexed vertex with the minimal score.
    pub target: usize,
    /// `F(v)` for every vertex.
    pub scores: Vec<u64>,
}

/// Score every vertex and return the minimizer.
///
/// Ties go to the lowest index.
pub fn find_target(graph: &AdjacencyList) -> SynthResult<BfsSelection> {
    let n = graph.len();
    validate_qubit_count(n)?;

    let weights = weight_vector(n);
    let scores = (0..n)
        .map(|v| score(graph, v, &weights))
        .collect::<SynthResult<Vec<_>>>()?;

    let mut target = 0;
    for (v, &s) in scores.iter().enumerate() {
        if s < scores[target] {
            target = v;
        }
    }

    Ok(BfsSelection { target, scores })
}

/// The breadth-first scorer as a [`CostModel`].
///
/// Tables produced by this model hold `F(v)` scores, not CNOT counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct BfsScore;

impl CostModel for BfsScore {
    fn name(&self) -> &'static str {
        "bfs"
    }

    fn target_cost(&self, distances: &DistanceMatrix, target: usize) -> SynthResult<u64> {
        let graph = AdjacencyList::from_distances(distances);
        validate_qubit_count(graph.len())?;
        score(&graph, target, &weight_vector(graph.len()))
    }
}
