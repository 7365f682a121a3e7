//! CNOT-cost estimation and target selection.
//!
//! A UCR on `n` qubits walks the `(n-1)`-bit Gray code cyclically. Every
//! step flips one codeword position, and that position names the control
//! whose ladder is emitted next. A ladder to a control at distance `d` costs
//! `2d - 1` CNOTs, so the total cost of a target is a weighted sum of
//! distances where the weight of a position is how often it flips in one
//! cycle: twice for position 0 and `2^p` for every other position `p`.
//!
//! Two models compute the same number:
//! - [`ClosedFormCost`] evaluates the weighted sum directly.
//! - [`GrayWalkCost`] walks the schedule step by step and serves as the
//!   oracle for the closed form. It is `O(2^n)` per target.
//!
//! [`BfsScore`] plugs the breadth-first heuristic into the same trait.

use serde::{Deserialize, Serialize};

use crate::bfs::BfsScore;
use crate::error::{SynthError, SynthResult};
use crate::graph::DistanceMatrix;
use crate::gray::GrayWalk;
use crate::observer::{NoopObserver, SynthesisObserver};
use crate::validate_qubit_count;

/// Map a Gray-code position to the control qubit it drives.
///
/// Positions run over `0..n-1`. The position equal to the target is
/// redirected to qubit `n-1`, so every qubit other than the target is used
/// as a control exactly once and the result never equals `target`.
#[inline]
pub fn control_for(position: usize, target: usize, num_qubits: usize) -> usize {
    if position == target {
        num_qubits - 1
    } else {
        position
    }
}

/// How many times a Gray-code position flips in one full cycle.
#[inline]
pub fn position_weight(position: usize) -> u64 {
    if position == 0 { 2 } else { 1u64 << position }
}

/// Per-target CNOT counts together with the minimizing targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostTable {
    /// Every target whose cost equals the minimum, in increasing order.
    pub optimal_indices: Vec<usize>,
    /// Cost of each target, indexed by qubit.
    pub costs: Vec<u64>,
}

impl CostTable {
    /// Build a table from per-target costs. Ties are all kept.
    pub fn from_costs(costs: Vec<u64>) -> Self {
        let optimal_indices = match costs.iter().min() {
            Some(&min) => costs
                .iter()
                .enumerate()
                .filter_map(|(i, &c)| (c == min).then_some(i))
                .collect(),
            None => vec![],
        };
        Self {
            optimal_indices,
            costs,
        }
    }

    /// The smallest cost.
    pub fn min_cost(&self) -> Option<u64> {
        self.costs.iter().min().copied()
    }

    /// The lowest-indexed optimal target.
    pub fn best_target(&self) -> Option<usize> {
        self.optimal_indices.first().copied()
    }
}

/// A way of counting the CNOTs of a topology-constrained UCR.
pub trait CostModel {
    /// Short name used in logs and reports.
    fn name(&self) -> &'static str;

    /// CNOT count of the UCR with `target` as its target qubit.
    fn target_cost(&self, distances: &DistanceMatrix, target: usize) -> SynthResult<u64>;

    /// Evaluate every target and select the minimizing ones.
    fn evaluate(
        &self,
        distances: &DistanceMatrix,
        observer: &dyn SynthesisObserver,
    ) -> SynthResult<CostTable> {
        let n = distances.len();
        validate_qubit_count(n)?;

        let mut costs = Vec::with_capacity(n);
        for target in 0..n {
            let cost = self.target_cost(distances, target)?;
            observer.on_target_cost(self.name(), target, cost);
            costs.push(cost);
        }

        let table = CostTable::from_costs(costs);
        observer.on_selection(self.name(), &table);
        Ok(table)
    }
}

/// Closed-form weighted sum over control positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClosedFormCost;

impl CostModel for ClosedFormCost {
    fn name(&self) -> &'static str {
        "closed-form"
    }

    fn target_cost(&self, distances: &DistanceMatrix, target: usize) -> SynthResult<u64> {
        let n = check_target(distances, target)?;
        let mut total = 0;
        for position in 0..n - 1 {
            let control = control_for(position, target, n);
            let d = distances.checked(control, target)?;
            total += position_weight(position) * (2 * d - 1);
        }
        Ok(total)
    }
}

/// Step-by-step simulation of the Gray-code schedule.
///
/// Walks the first half of the cycle and doubles the total: the second half
/// mirrors the first, flipping every position the same number of times.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrayWalkCost;

impl CostModel for GrayWalkCost {
    fn name(&self) -> &'static str {
        "exhaustive"
    }

    fn target_cost(&self, distances: &DistanceMatrix, target: usize) -> SynthResult<u64> {
        let n = check_target(distances, target)?;
        let width = (n - 1) as u32;
        let half = 1usize << (width - 1);

        let mut total = 0;
        for (_, position) in GrayWalk::new(width)?.take(half) {
            let control = control_for(position as usize, target, n);
            total += 2 * distances.checked(control, target)? - 1;
        }
        Ok(total * 2)
    }
}

/// Selects which cost model drives target selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Estimator {
    /// [`ClosedFormCost`], the default optimizer.
    #[default]
    ClosedForm,
    /// [`GrayWalkCost`], the exhaustive oracle.
    Exhaustive,
    /// [`BfsScore`], the breadth-first heuristic.
    Bfs,
}

impl Estimator {
    /// Every estimator, in report order.
    pub const ALL: [Estimator; 3] = [
        Estimator::ClosedForm,
        Estimator::Exhaustive,
        Estimator::Bfs,
    ];

    /// The cost model behind this estimator.
    pub fn model(self) -> &'static dyn CostModel {
        match self {
            Estimator::ClosedForm => &ClosedFormCost,
            Estimator::Exhaustive => &GrayWalkCost,
            Estimator::Bfs => &BfsScore,
        }
    }

    /// Evaluate every target with this estimator.
    pub fn evaluate(
        self,
        distances: &DistanceMatrix,
        observer: &dyn SynthesisObserver,
    ) -> SynthResult<CostTable> {
        self.model().evaluate(distances, observer)
    }
}

/// Closed-form costs of every target.
pub fn closed_form_costs(distances: &DistanceMatrix) -> SynthResult<CostTable> {
    ClosedFormCost.evaluate(distances, &NoopObserver)
}

/// Exhaustive Gray-walk costs of every target.
pub fn exhaustive_costs(distances: &DistanceMatrix) -> SynthResult<CostTable> {
    GrayWalkCost.evaluate(distances, &NoopObserver)
}

fn check_target(distances: &DistanceMatrix, target: usize) -> SynthResult<usize> {
    let n = distances.len();
    validate_qubit_count(n)?;
    if target >= n {
        return Err(SynthError::InvalidTarget {
            target,
            num_qubits: n,
        });
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Topology;

    #[test]
    fn test_control_for_substitutes_target() {
        assert_eq!(control_for(0, 2, 4), 0);
        assert_eq!(control_for(2, 2, 4), 3);
        assert_eq!(control_for(1, 3, 4), 1);
    }

    #[test]
    fn test_position_weights() {
        let weights: Vec<u64> = (0..5).map(position_weight).collect();
        assert_eq!(weights, vec![2, 2, 4, 8, 16]);
    }

    #[test]
    fn test_closed_form_falcon_r511l() {
        let topology = Topology::new(5, &[(0, 1), (1, 2), (1, 3), (3, 4)]).unwrap();
        let table = closed_form_costs(topology.distances()).unwrap();
        assert_eq!(table.costs, vec![48, 20, 52, 28, 44]);
        assert_eq!(table.optimal_indices, vec![1]);
        assert_eq!(table.min_cost(), Some(20));
        assert_eq!(table.best_target(), Some(1));
    }

    #[test]
    fn test_exhaustive_matches_closed_form() {
        let topology = Topology::new(5, &[(0, 1), (1, 2), (1, 3), (3, 4)]).unwrap();
        let closed = closed_form_costs(topology.distances()).unwrap();
        let exhaustive = exhaustive_costs(topology.distances()).unwrap();
        assert_eq!(closed, exhaustive);
    }

    #[test]
    fn test_two_qubits() {
        let topology = Topology::linear(2).unwrap();
        let table = exhaustive_costs(topology.distances()).unwrap();
        assert_eq!(table.costs, vec![2, 2]);
        assert_eq!(table.optimal_indices, vec![0, 1]);
    }

    #[test]
    fn test_rejects_single_qubit() {
        let topology = Topology::new(1, &[]).unwrap();
        let err = closed_form_costs(topology.distances()).unwrap_err();
        assert!(matches!(err, SynthError::InvalidQubitCount { num_qubits: 1, .. }));
    }

    #[test]
    fn test_rejects_invalid_target() {
        let topology = Topology::linear(3).unwrap();
        let err = ClosedFormCost
            .target_cost(topology.distances(), 3)
            .unwrap_err();
        assert_eq!(
            err,
            SynthError::InvalidTarget {
                target: 3,
                num_qubits: 3
            }
        );
    }

    #[test]
    fn test_from_costs_keeps_ties() {
        let table = CostTable::from_costs(vec![5, 3, 7, 3]);
        assert_eq!(table.optimal_indices, vec![1, 3]);
        assert!(CostTable::from_costs(vec![]).optimal_indices.is_empty());
    }

    #[test]
    fn test_estimator_dispatch() {
        let topology = Topology::star(4).unwrap();
        let closed = Estimator::ClosedForm
            .evaluate(topology.distances(), &NoopObserver)
            .unwrap();
        let exhaustive = Estimator::Exhaustive
            .evaluate(topology.distances(), &NoopObserver)
            .unwrap();
        assert_eq!(closed, exhaustive);
        assert_eq!(closed.optimal_indices, vec![0]);
        assert_eq!(Estimator::default(), Estimator::ClosedForm);
        assert_eq!(Estimator::Exhaustive.model().name(), "exhaustive");
    }

    #[test]
    fn test_bfs_estimator() {
        let topology = Topology::linear(5).unwrap();
        let table = Estimator::Bfs
            .evaluate(topology.distances(), &NoopObserver)
            .unwrap();
        assert_eq!(table.costs, vec![30, 18, 18, 18, 30]);
        assert_eq!(table.best_target(), Some(1));
        assert_eq!(
            serde_json::to_string(&Estimator::ALL).unwrap(),
            r#"["closed-form","exhaustive","bfs"]"#
        );
    }
}
