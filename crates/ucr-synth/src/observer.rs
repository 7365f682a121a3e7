//! Observer sink for synthesis events.
//!
//! The library never installs a logging subscriber. Components report what
//! they compute through a [`SynthesisObserver`] passed in by the caller; the
//! binary injects [`TracingObserver`] to turn those reports into structured
//! `tracing` events.

use tracing::{debug, info, trace};

use crate::cost::CostTable;
use crate::graph::DistanceMatrix;

/// Receives progress events from the synthesis components.
///
/// Every method has an empty default body, so implementors only override
/// the events they care about.
pub trait SynthesisObserver {
    /// The all-pairs distance matrix has been computed.
    fn on_distances(&self, _distances: &DistanceMatrix) {}

    /// A cost model evaluated one candidate target.
    fn on_target_cost(&self, _model: &str, _target: usize, _cost: u64) {}

    /// A cost model finished evaluating every target.
    fn on_selection(&self, _model: &str, _table: &CostTable) {}

    /// The compiler emitted the ladder for one Gray-code step.
    fn on_ladder(&self, _step: usize, _control: usize, _path: &[usize]) {}
}

/// Observer that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SynthesisObserver for NoopObserver {}

/// Observer that forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SynthesisObserver for TracingObserver {
    fn on_distances(&self, distances: &DistanceMatrix) {
        let diameter = distances
            .rows()
            .iter()
            .flatten()
            .copied()
            .filter(|&d| d != crate::graph::UNREACHABLE)
            .max()
            .unwrap_or(0);
        debug!(
            num_qubits = distances.len(),
            diameter, "Computed all-pairs shortest distances"
        );
    }

    fn on_target_cost(&self, model: &str, target: usize, cost: u64) {
        debug!(model, qubit = target, cost, "Evaluated target");
    }

    fn on_selection(&self, model: &str, table: &CostTable) {
        info!(
            model,
            optimal = ?table.optimal_indices,
            min_cost = ?table.min_cost(),
            "Selected optimal targets"
        );
    }

    fn on_ladder(&self, step: usize, control: usize, path: &[usize]) {
        trace!(
            step,
            control,
            ?path,
            cnots = (2 * path.len()).saturating_sub(3),
            "Emitted ladder"
        );
    }
}
