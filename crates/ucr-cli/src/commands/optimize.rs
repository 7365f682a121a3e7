//! Optimize command implementation.

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use ucr_synth::{CostTable, Estimator, SynthesisObserver, TracingObserver};

use super::common::{check_exhaustive, load_topology, parse_estimator};

#[derive(Debug, Default, Serialize)]
struct OptimizeReport {
    topology: String,
    num_qubits: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    closed_form: Option<CostTable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exhaustive: Option<CostTable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bfs: Option<CostTable>,
}

/// Advances a progress bar per evaluated target and forwards every event.
struct ProgressObserver<'a> {
    bar: ProgressBar,
    inner: &'a dyn SynthesisObserver,
}

impl<'a> ProgressObserver<'a> {
    fn new(len: usize, inner: &'a dyn SynthesisObserver) -> Result<Self> {
        let bar = ProgressBar::new(len as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} targets")?
                .progress_chars("=> "),
        );
        Ok(Self { bar, inner })
    }
}

impl SynthesisObserver for ProgressObserver<'_> {
    fn on_target_cost(&self, model: &str, target: usize, cost: u64) {
        self.bar.inc(1);
        self.inner.on_target_cost(model, target, cost);
    }

    fn on_selection(&self, model: &str, table: &CostTable) {
        self.bar.finish_and_clear();
        self.inner.on_selection(model, table);
    }
}

/// Execute the optimize command.
///
/// `estimator` is one of the estimator names or `all`.
pub fn execute(
    topology: &str,
    estimator: &str,
    format: &str,
    max_exhaustive_qubits: usize,
) -> Result<()> {
    let (name, topology) = load_topology(topology)?;
    let n = topology.num_qubits();

    let estimators = if estimator.eq_ignore_ascii_case("all") {
        Estimator::ALL.to_vec()
    } else {
        vec![parse_estimator(estimator)?]
    };

    let mut report = OptimizeReport {
        topology: name,
        num_qubits: n,
        ..OptimizeReport::default()
    };

    for estimator in estimators {
        let table = match estimator {
            Estimator::Exhaustive => {
                check_exhaustive(n, max_exhaustive_qubits)?;
                let progress = ProgressObserver::new(n, &TracingObserver)?;
                estimator.evaluate(topology.distances(), &progress)?
            }
            _ => estimator.evaluate(topology.distances(), &TracingObserver)?,
        };
        let slot = match estimator {
            Estimator::ClosedForm => &mut report.closed_form,
            Estimator::Exhaustive => &mut report.exhaustive,
            Estimator::Bfs => &mut report.bfs,
        };
        *slot = Some(table);
    }

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "table" => print_report(&report),
        other => anyhow::bail!("Unknown format: '{other}'. Available: table, json"),
    }

    Ok(())
}

fn print_report(report: &OptimizeReport) {
    println!(
        "{} Target selection on {} ({} qubits)",
        style("→").cyan().bold(),
        style(&report.topology).green(),
        report.num_qubits
    );

    if let Some(table) = &report.closed_form {
        print_table("closed-form", table, "CNOTs");
    }
    if let Some(table) = &report.exhaustive {
        print_table("exhaustive", table, "CNOTs");
    }
    if let Some(table) = &report.bfs {
        print_table("bfs", table, "score");
    }
}

fn print_table(label: &str, table: &CostTable, unit: &str) {
    println!("\n  {}", style(label).bold());
    for (qubit, cost) in table.costs.iter().enumerate() {
        let marker = if table.optimal_indices.contains(&qubit) {
            style("★").yellow()
        } else {
            style(" ").dim()
        };
        println!("    {marker} q{qubit:<3} {cost:>10} {unit}");
    }
    println!(
        "  {} optimal: {:?}",
        style("✓").green().bold(),
        table.optimal_indices
    );
}
