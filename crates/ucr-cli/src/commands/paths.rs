//! Paths command implementation.

use anyhow::Result;
use console::style;
use serde::Serialize;

use ucr_synth::ladder::ladder;
use ucr_synth::{DistanceMatrix, PathMatrix, Topology};

use super::common::load_topology;

#[derive(Serialize)]
struct PathsReport<'a> {
    topology: &'a str,
    num_qubits: usize,
    distances: &'a DistanceMatrix,
    paths: &'a PathMatrix,
}

/// Execute the paths command.
pub fn execute(topology: &str, pair: Option<(usize, usize)>, format: &str) -> Result<()> {
    let (name, topology) = load_topology(topology)?;

    if let Some((from, to)) = pair {
        return print_pair(&topology, from, to);
    }

    match format {
        "json" => {
            let report = PathsReport {
                topology: &name,
                num_qubits: topology.num_qubits(),
                distances: topology.distances(),
                paths: topology.paths(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        "table" => print_matrix(&name, &topology),
        other => anyhow::bail!("Unknown format: '{other}'. Available: table, json"),
    }

    Ok(())
}

fn print_pair(topology: &Topology, from: usize, to: usize) -> Result<()> {
    let n = topology.num_qubits();
    if from >= n || to >= n {
        anyhow::bail!("Qubit pair ({from}, {to}) out of range for {n} qubits");
    }

    let path = topology.path(from, to);
    let route = path
        .iter()
        .map(|q| format!("q{q}"))
        .collect::<Vec<_>>()
        .join(" → ");

    println!("{} {route}", style("Path:").cyan().bold());
    println!("  Distance: {}", topology.distances().get(from, to));

    if from != to {
        let gates = ladder(path)?;
        println!("  Ladder: {} CNOTs", gates.len());
        for gate in &gates {
            println!("    {gate}");
        }
    }

    Ok(())
}

fn print_matrix(name: &str, topology: &Topology) {
    let n = topology.num_qubits();
    println!(
        "{} Distances on {} ({n} qubits):\n",
        style("→").cyan().bold(),
        style(name).green()
    );

    let header: String = (0..n).map(|j| format!("{j:>4}")).collect();
    println!("      {}", style(header).dim());
    for i in 0..n {
        let row: String = (0..n)
            .map(|j| format!("{:>4}", topology.distances().get(i, j)))
            .collect();
        println!("  {:>3} {row}", style(i).dim());
    }
}
