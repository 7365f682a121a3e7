//! Topologies command implementation.

use anyhow::Result;
use console::style;

use ucr_synth::{ClosedFormCost, CostModel, NoopObserver};

use crate::presets::PRESETS;

/// Execute the topologies command.
pub fn execute() -> Result<()> {
    println!("{} Available topologies:\n", style("ucr").cyan().bold());

    for preset in PRESETS {
        let topology = preset.build(&NoopObserver)?;
        let table = ClosedFormCost.evaluate(topology.distances(), &NoopObserver)?;

        println!(
            "  {} {}",
            style("●").green(),
            style(preset.name).bold()
        );
        println!("    {}", preset.description);
        println!(
            "    Qubits: {}, edges: {}",
            preset.num_qubits,
            topology.edges().len()
        );
        if let (Some(target), Some(cost)) = (table.best_target(), table.min_cost()) {
            println!("    Best target: q{target} ({cost} CNOTs)");
        }
        println!();
    }

    println!(
        "  Generated families: {}, {}, {}",
        style("linear:N").bold(),
        style("star:N").bold(),
        style("full:N").bold()
    );
    println!("  Or pass a YAML/JSON file with num_qubits and edges.");

    Ok(())
}
