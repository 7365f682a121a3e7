//! Synth command implementation.

use anyhow::{Context, Result};
use console::style;

use ucr_synth::{
    EmitOptions, Estimator, Topology, TracingObserver, UcrCompiler, compile_hashing_circuit,
    emit_qasm, validate_qubit_count,
};

use super::common::{
    check_exhaustive, check_synth, load_params, load_topology, parse_estimator, parse_hashing,
    parse_rotation, write_output,
};

/// Resolved options for one synthesis run.
#[derive(Debug, Clone)]
pub struct SynthOptions<'a> {
    pub topology: &'a str,
    /// Explicit target; selected by `estimator` when absent.
    pub target: Option<usize>,
    pub estimator: &'a str,
    pub rotation: &'a str,
    /// Angle file; every angle is `angle` when absent.
    pub params: Option<&'a str>,
    pub angle: f64,
    pub hashing: Option<&'a str>,
    pub barriers: bool,
    pub format: &'a str,
    pub output: Option<&'a str>,
    pub max_exhaustive_qubits: usize,
    pub max_synth_qubits: usize,
}

/// Execute the synth command.
pub fn execute(options: &SynthOptions<'_>) -> Result<()> {
    let (name, topology) = load_topology(options.topology)?;
    let n = topology.num_qubits();
    validate_qubit_count(n)?;
    check_synth(n, options.max_synth_qubits)?;

    let params = match options.params {
        Some(path) => load_params(path)?,
        None => vec![options.angle; 1 << (n - 1)],
    };

    let target = match options.target {
        Some(target) => target,
        None => select_target(&topology, options.estimator, options.max_exhaustive_qubits)?,
    };

    let program = match options.hashing {
        Some(form) => {
            let form = parse_hashing(form)?;
            compile_hashing_circuit(&topology, target, &params, form, &TracingObserver)?
        }
        None => UcrCompiler::new(&topology)
            .with_rotation(parse_rotation(options.rotation)?)
            .with_observer(&TracingObserver)
            .compile(target, &params)?,
    };
    program.validate(&topology)?;

    let content = match options.format {
        "qasm" => emit_qasm(
            &program,
            EmitOptions {
                barriers: options.barriers,
            },
        ),
        "json" => {
            let mut json = serde_json::to_string_pretty(&program)
                .context("Failed to serialize program")?;
            json.push('\n');
            json
        }
        other => anyhow::bail!("Unknown format: '{other}'. Available: qasm, json"),
    };

    write_output(&content, options.output)?;

    eprintln!(
        "{} Synthesized {} UCR on {} (target q{target}): {} CNOTs, {} rotations",
        style("✓").green().bold(),
        program.rotation,
        style(&name).green(),
        program.two_qubit_count(),
        program.rotation_count()
    );
    if let Some(path) = options.output {
        eprintln!("  Output: {}", style(path).green());
    }

    Ok(())
}

fn select_target(
    topology: &Topology,
    estimator: &str,
    max_exhaustive_qubits: usize,
) -> Result<usize> {
    let estimator = parse_estimator(estimator)?;
    if estimator == Estimator::Exhaustive {
        check_exhaustive(topology.num_qubits(), max_exhaustive_qubits)?;
    }
    estimator
        .evaluate(topology.distances(), &TracingObserver)?
        .best_target()
        .context("No target qubit could be selected")
}
