//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use ucr_synth::graph::count_components;
use ucr_synth::{Estimator, HashingForm, RotationKind, Topology, TracingObserver};

use crate::presets;

/// On-disk topology description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopologyFile {
    #[serde(default)]
    pub name: Option<String>,
    pub num_qubits: usize,
    pub edges: Vec<(usize, usize)>,
}

/// Resolve a topology from a preset name, a generated family
/// (`linear:N`, `star:N`, `full:N`) or a YAML/JSON file.
pub fn load_topology(source: &str) -> Result<(String, Topology)> {
    if let Some(preset) = presets::find(source) {
        let topology = preset.build(&TracingObserver)?;
        return Ok((preset.name.to_string(), topology));
    }

    if let Some((family, size)) = source.split_once(':') {
        if let Ok(n) = size.parse::<usize>() {
            let topology = match family.to_lowercase().as_str() {
                "linear" => Topology::linear(n)?,
                "star" => Topology::star(n)?,
                "full" => Topology::full(n)?,
                other => anyhow::bail!(
                    "Unknown topology family: '{other}'. Available: linear, star, full"
                ),
            };
            return Ok((source.to_lowercase(), topology));
        }
    }

    let path = Path::new(source);
    if !path.exists() {
        anyhow::bail!(
            "Unknown topology: '{source}'. Use a preset ({}), linear:N, star:N, full:N or a topology file",
            presets::names().join(", ")
        );
    }

    let file = read_topology_file(path)?;
    let name = file
        .name
        .clone()
        .unwrap_or_else(|| path.display().to_string());

    let components = count_components(file.num_qubits, &file.edges)?;
    if components > 1 {
        anyhow::bail!("Topology '{name}' is not connected ({components} components)");
    }

    let topology = Topology::build(file.num_qubits, &file.edges, &TracingObserver)?;
    Ok((name, topology))
}

/// Parse a topology file, choosing JSON or YAML by extension.
pub fn read_topology_file(path: &Path) -> Result<TopologyFile> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read topology file: {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext.to_lowercase().as_str() {
        "json" => serde_json::from_str(&source)
            .with_context(|| format!("Invalid topology JSON: {}", path.display())),
        _ => serde_yaml_ng::from_str(&source)
            .with_context(|| format!("Invalid topology YAML: {}", path.display())),
    }
}

/// Parse a rotation axis.
pub fn parse_rotation(name: &str) -> Result<RotationKind> {
    match name.to_lowercase().as_str() {
        "rx" => Ok(RotationKind::Rx),
        "ry" => Ok(RotationKind::Ry),
        "rz" => Ok(RotationKind::Rz),
        other => anyhow::bail!("Unknown rotation: '{other}'. Available: rx, ry, rz"),
    }
}

/// Parse a target-selection estimator.
pub fn parse_estimator(name: &str) -> Result<Estimator> {
    match name.to_lowercase().as_str() {
        "closed-form" | "closed_form" => Ok(Estimator::ClosedForm),
        "exhaustive" => Ok(Estimator::Exhaustive),
        "bfs" => Ok(Estimator::Bfs),
        other => {
            anyhow::bail!("Unknown estimator: '{other}'. Available: closed-form, exhaustive, bfs")
        }
    }
}

/// Parse a hashing form.
pub fn parse_hashing(name: &str) -> Result<HashingForm> {
    match name.to_lowercase().as_str() {
        "amplitude" => Ok(HashingForm::Amplitude),
        "phase" => Ok(HashingForm::Phase),
        other => anyhow::bail!("Unknown hashing form: '{other}'. Available: amplitude, phase"),
    }
}

/// Refuse the exhaustive estimator on topologies above the configured size.
pub fn check_exhaustive(num_qubits: usize, max_exhaustive_qubits: usize) -> Result<()> {
    if num_qubits > max_exhaustive_qubits {
        anyhow::bail!(
            "Exhaustive estimator limited to {max_exhaustive_qubits} qubits, topology has {num_qubits}; raise max_exhaustive_qubits to override"
        );
    }
    Ok(())
}

/// Refuse full UCR synthesis on topologies above the configured size.
pub fn check_synth(num_qubits: usize, max_synth_qubits: usize) -> Result<()> {
    if num_qubits > max_synth_qubits {
        anyhow::bail!(
            "Synthesis limited to {max_synth_qubits} qubits, topology has {num_qubits} ({} rotation angles); raise max_synth_qubits to override",
            1u128 << (num_qubits - 1)
        );
    }
    Ok(())
}

/// Load rotation angles from a JSON or YAML list.
pub fn load_params(path: &str) -> Result<Vec<f64>> {
    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read params: {path}"))?;

    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");
    match ext.to_lowercase().as_str() {
        "json" => serde_json::from_str(&source)
            .with_context(|| format!("Expected a JSON array of numbers in {path}")),
        _ => serde_yaml_ng::from_str(&source)
            .with_context(|| format!("Expected a YAML list of numbers in {path}")),
    }
}

/// Write `content` to `output`, or to stdout when no path is given.
pub fn write_output(content: &str, output: Option<&str>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("Failed to write file: {path}"))
        }
        None => {
            print!("{content}");
            Ok(())
        }
    }
}
