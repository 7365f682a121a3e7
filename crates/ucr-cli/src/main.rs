//! UCR synthesis command-line interface
//!
//! Picks the cheapest target qubit for a uniformly controlled rotation on a
//! restricted coupling map and emits the routed circuit.
//!
//! ```text
//! ucr topologies                       list built-in coupling maps
//! ucr paths    -t r5.11h --from 0 --to 6
//! ucr optimize -t r4p --estimator all
//! ucr synth    -t r5.11l --rotation rz -o ucr.qasm
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod presets;

use commands::synth::SynthOptions;
use commands::{optimize, paths, synth, topologies};
use config::Config;

/// Topology-constrained synthesis of uniformly controlled rotations
#[derive(Parser)]
#[command(name = "ucr")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// YAML configuration file
    #[arg(short, long, env = "UCR_CONFIG", global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List built-in coupling maps
    Topologies,

    /// Show shortest distances, or the path and ladder between two qubits
    Paths {
        /// Preset, linear:N / star:N / full:N, or topology file
        #[arg(short, long)]
        topology: Option<String>,

        /// Path source qubit
        #[arg(long, requires = "to")]
        from: Option<usize>,

        /// Path destination qubit
        #[arg(long, requires = "from")]
        to: Option<usize>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Rank every qubit as UCR target by CNOT cost
    Optimize {
        /// Preset, linear:N / star:N / full:N, or topology file
        #[arg(short, long)]
        topology: Option<String>,

        /// Estimator (closed-form, exhaustive, bfs, all)
        #[arg(short, long)]
        estimator: Option<String>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Synthesize a UCR circuit
    Synth {
        /// Preset, linear:N / star:N / full:N, or topology file
        #[arg(short, long)]
        topology: Option<String>,

        /// Target qubit (selected by the estimator if omitted)
        #[arg(long)]
        target: Option<usize>,

        /// Estimator used to select the target (closed-form, exhaustive, bfs)
        #[arg(short, long)]
        estimator: Option<String>,

        /// Rotation axis (rx, ry, rz)
        #[arg(short, long)]
        rotation: Option<String>,

        /// JSON or YAML file with 2^(n-1) rotation angles
        #[arg(short, long, conflicts_with = "angle")]
        params: Option<String>,

        /// Angle used for every rotation when no parameter file is given
        #[arg(long, default_value = "1.0", allow_negative_numbers = true)]
        angle: f64,

        /// Build a hashing circuit (amplitude, phase)
        #[arg(long)]
        hashing: Option<String>,

        /// Insert barriers between rotation and ladder blocks
        #[arg(long)]
        barriers: bool,

        /// Output format (qasm, json)
        #[arg(short, long, default_value = "qasm")]
        format: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    // Setup logging
    let filter = match cli.verbose {
        0 => config.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Topologies => topologies::execute(),

        Commands::Paths {
            topology,
            from,
            to,
            format,
        } => {
            let topology = topology.as_deref().unwrap_or(&config.topology);
            paths::execute(topology, from.zip(to), &format)
        }

        Commands::Optimize {
            topology,
            estimator,
            format,
        } => optimize::execute(
            topology.as_deref().unwrap_or(&config.topology),
            estimator.as_deref().unwrap_or(&config.estimator),
            &format,
            config.max_exhaustive_qubits,
        ),

        Commands::Synth {
            topology,
            target,
            estimator,
            rotation,
            params,
            angle,
            hashing,
            barriers,
            format,
            output,
        } => synth::execute(&SynthOptions {
            topology: topology.as_deref().unwrap_or(&config.topology),
            target,
            estimator: estimator.as_deref().unwrap_or(&config.estimator),
            rotation: rotation.as_deref().unwrap_or(&config.rotation),
            params: params.as_deref(),
            angle,
            hashing: hashing.as_deref(),
            barriers: barriers || config.barriers,
            format: &format,
            output: output.as_deref(),
            max_exhaustive_qubits: config.max_exhaustive_qubits,
            max_synth_qubits: config.max_synth_qubits,
        }),
    }
}
