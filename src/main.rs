use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gnosis_layout::io::{GraphDocument, read_document};
use gnosis_layout::placement::{DEFAULT_SPREAD, InitialPlacement};
use gnosis_layout::presets::{PRESET_NAMES, describe, preset};
use gnosis_layout::{SelectionState, Simulation};

/// Headless force-directed layout for small graphs.
#[derive(Parser)]
#[command(name = "gnosis-layout")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a graph until it freezes and print the final positions
    Run {
        /// Graph document (.json, .yaml, .yml)
        #[arg(short, long, conflicts_with = "preset")]
        input: Option<PathBuf>,

        /// Built-in graph to simulate
        #[arg(short, long, default_value = "frameworks")]
        preset: String,

        /// Simulated seconds (defaults to one second past the anneal duration)
        #[arg(short, long)]
        seconds: Option<f32>,

        /// Frames per simulated second
        #[arg(long, default_value = "60")]
        fps: f32,

        /// Seed for placement and jitter
        #[arg(long)]
        seed: Option<u64>,

        /// Override the anneal duration from the document
        #[arg(long)]
        anneal: Option<f32>,

        /// Starting layout for nodes without explicit positions
        #[arg(long, value_enum, default_value = "cube")]
        placement: Placement,

        /// Output encoding
        #[arg(short, long, value_enum, default_value = "json")]
        format: Format,
    },
    /// List the built-in graphs
    Presets,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Placement {
    Origin,
    Cube,
    Sphere,
}

impl From<Placement> for InitialPlacement {
    fn from(placement: Placement) -> Self {
        match placement {
            Placement::Origin => InitialPlacement::Origin,
            Placement::Cube => InitialPlacement::RandomCube {
                spread: DEFAULT_SPREAD,
            },
            Placement::Sphere => InitialPlacement::FibonacciSphere {
                radius: DEFAULT_SPREAD / 2.0,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

/// Final state printed by `run`
#[derive(Serialize)]
struct LayoutReport {
    frozen: bool,
    elapsed: f32,
    nodes: Vec<NodeReport>,
}

#[derive(Serialize)]
struct NodeReport {
    id: String,
    label: String,
    position: [f32; 3],
    selection: SelectionState,
}

struct RunOptions {
    seconds: Option<f32>,
    fps: f32,
    seed: Option<u64>,
    anneal: Option<f32>,
    placement: Placement,
}

fn load(input: Option<PathBuf>, preset_name: &str) -> anyhow::Result<GraphDocument> {
    match input {
        Some(path) => {
            read_document(&path).with_context(|| format!("reading {}", path.display()))
        }
        None => match preset(preset_name) {
            Some(doc) => Ok(doc),
            None => bail!(
                "unknown preset '{preset_name}' (expected one of: {})",
                PRESET_NAMES.join(", ")
            ),
        },
    }
}

fn simulate(mut doc: GraphDocument, options: RunOptions) -> anyhow::Result<LayoutReport> {
    if let Some(anneal) = options.anneal {
        doc.config.anneal_duration_seconds = anneal;
    }
    let mut builder = doc.builder().placement(options.placement.into());
    if let Some(seed) = options.seed {
        builder = builder.seed(seed);
    }
    let mut sim = builder.build(&doc.nodes, &doc.edges)?;

    let seconds = options
        .seconds
        .unwrap_or(doc.config.anneal_duration_seconds + 1.0);
    if !seconds.is_finite() {
        bail!("--seconds is required when the layout never freezes");
    }

    sim.run_until(seconds, options.fps);
    info!(
        nodes = sim.nodes().len(),
        elapsed = sim.elapsed(),
        frozen = sim.is_frozen(),
        "simulation finished"
    );

    Ok(report(&sim))
}

fn report(sim: &Simulation) -> LayoutReport {
    LayoutReport {
        frozen: sim.is_frozen(),
        elapsed: sim.elapsed(),
        nodes: sim
            .nodes()
            .iter()
            .map(|node| NodeReport {
                id: node.id.clone(),
                label: node.label.clone(),
                position: node.position.to_array(),
                selection: node.selection,
            })
            .collect(),
    }
}

fn list_presets() -> String {
    PRESET_NAMES
        .iter()
        .map(|name| format!("{name:<12}{}", describe(name).unwrap_or_default()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("gnosis_layout=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            input,
            preset,
            seconds,
            fps,
            seed,
            anneal,
            placement,
            format,
        } => {
            let doc = load(input, &preset)?;
            let report = simulate(
                doc,
                RunOptions {
                    seconds,
                    fps,
                    seed,
                    anneal,
                    placement,
                },
            )?;
            let rendered = match format {
                Format::Json => serde_json::to_string_pretty(&report)?,
                Format::Yaml => serde_yaml::to_string(&report)?,
            };
            println!("{rendered}");
        }
        Commands::Presets => {
            println!("{}", list_presets());
        }
    }

    Ok(())
}
