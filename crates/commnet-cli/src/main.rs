//! CommNet Connectivity Check CLI
//!
//! Loads a planner scenario, computes signals and control status, and writes
//! a connectivity report.
//!
//! Usage:
//!   commnet-check --scenario saves/relay-network.json \
//!                 --difficulty hard \
//!                 --output reports/relay-network.json --cytoscape

use anyhow::{Context, Result};
use clap::Parser;
use commnet_cli::{loader, ConnectivityReport};
use commnet_core::{DifficultyPreset, DifficultySetting};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(
    name = "commnet-check",
    about = "Check signal coverage and craft control for a CommNet scenario"
)]
struct Args {
    /// Path to scenario JSON file
    #[arg(short, long)]
    scenario: PathBuf,

    /// Difficulty preset, overrides the scenario's own setting
    #[arg(short, long)]
    difficulty: Option<DifficultyPreset>,

    /// Custom range modifier for craft antennae
    #[arg(long)]
    range_modifier: Option<f64>,

    /// Custom modifier for tracking stations
    #[arg(long)]
    dsn_modifier: Option<f64>,

    /// Output JSON file
    #[arg(short, long, default_value = "commnet-report.json")]
    output: PathBuf,

    /// Also output a Cytoscape.js graph
    #[arg(long)]
    cytoscape: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Difficulty from flags, if any flag was given
    fn difficulty_override(&self) -> Result<Option<DifficultySetting>> {
        let base = self.difficulty.map(DifficultySetting::preset);

        if self.range_modifier.is_none() && self.dsn_modifier.is_none() {
            return Ok(base);
        }

        let base = base.unwrap_or_default();
        let setting = DifficultySetting::custom(
            self.range_modifier.unwrap_or(base.range_modifier),
            self.dsn_modifier.unwrap_or(base.dsn_modifier),
        )?;
        Ok(Some(setting))
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("{}", "=".repeat(60));
    info!("CommNet Connectivity Check");
    info!("{}", "=".repeat(60));

    let mut scenario = loader::load_scenario(&args.scenario)
        .with_context(|| format!("failed to load scenario {:?}", args.scenario))?;

    if let Some(setting) = args.difficulty_override()? {
        scenario = scenario.with_difficulty(setting);
    }
    info!(
        "Difficulty: {} (range x{}, dsn x{})",
        scenario.difficulty.preset, scenario.difficulty.range_modifier, scenario.difficulty.dsn_modifier
    );

    let universe = scenario.into_universe()?;
    let report = ConnectivityReport::from_universe(&universe);

    for craft in &report.craft {
        match &craft.path_to_command {
            Some(path) => info!("  {:30} | {:?} via {}", craft.label, craft.status, path.join(" -> ")),
            None if craft.status.has_control() => info!("  {:30} | {:?}", craft.label, craft.status),
            None => warn!("  {:30} | {:?}", craft.label, craft.status),
        }
    }

    // Write output
    info!("\nWriting report to {:?}", args.output);
    let file = File::create(&args.output)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &report)?;

    // Write Cytoscape graph if requested
    if args.cytoscape {
        let cytoscape_path = args.output.with_extension("cytoscape.json");
        info!("Writing Cytoscape graph to {:?}", cytoscape_path);
        std::fs::write(&cytoscape_path, universe.to_cytoscape_json()?)?;
    }

    // Summary
    info!("\n{}", "=".repeat(60));
    info!("SUMMARY");
    info!("{}", "=".repeat(60));
    info!("Signals: {}", report.signals.len());
    info!("Craft with control: {}/{}", report.controlled(), report.craft.len());

    Ok(())
}
