//! Split Screen Sim - replay player movement through the split-screen controller
//!
//! Runs a scripted scenario against the headless host and prints every
//! configuration change, followed by a summary.
//!
//! # Usage
//!
//! ```bash
//! splitscreen-sim --scenario walk_apart.toml
//! splitscreen-sim --scenario walk_apart.toml --config splitscreen.toml --json
//! RUST_LOG=debug splitscreen-sim --scenario walk_apart.toml --delta 0.033
//! ```

mod run;
mod scenario;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use splitscreen_core::{Config, config};

use crate::scenario::Scenario;

/// Split Screen Sim - replay player movement through the split-screen controller
#[derive(Parser)]
#[command(name = "splitscreen-sim")]
#[command(about = "Replay a player movement scenario through the split-screen controller")]
#[command(version)]
struct Cli {
    /// Scenario file (TOML)
    #[arg(short, long)]
    scenario: PathBuf,

    /// Settings file (defaults to built-in settings)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print transitions and summary as JSON lines
    #[arg(long)]
    json: bool,

    /// Override the scenario's seconds per frame
    #[arg(long)]
    delta: Option<f32>,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let scenario = Scenario::load(&cli.scenario)?;
    let settings = match &cli.config {
        Some(path) => config::load_from(path)
            .with_context(|| format!("Failed to load settings: {}", path.display()))?,
        None => Config::default(),
    };

    let report = run::play(&scenario, settings, cli.delta);

    if cli.json {
        for transition in &report.transitions {
            println!("{}", serde_json::to_string(transition)?);
        }
        println!("{}", serde_json::to_string(&report)?);
    } else {
        for transition in &report.transitions {
            let wanted = if transition.wanted == transition.to {
                String::new()
            } else {
                format!(" (wanted {:?})", transition.wanted)
            };
            println!(
                "frame {:>6}: {:?} -> {:?}{}",
                transition.frame, transition.from, transition.to, wanted
            );
            for rect in &transition.rects {
                println!(
                    "    {}x{} at ({}, {})",
                    rect.width, rect.height, rect.x, rect.y
                );
            }
        }
        println!();
        println!("Frames:      {}", report.frames);
        println!("Skipped:     {}", report.skipped);
        println!("Transitions: {}", report.transitions.len());
        println!("Recoveries:  {}", report.recoveries);
        println!("Final:       {:?}", report.final_configuration);
        println!("Displayed:   {:?}", report.final_displayed);
        println!("Leftover:    {}", report.leftover_surfaces);
    }

    Ok(())
}
