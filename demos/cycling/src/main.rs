//! cycling — mock capacity-fade experiment for the rust_xp observers.
//!
//! Runs a seeded capacity-fade experiment through an `ObserverList` built by
//! `setup_observers`, so the default status observer narrates progress
//! through `tracing`.  Pass a JSON `DemoConfig` path to change the cycle
//! count, thresholds, log file, or CSV output.
//!
//! ```text
//! RUST_LOG=info cargo run -p cycling -- demo.json
//! ```

mod config;
mod engine;


use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use xp_observer::{setup_observers, Observer, StatusObserver};
use xp_output::CycleCsvObserver;

use config::DemoConfig;
use engine::MockExperiment;

#[derive(Debug, Parser)]
#[command(name = "cycling", version, about = "Mock capacity-fade experiment narrated by the status observer")]
struct Args {
    /// Path to a JSON run configuration; built-in defaults when omitted.
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config = match &args.config {
        Some(path) => DemoConfig::load(path)?,
        None       => DemoConfig::default(),
    };
    info!(
        cycles = config.cycles,
        steps = config.steps.len(),
        seed = config.seed,
        "configuration loaded"
    );

    let mut observers: Vec<Box<dyn Observer>> = Vec::new();
    if config.status.logfile.is_some() {
        observers.push(Box::new(StatusObserver::from_config(&config.status)?));
    }
    if let Some(path) = &config.cycles_csv {
        observers.push(Box::new(CycleCsvObserver::create(path)?));
    }
    let mut observers = setup_observers(observers);

    let outcome = MockExperiment::new(&config).run(&mut observers)?;
    info!(?outcome, "experiment finished");
    Ok(())
}
