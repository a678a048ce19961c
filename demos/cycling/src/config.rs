//! Demo run configuration, optionally loaded from a JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use xp_observer::StatusConfig;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Number of cycles in the experiment.
    pub cycles: u32,

    /// Operating conditions of each step, repeated every cycle.
    pub steps: Vec<String>,

    pub initial_capacity_ah: f64,

    /// Mean capacity lost per cycle.
    pub fade_per_cycle_ah: f64,

    /// Stop once capacity falls to this value.
    pub stop_capacity_ah: Option<f64>,

    /// Stop once a cycle's minimum voltage falls to this value.
    pub stop_voltage_v: Option<f64>,

    /// `(cycle, step)` at which the mock solver reports an infeasible step.
    pub infeasible_at: Option<(u32, u32)>,

    /// Seed for the capacity-fade noise.
    pub seed: u64,

    pub status: StatusConfig,

    /// Per-cycle CSV summary; skipped when `None`.
    pub cycles_csv: Option<PathBuf>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            cycles: 10,
            steps: vec![
                "Discharge at 1C until 3.0 V".into(),
                "Rest for 1 hour".into(),
                "Charge at 1 A until 4.1 V".into(),
                "Hold at 4.1 V until 50 mA".into(),
            ],
            initial_capacity_ah: 5.0,
            fade_per_cycle_ah: 0.08,
            stop_capacity_ah: Some(4.5),
            stop_voltage_v: None,
            infeasible_at: None,
            seed: 42,
            status: StatusConfig::default(),
            cycles_csv: None,
        }
    }
}

impl DemoConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: DemoConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.cycles > 0, "cycles must be at least 1");
        ensure!(!self.steps.is_empty(), "at least one step is required");
        ensure!(self.initial_capacity_ah > 0.0, "initial capacity must be positive");
        Ok(())
    }
}
