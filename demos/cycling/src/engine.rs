//! A mock cycling engine that fires the full experiment lifecycle.
//!
//! Capacity fades by `fade_per_cycle_ah` (±25 % seeded noise) each cycle and
//! the minimum voltage tracks the remaining capacity.  No physics is solved.

use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use xp_core::{Logs, XpResult};
use xp_observer::{capacity_progress, voltage_progress, Observer, Progress};

use crate::config::DemoConfig;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Completed { cycles: u32 },
    Stopped { cycle: u32, capacity_ah: f64 },
    Infeasible { cycle: u32, step: u32 },
}

pub struct MockExperiment<'a> {
    config:  &'a DemoConfig,
    rng:     SmallRng,
    started: Instant,
}

impl<'a> MockExperiment<'a> {
    pub fn new(config: &'a DemoConfig) -> Self {
        Self {
            config,
            rng:     SmallRng::seed_from_u64(config.seed),
            started: Instant::now(),
        }
    }

    fn elapsed(&self) -> String {
        format!("{:.3} s", self.started.elapsed().as_secs_f64())
    }

    fn stopping_conditions(&self) -> Logs {
        Logs::new()
            .with("capacity", self.config.stop_capacity_ah)
            .with("voltage", self.config.stop_voltage_v.map(|v| (v, "V")))
    }

    /// Drive every lifecycle event through `observer`.
    pub fn run<O: Observer>(&mut self, observer: &mut O) -> XpResult<Outcome> {
        let cfg = self.config;
        let cycles = cfg.cycles as i64;
        let steps = cfg.steps.len() as i64;

        self.started = Instant::now();
        observer.on_experiment_start(&Logs::new())?;

        let mut capacity = cfg.initial_capacity_ah;
        let mut outcome = Outcome::Completed { cycles: cfg.cycles };

        'cycles: for cycle in 1..=cfg.cycles {
            observer.on_cycle_start(
                &Logs::new()
                    .with("cycle number", (cycle as i64, cycles))
                    .with("elapsed time", self.elapsed()),
            )?;

            for (i, conditions) in cfg.steps.iter().enumerate() {
                let step = i as u32 + 1;
                let logs = Logs::new()
                    .with("cycle number", (cycle as i64, cycles))
                    .with("step number", (step as i64, steps))
                    .with("step operating conditions", conditions.as_str());

                if cfg.infeasible_at == Some((cycle, step)) {
                    let logs = logs.with("termination", "event: Minimum voltage [V]");
                    observer.on_experiment_infeasible(&logs)?;
                    outcome = Outcome::Infeasible { cycle, step };
                    break 'cycles;
                }

                observer.on_step_start(&logs)?;
                observer.on_step_end(&logs)?;
            }

            let noise: f64 = self.rng.gen_range(-0.25..0.25);
            capacity -= cfg.fade_per_cycle_ah * (1.0 + noise);
            let min_voltage = 2.7 + 0.4 * capacity / cfg.initial_capacity_ah;

            observer.on_cycle_end(
                &Logs::new()
                    .with(
                        "summary variables",
                        Logs::new()
                            .with("Capacity [A.h]", capacity)
                            .with("Minimum voltage [V]", min_voltage),
                    )
                    .with("start capacity", cfg.initial_capacity_ah)
                    .with("stopping conditions", self.stopping_conditions()),
            )?;

            let capacity_stop = cfg
                .stop_capacity_ah
                .is_some_and(|stop| capacity_progress(capacity, stop) == Progress::Stopping);
            let voltage_stop = cfg
                .stop_voltage_v
                .is_some_and(|stop| voltage_progress(min_voltage, stop) == Progress::Stopping);
            if capacity_stop || voltage_stop {
                outcome = Outcome::Stopped { cycle, capacity_ah: capacity };
                break;
            }
        }

        if !matches!(outcome, Outcome::Infeasible { .. }) {
            observer.on_experiment_end(&Logs::new().with("elapsed time", self.elapsed()))?;
        }
        Ok(outcome)
    }
}
