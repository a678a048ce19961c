//! `StatusObserver` — renders lifecycle events as human-readable progress text.

use std::fs::File;
use std::path::{Path, PathBuf};

use xp_core::{Level, Logs, XpError, XpResult};

use crate::sink::{EventSink, FileSink, TracingSink};
use crate::{Observer, StatusConfig};

// ── Stopping-condition classification ─────────────────────────────────────────

/// Whether a cycle-end check lets the experiment carry on.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Progress {
    Continuing,
    Stopping,
}

/// Classify the current capacity against the stopping capacity.
///
/// A NaN capacity counts as still above the threshold.
pub fn capacity_progress(capacity: f64, stop_at: f64) -> Progress {
    if capacity.is_nan() || capacity > stop_at {
        Progress::Continuing
    } else {
        Progress::Stopping
    }
}

/// Classify the minimum voltage of a cycle against the stopping voltage.
pub fn voltage_progress(min_voltage: f64, stop_at: f64) -> Progress {
    if min_voltage > stop_at {
        Progress::Continuing
    } else {
        Progress::Stopping
    }
}

// ── StatusObserver ────────────────────────────────────────────────────────────

const CYCLE_RULE_WIDTH: usize = 20;

/// The built-in [`Observer`] that reports experiment progress.
///
/// Each event is rendered to one line and written to an [`EventSink`]:
///
/// | Event                   | Level     | Payload keys read                                   |
/// |-------------------------|-----------|-----------------------------------------------------|
/// | `experiment_start`      | `Info`    | —                                                   |
/// | `cycle_start`           | `Notice`  | `cycle number`, `elapsed time`                      |
/// | `step_start`            | `Notice`  | `cycle number`, `step number`, `step operating conditions` |
/// | `cycle_end`             | `Notice`  | `summary variables`, `start capacity`, `stopping conditions` |
/// | `experiment_end`        | `Notice`  | `elapsed time`                                      |
/// | `experiment_infeasible` | `Warning` | `termination`, `cycle number`, `step number`, `step operating conditions` |
///
/// `step_end` and `experiment_error` write nothing.
///
/// With a log file configured, the file is truncated at `experiment_start`
/// before anything is written for the new run.  A failed sink write is held
/// until the run ends: `experiment_end`, `experiment_error` and
/// `experiment_infeasible` return it.
pub struct StatusObserver {
    sink:    Box<dyn EventSink>,
    logfile: Option<PathBuf>,
}

impl StatusObserver {
    /// Report through the process-wide `tracing` subscriber.
    pub fn new() -> Self {
        Self::with_sink(TracingSink)
    }

    /// Report through `sink`.
    pub fn with_sink(sink: impl EventSink + 'static) -> Self {
        Self {
            sink:    Box::new(sink),
            logfile: None,
        }
    }

    /// Report to `path` (opened for appending), dropping messages below
    /// `level`.  The file is cleared at every `experiment_start`.
    pub fn with_logfile(path: impl Into<PathBuf>, level: Level) -> XpResult<Self> {
        let path = path.into();
        let sink = FileSink::open(&path, level)?;
        Ok(Self {
            sink:    Box::new(sink),
            logfile: Some(path),
        })
    }

    pub fn from_config(config: &StatusConfig) -> XpResult<Self> {
        match &config.logfile {
            None       => Ok(Self::new()),
            Some(path) => Self::with_logfile(path, config.level),
        }
    }

    pub fn logfile(&self) -> Option<&Path> {
        self.logfile.as_deref()
    }

    fn capacity_check(&mut self, logs: &Logs, summary: &Logs, stop: &Logs) -> XpResult<()> {
        let Some(value) = stop.get_opt("capacity") else {
            return Ok(());
        };
        let stop_at = value
            .as_f64()
            .ok_or_else(|| XpError::WrongType { key: "capacity".into(), expected: "a number" })?;
        let now = summary.get_f64("Capacity [A.h]")?;
        let start = logs.get_f64("start capacity")?;

        let message = match capacity_progress(now, stop_at) {
            Progress::Continuing => format!(
                "Capacity is now {now:.3} Ah (started at {start:.3} Ah, will stop at {stop_at:.3} Ah)"
            ),
            Progress::Stopping => format!(
                "Stopping experiment: capacity ({now:.3} Ah) is below the stopping capacity ({stop_at:.3} Ah)."
            ),
        };
        self.sink.notice(&message);
        Ok(())
    }

    fn voltage_check(&mut self, summary: &Logs, stop: &Logs) -> XpResult<()> {
        let Some(value) = stop.get_opt("voltage") else {
            return Ok(());
        };
        let stop_at = value
            .as_pair()
            .and_then(|(v, _)| v.as_f64())
            .ok_or_else(|| XpError::WrongType { key: "voltage".into(), expected: "a (value, unit) pair" })?;
        let min_voltage = summary.get_f64("Minimum voltage [V]")?;

        let message = match voltage_progress(min_voltage, stop_at) {
            Progress::Continuing => format!(
                "Minimum voltage is now {min_voltage:.3} V (will stop at {stop_at:.3} V)"
            ),
            Progress::Stopping => format!(
                "Stopping experiment: minimum voltage ({min_voltage:.3} V) is below the stopping voltage ({stop_at:.3} V)."
            ),
        };
        self.sink.notice(&message);
        Ok(())
    }

    /// Return the first write error the sink stored during the run.
    fn sink_error(&mut self) -> XpResult<()> {
        match self.sink.take_error() {
            Some(e) => Err(e.into()),
            None    => Ok(()),
        }
    }
}

impl Default for StatusObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for StatusObserver {
    fn on_experiment_start(&mut self, _logs: &Logs) -> XpResult<()> {
        if let Some(path) = &self.logfile {
            File::create(path)?;
        }
        self.sink.info("Start running experiment");
        Ok(())
    }

    fn on_cycle_start(&mut self, logs: &Logs) -> XpResult<()> {
        let (cycle, cycles) = logs.get_index_pair("cycle number")?;
        let elapsed = logs.get("elapsed time")?;
        self.sink.notice(&format!(
            "Cycle {cycle}/{cycles} ({elapsed} elapsed) {}",
            "-".repeat(CYCLE_RULE_WIDTH)
        ));
        Ok(())
    }

    fn on_step_start(&mut self, logs: &Logs) -> XpResult<()> {
        let (cycle, cycles) = logs.get_index_pair("cycle number")?;
        let (step, steps) = logs.get_index_pair("step number")?;
        let conditions = logs.get("step operating conditions")?;
        self.sink
            .notice(&format!("Cycle {cycle}/{cycles}, step {step}/{steps}: {conditions}"));
        Ok(())
    }

    fn on_cycle_end(&mut self, logs: &Logs) -> XpResult<()> {
        let summary = logs.get_map("summary variables")?;
        let stop = logs.get_map("stopping conditions")?;
        self.capacity_check(logs, summary, stop)?;
        self.voltage_check(summary, stop)
    }

    /// Also returns the first write error the sink stored during the run.
    fn on_experiment_end(&mut self, logs: &Logs) -> XpResult<()> {
        let elapsed = logs.get("elapsed time")?;
        self.sink
            .notice(&format!("Finished experiment simulation, took {elapsed}"));
        self.sink_error()
    }

    fn on_experiment_error(&mut self, _logs: &Logs) -> XpResult<()> {
        self.sink_error()
    }

    fn on_experiment_infeasible(&mut self, logs: &Logs) -> XpResult<()> {
        let termination = logs.get_str("termination")?;
        let (cycle, _) = logs.get_index_pair("cycle number")?;
        let (step, _) = logs.get_index_pair("step number")?;
        let conditions = logs.get("step operating conditions")?;
        self.sink.warning(&format!(
            "\n\n\tExperiment is infeasible: '{termination}' was triggered during \
             '{conditions}'. The returned solution only contains the first {} cycles, \
             up to step {}. Try reducing the current, shortening the time interval, \
             or reducing the period.\n\n",
            cycle.saturating_sub(1),
            step.saturating_sub(1),
        ));
        self.sink_error()
    }

    fn is_status_observer(&self) -> bool {
        true
    }
}
