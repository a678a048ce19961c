//! Experiment observer trait for progress reporting and data collection.

use xp_core::{ExperimentEvent, Logs, XpResult};

/// Callbacks invoked by the simulation engine at lifecycle points of an
/// experiment.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  Every handler receives the event payload as
/// a shared `&Logs`; the same reference is handed to every observer in an
/// [`ObserverList`][crate::ObserverList], so do not assume exclusive access.
///
/// Handlers may be called any number of times and in any order the engine
/// chooses.  Return `Err` only for genuine failures such as a payload missing
/// a key the handler needs; the error reaches the engine unchanged.
///
/// # Example — cycle counter
///
/// ```rust
/// use xp_core::{Logs, XpResult};
/// use xp_observer::Observer;
///
/// struct CycleCounter { cycles: usize }
///
/// impl Observer for CycleCounter {
///     fn on_cycle_end(&mut self, _logs: &Logs) -> XpResult<()> {
///         self.cycles += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called once at the start of an experiment.
    fn on_experiment_start(&mut self, _logs: &Logs) -> XpResult<()> {
        Ok(())
    }

    /// Called at the start of each cycle.
    fn on_cycle_start(&mut self, _logs: &Logs) -> XpResult<()> {
        Ok(())
    }

    /// Called at the start of each step within a cycle.
    fn on_step_start(&mut self, _logs: &Logs) -> XpResult<()> {
        Ok(())
    }

    /// Called at the end of each step within a cycle.
    fn on_step_end(&mut self, _logs: &Logs) -> XpResult<()> {
        Ok(())
    }

    /// Called at the end of each cycle.
    fn on_cycle_end(&mut self, _logs: &Logs) -> XpResult<()> {
        Ok(())
    }

    /// Called once after the experiment completes.
    fn on_experiment_end(&mut self, _logs: &Logs) -> XpResult<()> {
        Ok(())
    }

    /// Called when the solver fails during the experiment.
    ///
    /// Batch runners can use this to raise an alert with the failing payload.
    fn on_experiment_error(&mut self, _logs: &Logs) -> XpResult<()> {
        Ok(())
    }

    /// Called when the experiment turns out to be infeasible and the result
    /// is truncated.
    fn on_experiment_infeasible(&mut self, _logs: &Logs) -> XpResult<()> {
        Ok(())
    }

    /// Route `event` to the matching `on_*` handler.
    fn on_event(&mut self, event: ExperimentEvent, logs: &Logs) -> XpResult<()> {
        match event {
            ExperimentEvent::ExperimentStart      => self.on_experiment_start(logs),
            ExperimentEvent::CycleStart           => self.on_cycle_start(logs),
            ExperimentEvent::StepStart            => self.on_step_start(logs),
            ExperimentEvent::StepEnd              => self.on_step_end(logs),
            ExperimentEvent::CycleEnd             => self.on_cycle_end(logs),
            ExperimentEvent::ExperimentEnd        => self.on_experiment_end(logs),
            ExperimentEvent::ExperimentError      => self.on_experiment_error(logs),
            ExperimentEvent::ExperimentInfeasible => self.on_experiment_infeasible(logs),
        }
    }

    /// `true` for observers that report experiment status to the user.
    ///
    /// [`setup_observers`][crate::setup_observers] appends a default
    /// [`StatusObserver`][crate::StatusObserver] only when no supplied
    /// observer returns `true` here.
    fn is_status_observer(&self) -> bool {
        false
    }
}

/// An [`Observer`] that does nothing.
pub struct NoopObserver;

impl Observer for NoopObserver {}
