//! `ObserverList` — fans every event out to an ordered set of observers.

use std::ops::Index;

use tracing::trace;
use xp_core::{ExperimentEvent, Logs, XpResult};

use crate::Observer;

/// An ordered collection of observers that is itself an [`Observer`].
///
/// Each `on_*` call is forwarded to every held observer in registration
/// order, all receiving the same `&Logs`.
///
/// # Failure policy
///
/// Broadcasting is fail-fast.  The first observer returning `Err` stops the
/// broadcast: later observers are not called for that event and the error is
/// returned to the caller unchanged.  One misbehaving observer therefore halts
/// callbacks for everyone.
///
/// The list is fixed at construction; build it with
/// [`setup_observers`][crate::setup_observers] or
/// [`ObserverListBuilder`][crate::ObserverListBuilder] to get the default
/// status observer.
pub struct ObserverList {
    observers: Vec<Box<dyn Observer>>,
}

impl ObserverList {
    /// Wrap `observers` verbatim, keeping their order.
    pub fn new(observers: Vec<Box<dyn Observer>>) -> Self {
        Self { observers }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&dyn Observer> {
        self.observers.get(index).map(|o| o.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Observer> {
        self.observers.iter().map(|o| o.as_ref())
    }

    /// Number of held observers flagged by [`Observer::is_status_observer`].
    pub fn status_observer_count(&self) -> usize {
        self.observers.iter().filter(|o| o.is_status_observer()).count()
    }

    /// Unwrap the held observers.
    pub fn into_inner(self) -> Vec<Box<dyn Observer>> {
        self.observers
    }

    fn broadcast<F>(&mut self, event: ExperimentEvent, mut call: F) -> XpResult<()>
    where
        F: FnMut(&mut dyn Observer) -> XpResult<()>,
    {
        trace!(%event, observers = self.observers.len(), "broadcast");
        for observer in &mut self.observers {
            call(observer.as_mut())?;
        }
        Ok(())
    }
}

impl Index<usize> for ObserverList {
    type Output = dyn Observer;

    fn index(&self, index: usize) -> &Self::Output {
        self.observers[index].as_ref()
    }
}

impl Observer for ObserverList {
    fn on_experiment_start(&mut self, logs: &Logs) -> XpResult<()> {
        self.broadcast(ExperimentEvent::ExperimentStart, |o| o.on_experiment_start(logs))
    }

    fn on_cycle_start(&mut self, logs: &Logs) -> XpResult<()> {
        self.broadcast(ExperimentEvent::CycleStart, |o| o.on_cycle_start(logs))
    }

    fn on_step_start(&mut self, logs: &Logs) -> XpResult<()> {
        self.broadcast(ExperimentEvent::StepStart, |o| o.on_step_start(logs))
    }

    fn on_step_end(&mut self, logs: &Logs) -> XpResult<()> {
        self.broadcast(ExperimentEvent::StepEnd, |o| o.on_step_end(logs))
    }

    fn on_cycle_end(&mut self, logs: &Logs) -> XpResult<()> {
        self.broadcast(ExperimentEvent::CycleEnd, |o| o.on_cycle_end(logs))
    }

    fn on_experiment_end(&mut self, logs: &Logs) -> XpResult<()> {
        self.broadcast(ExperimentEvent::ExperimentEnd, |o| o.on_experiment_end(logs))
    }

    fn on_experiment_error(&mut self, logs: &Logs) -> XpResult<()> {
        self.broadcast(ExperimentEvent::ExperimentError, |o| o.on_experiment_error(logs))
    }

    fn on_experiment_infeasible(&mut self, logs: &Logs) -> XpResult<()> {
        self.broadcast(ExperimentEvent::ExperimentInfeasible, |o| o.on_experiment_infeasible(logs))
    }

    /// A nested list counts as a status observer if it already holds one.
    fn is_status_observer(&self) -> bool {
        self.observers.iter().any(|o| o.is_status_observer())
    }
}
