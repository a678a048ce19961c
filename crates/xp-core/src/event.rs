//! The closed set of experiment lifecycle events.

use std::fmt;
use std::str::FromStr;

use crate::XpError;

/// One lifecycle point at which the engine notifies observers.
///
/// The set is closed: observers cannot register new event names.  An
/// experiment fires them roughly in this order:
///
/// ```text
/// ExperimentStart
///   for each cycle:
///     CycleStart
///       for each step:  StepStart → StepEnd
///     CycleEnd
/// ExperimentEnd | ExperimentError | ExperimentInfeasible
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ExperimentEvent {
    ExperimentStart,
    CycleStart,
    StepStart,
    StepEnd,
    CycleEnd,
    ExperimentEnd,
    ExperimentError,
    ExperimentInfeasible,
}

impl ExperimentEvent {
    /// Every event, in lifecycle order.
    pub const ALL: [ExperimentEvent; 8] = [
        ExperimentEvent::ExperimentStart,
        ExperimentEvent::CycleStart,
        ExperimentEvent::StepStart,
        ExperimentEvent::StepEnd,
        ExperimentEvent::CycleEnd,
        ExperimentEvent::ExperimentEnd,
        ExperimentEvent::ExperimentError,
        ExperimentEvent::ExperimentInfeasible,
    ];

    /// Canonical snake_case name, e.g. `"cycle_start"`.
    pub fn as_str(self) -> &'static str {
        match self {
            ExperimentEvent::ExperimentStart      => "experiment_start",
            ExperimentEvent::CycleStart           => "cycle_start",
            ExperimentEvent::StepStart            => "step_start",
            ExperimentEvent::StepEnd              => "step_end",
            ExperimentEvent::CycleEnd             => "cycle_end",
            ExperimentEvent::ExperimentEnd        => "experiment_end",
            ExperimentEvent::ExperimentError      => "experiment_error",
            ExperimentEvent::ExperimentInfeasible => "experiment_infeasible",
        }
    }
}

impl fmt::Display for ExperimentEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExperimentEvent {
    type Err = XpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExperimentEvent::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| XpError::UnknownEvent(s.to_owned()))
    }
}
