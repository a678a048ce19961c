//! `xp-observer` — lifecycle observers for long-running cycling experiments.
//!
//! The simulation engine fires eight lifecycle events (see
//! [`xp_core::ExperimentEvent`]).  Anything that wants to react to them
//! implements [`Observer`]; the engine only ever talks to one
//! [`ObserverList`], which forwards each event to every registered observer in
//! order.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`observer`] | `Observer` trait, `NoopObserver`                              |
//! | [`list`]     | `ObserverList` — fail-fast, in-order broadcaster              |
//! | [`builder`]  | `setup_observers`, `ObserverListBuilder`, `ObserverInput`     |
//! | [`status`]   | `StatusObserver`, stopping-condition classification           |
//! | [`sink`]     | `EventSink` trait, `TracingSink`, `FileSink`, `MemorySink`    |
//! | [`config`]   | `StatusConfig`                                                |
//!
//! # Quick-start
//!
//! ```rust
//! use xp_core::Logs;
//! use xp_observer::{setup_observers, MemorySink, Observer, ObserverInput, StatusObserver};
//!
//! let sink = MemorySink::new();
//! let status: Box<dyn Observer> = Box::new(StatusObserver::with_sink(sink.clone()));
//! let mut observers = setup_observers(ObserverInput::Single(status));
//!
//! observers.on_experiment_start(&Logs::new())?;
//! observers.on_experiment_end(&Logs::new().with("elapsed time", 12.5))?;
//! assert_eq!(sink.len(), 2);
//! # Ok::<(), xp_core::XpError>(())
//! ```
//!
//! Dispatch is synchronous: every broadcast runs to completion on the caller's
//! thread before returning.

pub mod builder;
pub mod config;
pub mod list;
pub mod observer;
pub mod sink;
pub mod status;

#[cfg(test)]
mod tests;

pub use builder::{setup_observers, ObserverInput, ObserverListBuilder};
pub use config::StatusConfig;
pub use list::ObserverList;
pub use observer::{NoopObserver, Observer};
pub use sink::{EventSink, FileSink, MemorySink, TracingSink};
pub use status::{capacity_progress, voltage_progress, Progress, StatusObserver};
