//! `xp-output` — experiment output observers for the rust_xp framework.
//!
//! [`CycleCsvObserver`] implements `xp_observer::Observer` and writes one row
//! per completed cycle:
//!
//! | Column          | Source (`cycle_end` payload unless noted)          |
//! |-----------------|----------------------------------------------------|
//! | `cycle`         | `cycle number` from the preceding `cycle_start`    |
//! | `total_cycles`  | same                                               |
//! | `capacity_ah`   | `summary variables` → `Capacity [A.h]`             |
//! | `min_voltage_v` | `summary variables` → `Minimum voltage [V]`        |
//!
//! # Usage
//!
//! ```rust,ignore
//! use xp_observer::{setup_observers, Observer};
//! use xp_output::CycleCsvObserver;
//!
//! let csv: Box<dyn Observer> = Box::new(CycleCsvObserver::create(Path::new("cycles.csv"))?);
//! let mut observers = setup_observers(csv);
//! engine.run(&mut observers)?;
//! ```

pub mod error;
pub mod observer;
pub mod row;


pub use error::{OutputError, OutputResult};
pub use observer::CycleCsvObserver;
pub use row::CycleSummaryRow;
