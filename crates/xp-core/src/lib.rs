//! `xp-core` — foundational types for the `rust_xp` experiment observers.
//!
//! This crate is a dependency of every other `xp-*` crate.  It has no `xp-*`
//! dependencies and minimal external ones (only `thiserror`, plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                |
//! |-------------|---------------------------------------------------------|
//! | [`event`]   | `ExperimentEvent` — the closed set of lifecycle events  |
//! | [`logs`]    | `Logs`, `LogValue` — the per-event payload map          |
//! | [`level`]   | `Level` — sink severities (`Info < Notice < Warning`)   |
//! | [`error`]   | `XpError`, `XpResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to `Logs`, `LogValue`,      |
//!           | `Level`, and `ExperimentEvent`.                            |

pub mod error;
pub mod event;
pub mod level;
pub mod logs;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{XpError, XpResult};
pub use event::ExperimentEvent;
pub use level::Level;
pub use logs::{LogValue, Logs};
