//! Status observer configuration.

use std::path::PathBuf;

use xp_core::Level;

/// Where a [`StatusObserver`][crate::StatusObserver] sends its text.
///
/// Typically embedded in the application's run configuration and loaded from
/// JSON alongside it (enable the `serde` feature).
///
/// | `logfile` | Sink                                              |
/// |-----------|---------------------------------------------------|
/// | `None`    | `TracingSink`; `level` is left to the subscriber  |
/// | `Some(p)` | `FileSink` at `p`, dropping messages below `level`|
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct StatusConfig {
    /// Log file truncated at experiment start.  `None` logs through `tracing`.
    pub logfile: Option<PathBuf>,

    /// Minimum level written to `logfile`.
    pub level: Level,
}

impl StatusConfig {
    pub fn with_logfile(path: impl Into<PathBuf>, level: Level) -> Self {
        Self {
            logfile: Some(path.into()),
            level,
        }
    }
}
