//! Sink severities.

use std::fmt;

/// Severity of a status message.
///
/// `Notice` sits between `Info` and `Warning`: progress lines that should be
/// visible by default but are not problems.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Level {
    #[default]
    Info,
    Notice,
    Warning,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Info    => "INFO",
            Level::Notice  => "NOTICE",
            Level::Warning => "WARNING",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
