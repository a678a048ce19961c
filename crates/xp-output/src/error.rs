//! Error types for xp-output.

use thiserror::Error;
use xp_core::XpError;

/// Errors that can occur when writing cycle summaries.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;

/// Observer handlers report output failures as [`XpError::Observer`].
impl From<OutputError> for XpError {
    fn from(e: OutputError) -> Self {
        match e {
            OutputError::Io(io) => XpError::Io(io),
            other               => XpError::Observer(other.to_string()),
        }
    }
}
