//! Framework error type.
//!
//! Observers return `XpResult<()>` from every handler.  Crates with richer
//! failure modes (e.g. `xp-output`) keep their own enum and convert into
//! `XpError::Observer` at the handler boundary.

use thiserror::Error;

/// The error type shared by every observer handler.
#[derive(Debug, Error)]
pub enum XpError {
    /// The payload lacks a key the observer needs.  The engine and the
    /// observer disagree on payload shape.
    #[error("payload is missing key {key:?}")]
    MissingKey { key: String },

    /// The payload holds the key, but not with the expected shape.
    #[error("payload key {key:?} is not {expected}")]
    WrongType { key: String, expected: &'static str },

    #[error("unknown experiment event {0:?}")]
    UnknownEvent(String),

    /// Any other failure raised inside an observer handler.
    #[error("observer failed: {0}")]
    Observer(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl XpError {
    pub(crate) fn missing(key: &str) -> Self {
        XpError::MissingKey { key: key.to_owned() }
    }

    pub(crate) fn wrong_type(key: &str, expected: &'static str) -> Self {
        XpError::WrongType { key: key.to_owned(), expected }
    }
}

/// Shorthand result type for all `xp-*` crates.
pub type XpResult<T> = Result<T, XpError>;
