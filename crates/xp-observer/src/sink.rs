//! Leveled text sinks that a [`StatusObserver`][crate::StatusObserver]
//! writes to.
//!
//! | Sink          | Destination                                         |
//! |---------------|-----------------------------------------------------|
//! | `TracingSink` | the process-wide `tracing` subscriber (default)     |
//! | `FileSink`    | one line per message appended to a file             |
//! | `MemorySink`  | an in-memory record list shared between clones      |

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{info, warn};
use xp_core::{Level, XpResult};

/// Target of [`TracingSink`] info and warning events.
pub const STATUS_TARGET: &str = "xp::status";

/// Target of [`TracingSink`] notices, so a filter such as
/// `xp::status=warn,xp::status::notice=info` can keep them apart.
pub const NOTICE_TARGET: &str = "xp::status::notice";

/// Trait for status text consumers.
///
/// Emission is fire-and-forget: nothing is returned to the observer.  Sinks
/// that can fail keep the error and hand it out through
/// [`take_error`][Self::take_error].
pub trait EventSink: Send {
    /// Write one message at `level`.
    fn emit(&mut self, level: Level, message: &str);

    fn info(&mut self, message: &str) {
        self.emit(Level::Info, message);
    }

    fn notice(&mut self, message: &str) {
        self.emit(Level::Notice, message);
    }

    fn warning(&mut self, message: &str) {
        self.emit(Level::Warning, message);
    }

    /// Take the first stored write error, if any.
    fn take_error(&mut self) -> Option<io::Error> {
        None
    }
}

// ── TracingSink ───────────────────────────────────────────────────────────────

/// Forwards messages to the global `tracing` dispatcher.
///
/// `tracing` has no NOTICE level: notices are emitted at INFO with a
/// `notice = true` field under [`NOTICE_TARGET`].  Filtering is left to the
/// installed subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, level: Level, message: &str) {
        match level {
            Level::Info    => info!(target: STATUS_TARGET, "{message}"),
            Level::Notice  => info!(target: NOTICE_TARGET, notice = true, "{message}"),
            Level::Warning => warn!(target: STATUS_TARGET, "{message}"),
        }
    }
}

// ── FileSink ──────────────────────────────────────────────────────────────────

/// Appends `[LEVEL] message` lines to a file.
///
/// Every line is flushed as it is written.  Messages below `level` are
/// dropped.  The file is opened in append mode, so truncating it from another
/// handle (as [`StatusObserver`][crate::StatusObserver] does at experiment
/// start) makes later lines start from the top.
pub struct FileSink {
    path:       PathBuf,
    file:       File,
    level:      Level,
    last_error: Option<io::Error>,
}

impl FileSink {
    /// Open (or create) `path` for appending.
    pub fn open(path: impl Into<PathBuf>, level: Level) -> XpResult<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file,
            level,
            last_error: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn level(&self) -> Level {
        self.level
    }
}

impl EventSink for FileSink {
    fn emit(&mut self, level: Level, message: &str) {
        if level < self.level {
            return;
        }
        let result = writeln!(self.file, "[{level}] {message}").and_then(|()| self.file.flush());
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }

    fn take_error(&mut self) -> Option<io::Error> {
        self.last_error.take()
    }
}

// ── MemorySink ────────────────────────────────────────────────────────────────

/// Records every message in memory.
///
/// Clones share the same record list, so keep one handle and give the other
/// to a [`StatusObserver`][crate::StatusObserver].
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<(Level, String)>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records so far, oldest first.
    pub fn records(&self) -> Vec<(Level, String)> {
        self.lock().clone()
    }

    /// Messages recorded at exactly `level`.
    pub fn messages_at(&self, level: Level) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(Level, String)>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EventSink for MemorySink {
    fn emit(&mut self, level: Level, message: &str) {
        self.lock().push((level, message.to_owned()));
    }
}
