//! `CycleCsvObserver<W>` — writes one CSV row per completed cycle.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;
use tracing::debug;
use xp_core::{LogValue, Logs, XpResult};
use xp_observer::Observer;

use crate::{CycleSummaryRow, OutputError, OutputResult};

/// An [`Observer`] that records the capacity and minimum voltage of every
/// cycle as a CSV row.
///
/// The cycle index comes from the most recent `cycle_start` payload (falling
/// back to `cycle number` in the `cycle_end` payload).  Missing summary
/// values are written as empty cells.  Rows are flushed when the experiment
/// ends, fails, or turns out infeasible.
pub struct CycleCsvObserver<W: Write> {
    writer:        Writer<W>,
    current_cycle: Option<(i64, i64)>,
    rows_written:  usize,
}

impl CycleCsvObserver<File> {
    /// Create (or truncate) `path` and write the header row.
    pub fn create(path: &Path) -> OutputResult<Self> {
        Self::new(File::create(path)?)
    }
}

impl<W: Write> CycleCsvObserver<W> {
    /// Wrap `inner` and write the header row.
    pub fn new(inner: W) -> OutputResult<Self> {
        let mut writer = Writer::from_writer(inner);
        writer.write_record(CycleSummaryRow::HEADER)?;
        Ok(Self {
            writer,
            current_cycle: None,
            rows_written:  0,
        })
    }

    /// Rows written so far (header excluded).
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    pub fn write_row(&mut self, row: CycleSummaryRow) -> OutputResult<()> {
        self.writer.write_record(row.to_record())?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> OutputResult<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and unwrap the inner writer (e.g. to inspect a buffer in tests).
    pub fn into_inner(self) -> OutputResult<W> {
        self.writer
            .into_inner()
            .map_err(|e| OutputError::Io(e.into_error()))
    }
}

impl<W: Write + Send> Observer for CycleCsvObserver<W> {
    fn on_experiment_start(&mut self, _logs: &Logs) -> XpResult<()> {
        self.current_cycle = None;
        Ok(())
    }

    fn on_cycle_start(&mut self, logs: &Logs) -> XpResult<()> {
        self.current_cycle = Some(logs.get_index_pair("cycle number")?);
        Ok(())
    }

    fn on_cycle_end(&mut self, logs: &Logs) -> XpResult<()> {
        let (cycle, total_cycles) = match self.current_cycle {
            Some(c) => c,
            None    => logs.get_index_pair("cycle number")?,
        };
        let summary = logs.get_map("summary variables")?;
        let reading = |key: &str| summary.get_opt(key).and_then(LogValue::as_f64);

        self.write_row(CycleSummaryRow {
            cycle,
            total_cycles,
            capacity_ah:   reading("Capacity [A.h]"),
            min_voltage_v: reading("Minimum voltage [V]"),
        })?;
        Ok(())
    }

    fn on_experiment_end(&mut self, _logs: &Logs) -> XpResult<()> {
        debug!(rows = self.rows_written, "cycle summaries complete");
        Ok(self.flush()?)
    }

    fn on_experiment_error(&mut self, _logs: &Logs) -> XpResult<()> {
        Ok(self.flush()?)
    }

    fn on_experiment_infeasible(&mut self, _logs: &Logs) -> XpResult<()> {
        Ok(self.flush()?)
    }
}
