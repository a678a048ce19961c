//! Unit and integration tests for xp-observer.

use std::sync::{Arc, Mutex};

use xp_core::{ExperimentEvent, Logs, XpError, XpResult};

use crate::Observer;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// `(observer name, event, payload address)` in call order.
type CallLog = Arc<Mutex<Vec<(&'static str, ExperimentEvent, usize)>>>;

/// Observer that records every call and optionally fails on one event.
struct Recorder {
    name:    &'static str,
    calls:   CallLog,
    fail_on: Option<ExperimentEvent>,
}

impl Recorder {
    fn boxed(name: &'static str, calls: &CallLog) -> Box<dyn Observer> {
        Box::new(Recorder { name, calls: Arc::clone(calls), fail_on: None })
    }

    fn failing(name: &'static str, calls: &CallLog, event: ExperimentEvent) -> Box<dyn Observer> {
        Box::new(Recorder { name, calls: Arc::clone(calls), fail_on: Some(event) })
    }

    fn record(&mut self, event: ExperimentEvent, logs: &Logs) -> XpResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push((self.name, event, logs as *const Logs as usize));
        if self.fail_on == Some(event) {
            return Err(XpError::Observer(format!("{} refused {event}", self.name)));
        }
        Ok(())
    }
}

impl Observer for Recorder {
    fn on_experiment_start(&mut self, logs: &Logs) -> XpResult<()> {
        self.record(ExperimentEvent::ExperimentStart, logs)
    }
    fn on_cycle_start(&mut self, logs: &Logs) -> XpResult<()> {
        self.record(ExperimentEvent::CycleStart, logs)
    }
    fn on_step_start(&mut self, logs: &Logs) -> XpResult<()> {
        self.record(ExperimentEvent::StepStart, logs)
    }
    fn on_step_end(&mut self, logs: &Logs) -> XpResult<()> {
        self.record(ExperimentEvent::StepEnd, logs)
    }
    fn on_cycle_end(&mut self, logs: &Logs) -> XpResult<()> {
        self.record(ExperimentEvent::CycleEnd, logs)
    }
    fn on_experiment_end(&mut self, logs: &Logs) -> XpResult<()> {
        self.record(ExperimentEvent::ExperimentEnd, logs)
    }
    fn on_experiment_error(&mut self, logs: &Logs) -> XpResult<()> {
        self.record(ExperimentEvent::ExperimentError, logs)
    }
    fn on_experiment_infeasible(&mut self, logs: &Logs) -> XpResult<()> {
        self.record(ExperimentEvent::ExperimentInfeasible, logs)
    }
}

/// A user-defined observer that takes over status reporting.
struct CustomStatus;

impl Observer for CustomStatus {
    fn is_status_observer(&self) -> bool {
        true
    }
}

fn cycle_end_logs(capacity: f64, min_voltage: f64, stop: Logs) -> Logs {
    Logs::new()
        .with(
            "summary variables",
            Logs::new()
                .with("Capacity [A.h]", capacity)
                .with("Minimum voltage [V]", min_voltage),
        )
        .with("start capacity", 5.5)
        .with("stopping conditions", stop)
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::{setup_observers, NoopObserver, ObserverInput, ObserverListBuilder, StatusObserver};

    #[test]
    fn none_gets_default_status() {
        let list = setup_observers(ObserverInput::None);
        assert_eq!(list.len(), 1);
        assert_eq!(list.status_observer_count(), 1);
        assert!(list[0].is_status_observer());
    }

    #[test]
    fn none_option_is_empty_input() {
        let input: Option<Box<dyn Observer>> = None;
        let list = setup_observers(input);
        assert_eq!(list.len(), 1);
        assert_eq!(list.status_observer_count(), 1);
    }

    #[test]
    fn single_is_wrapped_and_default_appended_last() {
        let single: Box<dyn Observer> = Box::new(NoopObserver);
        let list = setup_observers(single);
        assert_eq!(list.len(), 2);
        assert!(!list[0].is_status_observer());
        assert!(list[1].is_status_observer());
    }

    #[test]
    fn list_of_n_gets_exactly_one_status() {
        let calls = CallLog::default();
        for n in 0..4 {
            let observers: Vec<Box<dyn Observer>> =
                (0..n).map(|_| Recorder::boxed("r", &calls)).collect();
            let list = setup_observers(observers);
            assert_eq!(list.len(), n + 1);
            assert_eq!(list.status_observer_count(), 1);
            assert!(list[n].is_status_observer(), "default status must be last");
        }
    }

    #[test]
    fn supplied_status_not_duplicated_and_order_kept() {
        let calls = CallLog::default();
        let observers: Vec<Box<dyn Observer>> = vec![
            Recorder::boxed("a", &calls),
            Box::new(CustomStatus),
            Recorder::boxed("b", &calls),
        ];
        let list = setup_observers(observers);
        assert_eq!(list.len(), 3);
        assert_eq!(list.status_observer_count(), 1);
        assert!(!list[0].is_status_observer());
        assert!(list[1].is_status_observer());
        assert!(!list[2].is_status_observer());
    }

    #[test]
    fn several_supplied_status_observers_all_kept() {
        let observers: Vec<Box<dyn Observer>> = vec![
            Box::new(StatusObserver::new()),
            Box::new(CustomStatus),
        ];
        let list = setup_observers(observers);
        assert_eq!(list.len(), 2);
        assert_eq!(list.status_observer_count(), 2);
    }

    #[test]
    fn building_twice_is_stable() {
        let calls = CallLog::default();
        let observers: Vec<Box<dyn Observer>> =
            vec![Recorder::boxed("a", &calls), Box::new(CustomStatus)];
        let first = setup_observers(observers);
        let second = setup_observers(first.into_inner());
        assert_eq!(second.len(), 2);
        assert_eq!(second.status_observer_count(), 1);
        assert!(second[1].is_status_observer());
    }

    #[test]
    fn nested_list_with_status_counts_as_status() {
        let inner = setup_observers(ObserverInput::None);
        let outer = setup_observers(Box::new(inner) as Box<dyn Observer>);
        assert_eq!(outer.len(), 1);
    }

    #[test]
    fn builder_appends_chosen_default_status() {
        let sink = crate::MemorySink::new();
        let list = ObserverListBuilder::new()
            .observer(NoopObserver)
            .default_status(StatusObserver::with_sink(sink.clone()))
            .build();
        assert_eq!(list.len(), 2);
        assert!(list[1].is_status_observer());
    }

    #[test]
    fn builder_ignores_default_when_status_supplied() {
        let list = ObserverListBuilder::new()
            .observer(CustomStatus)
            .default_status(StatusObserver::new())
            .build();
        assert_eq!(list.len(), 1);
    }
}

// ── Broadcast ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod broadcast_tests {
    use super::*;
    use crate::{MemorySink, ObserverList, StatusObserver};

    #[test]
    fn calls_in_registration_order_with_same_payload() {
        let calls = CallLog::default();
        let mut list = ObserverList::new(vec![
            Recorder::boxed("a", &calls),
            Recorder::boxed("b", &calls),
            Recorder::boxed("c", &calls),
        ]);

        let logs = Logs::new().with("cycle number", (1, 2));
        list.on_step_end(&logs).unwrap();

        let calls = calls.lock().unwrap();
        let names: Vec<_> = calls.iter().map(|(n, _, _)| *n).collect();
        assert_eq!(names, ["a", "b", "c"]);
        let addr = &logs as *const Logs as usize;
        assert!(calls.iter().all(|&(_, e, p)| e == ExperimentEvent::StepEnd && p == addr));
    }

    #[test]
    fn every_event_reaches_every_observer() {
        let calls = CallLog::default();
        let mut list = ObserverList::new(vec![
            Recorder::boxed("a", &calls),
            Recorder::boxed("b", &calls),
        ]);
        let logs = Logs::new();
        for event in ExperimentEvent::ALL {
            list.on_event(event, &logs).unwrap();
        }

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 16);
        for (i, event) in ExperimentEvent::ALL.into_iter().enumerate() {
            assert_eq!(calls[2 * i], ("a", event, &logs as *const Logs as usize));
            assert_eq!(calls[2 * i + 1].1, event);
        }
    }

    #[test]
    fn failure_stops_broadcast_and_propagates() {
        let calls = CallLog::default();
        let mut list = ObserverList::new(vec![
            Recorder::boxed("a", &calls),
            Recorder::failing("b", &calls, ExperimentEvent::CycleEnd),
            Recorder::boxed("c", &calls),
        ]);

        let err = list.on_cycle_end(&Logs::new()).unwrap_err();
        assert!(matches!(err, XpError::Observer(ref m) if m == "b refused cycle_end"));

        let names: Vec<_> = calls.lock().unwrap().iter().map(|(n, _, _)| *n).collect();
        assert_eq!(names, ["a", "b"], "c must not be called after b fails");
    }

    #[test]
    fn failure_is_per_event() {
        let calls = CallLog::default();
        let mut list = ObserverList::new(vec![
            Recorder::failing("a", &calls, ExperimentEvent::CycleEnd),
            Recorder::boxed("b", &calls),
        ]);
        assert!(list.on_cycle_end(&Logs::new()).is_err());
        list.on_cycle_start(&Logs::new()).unwrap();
        assert_eq!(calls.lock().unwrap().len(), 3);
    }

    #[test]
    fn payload_error_from_status_observer_propagates() {
        let calls = CallLog::default();
        let observers: Vec<Box<dyn Observer>> = vec![
            Box::new(StatusObserver::with_sink(MemorySink::new())),
            Recorder::boxed("after", &calls),
        ];
        let mut list = ObserverList::new(observers);
        let err = list.on_cycle_start(&Logs::new()).unwrap_err();
        assert!(matches!(err, XpError::MissingKey { ref key } if key == "cycle number"));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn positional_access() {
        let calls = CallLog::default();
        let observers: Vec<Box<dyn Observer>> = vec![Recorder::boxed("a", &calls), Box::new(CustomStatus)];
        let list = ObserverList::new(observers);
        assert_eq!(list.len(), 2);
        assert!(!list.is_empty());
        assert!(list.get(1).unwrap().is_status_observer());
        assert!(list.get(2).is_none());
        assert_eq!(list.iter().filter(|o| o.is_status_observer()).count(), 1);
    }

    #[test]
    fn empty_list_broadcast_is_ok() {
        let mut list = ObserverList::new(vec![]);
        assert!(list.is_empty());
        list.on_experiment_start(&Logs::new()).unwrap();
        assert!(!list.is_status_observer());
    }
}

// ── Stopping-condition classification ─────────────────────────────────────────

#[cfg(test)]
mod progress_tests {
    use crate::{capacity_progress, voltage_progress, Progress};

    #[test]
    fn capacity_nan_keeps_going() {
        assert_eq!(capacity_progress(f64::NAN, 5.0), Progress::Continuing);
    }

    #[test]
    fn capacity_threshold() {
        assert_eq!(capacity_progress(4.9, 5.0), Progress::Stopping);
        assert_eq!(capacity_progress(5.1, 5.0), Progress::Continuing);
        assert_eq!(capacity_progress(5.0, 5.0), Progress::Stopping);
    }

    #[test]
    fn voltage_threshold() {
        assert_eq!(voltage_progress(2.9, 3.0), Progress::Stopping);
        assert_eq!(voltage_progress(3.1, 3.0), Progress::Continuing);
        assert_eq!(voltage_progress(3.0, 3.0), Progress::Stopping);
    }
}

// ── StatusObserver rendering ──────────────────────────────────────────────────

#[cfg(test)]
mod status_tests {
    use xp_core::{Level, LogValue};

    use super::*;
    use crate::{MemorySink, ObserverListBuilder, StatusObserver};

    fn status() -> (StatusObserver, MemorySink) {
        let sink = MemorySink::new();
        (StatusObserver::with_sink(sink.clone()), sink)
    }

    fn capacity_stop(threshold: f64) -> Logs {
        Logs::new().with("capacity", threshold).with("voltage", LogValue::None)
    }

    #[test]
    fn end_to_end_from_none() {
        let sink = MemorySink::new();
        let mut list = ObserverListBuilder::new()
            .default_status(StatusObserver::with_sink(sink.clone()))
            .build();

        list.on_experiment_start(&Logs::new()).unwrap();
        list.on_experiment_end(&Logs::new().with("elapsed time", 12.5)).unwrap();

        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].0, Level::Info);
        assert_eq!(records[1].0, Level::Notice);
        assert!(records[1].1.contains("12.5"), "got {:?}", records[1].1);
    }


    #[test]
    fn cycle_start_line() {
        let (mut obs, sink) = status();
        obs.on_cycle_start(&Logs::new().with("cycle number", (2, 10)).with("elapsed time", "1 minute"))
            .unwrap();
        let notices = sink.messages_at(Level::Notice);
        assert_eq!(notices.len(), 1);
        assert!(notices[0].starts_with("Cycle 2/10 (1 minute elapsed) "));
        assert!(notices[0].ends_with(&"-".repeat(20)));
    }

    #[test]
    fn step_start_line() {
        let (mut obs, sink) = status();
        let logs = Logs::new()
            .with("cycle number", (1, 3))
            .with("step number", (2, 4))
            .with("step operating conditions", "Discharge at 1C until 3.3 V");
        obs.on_step_start(&logs).unwrap();
        assert_eq!(
            sink.messages_at(Level::Notice),
            ["Cycle 1/3, step 2/4: Discharge at 1C until 3.3 V"]
        );
    }

    #[test]
    fn step_end_and_error_are_silent() {
        let (mut obs, sink) = status();
        obs.on_step_end(&Logs::new()).unwrap();
        obs.on_experiment_error(&Logs::new()).unwrap();
        assert!(sink.is_empty());
    }

    #[test]
    fn cycle_end_capacity_nan_continues() {
        let (mut obs, sink) = status();
        obs.on_cycle_end(&cycle_end_logs(f64::NAN, 3.5, capacity_stop(5.0))).unwrap();
        let notices = sink.messages_at(Level::Notice);
        assert_eq!(notices.len(), 1);
        assert!(notices[0].starts_with("Capacity is now NaN Ah"), "got {}", notices[0]);
    }

    #[test]
    fn cycle_end_capacity_below_stops() {
        let (mut obs, sink) = status();
        obs.on_cycle_end(&cycle_end_logs(4.9, 3.5, capacity_stop(5.0))).unwrap();
        let notices = sink.messages_at(Level::Notice);
        assert_eq!(notices.len(), 1);
        assert!(notices[0].starts_with("Stopping experiment: capacity (4.900 Ah)"));
        assert!(notices[0].contains("5.000 Ah"));
    }

    #[test]
    fn cycle_end_capacity_above_continues() {
        let (mut obs, sink) = status();
        obs.on_cycle_end(&cycle_end_logs(5.1, 3.5, capacity_stop(5.0))).unwrap();
        assert_eq!(
            sink.messages_at(Level::Notice),
            ["Capacity is now 5.100 Ah (started at 5.500 Ah, will stop at 5.000 Ah)"]
        );
    }

    #[test]
    fn cycle_end_voltage_thresholds() {
        let stop = Logs::new().with("voltage", (3.0, "V"));

        let (mut obs, sink) = status();
        obs.on_cycle_end(&cycle_end_logs(5.0, 2.9, stop.clone())).unwrap();
        let notices = sink.messages_at(Level::Notice);
        assert_eq!(notices.len(), 1);
        assert!(notices[0].starts_with("Stopping experiment: minimum voltage (2.900 V)"));

        let (mut obs, sink) = status();
        obs.on_cycle_end(&cycle_end_logs(5.0, 3.1, stop)).unwrap();
        assert_eq!(
            sink.messages_at(Level::Notice),
            ["Minimum voltage is now 3.100 V (will stop at 3.000 V)"]
        );
    }

    #[test]
    fn cycle_end_both_thresholds_capacity_first() {
        let stop = Logs::new().with("capacity", 5.0).with("voltage", (3.0, "V"));
        let (mut obs, sink) = status();
        obs.on_cycle_end(&cycle_end_logs(5.2, 3.4, stop)).unwrap();
        let notices = sink.messages_at(Level::Notice);
        assert_eq!(notices.len(), 2);
        assert!(notices[0].starts_with("Capacity"));
        assert!(notices[1].starts_with("Minimum voltage"));
    }

    #[test]
    fn cycle_end_without_thresholds_is_silent() {
        let (mut obs, sink) = status();
        let logs = Logs::new()
            .with("summary variables", Logs::new())
            .with("stopping conditions", Logs::new().with("capacity", LogValue::None));
        obs.on_cycle_end(&logs).unwrap();
        assert!(sink.is_empty());
    }

    #[test]
    fn cycle_end_missing_capacity_reading_errors() {
        let (mut obs, _sink) = status();
        let logs = Logs::new()
            .with("summary variables", Logs::new())
            .with("start capacity", 5.0)
            .with("stopping conditions", Logs::new().with("capacity", 4.0));
        let err = obs.on_cycle_end(&logs).unwrap_err();
        assert!(matches!(err, XpError::MissingKey { ref key } if key == "Capacity [A.h]"));
    }

    #[test]
    fn infeasible_warning() {
        let (mut obs, sink) = status();
        let logs = Logs::new()
            .with("termination", "event: Minimum voltage [V]")
            .with("cycle number", (3, 10))
            .with("step number", (2, 4))
            .with("step operating conditions", "Charge at 1 A until 4.2 V");
        obs.on_experiment_infeasible(&logs).unwrap();

        let warnings = sink.messages_at(Level::Warning);
        assert_eq!(warnings.len(), 1);
        let w = &warnings[0];
        assert!(w.contains("'event: Minimum voltage [V]' was triggered during 'Charge at 1 A until 4.2 V'"));
        assert!(w.contains("first 2 cycles, up to step 1"));
    }

    #[test]
    fn infeasible_at_extreme_indices_does_not_overflow() {
        let (mut obs, sink) = status();
        let logs = Logs::new()
            .with("termination", "event: Minimum voltage [V]")
            .with("cycle number", (i64::MIN, 10))
            .with("step number", (i64::MIN, 4))
            .with("step operating conditions", "Rest for 1 hour");
        obs.on_experiment_infeasible(&logs).unwrap();
        let warnings = sink.messages_at(Level::Warning);
        assert!(warnings[0].contains(&format!("first {} cycles, up to step {}", i64::MIN, i64::MIN)));
    }

    #[test]
    fn is_status_observer() {
        let (obs, _sink) = status();
        assert!(obs.is_status_observer());
        assert!(obs.logfile().is_none());
    }
}

// ── File-backed status ────────────────────────────────────────────────────────

#[cfg(test)]
mod file_tests {
    use std::fs;

    use tempfile::TempDir;
    use xp_core::Level;

    use super::*;
    use crate::{EventSink, FileSink, StatusConfig, StatusObserver};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn experiment_start_truncates_logfile() {
        let dir = tmp();
        let path = dir.path().join("status.log");
        fs::write(&path, "stale line from a previous run\n").unwrap();

        let mut obs = StatusObserver::with_logfile(&path, Level::Info).unwrap();
        obs.on_experiment_start(&Logs::new()).unwrap();
        obs.on_experiment_end(&Logs::new().with("elapsed time", 3.25)).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(!text.contains("stale"));
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "[INFO] Start running experiment");
        assert_eq!(lines[1], "[NOTICE] Finished experiment simulation, took 3.25");
    }

    #[test]
    fn file_sink_filters_by_level() {
        let dir = tmp();
        let path = dir.path().join("notice.log");
        let mut sink = FileSink::open(&path, Level::Notice).unwrap();
        sink.info("dropped");
        sink.notice("kept");
        sink.warning("also kept");
        assert!(sink.take_error().is_none());

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "[NOTICE] kept\n[WARNING] also kept\n");
        assert_eq!(sink.path(), path.as_path());
        assert_eq!(sink.level(), Level::Notice);
    }

    #[test]
    fn from_config_selects_sink() {
        let dir = tmp();
        let path = dir.path().join("cfg.log");

        let obs = StatusObserver::from_config(&StatusConfig::default()).unwrap();
        assert!(obs.logfile().is_none());

        let obs = StatusObserver::from_config(&StatusConfig::with_logfile(&path, Level::Warning)).unwrap();
        assert_eq!(obs.logfile(), Some(path.as_path()));
        assert!(path.exists());
    }

    #[test]
    fn logfile_in_missing_dir_errors() {
        let dir = tmp();
        let path = dir.path().join("no_such_dir").join("status.log");
        assert!(matches!(StatusObserver::with_logfile(path, Level::Info), Err(XpError::Io(_))));
    }
}

// ── Default tracing sink ──────────────────────────────────────────────────────

#[cfg(test)]
mod tracing_tests {
    use std::io;

    use tracing_subscriber::EnvFilter;

    use super::*;
    use crate::{setup_observers, ObserverInput};

    /// Shared buffer the fmt subscriber writes into.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` under a plain-text fmt subscriber filtered by `filter`.
    fn capture(filter: &str, f: impl FnOnce()) -> String {
        let out = Captured::default();
        let writer = out.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(filter))
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        out.text()
    }

    #[test]
    fn end_to_end_from_none_through_tracing() {
        let text = capture("info", || {
            let mut list = setup_observers(ObserverInput::None);
            list.on_experiment_start(&Logs::new()).unwrap();
            list.on_experiment_end(&Logs::new().with("elapsed time", 12.5)).unwrap();
        });

        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2, "got {text:?}");
        assert!(lines[0].contains("INFO xp::status: Start running experiment"), "got {:?}", lines[0]);
        assert!(lines[1].contains("INFO xp::status::notice:"), "got {:?}", lines[1]);
        assert!(lines[1].contains("took 12.5"));
        assert!(lines[1].contains("notice=true"));
    }

    #[test]
    fn infeasible_is_a_warning() {
        let text = capture("info", || {
            let mut list = setup_observers(ObserverInput::None);
            let logs = Logs::new()
                .with("termination", "event: Minimum voltage [V]")
                .with("cycle number", (1, 2))
                .with("step number", (1, 3))
                .with("step operating conditions", "Rest for 1 hour");
            list.on_experiment_infeasible(&logs).unwrap();
        });
        assert!(text.contains("WARN xp::status:"), "got {text:?}");
        assert!(text.contains("Experiment is infeasible"));
    }

    #[test]
    fn filter_keeps_notices_and_drops_info() {
        let text = capture("xp::status=warn,xp::status::notice=info", || {
            let mut list = setup_observers(ObserverInput::None);
            list.on_experiment_start(&Logs::new()).unwrap();
            list.on_experiment_end(&Logs::new().with("elapsed time", 2.0)).unwrap();
        });
        assert!(!text.contains("Start running experiment"), "got {text:?}");
        assert!(text.contains("Finished experiment simulation, took 2"));
    }
}

// ── Deferred sink write errors ────────────────────────────────────────────────

#[cfg(test)]
mod write_error_tests {
    use std::io;

    use xp_core::Level;

    use super::*;
    use crate::{EventSink, StatusObserver};

    /// Sink whose every write fails; keeps the first error like `FileSink`.
    #[derive(Default)]
    struct BrokenSink {
        stored: Option<io::Error>,
    }

    impl EventSink for BrokenSink {
        fn emit(&mut self, _level: Level, _message: &str) {
            if self.stored.is_none() {
                self.stored = Some(io::Error::new(io::ErrorKind::WriteZero, "sink rejected write"));
            }
        }

        fn take_error(&mut self) -> Option<io::Error> {
            self.stored.take()
        }
    }

    fn started() -> StatusObserver {
        let mut obs = StatusObserver::with_sink(BrokenSink::default());
        obs.on_experiment_start(&Logs::new()).unwrap();
        obs
    }

    fn is_write_zero(result: XpResult<()>) -> bool {
        matches!(result, Err(XpError::Io(ref e)) if e.kind() == io::ErrorKind::WriteZero)
    }

    #[test]
    fn returned_from_experiment_end() {
        let mut obs = started();
        assert!(is_write_zero(obs.on_experiment_end(&Logs::new().with("elapsed time", 1.0))));
    }

    #[test]
    fn returned_from_experiment_infeasible() {
        let mut obs = started();
        let logs = Logs::new()
            .with("termination", "event: Minimum voltage [V]")
            .with("cycle number", (2, 5))
            .with("step number", (1, 4))
            .with("step operating conditions", "Discharge at 1C until 3.0 V");
        assert!(is_write_zero(obs.on_experiment_infeasible(&logs)));
    }

    #[test]
    fn returned_from_experiment_error() {
        let mut obs = started();
        assert!(is_write_zero(obs.on_experiment_error(&Logs::new())));
    }

    #[test]
    fn returned_once() {
        let mut obs = started();
        assert!(obs.on_experiment_error(&Logs::new()).is_err());
        obs.on_experiment_error(&Logs::new()).unwrap();
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn full_device_reported_on_infeasible_path() {
        let mut obs = StatusObserver::with_logfile("/dev/full", Level::Info).unwrap();
        obs.on_experiment_start(&Logs::new()).unwrap();
        let logs = Logs::new()
            .with("termination", "event: Minimum voltage [V]")
            .with("cycle number", (1, 1))
            .with("step number", (1, 1))
            .with("step operating conditions", "Rest for 1 hour");
        assert!(matches!(obs.on_experiment_infeasible(&logs), Err(XpError::Io(_))));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use std::path::PathBuf;

    use xp_core::Level;

    use crate::StatusConfig;

    #[test]
    fn status_config_from_json() {
        let config: StatusConfig =
            serde_json::from_str(r#"{"logfile": "run/status.log", "level": "notice"}"#).unwrap();
        assert_eq!(config.logfile, Some(PathBuf::from("run/status.log")));
        assert_eq!(config.level, Level::Notice);

        let defaults: StatusConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(defaults, StatusConfig::default());
    }
}
