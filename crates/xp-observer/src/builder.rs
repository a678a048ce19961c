//! Normalizing caller-supplied observers into an [`ObserverList`].

use tracing::debug;

use crate::{Observer, ObserverList, StatusObserver};

/// Observers handed to [`setup_observers`]: none, one, or an ordered list.
pub enum ObserverInput {
    None,
    Single(Box<dyn Observer>),
    List(Vec<Box<dyn Observer>>),
}

impl ObserverInput {
    fn into_vec(self) -> Vec<Box<dyn Observer>> {
        match self {
            ObserverInput::None         => Vec::new(),
            ObserverInput::Single(one)  => vec![one],
            ObserverInput::List(list)   => list,
        }
    }
}

impl From<Box<dyn Observer>> for ObserverInput {
    fn from(observer: Box<dyn Observer>) -> Self {
        ObserverInput::Single(observer)
    }
}

impl From<Vec<Box<dyn Observer>>> for ObserverInput {
    fn from(observers: Vec<Box<dyn Observer>>) -> Self {
        ObserverInput::List(observers)
    }
}

impl From<Option<Box<dyn Observer>>> for ObserverInput {
    fn from(observer: Option<Box<dyn Observer>>) -> Self {
        observer.map_or(ObserverInput::None, ObserverInput::Single)
    }
}

impl From<Option<Vec<Box<dyn Observer>>>> for ObserverInput {
    fn from(observers: Option<Vec<Box<dyn Observer>>>) -> Self {
        observers.map_or(ObserverInput::None, ObserverInput::List)
    }
}

/// Build an [`ObserverList`] that is guaranteed to report status.
///
/// The input keeps its order.  If no supplied observer is a status observer
/// (see [`Observer::is_status_observer`]), a default [`StatusObserver`]
/// logging through `tracing` is appended last.  Caller-supplied status
/// observers are never removed, so passing several keeps them all.
///
/// ```rust
/// use xp_observer::{setup_observers, ObserverInput};
///
/// let observers = setup_observers(ObserverInput::None);
/// assert_eq!(observers.len(), 1);
/// assert_eq!(observers.status_observer_count(), 1);
/// ```
pub fn setup_observers(input: impl Into<ObserverInput>) -> ObserverList {
    ObserverListBuilder::new().observers(input).build()
}

/// Fluent builder for [`ObserverList`].
///
/// # Optional inputs (have defaults)
///
/// | Method                  | Default                                   |
/// |-------------------------|-------------------------------------------|
/// | `.observer(o)`          | —                                         |
/// | `.observers(input)`     | —                                         |
/// | `.default_status(s)`    | `StatusObserver::new()` (tracing sink)    |
///
/// # Example
///
/// ```rust
/// use xp_observer::{MemorySink, NoopObserver, ObserverListBuilder, StatusObserver};
///
/// let sink = MemorySink::new();
/// let observers = ObserverListBuilder::new()
///     .observer(NoopObserver)
///     .default_status(StatusObserver::with_sink(sink.clone()))
///     .build();
/// assert_eq!(observers.len(), 2);
/// ```
#[derive(Default)]
pub struct ObserverListBuilder {
    observers:      Vec<Box<dyn Observer>>,
    default_status: Option<StatusObserver>,
}

impl ObserverListBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one observer.
    pub fn observer(mut self, observer: impl Observer + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Append every observer in `input`, in order.
    pub fn observers(mut self, input: impl Into<ObserverInput>) -> Self {
        self.observers.extend(input.into().into_vec());
        self
    }

    /// The status observer appended when none of the supplied observers is
    /// one.  Ignored otherwise.
    pub fn default_status(mut self, status: StatusObserver) -> Self {
        self.default_status = Some(status);
        self
    }

    pub fn build(self) -> ObserverList {
        let mut observers = self.observers;
        if !observers.iter().any(|o| o.is_status_observer()) {
            debug!(supplied = observers.len(), "appending default status observer");
            observers.push(Box::new(self.default_status.unwrap_or_default()));
        }
        debug!(observers = observers.len(), "observer list ready");
        ObserverList::new(observers)
    }
}
