//! The per-event payload map passed to every observer.
//!
//! # Design
//!
//! The shape of each payload is owned by the simulation engine, not by this
//! crate, so `Logs` is a loosely-typed string-keyed map.  Observers pull the
//! values they need through the typed accessors (`get_f64`, `get_pair`, …),
//! which turn a missing key or a wrong shape into an [`XpError`] instead of a
//! panic.  Nothing here validates a payload up front.
//!
//! ```rust
//! use xp_core::Logs;
//!
//! let logs = Logs::new()
//!     .with("cycle number", (2, 10))
//!     .with("elapsed time", 12.5);
//!
//! assert_eq!(logs.get_index_pair("cycle number").unwrap(), (2, 10));
//! assert_eq!(logs.get("elapsed time").unwrap().to_string(), "12.5");
//! ```

use std::collections::BTreeMap;
use std::fmt;

use crate::{XpError, XpResult};

// ── LogValue ─────────────────────────────────────────────────────────────────

/// One payload value.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum LogValue {
    /// Explicitly unset, e.g. a stopping condition that was not requested.
    #[default]
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// A two-element tuple such as `(current, total)` or `(3.0, "V")`.
    Pair(Box<LogValue>, Box<LogValue>),
    Map(Logs),
}

impl LogValue {
    pub fn is_none(&self) -> bool {
        matches!(self, LogValue::None)
    }

    /// Numeric view: integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            LogValue::Float(x) => Some(x),
            LogValue::Int(i)   => Some(i as f64),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            LogValue::Int(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            LogValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_pair(&self) -> Option<(&LogValue, &LogValue)> {
        match self {
            LogValue::Pair(a, b) => Some((a, b)),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Logs> {
        match self {
            LogValue::Map(m) => Some(m),
            _ => None,
        }
    }
}

impl fmt::Display for LogValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogValue::None       => f.write_str("None"),
            LogValue::Bool(b)    => write!(f, "{b}"),
            LogValue::Int(i)     => write!(f, "{i}"),
            LogValue::Float(x)   => write!(f, "{x}"),
            LogValue::Str(s)     => f.write_str(s),
            LogValue::Pair(a, b) => write!(f, "({a}, {b})"),
            LogValue::Map(m)     => write!(f, "{m}"),
        }
    }
}

// ── Conversions ──────────────────────────────────────────────────────────────

impl From<bool> for LogValue {
    fn from(b: bool) -> Self {
        LogValue::Bool(b)
    }
}

impl From<i64> for LogValue {
    fn from(i: i64) -> Self {
        LogValue::Int(i)
    }
}

impl From<i32> for LogValue {
    fn from(i: i32) -> Self {
        LogValue::Int(i as i64)
    }
}

impl From<u32> for LogValue {
    fn from(i: u32) -> Self {
        LogValue::Int(i as i64)
    }
}

impl From<usize> for LogValue {
    fn from(i: usize) -> Self {
        LogValue::Int(i as i64)
    }
}

impl From<f64> for LogValue {
    fn from(x: f64) -> Self {
        LogValue::Float(x)
    }
}

impl From<&str> for LogValue {
    fn from(s: &str) -> Self {
        LogValue::Str(s.to_owned())
    }
}

impl From<String> for LogValue {
    fn from(s: String) -> Self {
        LogValue::Str(s)
    }
}

impl From<Logs> for LogValue {
    fn from(m: Logs) -> Self {
        LogValue::Map(m)
    }
}

impl<A: Into<LogValue>, B: Into<LogValue>> From<(A, B)> for LogValue {
    fn from((a, b): (A, B)) -> Self {
        LogValue::Pair(Box::new(a.into()), Box::new(b.into()))
    }
}

/// `None` maps to [`LogValue::None`].
impl<T: Into<LogValue>> From<Option<T>> for LogValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(LogValue::None, Into::into)
    }
}

// ── Logs ─────────────────────────────────────────────────────────────────────

/// String-keyed payload map handed to every observer handler.
///
/// Keys iterate in sorted order.  Broadcasts share one `&Logs` across all
/// observers; treat it as read-only.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Logs(BTreeMap<String, LogValue>);

impl Logs {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<LogValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace `key`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<LogValue>) -> Option<LogValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LogValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    // ── Typed accessors ───────────────────────────────────────────────────

    /// Look up `key`, failing with [`XpError::MissingKey`] if absent.
    pub fn get(&self, key: &str) -> XpResult<&LogValue> {
        self.0.get(key).ok_or_else(|| XpError::missing(key))
    }

    /// Look up an optional entry.  Both an absent key and an explicit
    /// [`LogValue::None`] read as `None`.
    pub fn get_opt(&self, key: &str) -> Option<&LogValue> {
        self.0.get(key).filter(|v| !v.is_none())
    }

    pub fn get_f64(&self, key: &str) -> XpResult<f64> {
        self.get(key)?
            .as_f64()
            .ok_or_else(|| XpError::wrong_type(key, "a number"))
    }

    pub fn get_i64(&self, key: &str) -> XpResult<i64> {
        self.get(key)?
            .as_i64()
            .ok_or_else(|| XpError::wrong_type(key, "an integer"))
    }

    pub fn get_str(&self, key: &str) -> XpResult<&str> {
        self.get(key)?
            .as_str()
            .ok_or_else(|| XpError::wrong_type(key, "a string"))
    }

    pub fn get_pair(&self, key: &str) -> XpResult<(&LogValue, &LogValue)> {
        self.get(key)?
            .as_pair()
            .ok_or_else(|| XpError::wrong_type(key, "a pair"))
    }

    pub fn get_map(&self, key: &str) -> XpResult<&Logs> {
        self.get(key)?
            .as_map()
            .ok_or_else(|| XpError::wrong_type(key, "a map"))
    }

    /// Read a `(current, total)` integer pair such as `"cycle number"`.
    pub fn get_index_pair(&self, key: &str) -> XpResult<(i64, i64)> {
        let (a, b) = self.get_pair(key)?;
        match (a.as_i64(), b.as_i64()) {
            (Some(a), Some(b)) => Ok((a, b)),
            _ => Err(XpError::wrong_type(key, "a pair of integers")),
        }
    }
}

impl fmt::Display for Logs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}: {v}")?;
        }
        f.write_str("}")
    }
}

impl<K: Into<String>, V: Into<LogValue>> FromIterator<(K, V)> for Logs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
