//! The data handlers consume: records, attributes and their values.

mod value;

pub use value::{AnyValue, Kind, LogValuer, TextMarshaler, Value};

use crate::level::Level;
use chrono::{DateTime, Local};
use std::fmt;
use std::time::Duration;

/// Key of the synthetic message attribute passed to replacement functions.
pub const MESSAGE_KEY: &str = "msg";
/// Key of the record time in text and JSON output.
pub const TIME_KEY: &str = "time";
/// Key of the record level in text and JSON output.
pub const LEVEL_KEY: &str = "level";
/// Key used by [`err`].
pub const ERROR_KEY: &str = "err";

/// A key paired with a typed value. Keys are not required to be unique.
#[derive(Clone, Debug)]
pub struct Attr {
    pub key: String,
    pub value: Value,
}

impl Attr {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, Value::String(value.into()))
    }

    pub fn int(key: impl Into<String>, value: i64) -> Self {
        Self::new(key, Value::Int64(value))
    }

    pub fn uint(key: impl Into<String>, value: u64) -> Self {
        Self::new(key, Value::Uint64(value))
    }

    pub fn float(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, Value::Float64(value))
    }

    pub fn bool(key: impl Into<String>, value: bool) -> Self {
        Self::new(key, Value::Bool(value))
    }

    pub fn duration(key: impl Into<String>, value: Duration) -> Self {
        Self::new(key, Value::Duration(value))
    }

    /// A group attribute. Handlers render its children with `key.` prepended.
    pub fn group(key: impl Into<String>, attrs: impl IntoIterator<Item = Self>) -> Self {
        Self::new(key, Value::Group(attrs.into_iter().collect()))
    }

    pub fn display(
        key: impl Into<String>,
        value: impl fmt::Display + Send + Sync + 'static,
    ) -> Self {
        Self::new(key, AnyValue::display(value))
    }

    pub fn debug(key: impl Into<String>, value: impl fmt::Debug + Send + Sync + 'static) -> Self {
        Self::new(key, AnyValue::debug(value))
    }

    pub fn error(
        key: impl Into<String>,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::new(key, AnyValue::error(err))
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Error attribute under [`ERROR_KEY`]; an absent error renders as `<nil>`.
pub fn err<E>(err: Option<E>) -> Attr
where
    E: std::error::Error + Send + Sync + 'static,
{
    let value = err.map_or(AnyValue::Nil, AnyValue::error);
    Attr::new(ERROR_KEY, value)
}

/// Shorthand for [`Attr::new`].
pub fn attr(key: impl Into<String>, value: impl Into<Value>) -> Attr {
    Attr::new(key, value)
}

/// One log event. Handlers that keep a record past `handle` must clone it.
#[derive(Clone, Debug)]
pub struct Record {
    /// `None` means "no time"; text and JSON handlers then omit the time field.
    pub time: Option<DateTime<Local>>,
    pub level: Level,
    pub message: String,
    attrs: Vec<Attr>,
}

impl Record {
    /// Stamped with the current local time.
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            time: Some(Local::now()),
            level,
            message: message.into(),
            attrs: Vec::new(),
        }
    }

    #[must_use]
    pub const fn with_time(mut self, time: Option<DateTime<Local>>) -> Self {
        self.time = time;
        self
    }

    #[must_use]
    pub fn with_attrs(mut self, attrs: impl IntoIterator<Item = Attr>) -> Self {
        self.attrs.extend(attrs);
        self
    }

    pub fn add_attrs(&mut self, attrs: impl IntoIterator<Item = Attr>) {
        self.attrs.extend(attrs);
    }

    #[must_use]
    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }

    #[must_use]
    pub fn num_attrs(&self) -> usize {
        self.attrs.len()
    }
}
