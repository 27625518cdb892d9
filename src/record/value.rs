//! Typed attribute values.
//!
//! The set of kinds is closed so every handler can dispatch on it exhaustively; opaque
//! values go through [`AnyValue`], which keeps just enough of the original type to
//! render it (display, debug, error, text marshalling, or JSON).

use super::Attr;
use chrono::{DateTime, FixedOffset, TimeZone};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Lazy values are resolved at most this many times before giving up.
const MAX_LOG_VALUER_DEPTH: usize = 100;

/// Discriminant of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Any,
    Bool,
    Duration,
    Float64,
    Int64,
    String,
    Time,
    Uint64,
    Group,
    LogValuer,
}

impl Kind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Any => "Any",
            Self::Bool => "Bool",
            Self::Duration => "Duration",
            Self::Float64 => "Float64",
            Self::Int64 => "Int64",
            Self::String => "String",
            Self::Time => "Time",
            Self::Uint64 => "Uint64",
            Self::Group => "Group",
            Self::LogValuer => "LogValuer",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Types that know how to produce their own log value, resolved only when a handler
/// actually renders the attribute.
pub trait LogValuer: Send + Sync {
    fn log_value(&self) -> Value;
}

/// Types with a canonical text encoding. Handlers prefer it over `Debug`; when
/// marshalling fails they fall back to the `Debug` form.
pub trait TextMarshaler: fmt::Debug + Send + Sync {
    /// # Errors
    /// Whatever prevents the value from being encoded.
    fn marshal_text(&self) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}

/// Opaque value, cloned by reference.
#[derive(Clone)]
pub enum AnyValue {
    /// An absent value (`None` error, missing object). Renders as `<nil>`.
    Nil,
    Display(Arc<dyn fmt::Display + Send + Sync>),
    Debug(Arc<dyn fmt::Debug + Send + Sync>),
    Error(Arc<dyn std::error::Error + Send + Sync>),
    Text(Arc<dyn TextMarshaler>),
    Json(serde_json::Value),
}

impl AnyValue {
    pub fn display(value: impl fmt::Display + Send + Sync + 'static) -> Self {
        Self::Display(Arc::new(value))
    }

    pub fn debug(value: impl fmt::Debug + Send + Sync + 'static) -> Self {
        Self::Debug(Arc::new(value))
    }

    pub fn error(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Error(Arc::new(err))
    }

    pub fn text(value: impl TextMarshaler + 'static) -> Self {
        Self::Text(Arc::new(value))
    }

    /// The wrapped error, if this value carries one.
    #[must_use]
    pub fn as_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::Error(err) => Some(err.as_ref()),
            _ => None,
        }
    }

    /// Text form used by the attribute renderers.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => f.write_str("<nil>"),
            Self::Display(v) => write!(f, "{v}"),
            Self::Debug(v) => write!(f, "{v:?}"),
            Self::Error(e) => write!(f, "{e}"),
            Self::Text(t) => match t.marshal_text() {
                Ok(text) => f.write_str(&text),
                Err(_) => write!(f, "{t:?}"),
            },
            Self::Json(serde_json::Value::String(s)) => f.write_str(s),
            Self::Json(v) => write!(f, "{v}"),
        }
    }
}

impl fmt::Debug for AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => f.write_str("Nil"),
            Self::Display(v) => f.debug_tuple("Display").field(&v.to_string()).finish(),
            Self::Debug(v) => f.debug_tuple("Debug").field(v).finish(),
            Self::Error(e) => f.debug_tuple("Error").field(e).finish(),
            Self::Text(t) => f.debug_tuple("Text").field(t).finish(),
            Self::Json(v) => f.debug_tuple("Json").field(v).finish(),
        }
    }
}

/// Reported in place of a lazy value that kept producing lazy values.
#[derive(Debug)]
struct ResolveDepthExceeded;

impl fmt::Display for ResolveDepthExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "log value resolved {MAX_LOG_VALUER_DEPTH} times without producing a concrete value"
        )
    }
}

impl std::error::Error for ResolveDepthExceeded {}

/// The value half of an [`Attr`].
#[derive(Clone)]
pub enum Value {
    String(String),
    Int64(i64),
    Uint64(u64),
    Float64(f64),
    Bool(bool),
    Duration(Duration),
    Time(DateTime<FixedOffset>),
    Group(Vec<Attr>),
    Any(AnyValue),
    LogValuer(Arc<dyn LogValuer>),
}

impl Value {
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::String(_) => Kind::String,
            Self::Int64(_) => Kind::Int64,
            Self::Uint64(_) => Kind::Uint64,
            Self::Float64(_) => Kind::Float64,
            Self::Bool(_) => Kind::Bool,
            Self::Duration(_) => Kind::Duration,
            Self::Time(_) => Kind::Time,
            Self::Group(_) => Kind::Group,
            Self::Any(_) => Kind::Any,
            Self::LogValuer(_) => Kind::LogValuer,
        }
    }

    /// Wraps a lazily computed value.
    pub fn lazy(valuer: impl LogValuer + 'static) -> Self {
        Self::LogValuer(Arc::new(valuer))
    }

    /// Replaces lazy values by what they produce. Non-lazy values are returned as-is.
    #[must_use]
    pub fn resolve(self) -> Self {
        let mut value = self;
        for _ in 0..MAX_LOG_VALUER_DEPTH {
            match value {
                Self::LogValuer(valuer) => value = valuer.log_value(),
                other => return other,
            }
        }
        Self::Any(AnyValue::error(ResolveDepthExceeded))
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_group(&self) -> Option<&Vec<Attr>> {
        match self {
            Self::Group(attrs) => Some(attrs),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_any(&self) -> Option<&AnyValue> {
        match self {
            Self::Any(any) => Some(any),
            _ => None,
        }
    }
}

/// The plain string form: strings unquoted, groups as `[k=v ...]`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Int64(i) => write!(f, "{i}"),
            Self::Uint64(u) => write!(f, "{u}"),
            Self::Float64(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Duration(d) => write!(f, "{d:?}"),
            Self::Time(t) => write!(f, "{t}"),
            Self::Group(attrs) => {
                f.write_str("[")?;
                for (i, attr) in attrs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{attr}")?;
                }
                f.write_str("]")
            }
            Self::Any(any) => write!(f, "{any}"),
            Self::LogValuer(_) => write!(f, "{}", self.clone().resolve()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.debug_tuple("String").field(s).finish(),
            Self::Int64(i) => f.debug_tuple("Int64").field(i).finish(),
            Self::Uint64(u) => f.debug_tuple("Uint64").field(u).finish(),
            Self::Float64(x) => f.debug_tuple("Float64").field(x).finish(),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Duration(d) => f.debug_tuple("Duration").field(d).finish(),
            Self::Time(t) => f.debug_tuple("Time").field(t).finish(),
            Self::Group(attrs) => f.debug_tuple("Group").field(attrs).finish(),
            Self::Any(any) => f.debug_tuple("Any").field(any).finish(),
            Self::LogValuer(_) => f.write_str("LogValuer(..)"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Self::String(s.clone())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int64(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int64(i64::from(i))
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Self::Uint64(u)
    }
}

impl From<u32> for Value {
    fn from(u: u32) -> Self {
        Self::Uint64(u64::from(u))
    }
}

impl From<usize> for Value {
    fn from(u: usize) -> Self {
        Self::Uint64(u64::try_from(u).unwrap_or(u64::MAX))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float64(x)
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Self::Float64(f64::from(x))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Duration> for Value {
    fn from(d: Duration) -> Self {
        Self::Duration(d)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Value {
    fn from(t: DateTime<Tz>) -> Self {
        Self::Time(t.fixed_offset())
    }
}

impl From<Vec<Attr>> for Value {
    fn from(attrs: Vec<Attr>) -> Self {
        Self::Group(attrs)
    }
}

impl From<AnyValue> for Value {
    fn from(any: AnyValue) -> Self {
        Self::Any(any)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        Self::Any(AnyValue::Json(json))
    }
}
