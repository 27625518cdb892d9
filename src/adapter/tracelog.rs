//! Adapter for database-driver style trace loggers.
//!
//! Drivers report events as a numeric [`TraceLevel`], a message and a loose map of
//! data (`sql`, `args`, `err`, ...). [`TraceLogAdapter`] turns each event into one
//! record on a [`Logger`] with a stable attribute order.

use crate::context::Context;
use crate::level::Level;
use crate::logger::Logger;
use crate::record::{Attr, ERROR_KEY, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Keys placed first, in this order. Everything else follows sorted by key.
const LEADING_KEYS: [&str; 3] = [ERROR_KEY, "sql", "args"];

/// Attribute added when the driver reports a level outside the known range.
pub const INVALID_LEVEL_KEY: &str = "INVALID_TRACE_LOG_LEVEL";

/// Driver-side severity. Higher is more verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TraceLevel(pub u8);

impl TraceLevel {
    pub const TRACE: Self = Self(6);
    pub const DEBUG: Self = Self(5);
    pub const INFO: Self = Self(4);
    pub const WARN: Self = Self(3);
    pub const ERROR: Self = Self(2);
    pub const NONE: Self = Self(1);

    /// Default mapping; `None` for levels without one.
    #[must_use]
    pub const fn to_level(self) -> Option<Level> {
        match self {
            Self::TRACE => Some(Level::TRACE),
            Self::DEBUG => Some(Level::DEBUG),
            Self::INFO => Some(Level::INFO),
            Self::WARN => Some(Level::WARN),
            Self::ERROR => Some(Level::ERROR),
            _ => None,
        }
    }
}

impl fmt::Display for TraceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::TRACE => f.write_str("trace"),
            Self::DEBUG => f.write_str("debug"),
            Self::INFO => f.write_str("info"),
            Self::WARN => f.write_str("warn"),
            Self::ERROR => f.write_str("error"),
            Self::NONE => f.write_str("none"),
            Self(n) => write!(f, "invalid level {n}"),
        }
    }
}

/// The interface drivers log through.
pub trait TraceLog: Send + Sync {
    fn log(&self, ctx: &Context, level: TraceLevel, msg: &str, data: HashMap<String, Value>);
}

type DynError = dyn std::error::Error + Send + Sync + 'static;
type ErrorMatcher = Arc<dyn Fn(&DynError) -> bool + Send + Sync>;

/// [`TraceLog`] implementation writing to a [`Logger`].
#[derive(Clone)]
pub struct TraceLogAdapter {
    logger: Logger,
    ignore_errors: Option<ErrorMatcher>,
    level_map: HashMap<TraceLevel, Level>,
}

impl TraceLogAdapter {
    #[must_use]
    pub fn new(logger: Logger) -> Self {
        Self {
            logger,
            ignore_errors: None,
            level_map: HashMap::new(),
        }
    }

    /// Drops events whose `err` matches `matcher`.
    #[must_use]
    pub fn ignore_errors<F>(mut self, matcher: F) -> Self
    where
        F: Fn(&DynError) -> bool + Send + Sync + 'static,
    {
        self.ignore_errors = Some(Arc::new(matcher));
        self
    }

    /// Logs driver level `from` as `to`. Takes precedence over the default mapping.
    #[must_use]
    pub fn remap_level(mut self, from: TraceLevel, to: Level) -> Self {
        self.level_map.insert(from, to);
        self
    }

    fn to_level(&self, level: TraceLevel) -> (Level, bool) {
        if let Some(mapped) = self.level_map.get(&level) {
            return (*mapped, true);
        }
        level.to_level().map_or((Level::ERROR, false), |l| (l, true))
    }

    fn is_ignored(&self, data: &HashMap<String, Value>) -> bool {
        let Some(matcher) = &self.ignore_errors else {
            return false;
        };
        data.get(ERROR_KEY)
            .and_then(Value::as_any)
            .and_then(|any| any.as_error())
            .is_some_and(|err| matcher(err))
    }
}

/// `err`, `sql`, `args` first, then the remaining keys sorted.
fn build_attrs(mut data: HashMap<String, Value>) -> Vec<Attr> {
    let mut attrs: Vec<Attr> = LEADING_KEYS
        .iter()
        .filter_map(|key| data.remove(*key).map(|value| Attr::new(*key, value)))
        .collect();

    let mut rest: Vec<(String, Value)> = data.into_iter().collect();
    rest.sort_by(|a, b| a.0.cmp(&b.0));
    attrs.extend(rest.into_iter().map(|(key, value)| Attr::new(key, value)));
    attrs
}

impl TraceLog for TraceLogAdapter {
    fn log(&self, ctx: &Context, level: TraceLevel, msg: &str, data: HashMap<String, Value>) {
        let (lvl, known) = self.to_level(level);
        if !self.logger.enabled(ctx, lvl) {
            return;
        }
        if self.is_ignored(&data) {
            return;
        }

        let mut attrs = build_attrs(data);
        if !known {
            attrs.push(Attr::display(INVALID_LEVEL_KEY, level));
        }
        self.logger.log_attrs(ctx, lvl, msg, attrs);
    }
}

impl fmt::Debug for TraceLogAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraceLogAdapter")
            .field("logger", &self.logger)
            .field("ignore_errors", &self.ignore_errors.is_some())
            .field("level_map", &self.level_map)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_keys_then_sorted() {
        let data = HashMap::from([
            ("pid".to_string(), Value::from(123)),
            ("args".to_string(), Value::from("[1 2 3]")),
            ("commandTag".to_string(), Value::from("SELECT 0 1")),
            ("sql".to_string(), Value::from("SELECT 1")),
        ]);
        let keys: Vec<String> = build_attrs(data).into_iter().map(|a| a.key).collect();
        assert_eq!(keys, ["sql", "args", "commandTag", "pid"]);
    }

    #[test]
    fn unknown_level_maps_to_error() {
        let adapter = TraceLogAdapter::new(crate::logger::default_logger());
        assert_eq!(adapter.to_level(TraceLevel(42)), (Level::ERROR, false));
        assert_eq!(adapter.to_level(TraceLevel::NONE), (Level::ERROR, false));
        assert_eq!(adapter.to_level(TraceLevel::TRACE), (Level::TRACE, true));
    }
}
