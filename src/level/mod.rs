//! Severity levels that gate which records reach which handlers.
//!
//! Levels are plain ordered integers so callers can define their own levels between the
//! named ones (`Level::new(2)` sits between info and warn). The named constants leave gaps
//! of four for exactly that purpose.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};

/// Derives `Ord` so handlers can compare a record's level against the configured minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Level(i32);

impl Level {
    /// High-volume instrumentation that would be too noisy outside of development.
    pub const TRACE: Self = Self(-8);
    /// Startup, teardown, and state-change details useful for diagnosing issues.
    pub const DEBUG: Self = Self(-4);
    /// Normal operational milestones.
    pub const INFO: Self = Self(0);
    /// Non-fatal anomalies that may need attention.
    pub const WARN: Self = Self(4);
    /// Failures that prevent the operation from completing.
    pub const ERROR: Self = Self(8);

    #[must_use]
    pub const fn new(level: i32) -> Self {
        Self(level)
    }

    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }

    /// Used by default glyph/color tables, config parsing, and tests.
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [Self::TRACE, Self::DEBUG, Self::INFO, Self::WARN, Self::ERROR]
    }

    /// Name of the level if it is one of the five named levels.
    #[must_use]
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            -8 => Some("TRACE"),
            -4 => Some("DEBUG"),
            0 => Some("INFO"),
            4 => Some("WARN"),
            8 => Some("ERROR"),
            _ => None,
        }
    }

    /// The named level at or below `self`, falling back to trace for anything lower.
    const fn base(self) -> Self {
        if self.0 >= Self::ERROR.0 {
            Self::ERROR
        } else if self.0 >= Self::WARN.0 {
            Self::WARN
        } else if self.0 >= Self::INFO.0 {
            Self::INFO
        } else if self.0 >= Self::DEBUG.0 {
            Self::DEBUG
        } else {
            Self::TRACE
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base = self.base();
        let name = base.name().unwrap_or("TRACE");
        match self.0 - base.0 {
            0 => f.write_str(name),
            offset => write!(f, "{name}{offset:+}"),
        }
    }
}

impl From<i32> for Level {
    fn from(level: i32) -> Self {
        Self(level)
    }
}

/// Returned by `FromStr` so callers can distinguish "unknown level" from other parse failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level: '{}'", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    /// Accepts the names printed by `Display`, including offsets such as `info+2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseLevelError(s.to_string());
        let lower = s.trim().to_lowercase();
        let (name, offset) = match lower.find(['+', '-']) {
            Some(idx) => {
                let offset: i32 = lower[idx..].parse().map_err(|_| err())?;
                (&lower[..idx], offset)
            }
            None => (lower.as_str(), 0),
        };

        let base = match name {
            "trace" => Self::TRACE,
            "debug" => Self::DEBUG,
            "info" => Self::INFO,
            "warn" | "warning" => Self::WARN,
            "error" | "err" => Self::ERROR,
            _ => return Err(err()),
        };

        base.0.checked_add(offset).map(Self).ok_or_else(err)
    }
}

/// Anything that can report a minimum level. Handlers ask on every record, so a
/// [`LevelVar`] changes the threshold of every handler built from it at once.
pub trait Leveler: Send + Sync {
    fn level(&self) -> Level;
}

impl Leveler for Level {
    fn level(&self) -> Level {
        *self
    }
}

/// A level that can be changed at runtime and shared between handlers.
#[derive(Debug, Clone, Default)]
pub struct LevelVar(Arc<AtomicI32>);

impl LevelVar {
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self(Arc::new(AtomicI32::new(level.0)))
    }

    pub fn set(&self, level: Level) {
        self.0.store(level.0, Ordering::Relaxed);
    }
}

impl Leveler for LevelVar {
    fn level(&self) -> Level {
        Level(self.0.load(Ordering::Relaxed))
    }
}
