//! Unified error type for all attrlog operations.

use std::path::PathBuf;

/// Error type for attrlog operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error from a sink or a config file.
    Io(std::io::Error),
    /// TOML config parsing error.
    ConfigParse(toml::de::Error),
    /// Config directory not found.
    ConfigDirNotFound,
    /// Config file given explicitly does not exist.
    ConfigNotFound(PathBuf),
    /// JSON encoding or decoding error.
    Json(serde_json::Error),
    /// Invalid log level string.
    InvalidLevel(String),
    /// Malformed input that is not a level (color choice, style spec, log line).
    Format(String),
    /// Failure reported by a downstream handler.
    Handler(Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wraps an error raised by a user-defined handler.
    pub fn handler(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Handler(err.into())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ConfigParse(e) => write!(f, "parse error: {e}"),
            Self::ConfigDirNotFound => write!(f, "config directory not found"),
            Self::ConfigNotFound(p) => write!(f, "config file not found: {}", p.display()),
            Self::Json(e) => write!(f, "json error: {e}"),
            Self::InvalidLevel(level) => write!(f, "invalid level: {level}"),
            Self::Format(s) => write!(f, "format error: {s}"),
            Self::Handler(e) => write!(f, "handler error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::ConfigParse(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Handler(e) => Some(e.as_ref()),
            Self::ConfigDirNotFound
            | Self::ConfigNotFound(_)
            | Self::InvalidLevel(_)
            | Self::Format(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigParse(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}
