//! Configuration struct definitions.

use serde::Deserialize;
use std::collections::HashMap;

/// General configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`, or e.g. `info+2`).
    pub level: String,
    /// Color choice (`auto`, `always`, `never`).
    pub color: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            color: "auto".to_string(),
        }
    }
}

/// Level glyph column.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PrefixConfig {
    /// Spaces before the glyph.
    pub padding: usize,
    /// Glyph family (`unicode`, `ascii`).
    pub style: String,
    /// Per-level overrides, keyed by level name.
    pub glyphs: HashMap<String, String>,
}

impl Default for PrefixConfig {
    fn default() -> Self {
        Self {
            padding: 2,
            style: "unicode".to_string(),
            glyphs: HashMap::new(),
        }
    }
}

/// Message column.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MessageConfig {
    /// Width of the message column; 0 selects the default, negative disables padding.
    pub padding: i32,
}

/// Attribute redaction applied through the replacement hook.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RedactConfig {
    /// Keys to redact at any nesting depth. `msg` redacts the message itself.
    pub keys: Vec<String>,
    /// Replacement value; without one, redacted attributes are dropped.
    pub replacement: Option<String>,
}
