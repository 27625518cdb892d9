//! TOML configuration for the console handler.
//!
//! Every field has a default, so an empty file (or no file) yields the default handler.
//!
//! ```toml
//! [general]
//! level = "debug"
//! color = "auto"
//!
//! [prefix]
//! padding = 2
//! glyphs = { info = "i" }
//!
//! [colors]
//! info = "bold blue"
//! debug = "dim"
//!
//! [message]
//! padding = 30
//!
//! [redact]
//! keys = ["password", "token"]
//! replacement = "***"
//! ```

mod structs;

pub use structs::{GeneralConfig, MessageConfig, PrefixConfig, RedactConfig};

use crate::fmt::{GlyphSet, LevelStyles, Style};
use crate::handler::{CliHandlerOptions, PrefixOptions, ReplaceAttr};
use crate::internal;
use crate::level::Level;
use crate::output::ColorChoice;
use crate::record::{Attr, Value};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub prefix: PrefixConfig,
    /// Style per level name, e.g. `warn = "bold yellow"`.
    pub colors: HashMap<String, String>,
    pub message: MessageConfig,
    pub redact: RedactConfig,
}

impl Config {
    /// Loads the config from the default location. A missing file yields defaults.
    ///
    /// # Errors
    /// Fails if the config directory can't be determined or the TOML is malformed.
    pub fn load() -> Result<Self, crate::Error> {
        let path = Self::get_config_path()?;
        if !path.exists() {
            internal::debug("CONFIG", "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let config = Self::load_from(&path)?;
        internal::info("CONFIG", &format!("Config loaded from {}", path.display()));
        Ok(config)
    }

    /// Loads the config from an explicit path, which must exist.
    ///
    /// # Errors
    /// Returns an error if the file is missing, unreadable or malformed.
    pub fn load_from(path: &Path) -> Result<Self, crate::Error> {
        if !path.exists() {
            return Err(crate::Error::ConfigNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// # Errors
    /// Returns an error on malformed TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, crate::Error> {
        Ok(toml::from_str(content)?)
    }

    /// `<config_dir>/attrlog/config.toml`.
    ///
    /// # Errors
    /// Fails when the platform has no concept of a config directory.
    pub fn get_config_path() -> Result<PathBuf, crate::Error> {
        directories::ProjectDirs::from("", "", "attrlog")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(crate::Error::ConfigDirNotFound)
    }

    /// Unknown level strings fall back to info.
    #[must_use]
    pub fn parse_level(&self) -> Level {
        self.general.level.parse().unwrap_or_else(|_| {
            internal::warn(
                "CONFIG",
                &format!("Unknown level '{}', using info", self.general.level),
            );
            Level::INFO
        })
    }

    /// Unknown color choices fall back to auto.
    #[must_use]
    pub fn parse_color(&self) -> ColorChoice {
        self.general.color.parse().unwrap_or_default()
    }

    /// Base glyph family with per-level overrides applied.
    #[must_use]
    pub fn glyph_set(&self) -> GlyphSet {
        let mut glyphs = match self.prefix.style.to_lowercase().as_str() {
            "ascii" => GlyphSet::ascii(),
            _ => GlyphSet::default(),
        };
        for (name, glyph) in &self.prefix.glyphs {
            if let Some(level) = parse_level_key(name) {
                glyphs.set(level, glyph.clone());
            }
        }
        glyphs
    }

    /// Default level styles with the `[colors]` overrides applied.
    #[must_use]
    pub fn level_styles(&self) -> LevelStyles {
        let mut styles = LevelStyles::default();
        for (name, spec) in &self.colors {
            let Some(level) = parse_level_key(name) else {
                continue;
            };
            match Style::parse(spec) {
                Some(style) => styles.set(level, style),
                None => internal::warn("CONFIG", &format!("Unknown style '{spec}' for {name}")),
            }
        }
        styles
    }

    /// Replacement hook implementing `[redact]`, or `None` when no keys are listed.
    #[must_use]
    pub fn replace_attr(&self) -> Option<ReplaceAttr> {
        if self.redact.keys.is_empty() {
            return None;
        }
        let keys: HashSet<String> = self.redact.keys.iter().cloned().collect();
        let replacement = self.redact.replacement.clone();
        Some(Arc::new(move |_groups: &[String], attr: Attr| {
            if !keys.contains(&attr.key) {
                return Some(attr);
            }
            replacement
                .as_ref()
                .map(|r| Attr::new(attr.key, Value::String(r.clone())))
        }))
    }

    #[must_use]
    pub fn cli_handler_options(&self) -> CliHandlerOptions {
        CliHandlerOptions {
            level: Some(Arc::new(self.parse_level())),
            prefix: Some(PrefixOptions {
                padding: self.prefix.padding,
                prefixes: self.glyph_set(),
            }),
            level_colors: Some(self.level_styles()),
            message_padding: self.message.padding,
            replace_attr: self.replace_attr(),
            color: self.parse_color(),
        }
    }
}

fn parse_level_key(name: &str) -> Option<Level> {
    match name.parse() {
        Ok(level) => Some(level),
        Err(e) => {
            internal::warn("CONFIG", &format!("Ignoring entry: {e}"));
            None
        }
    }
}
