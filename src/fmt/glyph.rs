//! Single-character level markers drawn in front of every console line.

use crate::level::Level;
use std::collections::HashMap;

/// Glyph per level. The table must cover every level in use: an unmapped level renders
/// as an empty glyph rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphSet {
    glyphs: HashMap<Level, String>,
}

impl GlyphSet {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            glyphs: HashMap::new(),
        }
    }

    /// ASCII fallback for terminals without the default Unicode glyphs.
    #[must_use]
    pub fn ascii() -> Self {
        Self::empty()
            .with(Level::TRACE, "-")
            .with(Level::DEBUG, ".")
            .with(Level::INFO, "*")
            .with(Level::WARN, "!")
            .with(Level::ERROR, "x")
    }

    #[must_use]
    pub fn get(&self, level: Level) -> &str {
        self.glyphs.get(&level).map_or("", String::as_str)
    }

    pub fn set(&mut self, level: Level, glyph: impl Into<String>) {
        self.glyphs.insert(level, glyph.into());
    }

    #[must_use]
    pub fn with(mut self, level: Level, glyph: impl Into<String>) -> Self {
        self.set(level, glyph);
        self
    }
}

impl Default for GlyphSet {
    fn default() -> Self {
        Self::empty()
            .with(Level::TRACE, "-")
            .with(Level::DEBUG, "◦")
            .with(Level::INFO, "•")
            .with(Level::WARN, "▲")
            .with(Level::ERROR, "✕")
    }
}

impl<S: Into<String>> FromIterator<(Level, S)> for GlyphSet {
    fn from_iter<I: IntoIterator<Item = (Level, S)>>(iter: I) -> Self {
        Self {
            glyphs: iter.into_iter().map(|(l, g)| (l, g.into())).collect(),
        }
    }
}
