//! ANSI styling for the level glyph and attribute keys.
//!
//! The handlers always emit escape sequences; whether they reach the terminal is
//! decided by [`crate::output::ColorWriter`].

use crate::level::Level;
use std::collections::HashMap;
use std::fmt;

/// The eight basic terminal colors plus 24-bit true color for hex values from config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Rgb(u8, u8, u8),
}

impl Color {
    /// Parses `#RRGGBB`. Malformed input falls back to white so a typo in config doesn't
    /// break rendering.
    #[must_use]
    pub fn from_hex(hex: &str) -> Self {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Self::White;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        Self::Rgb(r, g, b)
    }

    /// A basic color name or a `#RRGGBB` value.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let color = match name.to_lowercase().as_str() {
            "black" => Self::Black,
            "red" => Self::Red,
            "green" => Self::Green,
            "yellow" => Self::Yellow,
            "blue" => Self::Blue,
            "magenta" | "purple" => Self::Magenta,
            "cyan" => Self::Cyan,
            "white" => Self::White,
            hex if hex.starts_with('#') => Self::from_hex(hex),
            _ => return None,
        };
        Some(color)
    }

    /// SGR parameters selecting this color as foreground, without the `ESC [` / `m` framing.
    #[must_use]
    pub fn fg_code(self) -> String {
        match self {
            Self::Black => "30".to_string(),
            Self::Red => "31".to_string(),
            Self::Green => "32".to_string(),
            Self::Yellow => "33".to_string(),
            Self::Blue => "34".to_string(),
            Self::Magenta => "35".to_string(),
            Self::Cyan => "36".to_string(),
            Self::White => "37".to_string(),
            Self::Rgb(r, g, b) => format!("38;2;{r};{g};{b}"),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Black => f.write_str("black"),
            Self::Red => f.write_str("red"),
            Self::Green => f.write_str("green"),
            Self::Yellow => f.write_str("yellow"),
            Self::Blue => f.write_str("blue"),
            Self::Magenta => f.write_str("magenta"),
            Self::Cyan => f.write_str("cyan"),
            Self::White => f.write_str("white"),
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

/// Foreground color plus text attributes. The default style emits no escape codes at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    pub fg: Option<Color>,
    pub bold: bool,
    pub dim: bool,
}

impl Style {
    /// Terminates any active SGR styling.
    pub const RESET: &'static str = "\x1b[0m";

    #[must_use]
    pub const fn new() -> Self {
        Self {
            fg: None,
            bold: false,
            dim: false,
        }
    }

    #[must_use]
    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub const fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    #[must_use]
    pub const fn is_plain(&self) -> bool {
        self.fg.is_none() && !self.bold && !self.dim
    }

    /// Parses a whitespace-separated spec such as `"bold red"`, `"dim"` or `"#ff79c6"`.
    /// Returns `None` if any word is unknown.
    #[must_use]
    pub fn parse(spec: &str) -> Option<Self> {
        let mut style = Self::new();
        for word in spec.split_whitespace() {
            match word.to_lowercase().as_str() {
                "bold" => style.bold = true,
                "dim" | "faint" => style.dim = true,
                "plain" | "none" => {}
                other => style.fg = Some(Color::from_name(other)?),
            }
        }
        Some(style)
    }

    /// The opening escape sequence, empty for a plain style.
    #[must_use]
    pub fn sgr(&self) -> String {
        let mut codes: Vec<String> = Vec::new();
        if self.bold {
            codes.push("1".to_string());
        }
        if self.dim {
            codes.push("2".to_string());
        }
        if let Some(fg) = self.fg {
            codes.push(fg.fg_code());
        }
        if codes.is_empty() {
            return String::new();
        }
        format!("\x1b[{}m", codes.join(";"))
    }

    /// Appends `text` wrapped in this style's escape sequences.
    pub fn paint(&self, buf: &mut String, text: &str) {
        if self.is_plain() {
            buf.push_str(text);
            return;
        }
        buf.push_str(&self.sgr());
        buf.push_str(text);
        buf.push_str(Self::RESET);
    }
}

/// Style per level. Lookups for levels without an entry return the plain style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelStyles {
    styles: HashMap<Level, Style>,
}

impl LevelStyles {
    /// An empty table: every level renders unstyled until set.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            styles: HashMap::new(),
        }
    }

    #[must_use]
    pub fn get(&self, level: Level) -> Style {
        self.styles.get(&level).copied().unwrap_or_default()
    }

    pub fn set(&mut self, level: Level, style: Style) {
        self.styles.insert(level, style);
    }

    #[must_use]
    pub fn with(mut self, level: Level, style: Style) -> Self {
        self.set(level, style);
        self
    }
}

/// Trace and debug dimmed, info blue, warn yellow, error red.
impl Default for LevelStyles {
    fn default() -> Self {
        Self::empty()
            .with(Level::TRACE, Style::new().dim())
            .with(Level::DEBUG, Style::new().dim())
            .with(Level::INFO, Style::new().fg(Color::Blue))
            .with(Level::WARN, Style::new().fg(Color::Yellow))
            .with(Level::ERROR, Style::new().fg(Color::Red))
    }
}

impl FromIterator<(Level, Style)> for LevelStyles {
    fn from_iter<I: IntoIterator<Item = (Level, Style)>>(iter: I) -> Self {
        Self {
            styles: iter.into_iter().collect(),
        }
    }
}
