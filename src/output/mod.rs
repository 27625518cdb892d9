//! Sink adaptation: handlers always produce ANSI escapes, and the writer they write
//! through decides whether those escapes reach the sink.
//!
//! Piped output, log files and CI captures get clean text; an interactive terminal gets
//! color unless `NO_COLOR` is set or `TERM=dumb`.

use regex::bytes::Regex;
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::LazyLock;

/// SGR sequences are the only escapes the handlers emit.
static SGR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("Invalid SGR regex"));

/// Whether colored output is wanted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Color only for terminals, honouring `NO_COLOR` and `TERM=dumb`.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Resolves the choice for a sink that is (or is not) a terminal.
    #[must_use]
    pub fn should_color(self, is_terminal: bool) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => {
                is_terminal
                    && std::env::var_os("NO_COLOR").is_none_or(|v| v.is_empty())
                    && std::env::var("TERM").map_or(true, |term| term != "dumb")
            }
        }
    }
}

impl fmt::Display for ColorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Auto => "auto",
            Self::Always => "always",
            Self::Never => "never",
        })
    }
}

impl FromStr for ColorChoice {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" | "true" | "on" => Ok(Self::Always),
            "never" | "false" | "off" => Ok(Self::Never),
            _ => Err(crate::Error::Format(format!("unknown color choice: {s}"))),
        }
    }
}

/// Byte sink that strips SGR sequences unless color was resolved as wanted.
pub struct ColorWriter {
    inner: Box<dyn Write + Send>,
    colored: bool,
}

impl ColorWriter {
    pub fn new(inner: impl Write + Send + 'static, choice: ColorChoice, is_terminal: bool) -> Self {
        Self {
            inner: Box::new(inner),
            colored: choice.should_color(is_terminal),
        }
    }

    /// Whether escapes are passed through.
    #[must_use]
    pub const fn is_colored(&self) -> bool {
        self.colored
    }
}

impl fmt::Debug for ColorWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorWriter")
            .field("colored", &self.colored)
            .finish_non_exhaustive()
    }
}

impl Write for ColorWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.colored {
            return self.inner.write(buf);
        }
        let stripped = SGR_REGEX.replace_all(buf, &b""[..]);
        self.inner.write_all(&stripped)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Removes SGR sequences from already-rendered text.
#[must_use]
pub fn strip_ansi(text: &str) -> String {
    let stripped = SGR_REGEX.replace_all(text.as_bytes(), &b""[..]);
    String::from_utf8_lossy(&stripped).into_owned()
}
