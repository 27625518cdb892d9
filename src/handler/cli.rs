//! Human-readable console handler.
//!
//! One line per record: a colored level glyph right-aligned in a fixed column, the
//! message padded to a fixed width, then ` key=value` pairs with group prefixes.
//!
//! ```text
//!   • Starting server          addr=:8080 env=production
//!   ▲ Slow request             method=GET path=/users duration=497ms
//! ```

use super::{Handler, ReplaceAttr, Scope, replace_builtin};
use crate::context::Context;
use crate::fmt::{AttrRenderer, GlyphSet, LevelStyles};
use crate::level::{Level, Leveler};
use crate::output::{ColorChoice, ColorWriter};
use crate::record::{Attr, MESSAGE_KEY, Record};
use std::fmt::{self, Write as _};
use std::io::{self, IsTerminal, Write};
use std::sync::{Arc, Mutex, PoisonError};

const DEFAULT_PREFIX_PADDING: usize = 2;
const DEFAULT_MESSAGE_PADDING: usize = 25;

/// Width of the glyph column and the glyph per level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixOptions {
    /// Spaces before the glyph; the glyph is right-aligned in `padding + 1` columns.
    pub padding: usize,
    /// Must contain every level in use, see [`GlyphSet`].
    pub prefixes: GlyphSet,
}

impl Default for PrefixOptions {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PREFIX_PADDING,
            prefixes: GlyphSet::default(),
        }
    }
}

/// Construction-time options. The default value gives the default handler.
#[derive(Clone, Default)]
pub struct CliHandlerOptions {
    /// Minimum level; `None` means info. A [`crate::LevelVar`] makes it adjustable at runtime.
    pub level: Option<Arc<dyn Leveler>>,
    pub prefix: Option<PrefixOptions>,
    /// Must contain every level in use, see [`LevelStyles`].
    pub level_colors: Option<LevelStyles>,
    /// Message column width. `0` selects the default of 25, a negative value disables
    /// padding so a single space separates the message from the attributes.
    pub message_padding: i32,
    /// Called for every attribute and once for the message (key [`MESSAGE_KEY`]).
    pub replace_attr: Option<ReplaceAttr>,
    pub color: ColorChoice,
}

impl CliHandlerOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn level(mut self, level: impl Leveler + 'static) -> Self {
        self.level = Some(Arc::new(level));
        self
    }

    #[must_use]
    pub fn prefix(mut self, prefix: PrefixOptions) -> Self {
        self.prefix = Some(prefix);
        self
    }

    #[must_use]
    pub fn level_colors(mut self, colors: LevelStyles) -> Self {
        self.level_colors = Some(colors);
        self
    }

    #[must_use]
    pub const fn message_padding(mut self, padding: i32) -> Self {
        self.message_padding = padding;
        self
    }

    #[must_use]
    pub fn replace_attr<F>(mut self, f: F) -> Self
    where
        F: Fn(&[String], Attr) -> Option<Attr> + Send + Sync + 'static,
    {
        self.replace_attr = Some(Arc::new(f));
        self
    }

    #[must_use]
    pub const fn color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }
}

impl fmt::Debug for CliHandlerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CliHandlerOptions")
            .field("level", &self.level.as_ref().map(|l| l.level()))
            .field("prefix", &self.prefix)
            .field("level_colors", &self.level_colors)
            .field("message_padding", &self.message_padding)
            .field("replace_attr", &self.replace_attr.is_some())
            .field("color", &self.color)
            .finish()
    }
}

/// Console handler. Clones and derived handlers share the sink and its lock.
#[derive(Clone)]
pub struct CliHandler {
    writer: Arc<Mutex<ColorWriter>>,
    scope: Scope,

    level: Arc<dyn Leveler>,
    prefix_padding: usize,
    glyphs: Arc<GlyphSet>,
    styles: Arc<LevelStyles>,
    /// Zero means unpadded.
    message_padding: usize,
    replace_attr: Option<ReplaceAttr>,
}

impl CliHandler {
    /// Handler for an arbitrary writer, which is treated as a non-terminal: escapes are
    /// stripped unless `opts.color` is [`ColorChoice::Always`].
    pub fn new(writer: impl Write + Send + 'static, opts: CliHandlerOptions) -> Self {
        let writer = ColorWriter::new(writer, opts.color, false);
        Self::with_writer(writer, opts)
    }

    /// Handler for a stream that can tell whether it is a terminal (stderr, stdout, a file).
    pub fn from_terminal<W>(writer: W, opts: CliHandlerOptions) -> Self
    where
        W: Write + IsTerminal + Send + 'static,
    {
        let is_terminal = writer.is_terminal();
        let writer = ColorWriter::new(writer, opts.color, is_terminal);
        Self::with_writer(writer, opts)
    }

    /// Handler writing to stderr.
    #[must_use]
    pub fn stderr(opts: CliHandlerOptions) -> Self {
        Self::from_terminal(io::stderr(), opts)
    }

    fn with_writer(writer: ColorWriter, opts: CliHandlerOptions) -> Self {
        let prefix = opts.prefix.unwrap_or_default();
        let message_padding = match opts.message_padding {
            0 => DEFAULT_MESSAGE_PADDING,
            padding => usize::try_from(padding).unwrap_or(0),
        };

        Self {
            writer: Arc::new(Mutex::new(writer)),
            scope: Scope::new(),
            level: opts.level.unwrap_or_else(|| Arc::new(Level::INFO)),
            prefix_padding: prefix.padding,
            glyphs: Arc::new(prefix.prefixes),
            styles: Arc::new(opts.level_colors.unwrap_or_default()),
            message_padding,
            replace_attr: opts.replace_attr,
        }
    }

    /// Whether escapes reach the sink.
    #[must_use]
    pub fn is_colored(&self) -> bool {
        self.writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_colored()
    }

    /// The message after the replacement function; empty when suppressed.
    fn message(&self, message: &str) -> String {
        if self.replace_attr.is_none() {
            return message.to_string();
        }
        replace_builtin(
            self.replace_attr.as_ref(),
            Attr::string(MESSAGE_KEY, message),
        )
        .map(|attr| attr.value.to_string())
        .unwrap_or_default()
    }

    /// Renders the full line, newline included.
    #[must_use]
    pub fn format_record(&self, record: &Record) -> String {
        let style = self.styles.get(record.level);
        let glyph = self.glyphs.get(record.level);
        let message = self.message(&record.message);

        let mut buf = String::with_capacity(64 + message.len());
        style.paint(
            &mut buf,
            &format!("{glyph:>width$}", width = self.prefix_padding + 1),
        );
        buf.push(' ');
        if self.message_padding > 0 {
            let _ = write!(buf, "{message:<width$}", width = self.message_padding);
        } else {
            buf.push_str(&message);
        }

        AttrRenderer::new(self.replace_attr.as_ref(), style).render(
            &mut buf,
            &self.scope,
            record.attrs(),
        );

        buf.push('\n');
        buf
    }

    fn derive(&self, scope: Scope) -> Self {
        let mut child = self.clone();
        child.scope = scope;
        child
    }
}

impl fmt::Debug for CliHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CliHandler")
            .field("level", &self.level.level())
            .field("scope", &self.scope)
            .field("prefix_padding", &self.prefix_padding)
            .field("message_padding", &self.message_padding)
            .finish_non_exhaustive()
    }
}

impl Handler for CliHandler {
    fn enabled(&self, _ctx: &Context, level: Level) -> bool {
        level >= self.level.level()
    }

    fn handle(&self, _ctx: &Context, record: &Record) -> Result<(), crate::Error> {
        let line = self.format_record(record);
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_all(line.as_bytes())?;
        Ok(())
    }

    fn with_attrs(self: Arc<Self>, attrs: Vec<Attr>) -> Arc<dyn Handler> {
        if attrs.is_empty() {
            return self;
        }
        Arc::new(self.derive(self.scope.with_attrs(attrs)))
    }

    fn with_group(self: Arc<Self>, name: &str) -> Arc<dyn Handler> {
        if name.is_empty() {
            return self;
        }
        Arc::new(self.derive(self.scope.with_group(name)))
    }
}
