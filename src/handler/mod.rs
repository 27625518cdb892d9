//! The handler contract every log destination implements, plus the built-in handlers.
//!
//! A handler is asked whether a level is enabled, then handed each record. Scoped
//! children are derived with [`Handler::with_attrs`] and [`Handler::with_group`]; they
//! never mutate the receiver and share its sink.

mod cli;
mod json;
mod scope;
mod text;

pub use cli::{CliHandler, CliHandlerOptions, PrefixOptions};
pub use json::JsonHandler;
pub use scope::{GroupOrAttrs, Scope};
pub use text::TextHandler;

use crate::context::Context;
use crate::level::{Level, Leveler};
use crate::record::{Attr, Record};
use std::fmt;
use std::sync::Arc;

/// Rewrites or suppresses an attribute before it is rendered. Receives the names of the
/// groups the attribute is nested in; returning `None` drops the attribute.
pub type ReplaceAttr = Arc<dyn Fn(&[String], Attr) -> Option<Attr> + Send + Sync>;

/// Destination for log records.
///
/// `with_attrs` and `with_group` take `self: Arc<Self>` so that a no-op call (empty
/// attributes, empty name) can hand back the very same handler.
pub trait Handler: Send + Sync {
    /// Whether records at `level` would be handled. Callers skip `handle` when false.
    fn enabled(&self, ctx: &Context, level: Level) -> bool;

    /// Processes one record.
    ///
    /// # Errors
    /// Sink write failures or failures of a downstream handler.
    fn handle(&self, ctx: &Context, record: &Record) -> Result<(), crate::Error>;

    /// A handler whose output includes `attrs` on every record.
    fn with_attrs(self: Arc<Self>, attrs: Vec<Attr>) -> Arc<dyn Handler>;

    /// A handler that nests every following attribute under `name`.
    fn with_group(self: Arc<Self>, name: &str) -> Arc<dyn Handler>;
}

/// Options shared by [`TextHandler`] and [`JsonHandler`].
#[derive(Clone, Default)]
pub struct HandlerOptions {
    /// Minimum level; `None` means info.
    pub level: Option<Arc<dyn Leveler>>,
    pub replace_attr: Option<ReplaceAttr>,
}

impl HandlerOptions {
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
    pub fn replace_attr<F>(mut self, f: F) -> Self
    where
        F: Fn(&[String], Attr) -> Option<Attr> + Send + Sync + 'static,
    {
        self.replace_attr = Some(Arc::new(f));
        self
    }

    fn resolved_level(&self) -> Arc<dyn Leveler> {
        self.level.clone().unwrap_or_else(|| Arc::new(Level::INFO))
    }
}

impl fmt::Debug for HandlerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerOptions")
            .field("level", &self.level.as_ref().map(|l| l.level()))
            .field("replace_attr", &self.replace_attr.is_some())
            .finish()
    }
}

/// Applies the replacement function, if any, to a built-in field such as the message.
fn replace_builtin(replace: Option<&ReplaceAttr>, attr: Attr) -> Option<Attr> {
    match replace {
        Some(f) => f(&[], attr).filter(|a| !a.key.is_empty()),
        None => Some(attr),
    }
}
