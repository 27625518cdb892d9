//! Leveled front end over a [`Handler`].
//!
//! `Logger` builds records and hands them to its handler; scoping (`with`, `with_group`)
//! is delegated to the handler, so a logger is as cheap to derive as its handler.
//! Handler errors stop at this layer: logging calls never fail.

mod from_config;

use crate::context::Context;
use crate::handler::{CliHandler, CliHandlerOptions, Handler};
use crate::level::Level;
use crate::record::{Attr, Record};
use std::fmt;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

static DEFAULT_LOGGER: LazyLock<RwLock<Logger>> = LazyLock::new(|| {
    RwLock::new(Logger::new(Arc::new(CliHandler::stderr(
        CliHandlerOptions::default(),
    ))))
});

/// Cheap to clone; clones share the handler.
#[derive(Clone)]
pub struct Logger {
    handler: Arc<dyn Handler>,
}

impl Logger {
    #[must_use]
    pub fn new(handler: Arc<dyn Handler>) -> Self {
        Self { handler }
    }

    #[must_use]
    pub const fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    /// Whether both loggers write through the same handler instance.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.handler, &other.handler)
    }

    /// A logger whose records all carry `attrs`.
    #[must_use]
    pub fn with(&self, attrs: impl IntoIterator<Item = Attr>) -> Self {
        Self::new(Arc::clone(&self.handler).with_attrs(attrs.into_iter().collect()))
    }

    /// A logger nesting all following attributes under `name`.
    #[must_use]
    pub fn with_group(&self, name: &str) -> Self {
        Self::new(Arc::clone(&self.handler).with_group(name))
    }

    #[must_use]
    pub fn enabled(&self, ctx: &Context, level: Level) -> bool {
        self.handler.enabled(ctx, level)
    }

    /// Builds a record and hands it to the handler if the level is enabled.
    pub fn log_attrs(
        &self,
        ctx: &Context,
        level: Level,
        msg: &str,
        attrs: impl IntoIterator<Item = Attr>,
    ) {
        if !self.handler.enabled(ctx, level) {
            return;
        }
        let record = Record::new(level, msg).with_attrs(attrs);
        let _ = self.handler.handle(ctx, &record);
    }

    /// [`Logger::log_attrs`] with an empty context.
    pub fn log(&self, level: Level, msg: &str, attrs: impl IntoIterator<Item = Attr>) {
        self.log_attrs(&Context::background(), level, msg, attrs);
    }

    pub fn trace(&self, msg: &str, attrs: impl IntoIterator<Item = Attr>) {
        self.log(Level::TRACE, msg, attrs);
    }

    pub fn debug(&self, msg: &str, attrs: impl IntoIterator<Item = Attr>) {
        self.log(Level::DEBUG, msg, attrs);
    }

    pub fn info(&self, msg: &str, attrs: impl IntoIterator<Item = Attr>) {
        self.log(Level::INFO, msg, attrs);
    }

    pub fn warn(&self, msg: &str, attrs: impl IntoIterator<Item = Attr>) {
        self.log(Level::WARN, msg, attrs);
    }

    pub fn error(&self, msg: &str, attrs: impl IntoIterator<Item = Attr>) {
        self.log(Level::ERROR, msg, attrs);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").finish_non_exhaustive()
    }
}

impl<H: Handler + 'static> From<H> for Logger {
    fn from(handler: H) -> Self {
        Self::new(Arc::new(handler))
    }
}

/// The process-wide default logger: a console handler on stderr at info level until
/// replaced with [`set_default`].
#[must_use]
pub fn default_logger() -> Logger {
    DEFAULT_LOGGER
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Replaces the process-wide default logger.
pub fn set_default(logger: Logger) {
    *DEFAULT_LOGGER
        .write()
        .unwrap_or_else(PoisonError::into_inner) = logger;
}
