//! Capture now, decide later.
//!
//! A [`BufferingHandler`] accepts every record and stores it together with the scope it
//! was logged under. [`Emitter::emit_to`] later replays the buffer into any handler,
//! possibly one that did not exist when the records were logged, re-applying each
//! record's groups and attributes in their original order. Typical use: log a unit of
//! work speculatively and only emit the records if it failed.
//!
//! ```
//! use attrlog::buffering::BufferingHandler;
//! use attrlog::{Handler, Logger, TextHandler, HandlerOptions};
//! use std::sync::Arc;
//!
//! let buffer = BufferingHandler::new();
//! let logger = Logger::new(Arc::new(buffer.clone()));
//! logger.info("step one", []);
//!
//! let downstream: Arc<dyn Handler> = Arc::new(TextHandler::new(std::io::sink(), HandlerOptions::new()));
//! buffer.emit_to(Some(&downstream)).unwrap();
//! assert!(buffer.emitter().is_empty());
//! ```

use crate::context::Context;
use crate::handler::{GroupOrAttrs, Handler, Scope};
use crate::internal;
use crate::level::Level;
use crate::record::{Attr, Record};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// One captured `handle` call. The scope is the handler's scope at capture time.
struct BufferedRecord {
    ctx: Context,
    record: Record,
    level: Level,
    scope: Scope,
}

/// The buffer shared by a root [`BufferingHandler`] and everything derived from it.
#[derive(Default)]
pub struct Emitter {
    records: Mutex<Vec<BufferedRecord>>,
}

impl Emitter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<BufferedRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replays every buffered record into `downstream`, in arrival order, then clears
    /// the buffer.
    ///
    /// Each record gets its own derived handler: the captured group and attribute
    /// entries are applied in order, then the record is forwarded if that handler is
    /// enabled for its level. `None` is a successful no-op. The lock is held for the
    /// whole replay, so concurrent `handle` calls wait.
    ///
    /// # Errors
    /// The first error returned by the downstream handler. Records forwarded before it
    /// stay forwarded and the buffer is kept intact, so a retry sends them again.
    pub fn emit_to(&self, downstream: Option<&Arc<dyn Handler>>) -> Result<(), crate::Error> {
        let Some(downstream) = downstream else {
            return Ok(());
        };

        let mut records = self.lock();
        let mut forwarded = 0usize;
        for buffered in records.iter() {
            let handler = replay_scope(Arc::clone(downstream), &buffered.scope);
            if handler.enabled(&buffered.ctx, buffered.level) {
                if let Err(err) = handler.handle(&buffered.ctx, &buffered.record) {
                    internal::warn(
                        "BUFFER",
                        &format!(
                            "Replay stopped after {forwarded} of {} records: {err}",
                            records.len()
                        ),
                    );
                    return Err(err);
                }
                forwarded += 1;
            }
        }

        internal::debug(
            "BUFFER",
            &format!("Replayed {forwarded} of {} buffered records", records.len()),
        );
        records.clear();
        Ok(())
    }

    /// Drops every buffered record without emitting it.
    pub fn discard(&self) {
        self.lock().clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn push(&self, record: BufferedRecord) {
        self.lock().push(record);
    }
}

impl fmt::Debug for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("records", &self.len())
            .finish()
    }
}

/// Re-applies a captured scope onto `handler`, one call per entry.
fn replay_scope(handler: Arc<dyn Handler>, scope: &Scope) -> Arc<dyn Handler> {
    scope
        .entries()
        .iter()
        .fold(handler, |current, entry| match entry.as_ref() {
            GroupOrAttrs::Group(name) => current.with_group(name),
            GroupOrAttrs::Attrs(attrs) => current.with_attrs(attrs.clone()),
        })
}

/// Scoped view onto a shared [`Emitter`]. Cloning shares the emitter and the scope.
#[derive(Clone, Debug, Default)]
pub struct BufferingHandler {
    emitter: Arc<Emitter>,
    scope: Scope,
}

impl BufferingHandler {
    /// A handler with a fresh, empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn emitter(&self) -> &Arc<Emitter> {
        &self.emitter
    }

    /// See [`Emitter::emit_to`].
    ///
    /// # Errors
    /// The first error returned by the downstream handler.
    pub fn emit_to(&self, downstream: Option<&Arc<dyn Handler>>) -> Result<(), crate::Error> {
        self.emitter.emit_to(downstream)
    }

    fn derive(&self, scope: Scope) -> Self {
        Self {
            emitter: Arc::clone(&self.emitter),
            scope,
        }
    }
}

impl Handler for BufferingHandler {
    /// Always true: the decision is made against the downstream handler at replay time.
    fn enabled(&self, _ctx: &Context, _level: Level) -> bool {
        true
    }

    fn handle(&self, ctx: &Context, record: &Record) -> Result<(), crate::Error> {
        self.emitter.push(BufferedRecord {
            ctx: ctx.clone(),
            record: record.clone(),
            level: record.level,
            scope: self.scope.clone(),
        });
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
