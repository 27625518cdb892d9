//! Request-scoped values threaded through every handler call.
//!
//! A [`Context`] is an immutable chain of type-keyed values: adding a value returns a
//! new context and leaves the original untouched, so a context can be shared across
//! threads and handed to buffered records without copying.
//!
//! The logger helpers ([`with_logger`], [`from_context`]) let request handlers carry a
//! scoped [`Logger`] down a call chain without passing it explicitly.

use crate::logger::{self, Logger};
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

struct Node {
    key: TypeId,
    value: Arc<dyn Any + Send + Sync>,
    parent: Option<Arc<Node>>,
}

/// Cheap to clone; lookups walk the chain from the newest value.
#[derive(Clone, Default)]
pub struct Context {
    head: Option<Arc<Node>>,
}

impl Context {
    /// The empty context.
    #[must_use]
    pub const fn background() -> Self {
        Self { head: None }
    }

    /// A new context where `value` shadows any earlier value of the same type.
    #[must_use]
    pub fn with_value<T: Any + Send + Sync>(&self, value: T) -> Self {
        Self {
            head: Some(Arc::new(Node {
                key: TypeId::of::<T>(),
                value: Arc::new(value),
                parent: self.head.clone(),
            })),
        }
    }

    /// The most recently added value of type `T`.
    #[must_use]
    pub fn value<T: Any + Send + Sync>(&self) -> Option<&T> {
        let mut node = self.head.as_deref();
        while let Some(n) = node {
            if n.key == TypeId::of::<T>() {
                return n.value.downcast_ref::<T>();
            }
            node = n.parent.as_deref();
        }
        None
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut node = self.head.as_deref();
        while let Some(n) = node {
            depth += 1;
            node = n.parent.as_deref();
        }
        depth
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("values", &self.depth())
            .finish()
    }
}

/// Private key type so no other crate can shadow the stored logger.
#[derive(Clone)]
struct LoggerKey(Logger);

/// Returns a context carrying `logger`, retrievable with [`from_context`].
#[must_use]
pub fn with_logger(ctx: &Context, logger: Logger) -> Context {
    ctx.with_value(LoggerKey(logger))
}

/// The logger stored in `ctx`, or the process-wide default logger.
#[must_use]
pub fn from_context(ctx: &Context) -> Logger {
    ctx.value::<LoggerKey>()
        .map_or_else(logger::default_logger, |key| key.0.clone())
}
