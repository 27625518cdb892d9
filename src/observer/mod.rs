//! In-memory handler that keeps every record it is given, for asserting on log output
//! in tests.

use crate::context::Context;
use crate::handler::{GroupOrAttrs, Handler, Scope};
use crate::level::{Level, Leveler};
use crate::record::{Attr, Record};
use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// One observed `handle` call.
#[derive(Debug, Clone)]
pub struct ObservedRecord {
    pub time: Option<DateTime<Local>>,
    pub level: Level,
    pub message: String,
    /// The record's own attributes followed by the handler's scope attributes in the
    /// order they were added.
    pub attrs: Vec<Attr>,
    /// Groups open on the handler when the record was logged, outermost first.
    pub groups: Vec<String>,
}

impl ObservedRecord {
    /// Attributes keyed by name; later duplicates win.
    #[must_use]
    pub fn attrs_map(&self) -> HashMap<&str, &Attr> {
        self.attrs.iter().map(|a| (a.key.as_str(), a)).collect()
    }
}

/// Shared store behind an [`ObserverHandler`] and its derived handlers.
#[derive(Default)]
pub struct ObservedLogs {
    records: Mutex<Vec<ObservedRecord>>,
}

impl ObservedLogs {
    fn lock(&self) -> MutexGuard<'_, Vec<ObservedRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn all(&self) -> Vec<ObservedRecord> {
        self.lock().clone()
    }

    /// Returns the records and clears the store.
    pub fn take_all(&self) -> Vec<ObservedRecord> {
        std::mem::take(&mut *self.lock())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl fmt::Debug for ObservedLogs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservedLogs")
            .field("records", &self.len())
            .finish()
    }
}

#[derive(Clone)]
pub struct ObserverHandler {
    logs: Arc<ObservedLogs>,
    level: Arc<dyn Leveler>,
    scope: Scope,
}

impl ObserverHandler {
    /// A handler recording everything at or above `level`, and the store it writes to.
    #[must_use]
    pub fn new(level: impl Leveler + 'static) -> (Self, Arc<ObservedLogs>) {
        let logs = Arc::new(ObservedLogs::default());
        let handler = Self {
            logs: Arc::clone(&logs),
            level: Arc::new(level),
            scope: Scope::new(),
        };
        (handler, logs)
    }

    fn derive(&self, scope: Scope) -> Self {
        Self {
            logs: Arc::clone(&self.logs),
            level: Arc::clone(&self.level),
            scope,
        }
    }
}

impl Handler for ObserverHandler {
    fn enabled(&self, _ctx: &Context, level: Level) -> bool {
        level >= self.level.level()
    }

    fn handle(&self, _ctx: &Context, record: &Record) -> Result<(), crate::Error> {
        let mut attrs = record.attrs().to_vec();
        for entry in self.scope.entries() {
            if let GroupOrAttrs::Attrs(scoped) = entry.as_ref() {
                attrs.extend(scoped.iter().cloned());
            }
        }
        self.logs.lock().push(ObservedRecord {
            time: record.time,
            level: record.level,
            message: record.message.clone(),
            attrs,
            groups: self.scope.groups().map(str::to_string).collect(),
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

impl fmt::Debug for ObserverHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverHandler")
            .field("level", &self.level.level())
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}
