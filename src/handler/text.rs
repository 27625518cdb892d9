//! `key=value` (logfmt) handler: `time=... level=INFO msg="..." k=v`.
//!
//! Machine-friendly counterpart of the console handler. Shares its quoting and scope
//! rules, so the same record renders the same attributes in both.

use super::{Handler, HandlerOptions, ReplaceAttr, Scope, replace_builtin};
use crate::context::Context;
use crate::fmt::{AttrRenderer, Style, append_string, append_value};
use crate::level::{Level, Leveler};
use crate::record::{Attr, LEVEL_KEY, MESSAGE_KEY, Record, TIME_KEY, Value};
use chrono::SecondsFormat;
use std::fmt;
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Clone)]
pub struct TextHandler {
    writer: Arc<Mutex<Box<dyn Write + Send>>>,
    scope: Scope,
    level: Arc<dyn Leveler>,
    replace_attr: Option<ReplaceAttr>,
}

impl TextHandler {
    pub fn new(writer: impl Write + Send + 'static, opts: HandlerOptions) -> Self {
        Self {
            writer: Arc::new(Mutex::new(Box::new(writer))),
            scope: Scope::new(),
            level: opts.resolved_level(),
            replace_attr: opts.replace_attr,
        }
    }

    /// Renders the full line, newline included.
    #[must_use]
    pub fn format_record(&self, record: &Record) -> String {
        let mut buf = String::with_capacity(128);

        if let Some(time) = record.time {
            let time = time.to_rfc3339_opts(SecondsFormat::Millis, false);
            self.append_builtin(&mut buf, Attr::string(TIME_KEY, time));
        }
        self.append_builtin(&mut buf, Attr::string(LEVEL_KEY, record.level.to_string()));
        self.append_builtin(&mut buf, Attr::string(MESSAGE_KEY, record.message.clone()));

        AttrRenderer::new(self.replace_attr.as_ref(), Style::new()).render(
            &mut buf,
            &self.scope,
            record.attrs(),
        );

        let mut line = match buf.strip_prefix(' ') {
            Some(rest) => rest.to_string(),
            None => buf,
        };
        line.push('\n');
        line
    }

    fn append_builtin(&self, buf: &mut String, attr: Attr) {
        let Some(attr) = replace_builtin(self.replace_attr.as_ref(), attr) else {
            return;
        };
        buf.push(' ');
        append_string(buf, &attr.key);
        buf.push('=');
        let value: Value = attr.value.resolve();
        append_value(buf, &value);
    }

    fn derive(&self, scope: Scope) -> Self {
        let mut child = self.clone();
        child.scope = scope;
        child
    }
}

impl fmt::Debug for TextHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextHandler")
            .field("level", &self.level.level())
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

impl Handler for TextHandler {
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
