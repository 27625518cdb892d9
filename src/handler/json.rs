//! One JSON object per line, groups as nested objects.
//!
//! `{"time":"...","level":"INFO","msg":"...","req":{"id":7}}`
//!
//! Durations are written as integer nanoseconds, times as RFC 3339 strings.

use super::{GroupOrAttrs, Handler, HandlerOptions, ReplaceAttr, Scope, replace_builtin};
use crate::context::Context;
use crate::level::{Level, Leveler};
use crate::record::{AnyValue, Attr, LEVEL_KEY, MESSAGE_KEY, Record, TIME_KEY, Value};
use chrono::SecondsFormat;
use serde_json::{Map, Number};
use std::fmt;
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

type Object = Map<String, serde_json::Value>;

#[derive(Clone)]
pub struct JsonHandler {
    writer: Arc<Mutex<Box<dyn Write + Send>>>,
    scope: Scope,
    level: Arc<dyn Leveler>,
    replace_attr: Option<ReplaceAttr>,
}

impl JsonHandler {
    pub fn new(writer: impl Write + Send + 'static, opts: HandlerOptions) -> Self {
        Self {
            writer: Arc::new(Mutex::new(Box::new(writer))),
            scope: Scope::new(),
            level: opts.resolved_level(),
            replace_attr: opts.replace_attr,
        }
    }

    /// The object written for `record`, before serialisation.
    #[must_use]
    pub fn to_object(&self, record: &Record) -> Object {
        let mut root = Object::new();

        if let Some(time) = record.time {
            let time = time.to_rfc3339_opts(SecondsFormat::Millis, false);
            self.insert_builtin(&mut root, Attr::string(TIME_KEY, time));
        }
        self.insert_builtin(&mut root, Attr::string(LEVEL_KEY, record.level.to_string()));
        self.insert_builtin(&mut root, Attr::string(MESSAGE_KEY, record.message.clone()));

        let entries = if record.attrs().is_empty() {
            self.scope.without_trailing_groups()
        } else {
            self.scope.entries()
        };
        let mut groups = Vec::new();
        let body = self.object_for(entries, record.attrs(), &mut groups);
        root.extend(body);
        root
    }

    /// Builds the object for `entries`: a group entry nests everything after it.
    fn object_for(
        &self,
        entries: &[Arc<GroupOrAttrs>],
        record_attrs: &[Attr],
        groups: &mut Vec<String>,
    ) -> Object {
        let mut map = Object::new();
        for (idx, entry) in entries.iter().enumerate() {
            match entry.as_ref() {
                GroupOrAttrs::Attrs(attrs) => {
                    for attr in attrs {
                        self.insert_attr(&mut map, groups, attr.clone());
                    }
                }
                GroupOrAttrs::Group(name) => {
                    groups.push(name.clone());
                    let child = self.object_for(&entries[idx + 1..], record_attrs, groups);
                    groups.pop();
                    if !child.is_empty() {
                        map.insert(name.clone(), serde_json::Value::Object(child));
                    }
                    return map;
                }
            }
        }
        for attr in record_attrs {
            self.insert_attr(&mut map, groups, attr.clone());
        }
        map
    }

    fn insert_attr(&self, map: &mut Object, groups: &mut Vec<String>, attr: Attr) {
        let attr = match &self.replace_attr {
            Some(replace) => match replace(groups.as_slice(), attr) {
                Some(attr) => attr,
                None => return,
            },
            None => attr,
        };

        match attr.value.resolve() {
            Value::Group(children) => {
                if attr.key.is_empty() {
                    for child in children {
                        self.insert_attr(map, groups, child);
                    }
                    return;
                }
                groups.push(attr.key.clone());
                let mut nested = Object::new();
                for child in children {
                    self.insert_attr(&mut nested, groups, child);
                }
                groups.pop();
                if !nested.is_empty() {
                    map.insert(attr.key, serde_json::Value::Object(nested));
                }
            }
            _ if attr.key.is_empty() && self.replace_attr.is_some() => {}
            value => {
                map.insert(attr.key, json_value(value));
            }
        }
    }

    fn insert_builtin(&self, map: &mut Object, attr: Attr) {
        if let Some(attr) = replace_builtin(self.replace_attr.as_ref(), attr) {
            map.insert(attr.key, json_value(attr.value.resolve()));
        }
    }

    fn derive(&self, scope: Scope) -> Self {
        let mut child = self.clone();
        child.scope = scope;
        child
    }
}

/// Non-group values only; groups are expanded by the caller.
fn json_value(value: Value) -> serde_json::Value {
    match value {
        Value::String(s) => s.into(),
        Value::Int64(i) => i.into(),
        Value::Uint64(u) => u.into(),
        Value::Float64(x) => Number::from_f64(x).map_or_else(
            || serde_json::Value::String(x.to_string()),
            serde_json::Value::Number,
        ),
        Value::Bool(b) => b.into(),
        Value::Duration(d) => u64::try_from(d.as_nanos()).unwrap_or(u64::MAX).into(),
        Value::Time(t) => t.to_rfc3339_opts(SecondsFormat::AutoSi, false).into(),
        Value::Any(AnyValue::Nil) => serde_json::Value::Null,
        Value::Any(AnyValue::Json(json)) => json,
        Value::Any(any) => any.render().into(),
        Value::Group(_) | Value::LogValuer(_) => value.to_string().into(),
    }
}

impl fmt::Debug for JsonHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonHandler")
            .field("level", &self.level.level())
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

impl Handler for JsonHandler {
    fn enabled(&self, _ctx: &Context, level: Level) -> bool {
        level >= self.level.level()
    }

    fn handle(&self, _ctx: &Context, record: &Record) -> Result<(), crate::Error> {
        let object = serde_json::Value::Object(self.to_object(record));
        let mut line = serde_json::to_vec(&object)?;
        line.push(b'\n');
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_all(&line)?;
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
