//! Rendering of ` key=value` pairs, shared by the console and text handlers.

use super::Style;
use super::quote::append_string;
use crate::handler::{GroupOrAttrs, ReplaceAttr, Scope};
use crate::record::{Attr, Value};
use std::fmt::Write as _;

/// Renders a handler's scope and a record's attributes into one line buffer.
///
/// Every pair is preceded by a single space. Group attributes never render themselves,
/// only their children, with `group.` prepended to the key.
pub struct AttrRenderer<'a> {
    replace: Option<&'a ReplaceAttr>,
    key_style: Style,
}

impl<'a> AttrRenderer<'a> {
    #[must_use]
    pub const fn new(replace: Option<&'a ReplaceAttr>, key_style: Style) -> Self {
        Self { replace, key_style }
    }

    /// Replays `scope` and then renders `record_attrs` under the accumulated prefix.
    pub fn render(&self, buf: &mut String, scope: &Scope, record_attrs: &[Attr]) {
        let entries = if record_attrs.is_empty() {
            scope.without_trailing_groups()
        } else {
            scope.entries()
        };

        let mut prefix = String::new();
        let mut groups: Vec<String> = Vec::with_capacity(entries.len());
        for entry in entries {
            match entry.as_ref() {
                GroupOrAttrs::Group(name) => {
                    prefix.push_str(name);
                    prefix.push('.');
                    groups.push(name.clone());
                }
                GroupOrAttrs::Attrs(attrs) => {
                    for attr in attrs {
                        self.append_attr(buf, &mut groups, attr.clone(), &prefix);
                    }
                }
            }
        }

        for attr in record_attrs {
            self.append_attr(buf, &mut groups, attr.clone(), &prefix);
        }
    }

    /// Renders one attribute. `groups` is the path handed to the replacement function;
    /// it is restored before returning.
    pub fn append_attr(&self, buf: &mut String, groups: &mut Vec<String>, attr: Attr, prefix: &str) {
        let attr = match self.replace {
            Some(replace) => match replace(groups.as_slice(), attr) {
                Some(attr) => attr,
                None => return,
            },
            None => attr,
        };

        let key = attr.key;
        match attr.value.resolve() {
            Value::Group(children) => {
                if children.is_empty() {
                    return;
                }
                // An unnamed group inlines its children.
                if key.is_empty() {
                    for child in children {
                        self.append_attr(buf, groups, child, prefix);
                    }
                    return;
                }
                let nested = format!("{prefix}{key}.");
                groups.push(key);
                for child in children {
                    self.append_attr(buf, groups, child, &nested);
                }
                groups.pop();
            }
            // A replacement that clears the key suppresses the attribute.
            _ if key.is_empty() && self.replace.is_some() => {}
            value => {
                buf.push(' ');
                let mut rendered_key = String::with_capacity(prefix.len() + key.len());
                append_string(&mut rendered_key, &format!("{prefix}{key}"));
                self.key_style.paint(buf, &rendered_key);
                buf.push('=');
                append_value(buf, &value);
            }
        }
    }
}

/// Renders a value by kind: numbers and bools verbatim, everything textual quoted when
/// needed.
pub fn append_value(buf: &mut String, value: &Value) {
    match value {
        Value::String(s) => append_string(buf, s),
        Value::Int64(i) => {
            let _ = write!(buf, "{i}");
        }
        Value::Uint64(u) => {
            let _ = write!(buf, "{u}");
        }
        Value::Float64(x) => {
            let _ = write!(buf, "{x}");
        }
        Value::Bool(b) => {
            let _ = write!(buf, "{b}");
        }
        Value::Duration(d) => append_string(buf, &format!("{d:?}")),
        Value::Time(t) => append_string(buf, &t.to_string()),
        Value::Any(any) => append_string(buf, &any.render()),
        Value::Group(_) | Value::LogValuer(_) => append_string(buf, &value.to_string()),
    }
}
