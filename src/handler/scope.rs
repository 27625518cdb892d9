//! Per-handler record of `with_group` / `with_attrs` calls.
//!
//! Each derived handler owns its own `Scope`. Entries are shared behind `Arc` and never
//! mutated, so deriving copies a vector of pointers and appends one entry; siblings
//! derived from the same parent cannot observe each other.

use crate::record::Attr;
use std::sync::Arc;

/// One scoping call: a group opening or a batch of attributes.
#[derive(Debug, Clone)]
pub enum GroupOrAttrs {
    Group(String),
    Attrs(Vec<Attr>),
}

#[derive(Debug, Clone, Default)]
pub struct Scope {
    entries: Vec<Arc<GroupOrAttrs>>,
}

impl Scope {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Copy with one attribute batch appended. An empty batch yields an unchanged copy.
    #[must_use]
    pub fn with_attrs(&self, attrs: Vec<Attr>) -> Self {
        if attrs.is_empty() {
            return self.clone();
        }
        self.push(GroupOrAttrs::Attrs(attrs))
    }

    /// Copy with one group opening appended. An empty name yields an unchanged copy.
    #[must_use]
    pub fn with_group(&self, name: &str) -> Self {
        if name.is_empty() {
            return self.clone();
        }
        self.push(GroupOrAttrs::Group(name.to_string()))
    }

    fn push(&self, entry: GroupOrAttrs) -> Self {
        let mut entries = Vec::with_capacity(self.entries.len() + 1);
        entries.extend(self.entries.iter().cloned());
        entries.push(Arc::new(entry));
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[Arc<GroupOrAttrs>] {
        &self.entries
    }

    /// Entries minus any group openings at the tail. A record without attributes of its
    /// own would leave those groups empty, and empty groups render nothing.
    #[must_use]
    pub fn without_trailing_groups(&self) -> &[Arc<GroupOrAttrs>] {
        let end = self
            .entries
            .iter()
            .rposition(|entry| matches!(entry.as_ref(), GroupOrAttrs::Attrs(_)))
            .map_or(0, |idx| idx + 1);
        &self.entries[..end]
    }

    /// Names of all opened groups, outermost first.
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|entry| match entry.as_ref() {
            GroupOrAttrs::Group(name) => Some(name.as_str()),
            GroupOrAttrs::Attrs(_) => None,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
