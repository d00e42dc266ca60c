//! Records as seen by the slug hooks.

use std::collections::BTreeMap;

/// Attribute access the lifecycle hooks need from a persisted record.
///
/// The record keeps two snapshots: the current attribute values and the values
/// as they were last loaded from (or written to) storage.
pub trait SlugRecord {
    /// Current value of `name`, if set.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Value of `name` as last persisted, if set.
    fn original_attribute(&self, name: &str) -> Option<String>;

    fn set_attribute(&mut self, name: &str, value: String);
}

/// Attribute-map record for callers without a model type of their own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    current: BTreeMap<String, String>,
    original: BTreeMap<String, String>,
}

impl Record {
    /// A new, never-persisted record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a current attribute, builder style.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.current.insert(name.into(), value.into());
        self
    }

    /// Marks the current snapshot as persisted.
    pub fn mark_persisted(&mut self) {
        self.original.clone_from(&self.current);
    }

    #[must_use]
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.current
    }

    /// Returns `true` if `name` differs from its persisted value.
    #[must_use]
    pub fn is_dirty(&self, name: &str) -> bool {
        self.current.get(name) != self.original.get(name)
    }
}

impl SlugRecord for Record {
    fn attribute(&self, name: &str) -> Option<String> {
        self.current.get(name).cloned()
    }

    fn original_attribute(&self, name: &str) -> Option<String> {
        self.original.get(name).cloned()
    }

    fn set_attribute(&mut self, name: &str, value: String) {
        self.current.insert(name.to_owned(), value);
    }
}

/// Current values of `fields`, in order. Unset attributes contribute an empty string.
#[must_use]
pub fn attribute_values<R: SlugRecord + ?Sized>(record: &R, fields: &[String]) -> Vec<String> {
    fields
        .iter()
        .map(|field| record.attribute(field).unwrap_or_default())
        .collect()
}
