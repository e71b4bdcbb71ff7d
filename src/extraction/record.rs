//! Extracted record type

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// One extracted record: an ordered mapping from field name to trimmed text.
///
/// The key set always equals the data fields of the selector map that
/// produced it. A field is `None` only when no element matched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapedRecord {
    fields: Vec<(String, Option<String>)>,
}

impl ScrapedRecord {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, name: &str, value: Option<String>) {
        self.fields.push((name.to_string(), value));
    }

    /// `Some(value)` when the record has the field, `None` when it does not
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_deref())
    }

    /// Text of a field, flattening "missing field" and "null" together
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).flatten()
    }

    /// Field names in selector-map order
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    /// `(name, value)` pairs in selector-map order
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, Option<&str>)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_deref()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True when every field resolved to null
    #[must_use]
    pub fn is_all_null(&self) -> bool {
        self.fields.iter().all(|(_, value)| value.is_none())
    }
}

impl Serialize for ScrapedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
