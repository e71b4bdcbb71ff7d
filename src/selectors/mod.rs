//! Selector specification parsing
//!
//! A selector specification is a flat JSON object of `field -> css selector`
//! pairs. The reserved `container` key names the repeating record element;
//! every other key becomes a field of each extracted record.

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::ScrapeError;
use crate::utils::CONTAINER_KEY;

/// Typed selector map with the container split out from the data fields.
///
/// Field order follows the order keys appeared in the specification, which
/// fixes the field order of every record produced from this map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorMap {
    container: Option<String>,
    fields: Vec<(String, String)>,
}

impl SelectorMap {
    /// Empty map: no container, no fields
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from ordered `(key, selector)` pairs.
    ///
    /// A repeated key replaces the earlier selector but keeps its position.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = Self::new();
        for (key, selector) in pairs {
            map.insert(key, selector);
        }
        map
    }

    /// Insert or replace a selector. `container` sets the container selector.
    pub fn insert(&mut self, key: impl Into<String>, selector: impl Into<String>) {
        let key = key.into();
        let selector = selector.into();

        if key == CONTAINER_KEY {
            self.container = Some(selector);
            return;
        }

        match self.fields.iter_mut().find(|(name, _)| *name == key) {
            Some(slot) => slot.1 = selector,
            None => self.fields.push((key, selector)),
        }
    }

    /// Container selector, if the specification named one
    #[must_use]
    pub fn container(&self) -> Option<&str> {
        self.container.as_deref()
    }

    /// Data fields in specification order
    pub fn fields(&self) -> impl ExactSizeIterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Names of the data fields in specification order
    pub fn field_names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// True when there is no container and no field
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.container.is_none() && self.fields.is_empty()
    }

    /// True when at least one record can ever be produced
    #[must_use]
    pub fn has_fields(&self) -> bool {
        !self.fields.is_empty()
    }
}

impl Serialize for SelectorMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.fields.len() + usize::from(self.container.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(container) = &self.container {
            map.serialize_entry(CONTAINER_KEY, container)?;
        }
        for (key, selector) in &self.fields {
            map.serialize_entry(key, selector)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SelectorMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        selector_map_from_value(value).map_err(D::Error::custom)
    }
}

/// Parse and validate a raw selector specification.
///
/// Fails with `ScrapeError::Validation` when the text is not JSON, when it is
/// JSON but not an object (array, scalar, null), or when a value is not a
/// string. An object with no data fields is valid.
pub fn validate_selectors(raw: &str) -> Result<SelectorMap, ScrapeError> {
    let parsed: Value = serde_json::from_str(raw).map_err(|e| {
        ScrapeError::Validation(format!("Invalid selectors JSON format: {e}"))
    })?;

    selector_map_from_value(parsed)
}

fn selector_map_from_value(parsed: Value) -> Result<SelectorMap, ScrapeError> {
    let object = match parsed {
        Value::Object(object) => object,
        other => {
            return Err(ScrapeError::Validation(format!(
                "Selectors must be an object, got {}",
                json_type_name(&other)
            )));
        }
    };

    let mut map = SelectorMap::new();
    for (key, value) in object {
        match value {
            Value::String(selector) => map.insert(key, selector),
            other => {
                return Err(ScrapeError::Validation(format!(
                    "Selector for '{key}' must be a string, got {}",
                    json_type_name(&other)
                )));
            }
        }
    }

    Ok(map)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
