//! Incremental JSON object builder
//!
//! Generated documents distinguish "absent" from "present with a default
//! value". Every conditional key goes through one of the guarded inserts
//! below, so an inapplicable or empty field never reaches the output as
//! `""`, `false`, `0` or `{}`. Unconditional keys use [`Document::field`],
//! which keeps legitimate zero and false values.

use crate::types::{JsonObject, JsonValue, StringMap};
use serde_json::Value;

/// Builder for a JSON object with guarded key insertion
#[derive(Debug, Clone, Default)]
pub struct Document {
    map: JsonObject,
}

impl Document {
    /// Create an empty document
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key unconditionally
    #[must_use]
    pub fn field(mut self, key: &str, value: impl Into<JsonValue>) -> Self {
        self.map.insert(key.to_string(), value.into());
        self
    }

    /// Insert a string only when it is non-empty
    #[must_use]
    pub fn text_if_present(mut self, key: &str, value: &str) -> Self {
        if !value.is_empty() {
            self.map.insert(key.to_string(), Value::String(value.to_string()));
        }
        self
    }

    /// Insert `true` only when the flag is set
    #[must_use]
    pub fn flag_if_set(mut self, key: &str, value: bool) -> Self {
        if value {
            self.map.insert(key.to_string(), Value::Bool(true));
        }
        self
    }

    /// Insert a number only when it is non-zero
    #[must_use]
    pub fn number_if_nonzero(mut self, key: &str, value: u32) -> Self {
        if value != 0 {
            self.map.insert(key.to_string(), Value::from(value));
        }
        self
    }

    /// Insert a string map only when it has entries
    #[must_use]
    pub fn map_if_present(mut self, key: &str, value: &StringMap) -> Self {
        if !value.is_empty() {
            let object: JsonObject = value
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect();
            self.map.insert(key.to_string(), Value::Object(object));
        }
        self
    }

    /// Insert a list only when it has entries
    #[must_use]
    pub fn list_if_present(mut self, key: &str, value: Vec<JsonValue>) -> Self {
        if !value.is_empty() {
            self.map.insert(key.to_string(), Value::Array(value));
        }
        self
    }

    /// Insert a nested document only when the option is set
    #[must_use]
    pub fn object_if_some(mut self, key: &str, value: Option<JsonObject>) -> Self {
        if let Some(object) = value {
            self.map.insert(key.to_string(), Value::Object(object));
        }
        self
    }

    /// Apply a closure to the builder (for branch-dependent groups of keys)
    #[must_use]
    pub fn with(self, f: impl FnOnce(Self) -> Self) -> Self {
        f(self)
    }

    /// Finish building and return the object
    pub fn build(self) -> JsonObject {
        self.map
    }

    /// Finish building and return the object as a JSON value
    pub fn into_value(self) -> JsonValue {
        Value::Object(self.map)
    }
}
