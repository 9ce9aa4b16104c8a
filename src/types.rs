//! Common types used throughout the compiler
//!
//! This module contains shared type definitions, type aliases,
//! and the small closed enums that several generators branch on.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Ordered key-value map with string keys and values (headers, query parameters)
pub type StringMap = BTreeMap<String, String>;

/// Insert `tag: default` into an object that has no `tag` key
///
/// Lets a partial block of a tagged union load as the default variant. A
/// null value becomes an object holding only the tag.
pub(crate) fn with_default_tag(value: JsonValue, tag: &str, default: &str) -> JsonValue {
    match value {
        JsonValue::Null => {
            let mut object = JsonObject::new();
            object.insert(tag.to_string(), JsonValue::from(default));
            JsonValue::Object(object)
        }
        JsonValue::Object(mut object) => {
            object
                .entry(tag)
                .or_insert_with(|| JsonValue::from(default));
            JsonValue::Object(object)
        }
        other => other,
    }
}

// ============================================================================
// Connector Kind
// ============================================================================

/// Top-level connector kind
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum ConnectorKind {
    /// Data is pushed by the source into a data collection endpoint
    #[default]
    Push,
    /// Data is pulled by periodic polling of a REST API
    #[value(name = "poller", alias = "rest-api-poller")]
    RestApiPoller,
}

impl ConnectorKind {
    /// Token appended to every derived resource name
    pub fn suffix(self) -> &'static str {
        match self {
            ConnectorKind::Push => "Push",
            ConnectorKind::RestApiPoller => "Poller",
        }
    }

    /// Value of the `kind` field on a connector instance document
    pub fn as_str(self) -> &'static str {
        match self {
            ConnectorKind::Push => "Push",
            ConnectorKind::RestApiPoller => "RestApiPoller",
        }
    }
}

impl fmt::Display for ConnectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Column Type
// ============================================================================

/// Primitive column type of a custom log table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[default]
    String,
    Int,
    Long,
    Real,
    Bool,
    Datetime,
    Dynamic,
    Guid,
}

impl ColumnType {
    /// Wire name of the type
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnType::String => "string",
            ColumnType::Int => "int",
            ColumnType::Long => "long",
            ColumnType::Real => "real",
            ColumnType::Bool => "bool",
            ColumnType::Datetime => "datetime",
            ColumnType::Dynamic => "dynamic",
            ColumnType::Guid => "guid",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method used by a polling connector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    POST,
}

impl Method {
    /// Wire name of the method
    pub fn as_str(self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
        }
    }
}

/// Response body format of a polled API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    #[default]
    Json,
    Csv,
    Xml,
}

impl ResponseFormat {
    /// Wire name of the format
    pub fn as_str(self) -> &'static str {
        match self {
            ResponseFormat::Json => "json",
            ResponseFormat::Csv => "csv",
            ResponseFormat::Xml => "xml",
        }
    }
}
