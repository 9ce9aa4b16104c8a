//! Import of hand-pasted rule, hunting query and parser YAML
//!
//! Pasted documents come from the Sentinel repository, the portal export
//! or an operator's editor, so field types are not trusted: a field with
//! the wrong type is treated as absent and the entity default applies.

use super::types::{
    AnalyticRule, AsimParser, EntityMapping, FieldMapping, HuntingQuery, RequiredDataConnector,
    RuleKind, Severity, TriggerOperator, ASIM_SCHEMAS,
};
use crate::duration::shorthand_to_iso;
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

pub(crate) const ANALYTIC_RULE: &str = "analytic rule";
pub(crate) const HUNTING_QUERY: &str = "hunting query";
pub(crate) const ASIM_PARSER: &str = "ASIM parser";

/// Conventional parser name prefix: `ASim<Schema>...` or `vim<Schema>...`
static PARSER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[Aa][Ss]im|vim)(\w+)").unwrap());

// ============================================================================
// Field Access
// ============================================================================

/// Parse YAML (or JSON) text into a top-level mapping
pub(crate) fn parse_mapping(text: &str, kind: &str) -> Result<JsonObject> {
    match serde_yaml::from_str::<JsonValue>(text)? {
        JsonValue::Object(map) => Ok(map),
        _ => Err(Error::not_a_mapping(kind)),
    }
}

fn text<'a>(doc: &'a JsonObject, key: &str) -> Option<&'a str> {
    doc.get(key).and_then(JsonValue::as_str)
}

/// Scalar rendered as text (`1.0` and `1` become strings too)
fn scalar(doc: &JsonObject, key: &str) -> Option<String> {
    match doc.get(key)? {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn string_list(doc: &JsonObject, key: &str) -> Vec<String> {
    doc.get(key)
        .and_then(JsonValue::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Techniques may be written unquoted and parse as numbers; keep them as text
fn technique_list(doc: &JsonObject, key: &str) -> Vec<String> {
    doc.get(key)
        .and_then(JsonValue::as_array)
        .map(|items| {
            items
                .iter()
                .filter(|item| !item.is_null())
                .map(|item| match item {
                    JsonValue::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn objects<'a>(doc: &'a JsonObject, key: &str) -> impl Iterator<Item = &'a JsonObject> {
    doc.get(key)
        .and_then(JsonValue::as_array)
        .into_iter()
        .flatten()
        .filter_map(JsonValue::as_object)
}

fn owned_text(doc: &JsonObject, key: &str) -> String {
    text(doc, key).unwrap_or_default().to_string()
}

/// Strip single quotes some repository files wrap descriptions in
///
/// Quotes that belong to the description itself are lost too, so a
/// description starting or ending with `'` does not survive a round trip.
fn clean_description(value: &str) -> String {
    value.trim().trim_matches('\'').trim().to_string()
}

fn entity_mappings(doc: &JsonObject) -> Vec<EntityMapping> {
    objects(doc, "entityMappings")
        .map(|mapping| EntityMapping {
            entity_type: owned_text(mapping, "entityType"),
            field_mappings: objects(mapping, "fieldMappings")
                .map(|field| FieldMapping {
                    identifier: owned_text(field, "identifier"),
                    column_name: owned_text(field, "columnName"),
                })
                .collect(),
        })
        .collect()
}

fn required_data_connectors(doc: &JsonObject) -> Vec<RequiredDataConnector> {
    objects(doc, "requiredDataConnectors")
        .map(|connector| RequiredDataConnector {
            connector_id: owned_text(connector, "connectorId"),
            data_types: string_list(connector, "dataTypes"),
        })
        .collect()
}

fn require_name_or_query(doc: &JsonObject, kind: &str) -> Result<()> {
    let present = |key: &str| text(doc, key).is_some_and(|s| !s.is_empty());
    if present("name") || present("query") {
        Ok(())
    } else {
        Err(Error::import(kind, "missing 'name' and 'query' fields"))
    }
}

/// Keep the document's id; pasted content without one gets a fresh UUID
fn id_or_new(doc: &JsonObject) -> String {
    scalar(doc, "id")
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

// ============================================================================
// Analytic Rule
// ============================================================================

/// Parse a Sentinel analytic rule YAML document
///
/// Durations are normalized to ISO 8601, the trigger operator to its long
/// form and severity/kind to their canonical spelling. Unknown severities
/// and kinds keep the rule default.
///
/// The query and description are trimmed, so leading or trailing
/// whitespace (including the final newline of a block scalar) is not
/// preserved; `parse(export(rule))` equals `rule` only for trimmed text.
pub fn parse_analytic_rule(yaml: &str) -> Result<AnalyticRule> {
    let doc = parse_mapping(yaml, ANALYTIC_RULE)?;
    require_name_or_query(&doc, ANALYTIC_RULE)?;

    let defaults = AnalyticRule::default();
    let rule = AnalyticRule {
        id: id_or_new(&doc),
        name: owned_text(&doc, "name"),
        description: text(&doc, "description")
            .map(clean_description)
            .unwrap_or_default(),
        severity: text(&doc, "severity")
            .and_then(Severity::parse)
            .unwrap_or(defaults.severity),
        kind: text(&doc, "kind")
            .and_then(RuleKind::parse)
            .unwrap_or(defaults.kind),
        query_period: text(&doc, "queryPeriod")
            .map(shorthand_to_iso)
            .unwrap_or(defaults.query_period),
        query_frequency: text(&doc, "queryFrequency")
            .map(shorthand_to_iso)
            .unwrap_or(defaults.query_frequency),
        trigger_operator: text(&doc, "triggerOperator")
            .map(TriggerOperator::from_any)
            .unwrap_or(defaults.trigger_operator),
        trigger_threshold: doc
            .get("triggerThreshold")
            .and_then(JsonValue::as_i64)
            .unwrap_or(defaults.trigger_threshold),
        tactics: string_list(&doc, "tactics"),
        relevant_techniques: technique_list(&doc, "relevantTechniques"),
        query: text(&doc, "query").map(str::trim).unwrap_or_default().to_string(),
        entity_mappings: entity_mappings(&doc),
        required_data_connectors: required_data_connectors(&doc),
        version: scalar(&doc, "version").unwrap_or(defaults.version),
        enabled: doc
            .get("enabled")
            .and_then(JsonValue::as_bool)
            .unwrap_or(defaults.enabled),
    };

    debug!(name = %rule.name, "Imported analytic rule");
    Ok(rule)
}

// ============================================================================
// Hunting Query
// ============================================================================

/// Parse a Sentinel hunting query YAML document
pub fn parse_hunting_query(yaml: &str) -> Result<HuntingQuery> {
    let doc = parse_mapping(yaml, HUNTING_QUERY)?;
    require_name_or_query(&doc, HUNTING_QUERY)?;

    let query = HuntingQuery {
        id: id_or_new(&doc),
        name: owned_text(&doc, "name"),
        description: text(&doc, "description")
            .map(clean_description)
            .unwrap_or_default(),
        tactics: string_list(&doc, "tactics"),
        relevant_techniques: technique_list(&doc, "relevantTechniques"),
        query: text(&doc, "query").map(str::trim).unwrap_or_default().to_string(),
        entity_mappings: entity_mappings(&doc),
        required_data_connectors: required_data_connectors(&doc),
        version: scalar(&doc, "version").unwrap_or_else(|| HuntingQuery::default().version),
    };

    debug!(name = %query.name, "Imported hunting query");
    Ok(query)
}

// ============================================================================
// ASIM Parser
// ============================================================================

/// Parse an ASIM parser document
///
/// Accepts both the repository layout (`FunctionName`, `FunctionAlias`,
/// `FunctionQuery`, `Function.Version`) and the exported five-key layout.
pub fn parse_asim_parser(yaml: &str) -> Result<AsimParser> {
    let doc = parse_mapping(yaml, ASIM_PARSER)?;

    let name = ["FunctionName", "FunctionAlias", "name"]
        .iter()
        .find_map(|key| text(&doc, key))
        .unwrap_or_default()
        .to_string();

    let query = ["FunctionQuery", "query"]
        .iter()
        .find_map(|key| text(&doc, key))
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    if name.is_empty() && query.is_empty() {
        return Err(Error::import(
            ASIM_PARSER,
            "missing 'FunctionName' and 'FunctionQuery' fields",
        ));
    }

    let version = doc
        .get("Function")
        .and_then(JsonValue::as_object)
        .and_then(|function| text(function, "Version"))
        .or_else(|| text(&doc, "version"))
        .map(str::to_string)
        .unwrap_or_else(|| AsimParser::default().version);

    let parser = AsimParser {
        id: uuid::Uuid::new_v4().to_string(),
        target_schema: target_schema(&name),
        name,
        query,
        version,
    };

    debug!(name = %parser.name, schema = %parser.target_schema, "Imported ASIM parser");
    Ok(parser)
}

/// Recover the target schema from a conventional parser name
///
/// Picks the longest known schema the name continues with after its
/// `ASim`/`vim` prefix, or an empty string when none matches.
pub fn target_schema(parser_name: &str) -> String {
    let Some(rest) = PARSER_PREFIX.captures(parser_name).and_then(|c| c.get(1)) else {
        return String::new();
    };

    ASIM_SCHEMAS
        .iter()
        .filter(|schema| rest.as_str().starts_with(*schema))
        .max_by_key(|schema| schema.len())
        .map(|schema| schema.to_string())
        .unwrap_or_default()
}
