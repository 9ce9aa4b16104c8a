//! YAML export of analytic rules, hunting queries and ASIM parsers

use super::types::{
    AnalyticRule, AsimParser, EntityMapping, HuntingQuery, RequiredDataConnector, RuleKind,
};
use crate::duration::iso_to_shorthand;
use crate::error::{Error, Result};
use serde_yaml::{Mapping, Value};

const RULE_QUERY_PLACEHOLDER: &str = "// Add your KQL query here";
const PARSER_QUERY_PLACEHOLDER: &str = "// Add your KQL parser query here";

/// Ordered YAML mapping with the same guarded inserts as [`crate::document::Document`]
#[derive(Default)]
struct YamlDocument {
    map: Mapping,
}

impl YamlDocument {
    fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.map.insert(Value::from(key), value.into());
        self
    }

    fn list_if_present(mut self, key: &str, items: Vec<Value>) -> Self {
        if !items.is_empty() {
            self.map.insert(Value::from(key), Value::Sequence(items));
        }
        self
    }

    /// Query window keys, present only for scheduled rules
    fn with_schedule(self, rule: &AnalyticRule) -> Self {
        match rule.kind {
            RuleKind::Scheduled => self
                .field("queryPeriod", iso_to_shorthand(&rule.query_period))
                .field("queryFrequency", iso_to_shorthand(&rule.query_frequency)),
            RuleKind::NRT => self,
        }
    }

    fn into_value(self) -> Value {
        Value::Mapping(self.map)
    }

    fn render(self, kind: &str, name: &str) -> Result<String> {
        serde_yaml::to_string(&self.map)
            .map_err(|e| Error::serialize(format!("{kind} '{name}'"), e.to_string()))
    }
}

fn strings(items: &[String]) -> Vec<Value> {
    items.iter().map(|s| Value::from(s.as_str())).collect()
}

fn entity_mappings(mappings: &[EntityMapping]) -> Vec<Value> {
    mappings
        .iter()
        .map(|mapping| {
            let fields = mapping
                .field_mappings
                .iter()
                .map(|field| {
                    YamlDocument::default()
                        .field("identifier", field.identifier.as_str())
                        .field("columnName", field.column_name.as_str())
                        .into_value()
                })
                .collect();
            YamlDocument::default()
                .field("entityType", mapping.entity_type.as_str())
                .list_if_present("fieldMappings", fields)
                .into_value()
        })
        .collect()
}

fn required_data_connectors(connectors: &[RequiredDataConnector]) -> Vec<Value> {
    connectors
        .iter()
        .map(|connector| {
            YamlDocument::default()
                .field("connectorId", connector.connector_id.as_str())
                .list_if_present("dataTypes", strings(&connector.data_types))
                .into_value()
        })
        .collect()
}

fn query_or(query: &str, placeholder: &str) -> String {
    if query.is_empty() {
        placeholder.to_string()
    } else {
        query.to_string()
    }
}

/// Render an analytic rule as Sentinel rule YAML
///
/// Durations are written in shorthand (`5h`) and only for scheduled rules;
/// the trigger operator uses its short form (`gt`). Empty lists are omitted.
pub fn analytic_rule_yaml(rule: &AnalyticRule) -> Result<String> {
    YamlDocument::default()
        .field("id", rule.id.as_str())
        .field("name", rule.name.as_str())
        .field("description", rule.description.as_str())
        .field("severity", rule.severity.as_str())
        .field("kind", rule.kind.as_str())
        .field("enabled", rule.enabled)
        .field("version", rule.version.as_str())
        .with_schedule(rule)
        .field("triggerOperator", rule.trigger_operator.shorthand())
        .field("triggerThreshold", rule.trigger_threshold)
        .list_if_present("tactics", strings(&rule.tactics))
        .list_if_present("relevantTechniques", strings(&rule.relevant_techniques))
        .field("query", query_or(&rule.query, RULE_QUERY_PLACEHOLDER))
        .list_if_present("entityMappings", entity_mappings(&rule.entity_mappings))
        .list_if_present(
            "requiredDataConnectors",
            required_data_connectors(&rule.required_data_connectors),
        )
        .render("analytic rule", &rule.name)
}

/// Render a hunting query as Sentinel hunting YAML
pub fn hunting_query_yaml(query: &HuntingQuery) -> Result<String> {
    YamlDocument::default()
        .field("id", query.id.as_str())
        .field("name", query.name.as_str())
        .field("description", query.description.as_str())
        .list_if_present("tactics", strings(&query.tactics))
        .list_if_present("relevantTechniques", strings(&query.relevant_techniques))
        .field("query", query_or(&query.query, RULE_QUERY_PLACEHOLDER))
        .list_if_present("entityMappings", entity_mappings(&query.entity_mappings))
        .list_if_present(
            "requiredDataConnectors",
            required_data_connectors(&query.required_data_connectors),
        )
        .field("version", query.version.as_str())
        .render("hunting query", &query.name)
}

/// Render an ASIM parser as a five-key YAML document
pub fn asim_parser_yaml(parser: &AsimParser) -> Result<String> {
    YamlDocument::default()
        .field("id", parser.id.as_str())
        .field("name", parser.name.as_str())
        .field("targetSchema", parser.target_schema.as_str())
        .field("version", parser.version.as_str())
        .field("query", query_or(&parser.query, PARSER_QUERY_PLACEHOLDER))
        .render("ASIM parser", &parser.name)
}
