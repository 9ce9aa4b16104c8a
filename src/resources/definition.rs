//! Connector definition resource
//!
//! The definition carries the gallery page of the connector. Everything
//! under `connectorUiConfig` is a 1:1 projection of the connector UI model,
//! except `logo` (omitted when empty), the synthetic freshness data type and
//! the fixed availability block.

use super::WORKSPACE_LOCATION;
use crate::config::{
    ConnectivityCriteria, ConnectorUi, CustomPermission, GraphQuery, InstructionStep, Meta,
    Permissions, ResourceProviderPermission, SampleQuery, TableSchema,
};
use crate::document::Document;
use crate::naming::DerivedNames;
use crate::types::JsonValue;
use serde_json::json;

pub const DEFINITION_TYPE: &str = "Microsoft.SecurityInsights/dataConnectorDefinitions";
pub const DEFINITION_API_VERSION: &str = "2022-09-01-preview";

/// Placeholder resolved by the portal, not by the compiler
const TABLE_NAME_PLACEHOLDER: &str = "{{graphQueriesTableName}}";

/// Build the connector definition resource
pub fn definition_resource(
    meta: &Meta,
    schema: &TableSchema,
    ui: &ConnectorUi,
    names: &DerivedNames,
) -> JsonValue {
    let ui_config = Document::new()
        .field("id", names.definition_name.as_str())
        .field("title", meta.title.as_str())
        .field("publisher", meta.publisher.as_str())
        .field("descriptionMarkdown", meta.description_markdown.as_str())
        .text_if_present("logo", &meta.logo)
        .field("graphQueriesTableName", schema.table_name.as_str())
        .field("graphQueries", list(&ui.graph_queries, graph_query))
        .field("sampleQueries", list(&ui.sample_queries, sample_query))
        .field(
            "connectivityCriteria",
            list(&ui.connectivity_criteria, connectivity_criteria),
        )
        .field("dataTypes", json!([freshness_data_type()]))
        .field("availability", json!({"status": 1, "isPreview": false}))
        .field("permissions", permissions(&ui.permissions))
        .field("instructionSteps", list(&ui.instruction_steps, instruction_step));

    Document::new()
        .field("name", names.definition_name.as_str())
        .field("apiVersion", DEFINITION_API_VERSION)
        .field("type", DEFINITION_TYPE)
        .field("location", WORKSPACE_LOCATION)
        .field("kind", "Customizable")
        .field(
            "properties",
            Document::new()
                .field("connectorUiConfig", ui_config.into_value())
                .into_value(),
        )
        .into_value()
}

fn list<T>(items: &[T], project: fn(&T) -> JsonValue) -> JsonValue {
    JsonValue::Array(items.iter().map(project).collect())
}

fn freshness_data_type() -> JsonValue {
    json!({
        "name": TABLE_NAME_PLACEHOLDER,
        "lastDataReceivedQuery": format!(
            "{TABLE_NAME_PLACEHOLDER}\n| summarize Time = max(TimeGenerated)\n| where isnotempty(Time)"
        ),
    })
}

fn graph_query(query: &GraphQuery) -> JsonValue {
    Document::new()
        .field("metricName", query.metric_name.as_str())
        .field("legend", query.legend.as_str())
        .field("baseQuery", query.base_query.as_str())
        .into_value()
}

fn sample_query(query: &SampleQuery) -> JsonValue {
    Document::new()
        .field("description", query.description.as_str())
        .field("query", query.query.as_str())
        .into_value()
}

fn connectivity_criteria(criteria: &ConnectivityCriteria) -> JsonValue {
    let (criteria_type, value) = match criteria {
        ConnectivityCriteria::IsConnectedQuery { value } => ("IsConnectedQuery", value),
        ConnectivityCriteria::HasDataConnectors { value } => ("HasDataConnectors", value),
    };
    json!({"type": criteria_type, "value": value})
}

fn permissions(permissions: &Permissions) -> JsonValue {
    Document::new()
        .field(
            "resourceProvider",
            list(&permissions.resource_provider, resource_provider),
        )
        .field("customs", list(&permissions.customs, custom_permission))
        .into_value()
}

fn resource_provider(permission: &ResourceProviderPermission) -> JsonValue {
    let required = permission.required_permissions;
    Document::new()
        .field("provider", permission.provider.as_str())
        .field(
            "permissionsDisplayText",
            permission.permissions_display_text.as_str(),
        )
        .field(
            "providerDisplayName",
            permission.provider_display_name.as_str(),
        )
        .field("scope", permission.scope.as_str())
        .field(
            "requiredPermissions",
            json!({
                "write": required.write,
                "read": required.read,
                "delete": required.delete,
                "action": required.action,
            }),
        )
        .into_value()
}

fn custom_permission(permission: &CustomPermission) -> JsonValue {
    Document::new()
        .field("name", permission.name.as_str())
        .field("description", permission.description.as_str())
        .into_value()
}

fn instruction_step(step: &InstructionStep) -> JsonValue {
    let instructions = step
        .instructions
        .iter()
        .map(|instruction| {
            Document::new()
                .field("type", instruction.instruction_type.as_str())
                .field("parameters", instruction.parameters.clone())
                .into_value()
        })
        .collect::<Vec<_>>();

    Document::new()
        .field("title", step.title.as_str())
        .field("description", step.description.as_str())
        .field("instructions", instructions)
        .into_value()
}
