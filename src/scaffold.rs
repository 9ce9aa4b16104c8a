//! Default connector UI and connector scaffolding
//!
//! A new connector starts from a title. The title goes through the naming
//! rules once to produce the connector id, table and stream names, and the
//! gallery page is filled with the defaults below. Push connectors get the
//! deploy button and copyable connection details; polling connectors get a
//! credential form matching their auth type.

use crate::auth::PollerAuth;
use crate::config::{
    Column, ConnectivityCriteria, ConnectorData, ConnectorUi, CustomPermission, DataFlow,
    GraphQuery, Instruction, InstructionStep, InstructionType, Meta, Permissions, PollerConfig,
    RequiredPermissions, ResourceProviderPermission, SampleQuery, TableSchema,
};
use crate::naming::{connector_id_to_table_name, table_name_to_stream_name, title_to_connector_id};
use crate::types::{ColumnType, ConnectorKind, JsonObject, JsonValue};
use serde_json::json;

impl ConnectorData {
    /// Create a connector from a title with default table, flow and UI
    ///
    /// Polling connectors also get a default poller configuration (Basic auth).
    pub fn scaffold(title: &str, kind: ConnectorKind) -> Self {
        let connector_id = title_to_connector_id(title);
        let table_name = connector_id_to_table_name(&connector_id);
        let stream_name = table_name_to_stream_name(&table_name);
        let schema = TableSchema::new(table_name, Vec::new());

        let poller_config = match kind {
            ConnectorKind::RestApiPoller => Some(PollerConfig::default()),
            ConnectorKind::Push => None,
        };

        let connector_ui = default_connector_ui(
            &connector_id,
            &schema,
            &stream_name,
            kind,
            poller_config.as_ref().map(|p| &p.auth),
        );

        Self {
            meta: Meta {
                connector_id,
                title: title.to_string(),
                connector_kind: kind,
                ..Meta::default()
            },
            schema,
            data_flow: DataFlow {
                stream_name,
                ..DataFlow::default()
            },
            connector_ui,
            poller_config,
        }
    }
}

/// Complete default gallery page for a connector
pub fn default_connector_ui(
    connector_id: &str,
    schema: &TableSchema,
    stream_name: &str,
    kind: ConnectorKind,
    auth: Option<&PollerAuth>,
) -> ConnectorUi {
    ConnectorUi {
        graph_queries: default_graph_queries(),
        sample_queries: default_sample_queries(&schema.table_name, &schema.columns),
        connectivity_criteria: default_connectivity_criteria(&schema.table_name, kind),
        permissions: default_permissions(),
        instruction_steps: match kind {
            ConnectorKind::Push => push_instruction_steps(connector_id, stream_name),
            ConnectorKind::RestApiPoller => poller_instruction_steps(connector_id, auth),
        },
    }
}

pub fn default_graph_queries() -> Vec<GraphQuery> {
    vec![GraphQuery {
        metric_name: "Total events received".to_string(),
        legend: "Events".to_string(),
        base_query: "{{graphQueriesTableName}}".to_string(),
    }]
}

/// "All events" plus a count by the first string column, when there is one
pub fn default_sample_queries(table_name: &str, columns: &[Column]) -> Vec<SampleQuery> {
    let mut queries = vec![SampleQuery {
        description: "All events".to_string(),
        query: format!("{table_name}\n| sort by TimeGenerated desc\n| take 10"),
    }];

    if let Some(column) = columns
        .iter()
        .find(|c| c.column_type == ColumnType::String && !c.is_time_generated())
    {
        queries.push(SampleQuery {
            description: format!("Events by {}", column.name),
            query: format!(
                "{table_name}\n| summarize count() by {}\n| sort by count_ desc",
                column.name
            ),
        });
    }

    queries
}

pub fn default_connectivity_criteria(
    table_name: &str,
    kind: ConnectorKind,
) -> Vec<ConnectivityCriteria> {
    let criteria = match kind {
        ConnectorKind::Push => ConnectivityCriteria::IsConnectedQuery {
            value: vec![format!(
                "{table_name}\n| summarize LastLogReceived = max(TimeGenerated)\n| project IsConnected = LastLogReceived > ago(30d)"
            )],
        },
        ConnectorKind::RestApiPoller => ConnectivityCriteria::HasDataConnectors { value: vec![] },
    };
    vec![criteria]
}

pub fn default_permissions() -> Permissions {
    Permissions {
        resource_provider: vec![
            ResourceProviderPermission {
                provider: "Microsoft.OperationalInsights/workspaces".to_string(),
                permissions_display_text:
                    "Read and Write permissions on the Log Analytics workspace.".to_string(),
                provider_display_name: "Workspace".to_string(),
                scope: "Workspace".to_string(),
                required_permissions: RequiredPermissions {
                    write: true,
                    read: true,
                    delete: false,
                    action: false,
                },
            },
            ResourceProviderPermission {
                provider: "Microsoft.OperationalInsights/workspaces/sharedKeys".to_string(),
                permissions_display_text: "Read permissions to shared keys for the workspace."
                    .to_string(),
                provider_display_name: "Keys".to_string(),
                scope: "Workspace".to_string(),
                required_permissions: RequiredPermissions {
                    write: false,
                    read: true,
                    delete: false,
                    action: true,
                },
            },
        ],
        customs: vec![
            CustomPermission {
                name: "Microsoft Entra application".to_string(),
                description: "Permissions to create or use an existing Microsoft Entra application for data ingestion.".to_string(),
            },
            CustomPermission {
                name: "Azure RBAC".to_string(),
                description: "Monitoring Metrics Publisher role assignment on the Data Collection Rule resource.".to_string(),
            },
        ],
    }
}

// ============================================================================
// Instruction Steps
// ============================================================================

fn instruction(instruction_type: InstructionType, parameters: JsonValue) -> Instruction {
    Instruction {
        instruction_type,
        parameters: match parameters {
            JsonValue::Object(map) => map,
            _ => JsonObject::new(),
        },
    }
}

fn copyable_label(label: &str, fill_with: &str) -> Instruction {
    instruction(
        InstructionType::CopyableLabel,
        json!({"label": label, "fillWith": [fill_with], "isBlankValueEnabled": true}),
    )
}

fn push_instruction_steps(connector_id: &str, stream_name: &str) -> Vec<InstructionStep> {
    vec![
        InstructionStep {
            title: "Deploy the Push Connector".to_string(),
            description:
                "Click the **Deploy to Azure** button below to deploy the required resources."
                    .to_string(),
            instructions: vec![instruction(
                InstructionType::DeployPushConnectorButton,
                json!({
                    "label": format!("Deploy {connector_id} Push connector resources"),
                    "applicationDisplayName": format!("{connector_id} Push Connector Application"),
                }),
            )],
        },
        InstructionStep {
            title: "Configure Your Application".to_string(),
            description: "Use the following connection details to configure your application to send data to this connector.".to_string(),
            instructions: vec![
                copyable_label("Tenant ID", "TenantId"),
                copyable_label("Application (Client) ID", "ApplicationId"),
                copyable_label("Application Client Secret", "ApplicationSecret"),
                copyable_label("Data Collection Endpoint", "DataCollectionEndpoint"),
                copyable_label("Data Collection Rule ID", "DataCollectionRuleId"),
                instruction(
                    InstructionType::CopyableLabel,
                    json!({"label": "Stream Name", "value": stream_name, "isBlankValueEnabled": true}),
                ),
            ],
        },
    ]
}

fn textbox(label: &str, name: &str, input_type: &str) -> Instruction {
    instruction(
        InstructionType::Textbox,
        json!({
            "label": label,
            "placeholder": format!("Enter {label}"),
            "type": input_type,
            "name": name,
        }),
    )
}

fn connection_toggle() -> Instruction {
    instruction(
        InstructionType::ConnectionToggleButton,
        json!({"connectLabel": "Connect", "name": "connect"}),
    )
}

/// One step whose inputs match the placeholders of the auth type
fn poller_instruction_steps(connector_id: &str, auth: Option<&PollerAuth>) -> Vec<InstructionStep> {
    let instructions = match auth {
        Some(PollerAuth::OAuth2(_)) => vec![instruction(
            InstructionType::OAuthForm,
            json!({
                "clientIdLabel": "Client ID",
                "clientSecretLabel": "Client Secret",
                "connectButtonLabel": "Connect",
                "disconnectButtonLabel": "Disconnect",
            }),
        )],
        Some(PollerAuth::ApiKey(_)) => vec![textbox("API Key", "apiKey", "password"), connection_toggle()],
        Some(PollerAuth::Basic(_)) | None => vec![
            textbox("Username", "username", "text"),
            textbox("Password", "password", "password"),
            connection_toggle(),
        ],
    };

    vec![InstructionStep {
        title: format!("Connect {connector_id}"),
        description: "Provide the credentials used to poll the API, then connect.".to_string(),
        instructions,
    }]
}
