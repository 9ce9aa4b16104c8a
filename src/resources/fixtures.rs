//! Shared connector fixtures for the generator tests

use crate::auth::{ApiKeyAuth, AuthorizationCodeGrant, OAuth2Auth, OAuth2Grant, PollerAuth};
use crate::config::{
    Column, ConnectivityCriteria, ConnectorData, ConnectorUi, CustomPermission, DataFlow,
    GraphQuery, Instruction, InstructionStep, InstructionType, Meta, Permissions, PollerConfig,
    PollerRequest, RequiredPermissions, ResourceProviderPermission, SampleQuery, TableSchema,
};
use crate::pagination::PollerPaging;
use crate::types::{ColumnType, ConnectorKind, JsonObject, StringMap};
use serde_json::json;

pub fn push_meta() -> Meta {
    Meta {
        connector_id: "TestConnector".to_string(),
        title: "Test Connector".to_string(),
        publisher: "TestPublisher".to_string(),
        description_markdown: "Test description".to_string(),
        logo: String::new(),
        connector_kind: ConnectorKind::Push,
    }
}

pub fn pull_meta() -> Meta {
    Meta {
        connector_kind: ConnectorKind::RestApiPoller,
        ..push_meta()
    }
}

pub fn test_schema() -> TableSchema {
    TableSchema::new(
        "TestConnector_CL",
        vec![
            Column::new("Message", ColumnType::String),
            Column::new("Severity", ColumnType::Int),
        ],
    )
}

pub fn test_data_flow() -> DataFlow {
    DataFlow {
        stream_name: "Custom-TestConnector".to_string(),
        ..DataFlow::default()
    }
}

pub fn test_data_flow_with_override() -> DataFlow {
    DataFlow {
        input_columns_override: true,
        input_columns: vec![
            Column::new("msg", ColumnType::String),
            Column::new("sev", ColumnType::Int),
        ],
        ..test_data_flow()
    }
}

pub fn test_connector_ui() -> ConnectorUi {
    let mut parameters = JsonObject::new();
    parameters.insert("content".to_string(), json!("Hello"));

    ConnectorUi {
        graph_queries: vec![GraphQuery {
            metric_name: "Total events".to_string(),
            legend: "Events".to_string(),
            base_query: "{{graphQueriesTableName}}".to_string(),
        }],
        sample_queries: vec![SampleQuery {
            description: "All events".to_string(),
            query: "TestConnector_CL | take 10".to_string(),
        }],
        connectivity_criteria: vec![ConnectivityCriteria::IsConnectedQuery {
            value: vec!["TestConnector_CL | summarize max(TimeGenerated)".to_string()],
        }],
        permissions: Permissions {
            resource_provider: vec![ResourceProviderPermission {
                provider: "Microsoft.OperationalInsights/workspaces".to_string(),
                permissions_display_text: "Read and Write".to_string(),
                provider_display_name: "Workspace".to_string(),
                scope: "Workspace".to_string(),
                required_permissions: RequiredPermissions {
                    write: true,
                    read: true,
                    delete: false,
                    action: false,
                },
            }],
            customs: vec![CustomPermission {
                name: "API Key".to_string(),
                description: "Required".to_string(),
            }],
        },
        instruction_steps: vec![InstructionStep {
            title: "Connect".to_string(),
            description: "Follow steps".to_string(),
            instructions: vec![Instruction {
                instruction_type: InstructionType::Markdown,
                parameters,
            }],
        }],
    }
}

fn events_request() -> PollerRequest {
    PollerRequest {
        api_endpoint: "https://api.example.com/events".to_string(),
        ..PollerRequest::default()
    }
}

pub fn basic_poller_config() -> PollerConfig {
    PollerConfig {
        request: events_request(),
        ..PollerConfig::default()
    }
}

pub fn api_key_poller_config() -> PollerConfig {
    PollerConfig {
        auth: PollerAuth::ApiKey(ApiKeyAuth {
            api_key: "{{apiKey}}".to_string(),
            api_key_name: "Authorization".to_string(),
            api_key_identifier: "Bearer".to_string(),
            is_api_key_in_post_payload: false,
        }),
        ..basic_poller_config()
    }
}

pub fn oauth2_client_creds_poller_config() -> PollerConfig {
    PollerConfig {
        auth: PollerAuth::OAuth2(OAuth2Auth {
            token_endpoint_url: "https://auth.example.com/token".to_string(),
            scope: "read".to_string(),
            ..OAuth2Auth::default()
        }),
        ..basic_poller_config()
    }
}

pub fn oauth2_auth_code_poller_config() -> PollerConfig {
    let mut query = StringMap::new();
    query.insert("response_type".to_string(), "code".to_string());

    PollerConfig {
        auth: PollerAuth::OAuth2(OAuth2Auth {
            token_endpoint_url: "https://auth.example.com/token".to_string(),
            scope: "read".to_string(),
            grant: OAuth2Grant::AuthorizationCode(AuthorizationCodeGrant {
                authorization_endpoint: "https://auth.example.com/authorize".to_string(),
                redirect_uri: "https://portal.azure.com/TokenAuthorize/ExtensionName/DataConnectors"
                    .to_string(),
                authorization_endpoint_query_parameters: query,
            }),
            ..OAuth2Auth::default()
        }),
        ..basic_poller_config()
    }
}

pub fn next_page_token_poller_config() -> PollerConfig {
    PollerConfig {
        paging: PollerPaging::NextPageToken {
            next_page_token_json_path: "$.nextToken".to_string(),
            next_page_para_name: "cursor".to_string(),
        },
        ..basic_poller_config()
    }
}

pub fn offset_poller_config() -> PollerConfig {
    PollerConfig {
        paging: PollerPaging::Offset {
            page_size: 100,
            page_size_para_name: "limit".to_string(),
        },
        ..basic_poller_config()
    }
}

pub fn push_connector() -> ConnectorData {
    ConnectorData {
        meta: push_meta(),
        schema: test_schema(),
        data_flow: test_data_flow(),
        connector_ui: test_connector_ui(),
        poller_config: None,
    }
}

pub fn pull_connector(poller: PollerConfig) -> ConnectorData {
    ConnectorData {
        meta: pull_meta(),
        poller_config: Some(poller),
        ..push_connector()
    }
}
