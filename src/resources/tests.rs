//! Tests for the resource generators

use super::fixtures::*;
use super::*;
use crate::config::{
    ConnectivityCriteria, DataFlow, Meta, PollerConfig, PollerRequest, PollerResponse,
};
use crate::types::{ConnectorKind, Method, ResponseFormat, StringMap};
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

fn push_names() -> DerivedNames {
    DerivedNames::derive("TestConnector", ConnectorKind::Push)
}

fn poller_names() -> DerivedNames {
    DerivedNames::derive("TestConnector", ConnectorKind::RestApiPoller)
}

// ============================================================================
// Table
// ============================================================================

#[test]
fn test_table_full_structure() {
    assert_eq!(
        table_resource(&test_schema()),
        json!({
            "type": "Microsoft.OperationalInsights/workspaces/tables",
            "apiVersion": "2025-07-01",
            "name": "TestConnector_CL",
            "properties": {
                "schema": {
                    "name": "TestConnector_CL",
                    "columns": [
                        {"name": "TimeGenerated", "type": "datetime"},
                        {"name": "Message", "type": "string"},
                        {"name": "Severity", "type": "int"}
                    ]
                }
            }
        })
    );
}

// ============================================================================
// DCR
// ============================================================================

#[test]
fn test_dcr_identity() {
    let dcr = dcr_resource(&test_schema(), &test_data_flow(), &push_names());
    assert_eq!(dcr["name"], "TestConnectorPushDCR");
    assert_eq!(dcr["apiVersion"], "2021-09-01-preview");
    assert_eq!(dcr["type"], "Microsoft.Insights/dataCollectionRules");
    assert_eq!(dcr["location"], "[parameters('workspace-location')]");
}

#[test]
fn test_dcr_stream_declaration_excludes_time_generated() {
    let dcr = dcr_resource(&test_schema(), &test_data_flow(), &push_names());
    assert_eq!(
        dcr["properties"]["streamDeclarations"]["Custom-TestConnector"]["columns"],
        json!([
            {"name": "Message", "type": "string"},
            {"name": "Severity", "type": "int"}
        ])
    );
}

#[test]
fn test_dcr_input_columns_override() {
    let dcr = dcr_resource(&test_schema(), &test_data_flow_with_override(), &push_names());
    assert_eq!(
        dcr["properties"]["streamDeclarations"]["Custom-TestConnector"]["columns"],
        json!([
            {"name": "msg", "type": "string"},
            {"name": "sev", "type": "int"}
        ])
    );
}

#[test]
fn test_dcr_empty_override_falls_back_to_table_columns() {
    let data_flow = DataFlow {
        input_columns_override: true,
        input_columns: vec![],
        ..test_data_flow()
    };
    let dcr = dcr_resource(&test_schema(), &data_flow, &push_names());
    let columns = &dcr["properties"]["streamDeclarations"]["Custom-TestConnector"]["columns"];
    assert_eq!(columns.as_array().map(Vec::len), Some(2));
    assert_eq!(columns[0]["name"], "Message");
}

#[test]
fn test_dcr_override_ignored_when_flag_off() {
    let data_flow = DataFlow {
        input_columns_override: false,
        ..test_data_flow_with_override()
    };
    let dcr = dcr_resource(&test_schema(), &data_flow, &push_names());
    assert_eq!(
        dcr["properties"]["streamDeclarations"]["Custom-TestConnector"]["columns"][0]["name"],
        "Message"
    );
}

#[test]
fn test_dcr_data_flow_and_destination() {
    let dcr = dcr_resource(&test_schema(), &test_data_flow(), &push_names());
    let properties = &dcr["properties"];
    assert_eq!(
        properties["dataFlows"],
        json!([{
            "streams": ["Custom-TestConnector"],
            "destinations": ["clv2ws1"],
            "transformKql": "source | extend TimeGenerated = now()",
            "outputStream": "Custom-TestConnector_CL"
        }])
    );
    assert_eq!(
        properties["destinations"]["logAnalytics"],
        json!([{"workspaceResourceId": "[variables('workspaceResourceId')]", "name": "clv2ws1"}])
    );
    assert!(properties["dataCollectionEndpointId"]
        .as_str()
        .is_some_and(|id| id.contains("dataCollectionEndpoints") && id.ends_with("'-dce')]")));
}

#[test]
fn test_dcr_depends_on_table() {
    let dcr = dcr_resource(&test_schema(), &test_data_flow(), &push_names());
    assert_eq!(
        dcr["dependsOn"],
        json!(["[concat(variables('workspaceResourceId'), '/tables/TestConnector_CL')]"])
    );
}

#[test]
fn test_dcr_transform_is_passed_verbatim() {
    let data_flow = DataFlow {
        transform_kql: "source\n| where Level == 'x' // keep".to_string(),
        ..test_data_flow()
    };
    let dcr = dcr_resource(&test_schema(), &data_flow, &push_names());
    assert_eq!(
        dcr["properties"]["dataFlows"][0]["transformKql"],
        "source\n| where Level == 'x' // keep"
    );
}

// ============================================================================
// Definition
// ============================================================================

#[test]
fn test_definition_identity() {
    let def = definition_resource(&push_meta(), &test_schema(), &test_connector_ui(), &push_names());
    assert_eq!(def["name"], "TestConnectorPush");
    assert_eq!(def["apiVersion"], "2022-09-01-preview");
    assert_eq!(def["type"], "Microsoft.SecurityInsights/dataConnectorDefinitions");
    assert_eq!(def["kind"], "Customizable");
    assert_eq!(def["properties"]["connectorUiConfig"]["id"], "TestConnectorPush");
}

#[test]
fn test_definition_logo_omitted_when_empty() {
    let def = definition_resource(&push_meta(), &test_schema(), &test_connector_ui(), &push_names());
    let ui = def["properties"]["connectorUiConfig"].as_object().unwrap();
    assert!(!ui.contains_key("logo"));
}

#[test]
fn test_definition_logo_included_when_present() {
    let meta = Meta {
        logo: "<svg>test</svg>".to_string(),
        ..push_meta()
    };
    let def = definition_resource(&meta, &test_schema(), &test_connector_ui(), &push_names());
    assert_eq!(def["properties"]["connectorUiConfig"]["logo"], "<svg>test</svg>");
}

#[test]
fn test_definition_freshness_placeholder_is_not_resolved() {
    let def = definition_resource(&push_meta(), &test_schema(), &test_connector_ui(), &push_names());
    let ui = &def["properties"]["connectorUiConfig"];
    assert_eq!(ui["graphQueriesTableName"], "TestConnector_CL");
    assert_eq!(
        ui["dataTypes"],
        json!([{
            "name": "{{graphQueriesTableName}}",
            "lastDataReceivedQuery": "{{graphQueriesTableName}}\n| summarize Time = max(TimeGenerated)\n| where isnotempty(Time)"
        }])
    );
    assert_eq!(ui["availability"], json!({"status": 1, "isPreview": false}));
}

#[test]
fn test_definition_projects_ui_one_to_one() {
    let def = definition_resource(&push_meta(), &test_schema(), &test_connector_ui(), &push_names());
    let ui = &def["properties"]["connectorUiConfig"];
    assert_eq!(
        ui["graphQueries"],
        json!([{"metricName": "Total events", "legend": "Events", "baseQuery": "{{graphQueriesTableName}}"}])
    );
    assert_eq!(
        ui["sampleQueries"],
        json!([{"description": "All events", "query": "TestConnector_CL | take 10"}])
    );
    assert_eq!(
        ui["connectivityCriteria"],
        json!([{"type": "IsConnectedQuery", "value": ["TestConnector_CL | summarize max(TimeGenerated)"]}])
    );
    assert_eq!(
        ui["permissions"],
        json!({
            "resourceProvider": [{
                "provider": "Microsoft.OperationalInsights/workspaces",
                "permissionsDisplayText": "Read and Write",
                "providerDisplayName": "Workspace",
                "scope": "Workspace",
                "requiredPermissions": {"write": true, "read": true, "delete": false, "action": false}
            }],
            "customs": [{"name": "API Key", "description": "Required"}]
        })
    );
    assert_eq!(
        ui["instructionSteps"],
        json!([{
            "title": "Connect",
            "description": "Follow steps",
            "instructions": [{"type": "Markdown", "parameters": {"content": "Hello"}}]
        }])
    );
}

#[test]
fn test_definition_key_order() {
    let def = definition_resource(&push_meta(), &test_schema(), &test_connector_ui(), &push_names());
    let keys: Vec<&str> = def["properties"]["connectorUiConfig"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(
        keys,
        vec![
            "id",
            "title",
            "publisher",
            "descriptionMarkdown",
            "graphQueriesTableName",
            "graphQueries",
            "sampleQueries",
            "connectivityCriteria",
            "dataTypes",
            "availability",
            "permissions",
            "instructionSteps"
        ]
    );
}

#[test]
fn test_definition_has_data_connectors_criteria() {
    let mut ui = test_connector_ui();
    ui.connectivity_criteria = vec![ConnectivityCriteria::HasDataConnectors { value: vec![] }];
    let def = definition_resource(&pull_meta(), &test_schema(), &ui, &poller_names());
    assert_eq!(def["name"], "TestConnectorPoller");
    assert_eq!(
        def["properties"]["connectorUiConfig"]["connectivityCriteria"],
        json!([{"type": "HasDataConnectors", "value": []}])
    );
}

// ============================================================================
// Instance: Push
// ============================================================================

#[test]
fn test_push_instance_full_structure() {
    let instance = instance_resource(&push_meta(), &test_data_flow(), None, &push_names());
    assert_eq!(
        instance,
        json!({
            "name": "TestConnectorPushConnector",
            "apiVersion": "2024-09-01",
            "type": "Microsoft.SecurityInsights/dataConnectors",
            "kind": "Push",
            "properties": {
                "connectorDefinitionName": "TestConnectorPush",
                "dcrConfig": {
                    "streamName": "Custom-TestConnector",
                    "dataCollectionEndpoint": "[[parameters('dcrConfig').dataCollectionEndpoint]",
                    "dataCollectionRuleImmutableId": "[[parameters('dcrConfig').dataCollectionRuleImmutableId]"
                },
                "auth": {
                    "type": "Push",
                    "AppId": "[[parameters('auth').appId]",
                    "ServicePrincipalId": "[[parameters('auth').servicePrincipalId]"
                },
                "request": {"RetryCount": 1},
                "response": {"eventsJsonPaths": ["$"]}
            }
        })
    );
}

#[test]
fn test_push_ignores_stray_poller_config() {
    let poller = basic_poller_config();
    let instance = instance_resource(&push_meta(), &test_data_flow(), Some(&poller), &push_names());
    assert_eq!(instance["kind"], "Push");
    assert_eq!(instance["properties"]["auth"]["type"], "Push");
}

#[test]
fn test_poller_without_config_falls_back_to_push() {
    let instance = instance_resource(&pull_meta(), &test_data_flow(), None, &poller_names());
    assert_eq!(instance["kind"], "Push");
    assert_eq!(instance["name"], "TestConnectorPollerConnector");
    assert_eq!(instance["properties"]["connectorDefinitionName"], "TestConnectorPoller");
    assert_eq!(instance["properties"]["request"], json!({"RetryCount": 1}));
}

// ============================================================================
// Instance: RestApiPoller
// ============================================================================

fn poller_instance(poller: &PollerConfig) -> JsonValue {
    instance_resource(&pull_meta(), &test_data_flow(), Some(poller), &poller_names())
}

#[test]
fn test_poller_identity() {
    let instance = poller_instance(&basic_poller_config());
    assert_eq!(instance["kind"], "RestApiPoller");
    assert_eq!(instance["name"], "TestConnectorPollerConnector");
    assert_eq!(instance["properties"]["connectorDefinitionName"], "TestConnectorPoller");
    assert_eq!(
        instance["properties"]["dcrConfig"]["streamName"],
        "Custom-TestConnector"
    );
}

#[test]
fn test_poller_basic_auth() {
    let instance = poller_instance(&basic_poller_config());
    assert_eq!(
        instance["properties"]["auth"],
        json!({"type": "Basic", "userName": "{{username}}", "password": "{{password}}"})
    );
}

#[test]
fn test_poller_default_request_and_response() {
    let instance = poller_instance(&basic_poller_config());
    assert_eq!(
        instance["properties"]["request"],
        json!({
            "apiEndpoint": "https://api.example.com/events",
            "httpMethod": "GET",
            "queryWindowInMin": 5,
            "queryTimeFormat": "yyyy-MM-ddTHH:mm:ssZ",
            "rateLimitQPS": 10,
            "retryCount": 3,
            "timeoutInSeconds": 60
        })
    );
    assert_eq!(
        instance["properties"]["response"],
        json!({"eventsJsonPaths": ["$"], "format": "json"})
    );
}

#[test]
fn test_poller_api_key_auth() {
    let instance = poller_instance(&api_key_poller_config());
    let auth = instance["properties"]["auth"].as_object().unwrap();
    assert_eq!(auth["type"], "APIKey");
    assert_eq!(auth["apiKeyIdentifier"], "Bearer");
    assert!(!auth.contains_key("isApiKeyInPostPayload"));
}

#[test]
fn test_poller_oauth2_grants() {
    let client = poller_instance(&oauth2_client_creds_poller_config());
    let auth = client["properties"]["auth"].as_object().unwrap();
    assert_eq!(auth["grantType"], "client_credentials");
    assert!(!auth.contains_key("redirectUri"));

    let code = poller_instance(&oauth2_auth_code_poller_config());
    let auth = code["properties"]["auth"].as_object().unwrap();
    assert_eq!(auth["grantType"], "authorization_code");
    assert_eq!(
        auth["authorizationEndpointQueryParameters"],
        json!({"response_type": "code"})
    );
}

#[test]
fn test_poller_paging_block() {
    let none = poller_instance(&basic_poller_config());
    assert!(!none["properties"].as_object().unwrap().contains_key("paging"));

    let token = poller_instance(&next_page_token_poller_config());
    assert_eq!(
        token["properties"]["paging"],
        json!({"pagingType": "NextPageToken", "nextPageTokenJsonPath": "$.nextToken", "nextPageParaName": "cursor"})
    );

    let offset = poller_instance(&offset_poller_config());
    assert_eq!(
        offset["properties"]["paging"],
        json!({"pagingType": "Offset", "pageSize": 100, "pageSizeParaName": "limit"})
    );
}

// ============================================================================
// Request / Response Omission
// ============================================================================

fn full_request() -> PollerRequest {
    let mut headers = StringMap::new();
    headers.insert("Accept".to_string(), "application/json".to_string());
    let mut query = StringMap::new();
    query.insert("limit".to_string(), "100".to_string());

    PollerRequest {
        api_endpoint: "https://api.example.com/events".to_string(),
        http_method: Method::POST,
        start_time_attribute_name: "since".to_string(),
        end_time_attribute_name: "until".to_string(),
        headers,
        query_parameters: query,
        query_parameters_template: "{\"since\": \"{_QueryWindowStartTime}\"}".to_string(),
        ..PollerRequest::default()
    }
}

#[test]
fn test_request_all_optional_fields_present() {
    let doc = request_document(&full_request());
    for key in [
        "startTimeAttributeName",
        "endTimeAttributeName",
        "headers",
        "queryParameters",
        "queryParametersTemplate",
        "isPostPayloadJson",
    ] {
        assert!(doc.contains_key(key), "missing key {key}");
    }
    assert_eq!(doc["headers"], json!({"Accept": "application/json"}));
    assert_eq!(doc["isPostPayloadJson"], true);
}

#[test_case("startTimeAttributeName", |r: &mut PollerRequest| r.start_time_attribute_name.clear() ; "start time attribute")]
#[test_case("endTimeAttributeName", |r: &mut PollerRequest| r.end_time_attribute_name.clear() ; "end time attribute")]
#[test_case("headers", |r: &mut PollerRequest| r.headers.clear() ; "headers")]
#[test_case("queryParameters", |r: &mut PollerRequest| r.query_parameters.clear() ; "query parameters")]
#[test_case("queryParametersTemplate", |r: &mut PollerRequest| r.query_parameters_template.clear() ; "query parameters template")]
#[test_case("isPostPayloadJson", |r: &mut PollerRequest| r.http_method = Method::GET ; "post payload flag on get")]
fn test_request_field_omitted(key: &str, clear: fn(&mut PollerRequest)) {
    let mut request = full_request();
    clear(&mut request);
    let doc = request_document(&request);
    assert!(!doc.contains_key(key), "unexpected key {key}");
}

#[test]
fn test_request_keeps_zero_values() {
    let request = PollerRequest {
        retry_count: 0,
        query_window_in_min: 0,
        ..PollerRequest::default()
    };
    let doc = request_document(&request);
    assert_eq!(doc["retryCount"], 0);
    assert_eq!(doc["queryWindowInMin"], 0);
}

#[test]
fn test_request_post_with_form_payload() {
    let request = PollerRequest {
        is_post_payload_json: false,
        ..full_request()
    };
    assert_eq!(request_document(&request)["isPostPayloadJson"], false);
}

fn full_response() -> PollerResponse {
    PollerResponse {
        events_json_paths: vec!["$.data".to_string()],
        success_status_json_path: "$.status".to_string(),
        success_status_value: "ok".to_string(),
        is_gzip_compressed: true,
        format: ResponseFormat::Csv,
        convert_child_properties_to_array: true,
    }
}

#[test]
fn test_response_all_optional_fields_present() {
    let doc = response_document(&full_response());
    assert_eq!(
        JsonValue::Object(doc),
        json!({
            "eventsJsonPaths": ["$.data"],
            "format": "csv",
            "successStatusJsonPath": "$.status",
            "successStatusValue": "ok",
            "isGzipCompressed": true,
            "convertChildPropertiesToArray": true
        })
    );
}

#[test_case("successStatusJsonPath", |r: &mut PollerResponse| r.success_status_json_path.clear() ; "success status path")]
#[test_case("successStatusValue", |r: &mut PollerResponse| r.success_status_value.clear() ; "success status value")]
#[test_case("isGzipCompressed", |r: &mut PollerResponse| r.is_gzip_compressed = false ; "gzip flag")]
#[test_case("convertChildPropertiesToArray", |r: &mut PollerResponse| r.convert_child_properties_to_array = false ; "child array flag")]
fn test_response_field_omitted(key: &str, clear: fn(&mut PollerResponse)) {
    let mut response = full_response();
    clear(&mut response);
    let doc = response_document(&response);
    assert!(!doc.contains_key(key), "unexpected key {key}");
    assert!(doc.contains_key("eventsJsonPaths"));
    assert!(doc.contains_key("format"));
}

// ============================================================================
// Compile + Template
// ============================================================================

#[test]
fn test_compile_connector_cross_references() {
    let resources = compile_connector(&push_connector());
    assert_eq!(resources.names, push_names());
    assert_eq!(resources.dcr["name"], "TestConnectorPushDCR");
    assert_eq!(
        resources.instance["properties"]["connectorDefinitionName"],
        resources.definition["name"]
    );
    assert_eq!(
        resources.instance["properties"]["dcrConfig"]["streamName"],
        resources.dcr["properties"]["dataFlows"][0]["streams"][0]
    );
    assert_eq!(
        resources.definition["properties"]["connectorUiConfig"]["graphQueriesTableName"],
        resources.table["name"]
    );
}

#[test]
fn test_compile_is_deterministic() {
    let connector = pull_connector(oauth2_auth_code_poller_config());
    let first = serde_json::to_string(&deployment_template(&compile_connector(&connector))).unwrap();
    let second = serde_json::to_string(&deployment_template(&compile_connector(&connector))).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_resource_kind_file_names() {
    let names: Vec<&str> = ResourceKind::ALL.iter().map(|k| k.file_name()).collect();
    assert_eq!(
        names,
        vec!["table.json", "DCR.json", "connectorDefinition.json", "dataConnector.json"]
    );
}

#[test]
fn test_deployment_template_shape() {
    let resources = compile_connector(&pull_connector(offset_poller_config()));
    let template = deployment_template(&resources);
    assert_eq!(template["$schema"], DEPLOYMENT_SCHEMA);
    assert_eq!(template["contentVersion"], "1.0.0.0");
    assert_eq!(
        template["parameters"]["workspace-location"]["defaultValue"],
        "[resourceGroup().location]"
    );
    assert_eq!(
        template["variables"],
        json!({"workspaceResourceId": "[parameters('workspace')]"})
    );

    let types: Vec<&str> = template["resources"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|r| r["type"].as_str())
        .collect();
    assert_eq!(types, vec![TABLE_TYPE, DCR_TYPE, DEFINITION_TYPE, INSTANCE_TYPE]);
    assert_eq!(template["resources"][3]["kind"], "RestApiPoller");
}
