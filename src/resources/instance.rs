//! Connector instance resource
//!
//! The instance is where the connector kinds diverge. A Push instance has a
//! fixed shape with runtime-resolved placeholders; a RestApiPoller instance
//! projects its auth, request, response and paging settings, each key
//! present only when it applies to the active variant and is non-empty.

use crate::auth::auth_document;
use crate::config::{DataFlow, Meta, PollerConfig, PollerRequest, PollerResponse};
use crate::document::Document;
use crate::naming::DerivedNames;
use crate::pagination::paging_document;
use crate::types::{ConnectorKind, JsonObject, JsonValue, Method};
use serde_json::json;
use tracing::warn;

pub const INSTANCE_TYPE: &str = "Microsoft.SecurityInsights/dataConnectors";
pub const INSTANCE_API_VERSION: &str = "2024-09-01";

/// Build the connector instance resource
///
/// A `RestApiPoller` connector without poller settings falls back to the
/// Push shape. Its names stay the poller names derived from the meta kind.
pub fn instance_resource(
    meta: &Meta,
    data_flow: &DataFlow,
    poller: Option<&PollerConfig>,
    names: &DerivedNames,
) -> JsonValue {
    match (meta.connector_kind, poller) {
        (ConnectorKind::RestApiPoller, Some(poller)) => poller_instance(data_flow, poller, names),
        (ConnectorKind::RestApiPoller, None) => {
            warn!(
                connector = %meta.connector_id,
                "RestApiPoller connector has no poller configuration, emitting a Push instance"
            );
            push_instance(data_flow, names)
        }
        (ConnectorKind::Push, _) => push_instance(data_flow, names),
    }
}

fn envelope(kind: ConnectorKind, names: &DerivedNames, properties: Document) -> JsonValue {
    Document::new()
        .field("name", names.instance_name.as_str())
        .field("apiVersion", INSTANCE_API_VERSION)
        .field("type", INSTANCE_TYPE)
        .field("kind", kind.as_str())
        .field("properties", properties.into_value())
        .into_value()
}

/// Stream binding shared by both kinds; endpoint and rule id resolve at deployment
fn dcr_config(data_flow: &DataFlow) -> JsonValue {
    json!({
        "streamName": data_flow.stream_name,
        "dataCollectionEndpoint": "[[parameters('dcrConfig').dataCollectionEndpoint]",
        "dataCollectionRuleImmutableId": "[[parameters('dcrConfig').dataCollectionRuleImmutableId]",
    })
}

fn push_instance(data_flow: &DataFlow, names: &DerivedNames) -> JsonValue {
    let properties = Document::new()
        .field("connectorDefinitionName", names.definition_name.as_str())
        .field("dcrConfig", dcr_config(data_flow))
        .field(
            "auth",
            json!({
                "type": "Push",
                "AppId": "[[parameters('auth').appId]",
                "ServicePrincipalId": "[[parameters('auth').servicePrincipalId]",
            }),
        )
        .field("request", json!({"RetryCount": 1}))
        .field("response", json!({"eventsJsonPaths": ["$"]}));

    envelope(ConnectorKind::Push, names, properties)
}

fn poller_instance(data_flow: &DataFlow, poller: &PollerConfig, names: &DerivedNames) -> JsonValue {
    let properties = Document::new()
        .field("connectorDefinitionName", names.definition_name.as_str())
        .field("dcrConfig", dcr_config(data_flow))
        .field("auth", auth_document(&poller.auth))
        .field("request", request_document(&poller.request))
        .field("response", response_document(&poller.response))
        .object_if_some("paging", paging_document(&poller.paging));

    envelope(ConnectorKind::RestApiPoller, names, properties)
}

/// Build the `request` block of a polling instance
///
/// `isPostPayloadJson` is only meaningful for POST and never appears for GET.
pub fn request_document(request: &PollerRequest) -> JsonObject {
    Document::new()
        .field("apiEndpoint", request.api_endpoint.as_str())
        .field("httpMethod", request.http_method.as_str())
        .field("queryWindowInMin", request.query_window_in_min)
        .field("queryTimeFormat", request.query_time_format.as_str())
        .field("rateLimitQPS", request.rate_limit_qps)
        .field("retryCount", request.retry_count)
        .field("timeoutInSeconds", request.timeout_in_seconds)
        .text_if_present("startTimeAttributeName", &request.start_time_attribute_name)
        .text_if_present("endTimeAttributeName", &request.end_time_attribute_name)
        .map_if_present("headers", &request.headers)
        .map_if_present("queryParameters", &request.query_parameters)
        .text_if_present("queryParametersTemplate", &request.query_parameters_template)
        .with(|doc| match request.http_method {
            Method::POST => doc.field("isPostPayloadJson", request.is_post_payload_json),
            Method::GET => doc,
        })
        .build()
}

/// Build the `response` block of a polling instance
pub fn response_document(response: &PollerResponse) -> JsonObject {
    Document::new()
        .field("eventsJsonPaths", response.events_json_paths.clone())
        .field("format", response.format.as_str())
        .text_if_present("successStatusJsonPath", &response.success_status_json_path)
        .text_if_present("successStatusValue", &response.success_status_value)
        .flag_if_set("isGzipCompressed", response.is_gzip_compressed)
        .flag_if_set(
            "convertChildPropertiesToArray",
            response.convert_child_properties_to_array,
        )
        .build()
}
