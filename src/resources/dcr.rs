//! Data collection rule resource

use super::table::column_list;
use super::{WORKSPACE_LOCATION, WORKSPACE_RESOURCE_ID};
use crate::config::{Column, DataFlow, TableSchema};
use crate::document::Document;
use crate::naming::{table_name_to_output_stream_name, DerivedNames};
use crate::types::{JsonObject, JsonValue};
use serde_json::json;

pub const DCR_TYPE: &str = "Microsoft.Insights/dataCollectionRules";
pub const DCR_API_VERSION: &str = "2021-09-01-preview";

/// Data collection endpoint named after the workspace (`<workspace>-dce`)
const DATA_COLLECTION_ENDPOINT_ID: &str = "[concat(subscription().id, '/resourceGroups/', resourceGroup().name, '/providers/Microsoft.Insights/dataCollectionEndpoints/', split(parameters('workspace'), '/')[8], '-dce')]";

/// Name of the single Log Analytics destination
const DESTINATION_NAME: &str = "clv2ws1";

/// Build the data collection rule resource
pub fn dcr_resource(schema: &TableSchema, data_flow: &DataFlow, names: &DerivedNames) -> JsonValue {
    let stream_name = data_flow.stream_name.as_str();

    let mut declarations = JsonObject::new();
    declarations.insert(
        stream_name.to_string(),
        json!({ "columns": column_list(input_columns(schema, data_flow)) }),
    );

    let properties = Document::new()
        .field("dataCollectionEndpointId", DATA_COLLECTION_ENDPOINT_ID)
        .field("streamDeclarations", declarations)
        .field(
            "destinations",
            json!({
                "logAnalytics": [{
                    "workspaceResourceId": WORKSPACE_RESOURCE_ID,
                    "name": DESTINATION_NAME,
                }]
            }),
        )
        .field(
            "dataFlows",
            json!([{
                "streams": [stream_name],
                "destinations": [DESTINATION_NAME],
                "transformKql": data_flow.transform_kql,
                "outputStream": table_name_to_output_stream_name(&schema.table_name),
            }]),
        );

    Document::new()
        .field("name", names.dcr_name.as_str())
        .field("apiVersion", DCR_API_VERSION)
        .field("type", DCR_TYPE)
        .field("location", WORKSPACE_LOCATION)
        .field("dependsOn", json!([table_dependency(&schema.table_name)]))
        .field("properties", properties.into_value())
        .into_value()
}

/// Columns declared on the input stream
///
/// The override list wins only when the flag is set and the list is
/// non-empty; otherwise the table columns minus `TimeGenerated`.
pub(crate) fn input_columns<'a>(schema: &'a TableSchema, data_flow: &'a DataFlow) -> Vec<&'a Column> {
    if data_flow.input_columns_override && !data_flow.input_columns.is_empty() {
        data_flow.input_columns.iter().collect()
    } else {
        schema.non_time_columns().collect()
    }
}

fn table_dependency(table_name: &str) -> String {
    format!("[concat(variables('workspaceResourceId'), '/tables/{table_name}')]")
}
