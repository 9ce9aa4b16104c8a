//! ARM deployment template wrapping one connector's resources

use super::ConnectorResources;
use crate::document::Document;
use crate::types::JsonValue;
use serde_json::json;

pub const DEPLOYMENT_SCHEMA: &str =
    "https://schema.management.azure.com/schemas/2019-04-01/deploymentTemplate.json#";

/// Wrap the four resources in a deployable template
///
/// Declares the `workspace` and `workspace-location` parameters and the
/// `workspaceResourceId` variable the resources refer to.
pub fn deployment_template(resources: &ConnectorResources) -> JsonValue {
    let parameters = json!({
        "workspace": {
            "type": "string",
            "metadata": {
                "description": "The Microsoft Sentinel workspace into which the function will be deployed. Has to be in the selected Resource Group."
            }
        },
        "workspace-location": {
            "type": "string",
            "defaultValue": "[resourceGroup().location]",
            "metadata": {
                "description": "The location of the Microsoft Sentinel workspace"
            }
        }
    });

    let documents: Vec<JsonValue> = resources.documents().map(|(_, doc)| doc.clone()).collect();

    Document::new()
        .field("$schema", DEPLOYMENT_SCHEMA)
        .field("contentVersion", "1.0.0.0")
        .field("parameters", parameters)
        .field(
            "variables",
            json!({"workspaceResourceId": "[parameters('workspace')]"}),
        )
        .field("resources", documents)
        .into_value()
}
