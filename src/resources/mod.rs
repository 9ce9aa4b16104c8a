//! Resource generators
//!
//! Builds the four deployment documents of a connector:
//! - Table: the custom log table and its columns
//! - DCR: the data collection rule routing the input stream into the table
//! - Definition: the connector gallery entry (UI config)
//! - Instance: the connector itself, Push or RestApiPoller
//!
//! # Overview
//!
//! Every generator is a pure function of the connector snapshot and the
//! [`DerivedNames`] computed once in [`compile_connector`]. No generator
//! derives a name on its own; cross-document references always come from
//! the same `DerivedNames` value.

mod dcr;
mod definition;
mod instance;
mod table;
mod template;

pub use dcr::{dcr_resource, DCR_API_VERSION, DCR_TYPE};
pub use definition::{definition_resource, DEFINITION_API_VERSION, DEFINITION_TYPE};
pub use instance::{
    instance_resource, request_document, response_document, INSTANCE_API_VERSION, INSTANCE_TYPE,
};
pub use table::{table_resource, TABLE_API_VERSION, TABLE_TYPE};
pub use template::{deployment_template, DEPLOYMENT_SCHEMA};

use crate::config::ConnectorData;
use crate::naming::DerivedNames;
use crate::types::JsonValue;
use clap::ValueEnum;
use tracing::debug;

/// Deployment-time expression for the workspace location parameter
pub const WORKSPACE_LOCATION: &str = "[parameters('workspace-location')]";

/// Deployment-time expression for the shared workspace variable
pub const WORKSPACE_RESOURCE_ID: &str = "[variables('workspaceResourceId')]";

/// One of the four documents generated per connector
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    Table,
    Dcr,
    Definition,
    Instance,
}

impl ResourceKind {
    /// All kinds, in deployment order
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Table,
        ResourceKind::Dcr,
        ResourceKind::Definition,
        ResourceKind::Instance,
    ];

    /// File name of the document inside the connector folder
    pub fn file_name(self) -> &'static str {
        match self {
            ResourceKind::Table => "table.json",
            ResourceKind::Dcr => "DCR.json",
            ResourceKind::Definition => "connectorDefinition.json",
            ResourceKind::Instance => "dataConnector.json",
        }
    }
}

/// The generated documents for one connector
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorResources {
    pub names: DerivedNames,
    pub table: JsonValue,
    pub dcr: JsonValue,
    pub definition: JsonValue,
    pub instance: JsonValue,
}

impl ConnectorResources {
    /// Get the document for a resource kind
    pub fn get(&self, kind: ResourceKind) -> &JsonValue {
        match kind {
            ResourceKind::Table => &self.table,
            ResourceKind::Dcr => &self.dcr,
            ResourceKind::Definition => &self.definition,
            ResourceKind::Instance => &self.instance,
        }
    }

    /// Documents in deployment order: table, DCR, definition, instance
    pub fn documents(&self) -> impl Iterator<Item = (ResourceKind, &JsonValue)> {
        ResourceKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }
}

/// Compile one connector into its four resource documents
pub fn compile_connector(connector: &ConnectorData) -> ConnectorResources {
    let meta = &connector.meta;
    let names = DerivedNames::derive(&meta.connector_id, meta.connector_kind);
    debug!(
        connector = %meta.connector_id,
        kind = %meta.connector_kind,
        "Compiling connector resources"
    );

    ConnectorResources {
        table: table_resource(&connector.schema),
        dcr: dcr_resource(&connector.schema, &connector.data_flow, &names),
        definition: definition_resource(
            meta,
            &connector.schema,
            &connector.connector_ui,
            &names,
        ),
        instance: instance_resource(
            meta,
            &connector.data_flow,
            connector.poller_config.as_ref(),
            &names,
        ),
        names,
    }
}

#[cfg(test)]
pub(crate) mod fixtures;

#[cfg(test)]
mod tests;
