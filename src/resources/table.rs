//! Custom log table resource

use crate::config::{Column, TableSchema};
use crate::document::Document;
use crate::types::JsonValue;

pub const TABLE_TYPE: &str = "Microsoft.OperationalInsights/workspaces/tables";
pub const TABLE_API_VERSION: &str = "2025-07-01";

/// Build the table resource
///
/// The table name is both the resource name and the embedded schema name.
/// Columns are projected 1:1, `TimeGenerated` included.
pub fn table_resource(schema: &TableSchema) -> JsonValue {
    let schema_doc = Document::new()
        .field("name", schema.table_name.as_str())
        .field("columns", column_list(&schema.columns));

    Document::new()
        .field("type", TABLE_TYPE)
        .field("apiVersion", TABLE_API_VERSION)
        .field("name", schema.table_name.as_str())
        .field(
            "properties",
            Document::new().field("schema", schema_doc.into_value()).into_value(),
        )
        .into_value()
}

/// `[{name, type}]` list shared by the table and the DCR stream declaration
pub(crate) fn column_list<'a>(columns: impl IntoIterator<Item = &'a Column>) -> JsonValue {
    JsonValue::Array(
        columns
            .into_iter()
            .map(|column| {
                Document::new()
                    .field("name", column.name.as_str())
                    .field("type", column.column_type.as_str())
                    .into_value()
            })
            .collect(),
    )
}
