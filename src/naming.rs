//! Name derivation for connector resources
//!
//! Every identifier that one generated document uses to reference another
//! (table, stream, DCR, definition, instance) is derived here and nowhere
//! else. Generators receive already-derived names through [`DerivedNames`]
//! and never rebuild them locally.

use crate::types::ConnectorKind;
use serde::Serialize;

/// Suffix marker carried by every custom log table
pub const TABLE_SUFFIX: &str = "_CL";

/// Prefix carried by every custom stream name
pub const STREAM_PREFIX: &str = "Custom-";

/// Convert a human title into a connector id
///
/// Non-alphanumeric characters are dropped, the remainder is split on
/// whitespace and each word is title-cased before concatenation.
///
/// ```
/// use sentinel_ccf::naming::title_to_connector_id;
/// assert_eq!(title_to_connector_id("Contoso Security Alerts"), "ContosoSecurityAlerts");
/// ```
pub fn title_to_connector_id(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();

    cleaned
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
                }
                None => String::new(),
            }
        })
        .collect()
}

/// Table name for a connector id
pub fn connector_id_to_table_name(connector_id: &str) -> String {
    format!("{connector_id}{TABLE_SUFFIX}")
}

/// Input stream name for a table (suffix marker removed)
pub fn table_name_to_stream_name(table_name: &str) -> String {
    let base = table_name.strip_suffix(TABLE_SUFFIX).unwrap_or(table_name);
    format!("{STREAM_PREFIX}{base}")
}

/// Output stream name for a table (suffix marker kept)
pub fn table_name_to_output_stream_name(table_name: &str) -> String {
    format!("{STREAM_PREFIX}{table_name}")
}

/// Data collection rule name
pub fn connector_id_to_dcr_name(connector_id: &str, kind: ConnectorKind) -> String {
    format!("{connector_id}{}DCR", kind.suffix())
}

/// Connector definition name
pub fn connector_id_to_definition_name(connector_id: &str, kind: ConnectorKind) -> String {
    format!("{connector_id}{}", kind.suffix())
}

/// Connector instance name
pub fn connector_id_to_instance_name(connector_id: &str, kind: ConnectorKind) -> String {
    format!("{connector_id}{}Connector", kind.suffix())
}

/// Folder holding one connector's resource documents inside a package
pub fn connector_folder(connector_id: &str) -> String {
    format!("{connector_id}_ccf")
}

/// File stem for a piece of detection content
///
/// Drops characters that are not ASCII alphanumeric and capitalizes each
/// word, keeping the rest of the word as written (`ASimDnsVendor` stays
/// intact). Falls back to the entity id and then to `Untitled` when the name
/// has no usable characters.
pub fn content_file_stem(name: &str, id: &str) -> String {
    let stem: String = name
        .split_whitespace()
        .flat_map(|word| {
            word.chars()
                .filter(char::is_ascii_alphanumeric)
                .enumerate()
                .map(|(i, c)| if i == 0 { c.to_ascii_uppercase() } else { c })
        })
        .collect();
    if !stem.is_empty() {
        return stem;
    }
    let id_stem: String = id
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    if id_stem.is_empty() {
        "Untitled".to_string()
    } else {
        id_stem
    }
}

/// All cross-document names for one connector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedNames {
    pub connector_id: String,
    pub kind: ConnectorKind,
    pub dcr_name: String,
    pub definition_name: String,
    pub instance_name: String,
}

impl DerivedNames {
    /// Derive every resource name for a connector id and kind
    pub fn derive(connector_id: &str, kind: ConnectorKind) -> Self {
        Self {
            connector_id: connector_id.to_string(),
            kind,
            dcr_name: connector_id_to_dcr_name(connector_id, kind),
            definition_name: connector_id_to_definition_name(connector_id, kind),
            instance_name: connector_id_to_instance_name(connector_id, kind),
        }
    }
}
