//! Workbook export and import
//!
//! Workbook JSON is usually pasted from the portal gallery editor and often
//! hand-edited, so export never fails on bad input: unparseable or
//! non-object data is treated as an empty workbook.

use super::types::Workbook;
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use tracing::{debug, warn};

pub const WORKBOOK_SCHEMA: &str =
    "https://github.com/Microsoft/Application-Insights-Workbooks/blob/master/schema/workbook.json";

pub(crate) const WORKBOOK: &str = "workbook";

/// Keys that are never carried over from pasted JSON
const BLOCKED_KEYS: [&str; 3] = ["__proto__", "constructor", "prototype"];

/// Build the workbook document
///
/// Existing `fromTemplateId`, `$schema` and `version` values win; each is
/// injected only when absent.
pub fn workbook_document(workbook: &Workbook) -> JsonValue {
    let mut doc = parse_gallery_json(&workbook.serialized_data, &workbook.name);

    inject(&mut doc, "fromTemplateId", &workbook.from_template_id);
    inject(&mut doc, "$schema", WORKBOOK_SCHEMA);
    inject(&mut doc, "version", &workbook.version);

    JsonValue::Object(doc)
}

/// Render the workbook document as pretty-printed JSON
pub fn workbook_json(workbook: &Workbook) -> Result<String> {
    serde_json::to_string_pretty(&workbook_document(workbook))
        .map_err(|e| Error::serialize(format!("{WORKBOOK} '{}'", workbook.name), e.to_string()))
}

fn parse_gallery_json(data: &str, name: &str) -> JsonObject {
    if data.trim().is_empty() {
        return JsonObject::new();
    }
    match serde_json::from_str::<JsonValue>(data) {
        Ok(value) => match sanitize(value) {
            JsonValue::Object(map) => map,
            _ => {
                warn!(workbook = %name, "Workbook data is not a JSON object, ignoring it");
                JsonObject::new()
            }
        },
        Err(e) => {
            warn!(workbook = %name, error = %e, "Workbook data is not valid JSON, ignoring it");
            JsonObject::new()
        }
    }
}

fn inject(doc: &mut JsonObject, key: &str, value: &str) {
    doc.entry(key.to_string())
        .or_insert_with(|| JsonValue::String(value.to_string()));
}

/// Remove blocked keys at every depth
pub(crate) fn sanitize(value: JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(map) => JsonValue::Object(
            map.into_iter()
                .filter(|(key, _)| !BLOCKED_KEYS.contains(&key.as_str()))
                .map(|(key, value)| (key, sanitize(value)))
                .collect(),
        ),
        JsonValue::Array(items) => JsonValue::Array(items.into_iter().map(sanitize).collect()),
        other => other,
    }
}

/// Create a workbook from pasted gallery JSON
///
/// Unlike export, import rejects text that is not a JSON object. The name,
/// template id and version are read from the JSON when present; a missing
/// template id is derived from the name (`sentinel-<slug>`).
pub fn parse_workbook(json: &str) -> Result<Workbook> {
    let value: JsonValue = serde_json::from_str(json)?;
    let Some(doc) = value.as_object() else {
        return Err(Error::not_a_mapping(WORKBOOK));
    };

    let field = |key: &str| {
        doc.get(key)
            .and_then(JsonValue::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let name = field("name").unwrap_or_default();
    let workbook = Workbook {
        id: uuid::Uuid::new_v4().to_string(),
        from_template_id: field("fromTemplateId").unwrap_or_else(|| template_id_for(&name)),
        version: field("version").unwrap_or_else(|| Workbook::default().version),
        serialized_data: json.to_string(),
        description: String::new(),
        name,
    };

    debug!(name = %workbook.name, template = %workbook.from_template_id, "Imported workbook");
    Ok(workbook)
}

/// `sentinel-<slug>` template id for a workbook name, or empty
pub fn template_id_for(name: &str) -> String {
    let lowered = name.to_ascii_lowercase();
    let slug = lowered
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() {
        String::new()
    } else {
        format!("sentinel-{slug}")
    }
}
