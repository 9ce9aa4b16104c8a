//! Solution-wide files: content index, marketplace metadata, release notes

use crate::config::{Project, Solution};
use crate::document::Document;
use crate::types::JsonValue;
use serde_json::json;

pub const SOLUTION_METADATA_FILE: &str = "SolutionMetadata.json";
pub const RELEASE_NOTES_FILE: &str = "ReleaseNotes.md";

/// Repository checkout path the packaging tool expects in `BasePath`
const BASE_PATH_PREFIX: &str = "C:\\GitHub\\Azure-Sentinel\\Solutions\\";

/// Relative paths of everything a package contains, grouped by content type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentIndex {
    pub data_connectors: Vec<String>,
    pub analytic_rules: Vec<String>,
    pub hunting_queries: Vec<String>,
    pub parsers: Vec<String>,
    pub workbooks: Vec<String>,
}

fn paths(items: &[String]) -> Vec<JsonValue> {
    items.iter().map(|p| JsonValue::from(p.as_str())).collect()
}

/// `Data/Solution_<name>.json`
///
/// Author, logo and description come from the first connector; the
/// connector list is always written, other content lists only when
/// non-empty.
pub fn solution_data(project: &Project, index: &ContentIndex) -> JsonValue {
    let name = project.solution_name();
    let first = project.connectors.first();

    let author = match first {
        Some(connector) => format!(
            "{} - {}",
            connector.meta.publisher, project.solution.support.email
        ),
        None => project.solution.support.email.clone(),
    };

    Document::new()
        .field("Name", name.as_str())
        .field("Author", author)
        .field("Logo", first.map(|c| c.meta.logo.as_str()).unwrap_or_default())
        .field(
            "Description",
            first
                .map(|c| c.meta.description_markdown.as_str())
                .unwrap_or_default(),
        )
        .field("Data Connectors", paths(&index.data_connectors))
        .list_if_present("Analytic Rules", paths(&index.analytic_rules))
        .list_if_present("Hunting Queries", paths(&index.hunting_queries))
        .list_if_present("Parsers", paths(&index.parsers))
        .list_if_present("Workbooks", paths(&index.workbooks))
        .field("BasePath", format!("{BASE_PATH_PREFIX}{name}"))
        .field("Version", project.solution.version.as_str())
        .field("Metadata", SOLUTION_METADATA_FILE)
        .field("TemplateSpec", true)
        .field("Is1PConnector", false)
        .into_value()
}

/// `SolutionMetadata.json`
///
/// Providers are the distinct connector publishers, in connector order.
pub fn solution_metadata(project: &Project) -> JsonValue {
    let solution: &Solution = &project.solution;

    let mut providers: Vec<&str> = Vec::new();
    for connector in &project.connectors {
        let publisher = connector.meta.publisher.as_str();
        if !publisher.is_empty() && !providers.contains(&publisher) {
            providers.push(publisher);
        }
    }

    Document::new()
        .field("publisherId", solution.publisher_id.as_str())
        .field("offerId", solution.offer_id.as_str())
        .field("firstPublishDate", solution.first_publish_date.as_str())
        .field("lastPublishDate", solution.first_publish_date.as_str())
        .field("providers", providers)
        .field(
            "categories",
            json!({
                "domains": solution.categories.domains,
                "verticals": solution.categories.verticals,
            }),
        )
        .field(
            "support",
            json!({
                "name": solution.support.name,
                "email": solution.support.email,
                "tier": solution.support.tier.as_str(),
                "link": solution.support.link,
            }),
        )
        .into_value()
}

/// `ReleaseNotes.md`, titled after the first connector
pub fn release_notes(project: &Project) -> String {
    let title = project
        .connectors
        .first()
        .map(|c| c.meta.title.clone())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| project.solution_name());

    format!(
        "# {title}\n\n## v{}\n\n- Initial release\n",
        project.solution.version
    )
}
