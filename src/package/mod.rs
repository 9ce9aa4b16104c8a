//! Solution package assembly
//!
//! Folds a whole [`Project`] into one ordered list of files:
//!
//! ```text
//! <Solution>/
//!   Data Connectors/<id>_ccf/{table,DCR,connectorDefinition,dataConnector}.json
//!   Analytic Rules/<Name>.yaml
//!   Hunting Queries/<Name>.yaml
//!   Parsers/<Name>.yaml
//!   Workbooks/<Name>.json
//!   Data/Solution_<Solution>.json
//!   SolutionMetadata.json
//!   ReleaseNotes.md
//! ```
//!
//! Connectors are compiled one after another with no shared state. A
//! document that fails to serialize is logged and left out; its siblings
//! are still packaged.

mod metadata;
mod types;

pub use metadata::{
    release_notes, solution_data, solution_metadata, ContentIndex, RELEASE_NOTES_FILE,
    SOLUTION_METADATA_FILE,
};
pub use types::{PackageFile, SolutionPackage};

use crate::config::Project;
use crate::content::{analytic_rule_yaml, asim_parser_yaml, hunting_query_yaml, workbook_json};
use crate::error::{Error, Result};
use crate::naming::{connector_folder, content_file_stem};
use crate::resources::{compile_connector, ResourceKind};
use crate::types::JsonValue;
use tracing::{info, warn};

pub const DATA_CONNECTORS_DIR: &str = "Data Connectors";
pub const ANALYTIC_RULES_DIR: &str = "Analytic Rules";
pub const HUNTING_QUERIES_DIR: &str = "Hunting Queries";
pub const PARSERS_DIR: &str = "Parsers";
pub const WORKBOOKS_DIR: &str = "Workbooks";
pub const DATA_DIR: &str = "Data";

/// Pretty-print a document with two-space indentation
pub fn pretty_json(document: &JsonValue, path: &str) -> Result<String> {
    serde_json::to_string_pretty(document).map_err(|e| Error::serialize(path, e.to_string()))
}

/// Add a rendered file to the package, or log and skip it
///
/// Returns the stored path of an added file.
fn add_rendered(
    package: &mut SolutionPackage,
    path: String,
    rendered: Result<String>,
) -> Option<String> {
    match rendered {
        Ok(contents) => Some(package.push(path, contents)),
        Err(e) => {
            warn!(path = %path, error = %e, "Skipping file that failed to render");
            None
        }
    }
}

/// Assemble the full solution package for a project
pub fn assemble(project: &Project) -> SolutionPackage {
    let mut package = SolutionPackage::new(content_file_stem(&project.solution_name(), ""));
    let mut index = ContentIndex::default();

    for connector in &project.connectors {
        let resources = compile_connector(connector);
        let folder = format!(
            "{DATA_CONNECTORS_DIR}/{}",
            connector_folder(&connector.meta.connector_id)
        );

        for (kind, document) in resources.documents() {
            let path = format!("{folder}/{}", kind.file_name());
            let rendered = pretty_json(document, &path);
            let added = add_rendered(&mut package, path, rendered);
            if kind == ResourceKind::Definition {
                index.data_connectors.extend(added);
            }
        }
    }

    for rule in &project.analytic_rules {
        let stem = content_file_stem(&rule.name, &rule.id);
        index.analytic_rules.extend(add_rendered(
            &mut package,
            format!("{ANALYTIC_RULES_DIR}/{stem}.yaml"),
            analytic_rule_yaml(rule),
        ));
    }

    for query in &project.hunting_queries {
        let stem = content_file_stem(&query.name, &query.id);
        index.hunting_queries.extend(add_rendered(
            &mut package,
            format!("{HUNTING_QUERIES_DIR}/{stem}.yaml"),
            hunting_query_yaml(query),
        ));
    }

    for parser in &project.asim_parsers {
        let stem = content_file_stem(&parser.name, &parser.id);
        index.parsers.extend(add_rendered(
            &mut package,
            format!("{PARSERS_DIR}/{stem}.yaml"),
            asim_parser_yaml(parser),
        ));
    }

    for workbook in &project.workbooks {
        let stem = content_file_stem(&workbook.name, &workbook.id);
        index.workbooks.extend(add_rendered(
            &mut package,
            format!("{WORKBOOKS_DIR}/{stem}.json"),
            workbook_json(workbook),
        ));
    }

    let data_path = format!("{DATA_DIR}/Solution_{}.json", package.root);
    let data = pretty_json(&solution_data(project, &index), &data_path);
    add_rendered(&mut package, data_path, data);

    let metadata = pretty_json(&solution_metadata(project), SOLUTION_METADATA_FILE);
    add_rendered(&mut package, SOLUTION_METADATA_FILE.to_string(), metadata);
    package.push(RELEASE_NOTES_FILE, release_notes(project));

    info!(
        solution = %package.root,
        connectors = project.connectors.len(),
        files = package.len(),
        "Assembled solution package"
    );
    package
}
