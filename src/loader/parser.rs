//! Project file parsing and validation

use crate::config::Project;
use crate::error::{Error, Result};
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, info};

/// Connector ids become resource names and folder names
static CONNECTOR_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9]*$").unwrap());

/// Load a project from a YAML or JSON file
pub fn load_project(path: impl AsRef<Path>) -> Result<Project> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::config(format!(
                "Failed to read project file '{}': {}",
                path.display(),
                e
            ))
        }
    })?;

    let project = load_project_from_str(&content)?;
    info!(
        path = %path.display(),
        solution = %project.solution_name(),
        connectors = project.connectors.len(),
        "Loaded project"
    );
    Ok(project)
}

/// Load a project from YAML or JSON text
pub fn load_project_from_str(text: &str) -> Result<Project> {
    let project: Project = serde_yaml::from_str(text)
        .map_err(|e| Error::config(format!("Failed to parse project: {e}")))?;

    validate_project(&project)?;
    debug!(
        rules = project.analytic_rules.len(),
        hunting_queries = project.hunting_queries.len(),
        parsers = project.asim_parsers.len(),
        workbooks = project.workbooks.len(),
        "Parsed project content"
    );
    Ok(project)
}

/// Structural checks the generators rely on
fn validate_project(project: &Project) -> Result<()> {
    if project.connectors.is_empty() {
        return Err(Error::config("Project must define at least one connector"));
    }

    let mut seen = HashSet::new();
    for (i, connector) in project.connectors.iter().enumerate() {
        let id = connector.meta.connector_id.as_str();
        if id.is_empty() {
            return Err(Error::config(format!("Connector {i} has an empty connectorId")));
        }
        if !CONNECTOR_ID_REGEX.is_match(id) {
            return Err(Error::config(format!(
                "Invalid connectorId '{id}': must start with a letter and contain only letters and digits"
            )));
        }
        if !seen.insert(id) {
            return Err(Error::config(format!("Duplicate connectorId '{id}'")));
        }
    }

    Ok(())
}
