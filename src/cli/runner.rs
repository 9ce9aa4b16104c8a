//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, ContentKind, OutputFormat};
use crate::config::{ConnectorData, Project, Solution};
use crate::content::{
    analytic_rule_yaml, asim_parser_yaml, hunting_query_yaml, parse_analytic_rule,
    parse_asim_parser, parse_hunting_query, parse_workbook, workbook_json,
};
use crate::document::Document;
use crate::error::{Error, Result};
use crate::loader::load_project;
use crate::naming::{
    connector_folder, connector_id_to_table_name, table_name_to_output_stream_name,
    table_name_to_stream_name, title_to_connector_id, DerivedNames,
};
use crate::package::assemble;
use crate::resources::{compile_connector, deployment_template, ResourceKind};
use crate::types::{ConnectorKind, JsonValue};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, printing its output to stdout
    pub fn run(&self) -> Result<()> {
        let output = self.execute()?;
        if !output.is_empty() {
            println!("{}", output.trim_end());
        }
        Ok(())
    }

    /// Run the CLI command and return what it would print
    pub fn execute(&self) -> Result<String> {
        match &self.cli.command {
            Commands::Compile { output } => self.compile(output),
            Commands::Template { connector } => self.template(connector.as_deref()),
            Commands::Resource { kind, connector } => self.resource(*kind, connector.as_deref()),
            Commands::Export { kind, name } => self.export(*kind, name.as_deref()),
            Commands::Import { kind, file } => self.import(*kind, file),
            Commands::Names {
                value,
                kind,
                from_title,
            } => self.names(value, *kind, *from_title),
            Commands::Scaffold { title, kind } => Self::scaffold(title, *kind),
        }
    }

    /// Load the project file
    fn load_project(&self) -> Result<Project> {
        let path = self
            .cli
            .project
            .as_ref()
            .ok_or_else(|| Error::config("Project file not specified (use -p flag)"))?;
        load_project(path)
    }

    /// Pick a connector by id, or the first one
    fn select_connector<'a>(
        project: &'a Project,
        connector_id: Option<&str>,
    ) -> Result<&'a ConnectorData> {
        match connector_id {
            Some(id) => project
                .connector(id)
                .ok_or_else(|| Error::ConnectorNotFound {
                    connector: id.to_string(),
                }),
            None => project
                .connectors
                .first()
                .ok_or_else(|| Error::config("Project has no connectors")),
        }
    }

    /// Pick a content entity by id or name, or the first one
    fn select_entity<'a, T>(
        items: &'a [T],
        wanted: Option<&str>,
        label: &str,
        key: impl Fn(&T) -> (&str, &str),
    ) -> Result<&'a T> {
        let found = match wanted {
            Some(wanted) => items.iter().find(|item| {
                let (id, name) = key(item);
                id == wanted || name == wanted
            }),
            None => items.first(),
        };
        found.ok_or_else(|| match wanted {
            Some(wanted) => Error::config(format!("No {label} with id or name '{wanted}'")),
            None => Error::config(format!("Project has no {label}")),
        })
    }

    /// Render a JSON document in the selected format
    fn render(&self, value: &impl Serialize) -> Result<String> {
        let text = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        Ok(text)
    }

    /// Write the solution package
    fn compile(&self, output: &Path) -> Result<String> {
        let project = self.load_project()?;
        let package = assemble(&project);
        let written = package.write_to_dir(output)?;

        info!(
            solution = %package.root,
            files = written.len(),
            "Compiled solution package"
        );

        let files: Vec<String> = written.iter().map(|p| p.display().to_string()).collect();
        self.render(
            &Document::new()
                .field("solution", package.root.as_str())
                .field("root", output.join(&package.root).display().to_string())
                .field("files", files)
                .into_value(),
        )
    }

    /// Print a deployment template
    fn template(&self, connector_id: Option<&str>) -> Result<String> {
        let project = self.load_project()?;
        let connector = Self::select_connector(&project, connector_id)?;
        let resources = compile_connector(connector);
        self.render(&deployment_template(&resources))
    }

    /// Print a single resource document
    fn resource(&self, kind: ResourceKind, connector_id: Option<&str>) -> Result<String> {
        let project = self.load_project()?;
        let connector = Self::select_connector(&project, connector_id)?;
        let resources = compile_connector(connector);
        self.render(resources.get(kind))
    }

    /// Print one content document in its native format
    fn export(&self, kind: ContentKind, wanted: Option<&str>) -> Result<String> {
        let project = self.load_project()?;
        match kind {
            ContentKind::Rule => {
                let rule = Self::select_entity(
                    &project.analytic_rules,
                    wanted,
                    "analytic rule",
                    |r| (r.id.as_str(), r.name.as_str()),
                )?;
                analytic_rule_yaml(rule)
            }
            ContentKind::Hunt => {
                let query = Self::select_entity(
                    &project.hunting_queries,
                    wanted,
                    "hunting query",
                    |q| (q.id.as_str(), q.name.as_str()),
                )?;
                hunting_query_yaml(query)
            }
            ContentKind::Parser => {
                let parser = Self::select_entity(
                    &project.asim_parsers,
                    wanted,
                    "ASIM parser",
                    |p| (p.id.as_str(), p.name.as_str()),
                )?;
                asim_parser_yaml(parser)
            }
            ContentKind::Workbook => {
                let workbook = Self::select_entity(
                    &project.workbooks,
                    wanted,
                    "workbook",
                    |w| (w.id.as_str(), w.name.as_str()),
                )?;
                workbook_json(workbook)
            }
        }
    }

    /// Import a hand-pasted content file
    fn import(&self, kind: ContentKind, file: &Path) -> Result<String> {
        let text = fs::read_to_string(file).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: file.display().to_string(),
                }
            } else {
                Error::Io(e)
            }
        })?;
        debug!(path = %file.display(), kind = ?kind, "Importing content file");

        match kind {
            ContentKind::Rule => self.render(&parse_analytic_rule(&text)?),
            ContentKind::Hunt => self.render(&parse_hunting_query(&text)?),
            ContentKind::Parser => self.render(&parse_asim_parser(&text)?),
            ContentKind::Workbook => self.render(&parse_workbook(&text)?),
        }
    }

    /// Print derived names
    fn names(&self, value: &str, kind: ConnectorKind, from_title: bool) -> Result<String> {
        let connector_id = if from_title {
            title_to_connector_id(value)
        } else {
            value.to_string()
        };
        if connector_id.is_empty() {
            return Err(Error::config(format!(
                "'{value}' does not yield a connector id"
            )));
        }

        let names = DerivedNames::derive(&connector_id, kind);
        let table_name = connector_id_to_table_name(&connector_id);
        self.render(&names_document(&names, &table_name))
    }

    /// Print a starter project as YAML
    fn scaffold(title: &str, kind: ConnectorKind) -> Result<String> {
        let connector = ConnectorData::scaffold(title, kind);
        let project = Project {
            solution: Solution {
                name: connector.meta.connector_id.clone(),
                ..Solution::default()
            },
            connectors: vec![connector],
            ..Project::default()
        };
        Ok(serde_yaml::to_string(&project)?)
    }
}

fn names_document(names: &DerivedNames, table_name: &str) -> JsonValue {
    Document::new()
        .field("connectorId", names.connector_id.as_str())
        .field("kind", names.kind.as_str())
        .field("tableName", table_name)
        .field("streamName", table_name_to_stream_name(table_name))
        .field("outputStreamName", table_name_to_output_stream_name(table_name))
        .field("dcrName", names.dcr_name.as_str())
        .field("definitionName", names.definition_name.as_str())
        .field("instanceName", names.instance_name.as_str())
        .field("folder", connector_folder(&names.connector_id))
        .into_value()
}
