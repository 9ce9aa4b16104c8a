//! CLI commands and argument parsing

use crate::resources::ResourceKind;
use crate::types::ConnectorKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Sentinel codeless connector manifest compiler
#[derive(Parser, Debug)]
#[command(name = "ccf-compiler")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Project file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Output format for JSON documents
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the full solution package to a directory
    Compile {
        /// Directory the package folder is created in
        #[arg(short, long, default_value = "dist")]
        output: PathBuf,
    },

    /// Print one connector's ARM deployment template
    Template {
        /// Connector id (defaults to the first connector)
        #[arg(long)]
        connector: Option<String>,
    },

    /// Print a single resource document
    Resource {
        /// Resource to print
        kind: ResourceKind,

        /// Connector id (defaults to the first connector)
        #[arg(long)]
        connector: Option<String>,
    },

    /// Print one detection content document
    Export {
        /// Content type
        kind: ContentKind,

        /// Entity id or name (defaults to the first entity)
        #[arg(long)]
        name: Option<String>,
    },

    /// Parse a hand-pasted content file and print the entity as JSON
    Import {
        /// Content type
        kind: ContentKind,

        /// File to import
        file: PathBuf,
    },

    /// Print every name derived from a connector id
    Names {
        /// Connector id, or a title with --from-title
        value: String,

        /// Connector kind
        #[arg(long, default_value = "push")]
        kind: ConnectorKind,

        /// Derive the connector id from a human title first
        #[arg(long)]
        from_title: bool,
    },

    /// Print a starter project for a new connector
    Scaffold {
        /// Connector title
        title: String,

        /// Connector kind
        #[arg(long, default_value = "push")]
        kind: ConnectorKind,
    },
}

/// Detection content type
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ContentKind {
    /// Analytic rule (YAML)
    Rule,
    /// Hunting query (YAML)
    Hunt,
    /// ASIM parser (YAML)
    Parser,
    /// Workbook (JSON)
    Workbook,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact single-line JSON
    Json,
    /// Indented JSON
    Pretty,
}
