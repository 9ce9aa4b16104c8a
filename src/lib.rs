// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]

//! # Sentinel CCF Compiler
//!
//! Compiles Microsoft Sentinel codeless connector (CCF) projects into the
//! cross-referencing deployment documents a solution package needs, and
//! converts detection content between entities and repository text formats.
//!
//! ## Features
//!
//! - **Resource Generation**: table, data collection rule, connector definition
//!   and connector instance documents per connector
//! - **Variant Projection**: Basic, API key and OAuth2 auth; seven paging strategies
//! - **Consistent Naming**: every cross-document name derived in one place
//! - **Detection Content**: analytic rules, hunting queries, ASIM parsers and
//!   workbooks, exported and imported
//! - **Packaging**: the full solution folder layout, ready to write to disk
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sentinel_ccf::{assemble, load_project, Result};
//!
//! fn main() -> Result<()> {
//!     let project = load_project("contoso.yaml")?;
//!     let package = assemble(&project);
//!     package.write_to_dir("dist")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Project (YAML / JSON)                        │
//! │  solution    connectors[]    rules / hunts / parsers / workbooks│
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬─────────────┐
//! │  Naming  │ Resources │  Auth/Paging  │  Content  │   Package   │
//! ├──────────┼───────────┼───────────────┼───────────┼─────────────┤
//! │ Ids      │ Table     │ Basic         │ Rule YAML │ Connectors  │
//! │ Tables   │ DCR       │ APIKey        │ Hunt YAML │ Content     │
//! │ Streams  │ Definition│ OAuth2        │ Parsers   │ Metadata    │
//! │ Resources│ Instance  │ 7 paging types│ Workbooks │ Notes       │
//! └──────────┴───────────┴───────────────┴───────────┴─────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the compiler
pub mod error;

/// Common types and type aliases
pub mod types;

/// Ordered JSON document builder
pub mod document;

/// Name derivation shared by every generator
pub mod naming;

/// ISO 8601 and shorthand duration conversion
pub mod duration;

/// Poller authentication variants
pub mod auth;

/// Poller paging variants
pub mod pagination;

/// Project and connector configuration
pub mod config;

/// Connector defaults for new projects
pub mod scaffold;

/// Resource document generators
pub mod resources;

/// Detection content export and import
pub mod content;

/// Solution package assembly
pub mod package;

/// Project file loader
pub mod loader;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::{ConnectorData, Project};
pub use loader::{load_project, load_project_from_str};
pub use package::{assemble, SolutionPackage};
pub use resources::{compile_connector, ConnectorResources, ResourceKind};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
