//! CLI module
//!
//! Command-line interface for compiling connector projects.
//!
//! # Commands
//!
//! - `compile` - Write the solution package to a directory
//! - `template` - Print a connector's deployment template
//! - `resource` - Print one resource document
//! - `export` / `import` - Convert detection content
//! - `names` - Print derived resource names
//! - `scaffold` - Print a starter project

mod commands;
mod runner;

pub use commands::{Cli, Commands, ContentKind, OutputFormat};
pub use runner::Runner;
