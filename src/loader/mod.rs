//! Project loader
//!
//! Reads a project document (solution, connectors and detection content)
//! from YAML or JSON. JSON goes through the YAML parser unchanged.

mod parser;

pub use parser::{load_project, load_project_from_str};
