//! Error types for the manifest compiler
//!
//! This module defines the error hierarchy for the entire crate.
//! All fallible public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Resource generation itself never fails: generators are total functions over
//! a configuration snapshot. Errors come from reading project files, importing
//! hand-pasted detection content, and serializing documents to text.

use thiserror::Error;

/// The main error type for the manifest compiler
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Connector '{connector}' not found in project")]
    ConnectorNotFound { connector: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Import Errors
    // ============================================================================
    #[error("Invalid {kind} document: {message}")]
    Import { kind: String, message: String },

    #[error("{kind} must contain a mapping (object) at the top level")]
    NotAMapping { kind: String },

    // ============================================================================
    // Output Errors
    // ============================================================================
    #[error("Serialization failed for '{path}': {message}")]
    Serialize { path: String, message: String },

    #[error("Package path '{path}' leaves the package root")]
    UnsafePath { path: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an import error for the given content kind
    pub fn import(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Import {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Create a "top level is not a mapping" error
    pub fn not_a_mapping(kind: impl Into<String>) -> Self {
        Self::NotAMapping { kind: kind.into() }
    }

    /// Create a serialization error for an output path
    pub fn serialize(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Serialize {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Check if this error came from reading user-supplied content
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::Import { .. }
                | Error::NotAMapping { .. }
                | Error::YamlParse(_)
                | Error::JsonParse(_)
                | Error::Config { .. }
        )
    }
}

/// Result type alias for the manifest compiler
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
