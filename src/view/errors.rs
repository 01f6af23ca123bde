//! Error types for view generation

use thiserror::Error;

/// Errors that can occur while turning view definitions into XML
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// A required option was absent or empty
    #[error("Missing required field '{field}'")]
    MissingField {
        /// Option key that was expected.
        field: String,
    },

    /// An option was supplied with the wrong shape
    #[error("Option '{key}' has the wrong type: expected {expected}")]
    TypeMismatch {
        /// Option key holding the bad value.
        key: String,
        /// Human readable description of the accepted shape.
        expected: &'static str,
    },

    /// No generator is registered for the requested view type
    #[error("Unknown view type '{0}'")]
    UnknownViewType(String),

    /// A definition file could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Two definitions share the same identifier
    #[error("Duplicate entry found in '{file}': '{id}' already defined")]
    Duplicate {
        /// File containing the second definition.
        file: String,
        /// Identifier that collided.
        id: String,
    },

    /// A name or exclude pattern could not be compiled
    #[error("Invalid pattern '{pattern}': {reason}")]
    Pattern {
        /// Pattern as written.
        pattern: String,
        /// Why it was rejected.
        reason: String,
    },

    /// XML serialization failed
    #[error("XML error: {0}")]
    Xml(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ViewError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_yaml::Error> for ViewError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Result alias used across the view modules
pub type Result<T> = std::result::Result<T, ViewError>;
