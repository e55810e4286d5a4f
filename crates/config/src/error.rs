//! Configuration error types

use std::io;
use thiserror::Error;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur when loading or validating logging configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file
    #[error("failed to read config file '{path}': {source}")]
    IoError {
        /// Path to the file
        path: String,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// A value (from a file or an environment variable) could not be interpreted
    #[error("{component} '{name}' has invalid {field}: {message}")]
    InvalidValue {
        /// Component type (e.g., "file group", "env")
        component: &'static str,
        /// Name of the component
        name: String,
        /// Field name
        field: &'static str,
        /// Error message
        message: String,
    },

    /// Two file groups share a name
    #[error("file group '{name}' is defined more than once")]
    DuplicateGroup {
        /// The conflicting group name
        name: String,
    },
}

impl ConfigError {
    /// Create an InvalidValue error
    pub fn invalid_value(
        component: &'static str,
        name: impl Into<String>,
        field: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            component,
            name: name.into(),
            field,
            message: message.into(),
        }
    }

    /// Create a DuplicateGroup error
    pub fn duplicate_group(name: impl Into<String>) -> Self {
        Self::DuplicateGroup { name: name.into() }
    }
}
