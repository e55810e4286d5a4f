//! Routing error types

use thiserror::Error;

/// Result type for routing operations
pub type Result<T> = std::result::Result<T, RoutingError>;

/// Errors that can occur during routing table compilation
#[derive(Debug, Error)]
pub enum RoutingError {
    /// Two file groups share a name
    #[error("duplicate file group '{name}' in routing table")]
    DuplicateGroup {
        /// Name of the repeated group
        name: String,
    },

    /// More groups than `SinkId` can address
    #[error("too many file groups: {count} (max {max})")]
    TooManyGroups {
        /// Number of groups requested
        count: usize,
        /// Upper bound
        max: usize,
    },
}

impl RoutingError {
    /// Create a DuplicateGroup error
    #[inline]
    pub fn duplicate_group(name: impl Into<String>) -> Self {
        Self::DuplicateGroup { name: name.into() }
    }
}
