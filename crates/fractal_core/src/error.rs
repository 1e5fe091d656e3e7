//! # Hierarchy Error Types
//!
//! All errors that can occur while generating or walking the block hierarchy.

use thiserror::Error;

use crate::memory::BlockId;

/// Errors that can occur in the block hierarchy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HierarchyError {
    /// A null or stale block handle was passed to an operation.
    ///
    /// Always a caller bug. Never retried.
    #[error("invalid block handle: {0}")]
    InvalidArgument(BlockId),

    /// The registry could not take any more blocks.
    ///
    /// Fatal to the operation in progress, nothing was attached.
    #[error("block allocation failed: requested {requested} blocks with {registered} already registered")]
    AllocationFailure {
        /// Number of blocks the operation needed.
        requested: usize,
        /// Number of blocks registered when the request failed.
        registered: usize,
    },

    /// An internal invariant was broken (step stack underflow, partial child set).
    #[error("internal invariant violated: {0}")]
    InternalInvariantViolation(String),
}

impl HierarchyError {
    /// Builds an `InternalInvariantViolation` from a static description.
    #[must_use]
    pub fn invariant(what: &str) -> Self {
        Self::InternalInvariantViolation(what.to_string())
    }
}

/// Result type for hierarchy operations.
pub type HierarchyResult<T> = Result<T, HierarchyError>;

/// Errors raised while loading a [`crate::config::HierarchyConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config parsed but holds values the hierarchy cannot use.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
