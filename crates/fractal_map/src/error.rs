//! # Session Error Types

use thiserror::Error;

use fractal_core::{ConfigError, HierarchyError};

/// Errors that can occur while starting a [`crate::MapSession`].
#[derive(Error, Debug)]
pub enum SessionError {
    /// The map config holds values the session cannot use.
    #[error("unusable map config: {0}")]
    Config(#[from] ConfigError),

    /// The origin could not be generated or filled.
    #[error("failed to start at origin: {0}")]
    Hierarchy(#[from] HierarchyError),
}
