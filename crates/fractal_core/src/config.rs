//! # Hierarchy Configuration
//!
//! Loaded once at startup from TOML:
//!
//! ```toml
//! default_elevation = 0.0
//! registry_chunk_capacity = 256
//! max_blocks = 20000
//! ```
//!
//! Every field is optional. `max_blocks` absent means unbounded.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::block::DEFAULT_ELEVATION;
use crate::error::ConfigError;
use crate::memory::DEFAULT_CHUNK_CAPACITY;

/// Settings for a [`crate::HierarchyBuilder`] and its registry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HierarchyConfig {
    /// Fill value for every new elevation grid.
    pub default_elevation: f32,
    /// Blocks per registry chunk.
    pub registry_chunk_capacity: usize,
    /// Upper bound on registered blocks. Generation past it fails with
    /// `AllocationFailure`.
    pub max_blocks: Option<usize>,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            default_elevation: DEFAULT_ELEVATION,
            registry_chunk_capacity: DEFAULT_CHUNK_CAPACITY,
            max_blocks: None,
        }
    }
}

impl HierarchyConfig {
    /// Parses and validates a config from TOML text.
    ///
    /// # Errors
    ///
    /// `Parse` on malformed TOML or unknown fields, `Invalid` on unusable values.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a config file.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be read, otherwise as [`Self::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Checks that the values can drive a hierarchy.
    ///
    /// # Errors
    ///
    /// `Invalid` if the chunk capacity is zero, the block limit cannot hold
    /// the origin, or the default elevation is not finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.registry_chunk_capacity == 0 {
            return Err(ConfigError::Invalid(
                "registry_chunk_capacity must be greater than zero".to_string(),
            ));
        }
        if self.max_blocks == Some(0) {
            return Err(ConfigError::Invalid(
                "max_blocks must leave room for the origin".to_string(),
            ));
        }
        if !self.default_elevation.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "default_elevation must be finite, got {}",
                self.default_elevation
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = HierarchyConfig::from_toml_str("").unwrap();
        assert_eq!(config, HierarchyConfig::default());
    }

    #[test]
    fn test_full_toml() {
        let config = HierarchyConfig::from_toml_str(
            "default_elevation = -2.5\nregistry_chunk_capacity = 64\nmax_blocks = 1000\n",
        )
        .unwrap();
        assert_eq!(config.default_elevation, -2.5);
        assert_eq!(config.registry_chunk_capacity, 64);
        assert_eq!(config.max_blocks, Some(1000));
    }

    #[test]
    fn test_rejects_unknown_field() {
        let err = HierarchyConfig::from_toml_str("chunk_size = 4").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_zero_chunk_capacity() {
        let err = HierarchyConfig::from_toml_str("registry_chunk_capacity = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("fractal_core_missing_config.toml");
        std::fs::remove_file(&path).ok();
        let err = HierarchyConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
