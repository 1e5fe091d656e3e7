//! # Map Configuration
//!
//! One TOML file, one section per layer:
//!
//! ```toml
//! [hierarchy]
//! default_elevation = 0.0
//! max_blocks = 20000
//!
//! [fill]
//! seed = 42
//! low = -100.0
//! high = 100.0
//! smoothing_passes = 2
//! ```
//!
//! Without a `[fill]` section, blocks keep the default elevation.

use std::path::Path;

use serde::{Deserialize, Serialize};

use fractal_core::{ConfigError, HierarchyConfig};
use fractal_procedural::RandomFillConfig;

/// Settings for a [`crate::MapSession`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapConfig {
    /// Structure and registry settings.
    pub hierarchy: HierarchyConfig,
    /// Elevation content, if any.
    pub fill: Option<RandomFillConfig>,
}

impl MapConfig {
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

    /// Validates every section.
    ///
    /// # Errors
    ///
    /// The first `Invalid` found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.hierarchy.validate()?;
        if let Some(fill) = &self.fill {
            fill.validate()?;
        }
        Ok(())
    }
}
