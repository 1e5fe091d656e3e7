//! # Random Fill
//!
//! Seeded elevation content for generated blocks.
//!
//! Each block draws from its own `ChaCha8` stream, seeded from the world
//! seed and the block's [`BlockAddress`]. Filling the same block twice, or
//! in another session with the same seed, gives identical grids.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use fractal_core::{BlockId, ConfigError, ElevationGrid, HierarchyBuilder, HierarchyResult};

use crate::address::BlockAddress;
use crate::seed::WorldSeed;

/// Settings for [`RandomFill`], the `[fill]` section of a map config.
///
/// ```toml
/// [fill]
/// seed = 42
/// low = -1.0
/// high = 1.0
/// smoothing_passes = 2
/// smoothing_factor = 0.5
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RandomFillConfig {
    /// World seed.
    pub seed: u64,
    /// One end of the elevation range.
    pub low: f32,
    /// Other end of the elevation range.
    pub high: f32,
    /// Smoothing passes run after the random draw.
    pub smoothing_passes: u32,
    /// Strength of each smoothing pass, clamped to `[0, 1]`.
    pub smoothing_factor: f32,
}

impl Default for RandomFillConfig {
    fn default() -> Self {
        Self {
            seed: WorldSeed::default().value(),
            low: -1.0,
            high: 1.0,
            smoothing_passes: 0,
            smoothing_factor: 0.5,
        }
    }
}

impl RandomFillConfig {
    /// Checks that the range can be sampled.
    ///
    /// # Errors
    ///
    /// `Invalid` if a bound or the smoothing factor is not finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.low.is_finite() || !self.high.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "fill range must be finite, got [{}, {}]",
                self.low, self.high
            )));
        }
        if !self.smoothing_factor.is_finite() {
            return Err(ConfigError::Invalid(
                "smoothing_factor must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// Uniform random elevation in a closed range.
#[derive(Clone, Debug)]
pub struct RandomFill {
    seed: WorldSeed,
    low: f32,
    high: f32,
    smoothing_passes: u32,
    smoothing_factor: f32,
}

impl RandomFill {
    /// Creates a filler. Reversed bounds are swapped.
    ///
    /// # Errors
    ///
    /// `Invalid` if the config fails [`RandomFillConfig::validate`].
    pub fn new(config: &RandomFillConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: &RandomFillConfig) -> Self {
        let (low, high) = if config.low <= config.high {
            (config.low, config.high)
        } else {
            (config.high, config.low)
        };
        Self {
            seed: WorldSeed::new(config.seed),
            low,
            high,
            smoothing_passes: config.smoothing_passes,
            smoothing_factor: config.smoothing_factor,
        }
    }

    /// Returns the normalized range.
    #[inline]
    #[must_use]
    pub const fn range(&self) -> (f32, f32) {
        (self.low, self.high)
    }

    /// Returns the world seed.
    #[inline]
    #[must_use]
    pub const fn seed(&self) -> WorldSeed {
        self.seed
    }

    /// Fills `grid` with the content of the block at `address`.
    pub fn fill_grid(&self, grid: &mut ElevationGrid, address: &BlockAddress) {
        let block_seed = self.seed.for_block(address.level(), address.path());
        let mut rng = ChaCha8Rng::seed_from_u64(block_seed.value());

        for cell in grid.as_mut_slice() {
            *cell = rng.gen_range(self.low..=self.high);
        }
        for _ in 0..self.smoothing_passes {
            grid.smooth(self.smoothing_factor);
        }
    }

    /// Fills the elevation of block `id`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` on a null or stale handle.
    pub fn apply(&self, builder: &mut HierarchyBuilder, id: BlockId) -> HierarchyResult<()> {
        let address = BlockAddress::of(builder, id)?;
        self.fill_grid(builder.elevation_mut(id)?, &address);
        trace!("Filled {} at {}", id, address);
        Ok(())
    }

    /// Fills every block in `ids`.
    ///
    /// # Errors
    ///
    /// Stops at the first invalid handle.
    pub fn apply_all(&self, builder: &mut HierarchyBuilder, ids: &[BlockId]) -> HierarchyResult<()> {
        ids.iter().try_for_each(|&id| self.apply(builder, id))
    }
}

impl Default for RandomFill {
    fn default() -> Self {
        Self::from_valid(&RandomFillConfig::default())
    }
}
