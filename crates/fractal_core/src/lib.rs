//! # FRACTAL Core
//!
//! Infinite 3x3 block hierarchy for a zoomable elevation map:
//! - Every block splits into nine children, one level down
//! - Every block can grow a parent, one level up, centered on it
//! - Every block reaches its four same-level neighbours
//!
//! ## Architecture Rules
//!
//! 1. **One owner** - The registry owns every block, links are handles
//! 2. **All or none** - A block has nine children or zero
//! 3. **Lazy generation** - Blocks exist only once something asks for them
//!
//! ## Example
//!
//! ```rust,ignore
//! use fractal_core::{Direction, HierarchyBuilder, HierarchyConfig};
//!
//! let mut builder = HierarchyBuilder::new(&HierarchyConfig::default())?;
//! let origin = builder.create_origin()?;
//! let right = builder.resolve_neighbor(origin, Direction::Right)?;
//! builder.release_all();
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod block;
pub mod config;
pub mod error;
pub mod hierarchy;
pub mod memory;

pub use block::{
    BlockNode, ChildPosition, Direction, ElevationGrid, CHILD_COUNT, ELEVATION_HEIGHT,
    ELEVATION_WIDTH, LINEAR_SCALE_FACTOR, NEIGHBOR_COUNT, ORIGIN_LEVEL,
};
pub use config::HierarchyConfig;
pub use error::{ConfigError, HierarchyError, HierarchyResult};
pub use hierarchy::{HierarchyBuilder, NeighborResolver, StepStack};
pub use memory::{BlockId, BlockRegistry, ReleaseOutcome};
