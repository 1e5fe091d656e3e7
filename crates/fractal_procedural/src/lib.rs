//! # FRACTAL Procedural Generation
//!
//! Deterministic elevation content for the block hierarchy.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed and same block always produce the same grid
//! 2. **Stable names**: A block's address does not change when the map zooms out
//! 3. **Content only**: Fillers write elevation, never structure
//!
//! ## Example
//!
//! ```rust,ignore
//! use fractal_core::HierarchyBuilder;
//! use fractal_procedural::{RandomFill, RandomFillConfig};
//!
//! let mut builder = HierarchyBuilder::with_defaults();
//! let origin = builder.create_origin()?;
//!
//! let fill = RandomFill::new(&RandomFillConfig::default())?;
//! fill.apply(&mut builder, origin)?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod address;
pub mod fill;
pub mod seed;

pub use address::BlockAddress;
pub use fill::{RandomFill, RandomFillConfig};
pub use seed::WorldSeed;
