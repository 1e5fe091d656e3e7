//! # Blocks
//!
//! The hierarchy entity, its leaf data and the 3x3 child layout.

mod elevation;
mod layout;
mod node;

pub use elevation::{
    ElevationGrid, DEFAULT_ELEVATION, ELEVATION_CELLS, ELEVATION_HEIGHT, ELEVATION_WIDTH, REGION_SIDE,
};
pub use layout::{
    ChildPosition, Direction, CHILD_COUNT, LINEAR_SCALE_FACTOR, NEIGHBOR_COUNT, ORIGIN_LEVEL,
};
pub use node::BlockNode;
