//! # Hierarchy
//!
//! Structural generation and same-level navigation.
//!
//! ## Design Philosophy
//!
//! Nothing exists until it is asked for:
//! - Zooming out generates a parent around the current block
//! - Zooming in generates the full child set
//! - Panning generates whatever the path to the neighbour needs

mod builder;
mod neighbor;
mod steps;

pub use builder::HierarchyBuilder;
pub use neighbor::NeighborResolver;
pub use steps::StepStack;
