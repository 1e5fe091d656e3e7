//! # Memory Management
//!
//! Block ownership for the whole hierarchy.
//!
//! ## Design Philosophy
//!
//! The registry is the single owner of every block:
//! - Graph links are plain handles, never ownership
//! - Blocks never move once registered
//! - Teardown is one bulk release at shutdown

mod handle;
mod registry;

pub use handle::BlockId;
pub use registry::{BlockRegistry, ReleaseOutcome, DEFAULT_CHUNK_CAPACITY};
