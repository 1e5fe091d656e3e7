//! # Block Handles
//!
//! Blocks are addressed by lightweight handles consisting of:
//! - An index into the registry (creation order)
//! - The registry epoch the block was registered in

use std::fmt;

/// Handle to a block owned by a [`super::BlockRegistry`].
///
/// Handles are plain copies with no ownership. A handle stays valid until the
/// registry performs a `release_all`, which bumps the epoch and turns every
/// older handle stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BlockId {
    index: u32,
    epoch: u32,
}

impl BlockId {
    /// The absent handle.
    pub const NULL: Self = Self {
        index: u32::MAX,
        epoch: u32::MAX,
    };

    /// Creates a handle from its parts.
    #[inline]
    #[must_use]
    pub const fn new(index: u32, epoch: u32) -> Self {
        Self { index, epoch }
    }

    /// Returns the creation-order index of the block.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Returns the registry epoch this handle belongs to.
    #[inline]
    #[must_use]
    pub const fn epoch(self) -> u32 {
        self.epoch
    }

    /// Checks if this is the absent handle.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.index == u32::MAX && self.epoch == u32::MAX
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::NULL
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            f.write_str("#null")
        } else {
            write!(f, "#{}@{}", self.index, self.epoch)
        }
    }
}
