//! # Block Address
//!
//! A name for a block that survives zooming out.
//!
//! The path from the topmost ancestor down to a block changes every time a
//! new ancestor is generated, but only by a leading `CenterCenter`: new
//! ancestors are always centered on the old top. Dropping the leading run of
//! `CenterCenter` positions gives a path that never changes.

use std::fmt;

use fractal_core::{BlockId, ChildPosition, HierarchyBuilder, HierarchyResult};

/// Level plus anchored child path of a block.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BlockAddress {
    level: i64,
    path: Vec<ChildPosition>,
}

impl BlockAddress {
    /// Computes the address of `id` from its current ancestor chain.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` on a null or stale handle.
    pub fn of(builder: &HierarchyBuilder, id: BlockId) -> HierarchyResult<Self> {
        let node = builder.block(id)?;
        let level = node.level();

        let mut path = Vec::new();
        let mut current = node;
        while let Some(parent) = current.parent() {
            path.push(current.parent_view());
            current = builder.block(parent)?;
        }

        // `path` is bottom-up here, so the anchor run sits at the end.
        while path.last() == Some(&ChildPosition::CenterCenter) {
            path.pop();
        }
        path.reverse();

        Ok(Self { level, path })
    }

    /// Returns the zoom level.
    #[inline]
    #[must_use]
    pub const fn level(&self) -> i64 {
        self.level
    }

    /// Returns the child positions, top-down.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &[ChildPosition] {
        &self.path
    }

    /// Returns true for blocks on the concentric chain through the origin.
    #[inline]
    #[must_use]
    pub fn is_anchor(&self) -> bool {
        self.path.is_empty()
    }
}

impl fmt::Display for BlockAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}:", self.level)?;
        if self.path.is_empty() {
            return f.write_str("*");
        }
        for position in &self.path {
            write!(f, "{}", position.index())?;
        }
        Ok(())
    }
}
