//! # Block Node
//!
//! The hierarchy entity. Structural links are plain handles into the
//! registry; only the child set is owned by the block in the sense of
//! invariants (all nine exist or none do), and the registry owns the memory.

use crate::block::elevation::ElevationGrid;
use crate::block::layout::{ChildPosition, Direction, CHILD_COUNT, NEIGHBOR_COUNT};
use crate::memory::BlockId;

/// A block of the fractal map.
#[derive(Clone, Debug)]
pub struct BlockNode {
    /// Signed zoom depth. Origin is 0, children are one below their parent.
    level: i64,
    /// Where the parent sees this block in its 3x3 grid.
    parent_view: ChildPosition,
    /// Up link, used for traversal only.
    parent: Option<BlockId>,
    /// All nine children or none.
    children: Option<[BlockId; CHILD_COUNT]>,
    /// Same-level neighbour cache, indexed by [`Direction::index`].
    neighbors: [Option<BlockId>; NEIGHBOR_COUNT],
    /// Leaf data.
    elevation: ElevationGrid,
}

impl BlockNode {
    /// A block with no parent yet. Sits at the center of whatever parent
    /// it will eventually get.
    pub(crate) fn detached(level: i64, elevation: ElevationGrid) -> Self {
        Self {
            level,
            parent_view: ChildPosition::CenterCenter,
            parent: None,
            children: None,
            neighbors: [None; NEIGHBOR_COUNT],
            elevation,
        }
    }

    /// A freshly generated child of `parent`.
    pub(crate) fn child_of(
        parent: BlockId,
        level: i64,
        position: ChildPosition,
        elevation: ElevationGrid,
    ) -> Self {
        Self {
            level,
            parent_view: position,
            parent: Some(parent),
            children: None,
            neighbors: [None; NEIGHBOR_COUNT],
            elevation,
        }
    }

    /// Returns the zoom level.
    #[inline]
    #[must_use]
    pub const fn level(&self) -> i64 {
        self.level
    }

    /// Returns this block's position in its parent's grid.
    ///
    /// Meaningless until the parent exists.
    #[inline]
    #[must_use]
    pub const fn parent_view(&self) -> ChildPosition {
        self.parent_view
    }

    /// Returns the parent, if generated.
    #[inline]
    #[must_use]
    pub const fn parent(&self) -> Option<BlockId> {
        self.parent
    }

    /// Returns the full child set, if generated.
    #[inline]
    #[must_use]
    pub const fn children(&self) -> Option<&[BlockId; CHILD_COUNT]> {
        self.children.as_ref()
    }

    /// Returns the child at `position`, if the child set exists.
    #[inline]
    #[must_use]
    pub fn child(&self, position: ChildPosition) -> Option<BlockId> {
        self.children.map(|children| children[position.index()])
    }

    /// Returns true once the child set has been generated.
    #[inline]
    #[must_use]
    pub const fn has_children(&self) -> bool {
        self.children.is_some()
    }

    /// Returns the cached neighbour in `direction`.
    ///
    /// `None` does not mean the neighbour doesn't exist, only that it
    /// hasn't been linked yet.
    #[inline]
    #[must_use]
    pub const fn neighbor(&self, direction: Direction) -> Option<BlockId> {
        self.neighbors[direction.index()]
    }

    /// Returns the whole neighbour cache.
    #[inline]
    #[must_use]
    pub const fn neighbors(&self) -> &[Option<BlockId>; NEIGHBOR_COUNT] {
        &self.neighbors
    }

    /// Returns the elevation data.
    #[inline]
    #[must_use]
    pub const fn elevation(&self) -> &ElevationGrid {
        &self.elevation
    }

    /// Returns the elevation data for content generators to write.
    #[inline]
    pub fn elevation_mut(&mut self) -> &mut ElevationGrid {
        &mut self.elevation
    }

    pub(crate) fn attach_to(&mut self, parent: BlockId, position: ChildPosition) {
        self.parent = Some(parent);
        self.parent_view = position;
    }

    pub(crate) fn set_children(&mut self, children: [BlockId; CHILD_COUNT]) {
        debug_assert!(self.children.is_none(), "child set generated twice");
        self.children = Some(children);
    }

    pub(crate) fn set_neighbor(&mut self, direction: Direction, neighbor: BlockId) {
        self.neighbors[direction.index()] = Some(neighbor);
    }
}
