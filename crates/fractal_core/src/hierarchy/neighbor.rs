//! # Neighbour Resolution
//!
//! Finds the same-level block adjacent to a block, generating ancestors and
//! descendants as needed.
//!
//! ## Algorithm
//!
//! 1. **Ascend**: climb parents, recording each parent view, until the
//!    recorded view is not on the edge facing the requested direction.
//!    That ancestor's grid contains both the start block and the target.
//! 2. **Cross**: at that ancestor, take the sibling one step over from the
//!    last recorded view.
//! 3. **Descend**: replay the remaining views in reverse, each mirrored
//!    across the axis of travel, generating child sets on the way down.
//!
//! The climb always ends: every generated ancestor sits at the center of
//! its own parent, and the center is on no edge.

use tracing::trace;

use crate::block::Direction;
use crate::error::{HierarchyError, HierarchyResult};
use crate::hierarchy::{HierarchyBuilder, StepStack};
use crate::memory::BlockId;

/// Same-level neighbour lookup over a [`HierarchyBuilder`].
///
/// # Example
///
/// ```rust,ignore
/// let mut resolver = NeighborResolver::new(&mut builder);
/// let right = resolver.resolve(origin, Direction::Right)?;
/// let back = resolver.resolve(right, Direction::Left)?;
/// assert_eq!(back, origin);
/// ```
#[derive(Debug)]
pub struct NeighborResolver<'a> {
    builder: &'a mut HierarchyBuilder,
    steps: StepStack,
}

impl<'a> NeighborResolver<'a> {
    /// Creates a resolver borrowing the builder for its lifetime.
    #[must_use]
    pub fn new(builder: &'a mut HierarchyBuilder) -> Self {
        Self {
            builder,
            steps: StepStack::new(),
        }
    }

    /// Returns the neighbour of `id` in `direction`.
    ///
    /// A cached link is returned as is. Otherwise the neighbour is located,
    /// and the link is recorded on both blocks.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` on a null or stale handle
    /// - `AllocationFailure` if a required ancestor or child set does not fit
    /// - `InternalInvariantViolation` if the walk finds a broken hierarchy
    pub fn resolve(&mut self, id: BlockId, direction: Direction) -> HierarchyResult<BlockId> {
        if let Some(cached) = self.builder.block(id)?.neighbor(direction) {
            return Ok(cached);
        }

        let neighbor = self.locate(id, direction)?;
        self.builder.link_neighbors(id, direction, neighbor)?;
        Ok(neighbor)
    }

    /// Walks the hierarchy to the neighbour of `id` in `direction` without
    /// consulting or filling the neighbour cache of `id`.
    ///
    /// Generation still happens: ancestors and child sets on the path are
    /// created if missing, and linked like any other new child set.
    ///
    /// # Errors
    ///
    /// As [`Self::resolve`].
    pub fn locate(&mut self, id: BlockId, direction: Direction) -> HierarchyResult<BlockId> {
        let level = self.builder.block(id)?.level();
        self.steps.clear();

        // Ascend
        let mut cursor = id;
        let turn = loop {
            let parent = self.builder.generate_parent(cursor)?;
            let view = self.builder.block(cursor)?.parent_view();
            self.steps.push(view);
            cursor = parent;
            if !view.is_on_edge(direction) {
                break view;
            }
        };
        let ascended = self.steps.depth();
        self.steps.pop()?;

        // Cross
        let across = turn.step(direction).ok_or_else(|| {
            HierarchyError::invariant("ascent stopped on an edge position")
        })?;
        cursor = self.builder.generate_children(cursor)?[across.index()];

        // Descend
        for _ in 1..ascended {
            let view = self.steps.pop()?;
            cursor = self.builder.generate_children(cursor)?[view.reflect(direction).index()];
        }

        debug_assert_eq!(
            self.builder.block(cursor).map(|node| node.level()).ok(),
            Some(level),
            "neighbour resolved on a different level"
        );
        trace!("Located {} neighbour of {}: {} ({} levels up)", direction, id, cursor, ascended);
        Ok(cursor)
    }
}
