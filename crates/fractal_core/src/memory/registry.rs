//! # Block Registry
//!
//! The sole owner of every block ever generated.
//!
//! Blocks are appended in creation order into fixed-capacity chunks. A
//! chunk is reserved once at its full capacity and never grows past it, so
//! a registered block never moves. Blocks are not freed one at a time:
//! `release_all` drops everything at once, at shutdown.

use tracing::{debug, info, trace};

use crate::block::BlockNode;
use crate::error::{HierarchyError, HierarchyResult};
use crate::memory::BlockId;

/// Blocks per chunk unless configured otherwise.
pub const DEFAULT_CHUNK_CAPACITY: usize = 256;

/// What a `release_all` call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Blocks and their chunks were dropped.
    Released {
        /// Number of blocks dropped.
        blocks: usize,
        /// Number of chunks dropped.
        chunks: usize,
    },
    /// Nothing was registered. Informational, not an error.
    Empty,
}

/// Chunked, append-only arena of blocks.
///
/// # Thread Safety
///
/// Single writer. Every mutation of the hierarchy goes through one
/// `&mut` owner.
///
/// # Example
///
/// ```rust,ignore
/// let mut registry = BlockRegistry::new();
/// let id = registry.register(node)?;
/// assert!(registry.contains(id));
///
/// // Shutdown
/// registry.release_all();
/// ```
#[derive(Debug)]
pub struct BlockRegistry {
    /// Fixed-capacity chunks, filled front to back.
    chunks: Vec<Vec<BlockNode>>,
    /// Blocks per chunk.
    chunk_capacity: usize,
    /// Number of registered blocks.
    len: usize,
    /// Maximum number of blocks, if bounded.
    limit: Option<usize>,
    /// Bumped by every release so older handles go stale.
    epoch: u32,
}

impl BlockRegistry {
    /// Creates an unbounded registry with the default chunk capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_CHUNK_CAPACITY, None)
    }

    /// Creates a registry.
    ///
    /// # Arguments
    ///
    /// * `chunk_capacity` - Blocks per chunk
    /// * `limit` - Maximum number of blocks, `None` for unbounded
    ///
    /// # Panics
    ///
    /// Panics if `chunk_capacity` is zero.
    #[must_use]
    pub fn with_limits(chunk_capacity: usize, limit: Option<usize>) -> Self {
        assert!(chunk_capacity > 0, "Chunk capacity must be greater than zero");
        Self {
            chunks: Vec::new(),
            chunk_capacity,
            len: 0,
            limit,
            epoch: 0,
        }
    }

    /// Returns the number of registered blocks.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no block is registered.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of chunks currently held.
    #[inline]
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Returns the blocks-per-chunk capacity.
    #[inline]
    #[must_use]
    pub const fn chunk_capacity(&self) -> usize {
        self.chunk_capacity
    }

    /// Returns the block limit, if bounded.
    #[inline]
    #[must_use]
    pub const fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Returns the current epoch.
    #[inline]
    #[must_use]
    pub const fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Returns how many more blocks fit under the limit, if bounded.
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> Option<usize> {
        self.limit.map(|limit| limit.saturating_sub(self.len))
    }

    const fn allocation_failure(&self, requested: usize) -> HierarchyError {
        HierarchyError::AllocationFailure {
            requested,
            registered: self.len,
        }
    }

    /// Guarantees that the next `count` registrations succeed.
    ///
    /// Checks the limit and reserves any chunks those blocks would need.
    ///
    /// # Errors
    ///
    /// `AllocationFailure` if the limit would be exceeded or a chunk could not
    /// be allocated. Chunks reserved before the failure are kept.
    pub fn reserve(&mut self, count: usize) -> HierarchyResult<()> {
        let target = self
            .len
            .checked_add(count)
            .ok_or_else(|| self.allocation_failure(count))?;
        if target > u32::MAX as usize || self.limit.is_some_and(|limit| target > limit) {
            return Err(self.allocation_failure(count));
        }

        while self.chunks.len() * self.chunk_capacity < target {
            self.push_chunk(count)?;
        }
        Ok(())
    }

    fn push_chunk(&mut self, requested: usize) -> HierarchyResult<()> {
        let mut chunk = Vec::new();
        chunk
            .try_reserve_exact(self.chunk_capacity)
            .map_err(|_| self.allocation_failure(requested))?;
        self.chunks
            .try_reserve(1)
            .map_err(|_| self.allocation_failure(requested))?;
        self.chunks.push(chunk);
        trace!("Registry reserved chunk {}", self.chunks.len());
        Ok(())
    }

    /// Records a block in creation order.
    ///
    /// This is **O(1)** amortized and never moves an already registered block.
    ///
    /// # Errors
    ///
    /// `AllocationFailure` if the registry is full.
    pub fn register(&mut self, node: BlockNode) -> HierarchyResult<BlockId> {
        self.reserve(1)?;
        let index = u32::try_from(self.len).map_err(|_| self.allocation_failure(1))?;
        let chunk_index = self.len / self.chunk_capacity;
        let Some(chunk) = self.chunks.get_mut(chunk_index) else {
            return Err(HierarchyError::invariant("registry chunk missing after reserve"));
        };
        debug_assert!(chunk.len() < chunk.capacity(), "registry chunk would reallocate");
        chunk.push(node);
        self.len += 1;
        Ok(BlockId::new(index, self.epoch))
    }

    fn slot(&self, id: BlockId) -> Option<(usize, usize)> {
        if id.is_null() || id.epoch() != self.epoch {
            return None;
        }
        let index = usize::try_from(id.index()).ok()?;
        (index < self.len).then(|| (index / self.chunk_capacity, index % self.chunk_capacity))
    }

    /// Returns true if `id` refers to a live block of this registry.
    #[inline]
    #[must_use]
    pub fn contains(&self, id: BlockId) -> bool {
        self.slot(id).is_some()
    }

    /// Gets a block.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `id` is null, stale, or was never issued.
    pub fn get(&self, id: BlockId) -> HierarchyResult<&BlockNode> {
        self.slot(id)
            .and_then(|(chunk, offset)| self.chunks.get(chunk)?.get(offset))
            .ok_or(HierarchyError::InvalidArgument(id))
    }

    /// Gets a block mutably.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `id` is null, stale, or was never issued.
    pub fn get_mut(&mut self, id: BlockId) -> HierarchyResult<&mut BlockNode> {
        let Some((chunk, offset)) = self.slot(id) else {
            return Err(HierarchyError::InvalidArgument(id));
        };
        self.chunks
            .get_mut(chunk)
            .and_then(|chunk| chunk.get_mut(offset))
            .ok_or(HierarchyError::InvalidArgument(id))
    }

    /// Iterates over all blocks in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (BlockId, &BlockNode)> + '_ {
        let epoch = self.epoch;
        (0u32..)
            .zip(self.chunks.iter().flatten())
            .map(move |(index, node)| (BlockId::new(index, epoch), node))
    }

    /// Returns handles for the blocks registered at or after `start`, in
    /// creation order, without touching the blocks themselves.
    pub fn ids_from(&self, start: usize) -> impl Iterator<Item = BlockId> {
        let epoch = self.epoch;
        (start..self.len).map_while(move |index| {
            u32::try_from(index)
                .ok()
                .map(|index| BlockId::new(index, epoch))
        })
    }

    /// Frees every block and every chunk, then resets to the empty state.
    ///
    /// Every previously issued handle becomes stale.
    pub fn release_all(&mut self) -> ReleaseOutcome {
        if self.len == 0 {
            self.chunks = Vec::new();
            debug!("Registry release requested with nothing registered");
            return ReleaseOutcome::Empty;
        }

        let blocks = self.len;
        let chunks = self.chunks.len();
        self.chunks = Vec::new();
        self.len = 0;
        self.epoch = self.epoch.wrapping_add(1);

        info!("Registry released {} blocks across {} chunks", blocks, chunks);
        ReleaseOutcome::Released { blocks, chunks }
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::ElevationGrid;

    fn node(level: i64) -> BlockNode {
        BlockNode::detached(level, ElevationGrid::default())
    }

    #[test]
    fn test_register_in_creation_order() {
        let mut registry = BlockRegistry::with_limits(2, None);
        let ids: Vec<BlockId> = (0..5).map(|level| registry.register(node(level)).unwrap()).collect();

        assert_eq!(registry.len(), 5);
        assert_eq!(registry.chunk_count(), 3);
        for (expected, (id, block)) in registry.iter().enumerate() {
            assert_eq!(id, ids[expected]);
            assert_eq!(block.level(), expected as i64);
        }
    }

    #[test]
    fn test_chunks_never_reallocate() {
        let mut registry = BlockRegistry::with_limits(4, None);
        let first = registry.register(node(0)).unwrap();
        let address: *const BlockNode = registry.get(first).unwrap();

        for level in 1..40 {
            registry.register(node(level)).unwrap();
        }

        let moved: *const BlockNode = registry.get(first).unwrap();
        assert_eq!(moved, address);
    }

    #[test]
    fn test_limit_is_enforced() {
        let mut registry = BlockRegistry::with_limits(8, Some(2));
        registry.register(node(0)).unwrap();
        registry.register(node(1)).unwrap();

        let err = registry.register(node(2)).unwrap_err();
        assert_eq!(err, HierarchyError::AllocationFailure { requested: 1, registered: 2 });
        assert_eq!(registry.remaining(), Some(0));
    }

    #[test]
    fn test_reserve_is_all_or_nothing_against_limit() {
        let mut registry = BlockRegistry::with_limits(8, Some(10));
        registry.register(node(0)).unwrap();

        assert!(registry.reserve(9).is_ok());
        assert!(registry.reserve(10).is_err());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_null_and_unknown_handles_are_invalid() {
        let mut registry = BlockRegistry::new();
        registry.register(node(0)).unwrap();

        assert_eq!(
            registry.get(BlockId::NULL).unwrap_err(),
            HierarchyError::InvalidArgument(BlockId::NULL)
        );
        assert!(registry.get(BlockId::new(1, 0)).is_err());
        assert!(!registry.contains(BlockId::new(7, 0)));
    }

    #[test]
    fn test_release_all_frees_and_invalidates() {
        let mut registry = BlockRegistry::with_limits(2, None);
        let id = registry.register(node(0)).unwrap();
        registry.register(node(1)).unwrap();
        registry.register(node(2)).unwrap();

        assert_eq!(registry.release_all(), ReleaseOutcome::Released { blocks: 3, chunks: 2 });
        assert!(registry.is_empty());
        assert_eq!(registry.chunk_count(), 0);
        assert!(!registry.contains(id));
        assert!(registry.get(id).is_err());

        // A fresh registration reuses index 0 under the new epoch.
        let fresh = registry.register(node(5)).unwrap();
        assert_eq!(fresh.index(), 0);
        assert_ne!(fresh, id);
    }

    #[test]
    fn test_ids_from_matches_creation_order() {
        let mut registry = BlockRegistry::with_limits(2, None);
        for level in 0..5 {
            registry.register(node(level)).unwrap();
        }

        let tail: Vec<BlockId> = registry.ids_from(2).collect();
        let expected: Vec<BlockId> = registry.iter().skip(2).map(|(id, _)| id).collect();
        assert_eq!(tail, expected);
        assert!(tail.iter().all(|&id| registry.contains(id)));
        assert_eq!(registry.ids_from(5).count(), 0);
        assert_eq!(registry.ids_from(9).count(), 0);

        registry.release_all();
        let fresh = registry.register(node(0)).unwrap();
        assert_eq!(registry.ids_from(0).collect::<Vec<_>>(), vec![fresh]);
    }

    #[test]
    fn test_release_all_on_empty() {
        let mut registry = BlockRegistry::new();
        assert_eq!(registry.release_all(), ReleaseOutcome::Empty);
        assert_eq!(registry.release_all(), ReleaseOutcome::Empty);
        assert_eq!(registry.epoch(), 0);
    }
}
