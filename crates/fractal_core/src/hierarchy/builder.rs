//! # Hierarchy Builder
//!
//! Creates the origin and generates child sets and parents.
//!
//! ## Generation Protocol
//!
//! 1. **All or none**: a block has all nine children or none of them. The
//!    registry space and the nine elevation grids are secured before any
//!    child is attached, so a failed generation leaves nothing behind.
//! 2. **Concentric parents**: a new parent is always generated around its
//!    initiating child, which takes the center slot. Starting from the
//!    origin, every ancestor is centered on the origin.
//! 3. **Forced siblings**: generating a parent generates its full child
//!    set, i.e. the eight siblings of the initiating child.
//!
//! Neighbours of new children are linked right away when no generation is
//! needed to find them (siblings, and blocks inside an already expanded
//! neighbouring parent). Everything else is left to [`NeighborResolver`].

use tracing::{debug, trace, warn};

use crate::block::{
    BlockNode, ChildPosition, Direction, ElevationGrid, CHILD_COUNT, DEFAULT_ELEVATION, ORIGIN_LEVEL,
};
use crate::config::HierarchyConfig;
use crate::error::{ConfigError, HierarchyError, HierarchyResult};
use crate::hierarchy::NeighborResolver;
use crate::memory::{BlockId, BlockRegistry, ReleaseOutcome};

/// Owns the registry and drives every structural change of the hierarchy.
///
/// # Example
///
/// ```rust,ignore
/// let mut builder = HierarchyBuilder::with_defaults();
/// let origin = builder.create_origin()?;
///
/// // Zoom out twice
/// let parent = builder.generate_parent(origin)?;
/// let grandparent = builder.generate_parent(parent)?;
///
/// // Pan up
/// let above = builder.resolve_neighbor(origin, Direction::Up)?;
/// ```
#[derive(Debug)]
pub struct HierarchyBuilder {
    /// Owner of every block.
    registry: BlockRegistry,
    /// Fill value for new elevation grids.
    default_elevation: f32,
}

impl HierarchyBuilder {
    /// Creates a builder with an empty registry.
    ///
    /// # Errors
    ///
    /// `Invalid` if the config fails [`HierarchyConfig::validate`].
    pub fn new(config: &HierarchyConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            registry: BlockRegistry::with_limits(config.registry_chunk_capacity, config.max_blocks),
            default_elevation: config.default_elevation,
        })
    }

    /// Creates a builder with the default config.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            registry: BlockRegistry::new(),
            default_elevation: DEFAULT_ELEVATION,
        }
    }

    /// Returns the registry (read-only).
    #[inline]
    #[must_use]
    pub const fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    /// Returns the fill value for new elevation grids.
    #[inline]
    #[must_use]
    pub const fn default_elevation(&self) -> f32 {
        self.default_elevation
    }

    /// Gets a block.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` on a null or stale handle.
    #[inline]
    pub fn block(&self, id: BlockId) -> HierarchyResult<&BlockNode> {
        self.registry.get(id)
    }

    /// Gets a block's elevation for writing. Structural fields stay private.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` on a null or stale handle.
    #[inline]
    pub fn elevation_mut(&mut self, id: BlockId) -> HierarchyResult<&mut ElevationGrid> {
        Ok(self.registry.get_mut(id)?.elevation_mut())
    }

    fn allocate_grids(&self, count: usize) -> HierarchyResult<Vec<ElevationGrid>> {
        let mut grids = Vec::with_capacity(count);
        for _ in 0..count {
            let Some(grid) = ElevationGrid::try_filled(self.default_elevation) else {
                warn!("Elevation grid allocation failed after {} of {}", grids.len(), count);
                return Err(HierarchyError::AllocationFailure {
                    requested: count,
                    registered: self.registry.len(),
                });
            };
            grids.push(grid);
        }
        Ok(grids)
    }

    /// Creates a new origin block: level 0, no links, centered.
    ///
    /// # Errors
    ///
    /// `AllocationFailure` if the registry is full.
    pub fn create_origin(&mut self) -> HierarchyResult<BlockId> {
        self.registry.reserve(1)?;
        let mut grids = self.allocate_grids(1)?;
        let elevation = grids
            .pop()
            .ok_or_else(|| HierarchyError::invariant("origin grid missing after allocation"))?;
        let origin = self.registry.register(BlockNode::detached(ORIGIN_LEVEL, elevation))?;
        debug!("Created origin {}", origin);
        Ok(origin)
    }

    /// Makes sure `id` has its full child set.
    ///
    /// Idempotent: an existing child set is returned as is.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` on a null or stale handle
    /// - `AllocationFailure` if the nine children do not fit; no child is
    ///   attached in that case
    pub fn generate_children(&mut self, id: BlockId) -> HierarchyResult<[BlockId; CHILD_COUNT]> {
        if let Some(children) = self.registry.get(id)?.children() {
            return Ok(*children);
        }

        if let Err(err) = self.registry.reserve(CHILD_COUNT) {
            warn!("Child set of {} rejected: {}", id, err);
            return Err(err);
        }
        let grids = self.allocate_grids(CHILD_COUNT)?;
        self.attach_children(id, None, grids)
    }

    /// Makes sure `id` has a parent, and that the parent has all nine children.
    ///
    /// A new parent is one level up, centered on `id`, and `id` becomes its
    /// center child. An existing parent is returned after re-verifying its
    /// child set.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` on a null or stale handle
    /// - `AllocationFailure` if the parent and its eight new children do not
    ///   fit; nothing is attached in that case
    pub fn generate_parent(&mut self, id: BlockId) -> HierarchyResult<BlockId> {
        let node = self.registry.get(id)?;
        if let Some(parent) = node.parent() {
            self.generate_children(parent)?;
            return Ok(parent);
        }

        let level = node
            .level()
            .checked_add(1)
            .ok_or_else(|| HierarchyError::invariant("level overflow above the top ancestor"))?;

        // The parent plus eight new siblings.
        if let Err(err) = self.registry.reserve(CHILD_COUNT) {
            warn!("Parent of {} rejected: {}", id, err);
            return Err(err);
        }
        let mut grids = self.allocate_grids(CHILD_COUNT)?;
        let elevation = grids
            .pop()
            .ok_or_else(|| HierarchyError::invariant("parent grid missing after allocation"))?;

        let parent = self.registry.register(BlockNode::detached(level, elevation))?;
        self.attach_children(parent, Some(id), grids)?;
        debug!("Generated parent {} of {} at level {}", parent, id, level);
        Ok(parent)
    }

    /// Registers the child set of `parent` and links it in.
    ///
    /// `adopted` is an existing parentless block taking the center slot.
    /// `grids` must hold one grid per new child.
    fn attach_children(
        &mut self,
        parent: BlockId,
        adopted: Option<BlockId>,
        grids: Vec<ElevationGrid>,
    ) -> HierarchyResult<[BlockId; CHILD_COUNT]> {
        let level = self
            .registry
            .get(parent)?
            .level()
            .checked_sub(1)
            .ok_or_else(|| HierarchyError::invariant("level underflow below the deepest child"))?;

        let mut grids = grids.into_iter();
        let mut children = [BlockId::NULL; CHILD_COUNT];
        for position in ChildPosition::ALL {
            children[position.index()] = match adopted {
                Some(existing) if position == ChildPosition::CenterCenter => existing,
                _ => {
                    let elevation = grids.next().ok_or_else(|| {
                        HierarchyError::invariant("child set generated with too few elevation grids")
                    })?;
                    self.registry
                        .register(BlockNode::child_of(parent, level, position, elevation))?
                }
            };
        }

        // Commit: nothing below can fail for lack of space.
        if let Some(existing) = adopted {
            let node = self.registry.get_mut(existing)?;
            debug_assert_eq!(node.level(), level, "adopted child on the wrong level");
            node.attach_to(parent, ChildPosition::CenterCenter);
        }
        self.registry.get_mut(parent)?.set_children(children);
        self.link_child_neighbors(parent, &children)?;

        debug!("Generated child set of {} at level {}", parent, level);
        Ok(children)
    }

    /// Links every neighbour of a new child set that is already materialized.
    fn link_child_neighbors(
        &mut self,
        parent: BlockId,
        children: &[BlockId; CHILD_COUNT],
    ) -> HierarchyResult<()> {
        let parent_neighbors = *self.registry.get(parent)?.neighbors();

        for position in ChildPosition::ALL {
            let child = children[position.index()];
            for direction in Direction::ALL {
                let target = match position.step(direction) {
                    Some(sibling) => Some(children[sibling.index()]),
                    None => match parent_neighbors[direction.index()] {
                        Some(across) => self.registry.get(across)?.child(position.reflect(direction)),
                        None => None,
                    },
                };
                if let Some(target) = target {
                    self.link_neighbors(child, direction, target)?;
                }
            }
        }
        Ok(())
    }

    /// Records `to` as the `direction` neighbour of `from`, and `from` as the
    /// opposite neighbour of `to`.
    pub(crate) fn link_neighbors(
        &mut self,
        from: BlockId,
        direction: Direction,
        to: BlockId,
    ) -> HierarchyResult<()> {
        debug_assert_eq!(
            self.registry.get(from).map(BlockNode::level),
            self.registry.get(to).map(BlockNode::level),
            "neighbours on different levels"
        );
        self.registry.get_mut(to)?.set_neighbor(direction.opposite(), from);
        self.registry.get_mut(from)?.set_neighbor(direction, to);
        trace!("Linked {} -{}-> {}", from, direction, to);
        Ok(())
    }

    /// Returns the same-level block next to `id` in `direction`, generating
    /// whatever ancestors and descendants the walk needs.
    ///
    /// # Errors
    ///
    /// See [`NeighborResolver::resolve`].
    pub fn resolve_neighbor(&mut self, id: BlockId, direction: Direction) -> HierarchyResult<BlockId> {
        NeighborResolver::new(self).resolve(id, direction)
    }

    /// Frees every block. Call once, at shutdown.
    pub fn release_all(&mut self) -> ReleaseOutcome {
        self.registry.release_all()
    }
}

impl Default for HierarchyBuilder {
    fn default() -> Self {
        Self::with_defaults()
    }
}
