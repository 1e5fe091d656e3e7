//! # Map Session
//!
//! The viewer's side of the hierarchy: one focus block, moved by zooming
//! and panning. Every block generated on the way gets its elevation filled
//! before the move returns.

use tracing::{debug, info, warn};

use fractal_core::{
    BlockId, BlockNode, ChildPosition, Direction, HierarchyBuilder, HierarchyResult,
    ReleaseOutcome,
};
use fractal_procedural::RandomFill;

use crate::config::MapConfig;
use crate::error::SessionError;

/// Registry figures for logging and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionStats {
    /// Registered blocks.
    pub blocks: usize,
    /// Registry chunks held.
    pub chunks: usize,
    /// Level of the focus block.
    pub focus_level: i64,
    /// Level of the topmost ancestor generated so far.
    pub top_level: i64,
}

/// A zoomable, pannable view over an infinite map.
///
/// # Example
///
/// ```rust,ignore
/// let mut session = MapSession::new(&MapConfig::default())?;
/// session.zoom_out()?;
/// session.pan(Direction::Left)?;
/// session.zoom_in(ChildPosition::TopRight)?;
/// let grid = session.focus_node()?.elevation();
/// session.shutdown();
/// ```
#[derive(Debug)]
pub struct MapSession {
    builder: HierarchyBuilder,
    fill: Option<RandomFill>,
    origin: BlockId,
    focus: BlockId,
}

impl MapSession {
    /// Starts a session focused on a fresh origin.
    ///
    /// # Errors
    ///
    /// `Config` if either section fails validation, `Hierarchy` if the
    /// origin does not fit.
    pub fn new(config: &MapConfig) -> Result<Self, SessionError> {
        let mut builder = HierarchyBuilder::new(&config.hierarchy)?;
        let fill = config.fill.as_ref().map(RandomFill::new).transpose()?;

        let origin = builder.create_origin()?;
        if let Some(fill) = &fill {
            fill.apply(&mut builder, origin)?;
        }
        info!("Map session started at origin {}", origin);

        Ok(Self {
            builder,
            fill,
            origin,
            focus: origin,
        })
    }

    /// Returns the block the session started from.
    #[inline]
    #[must_use]
    pub const fn origin(&self) -> BlockId {
        self.origin
    }

    /// Returns the focus block.
    #[inline]
    #[must_use]
    pub const fn focus(&self) -> BlockId {
        self.focus
    }

    /// Returns the underlying builder (read-only).
    #[inline]
    #[must_use]
    pub const fn builder(&self) -> &HierarchyBuilder {
        &self.builder
    }

    /// Returns the focus block's node.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` after [`Self::shutdown`].
    pub fn focus_node(&self) -> HierarchyResult<&BlockNode> {
        self.builder.block(self.focus)
    }

    /// Moves the focus to its parent.
    ///
    /// # Errors
    ///
    /// As [`HierarchyBuilder::generate_parent`]. The focus does not move on error.
    pub fn zoom_out(&mut self) -> HierarchyResult<BlockId> {
        let before = self.builder.registry().len();
        let parent = self.builder.generate_parent(self.focus)?;
        self.fill_new_blocks(before)?;
        debug!("Zoomed out {} -> {}", self.focus, parent);
        self.focus = parent;
        Ok(parent)
    }

    /// Moves the focus to one of its children.
    ///
    /// # Errors
    ///
    /// As [`HierarchyBuilder::generate_children`]. The focus does not move on error.
    pub fn zoom_in(&mut self, position: ChildPosition) -> HierarchyResult<BlockId> {
        let before = self.builder.registry().len();
        let child = self.builder.generate_children(self.focus)?[position.index()];
        self.fill_new_blocks(before)?;
        debug!("Zoomed in {} -> {} ({:?})", self.focus, child, position);
        self.focus = child;
        Ok(child)
    }

    /// Moves the focus to its neighbour in `direction`.
    ///
    /// # Errors
    ///
    /// As [`HierarchyBuilder::resolve_neighbor`]. The focus does not move on error.
    pub fn pan(&mut self, direction: Direction) -> HierarchyResult<BlockId> {
        let before = self.builder.registry().len();
        let neighbor = self.builder.resolve_neighbor(self.focus, direction)?;
        self.fill_new_blocks(before)?;
        debug!("Panned {} {} -> {}", direction, self.focus, neighbor);
        self.focus = neighbor;
        Ok(neighbor)
    }

    /// Fills every block registered since `before`, in creation order.
    fn fill_new_blocks(&mut self, before: usize) -> HierarchyResult<()> {
        let Some(fill) = &self.fill else {
            return Ok(());
        };
        let fresh: Vec<BlockId> = self.builder.registry().ids_from(before).collect();
        fill.apply_all(&mut self.builder, &fresh)
    }

    /// Returns current registry figures.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` after [`Self::shutdown`].
    pub fn stats(&self) -> HierarchyResult<SessionStats> {
        let mut top = self.builder.block(self.origin)?;
        while let Some(parent) = top.parent() {
            top = self.builder.block(parent)?;
        }
        Ok(SessionStats {
            blocks: self.builder.registry().len(),
            chunks: self.builder.registry().chunk_count(),
            focus_level: self.focus_node()?.level(),
            top_level: top.level(),
        })
    }

    /// Releases every block. Handles held by the caller go stale.
    pub fn shutdown(&mut self) -> ReleaseOutcome {
        let outcome = self.builder.release_all();
        match outcome {
            ReleaseOutcome::Released { blocks, chunks } => {
                info!("Map session released {} blocks in {} chunks", blocks, chunks);
            }
            ReleaseOutcome::Empty => warn!("Map session shut down with nothing to release"),
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fractal_procedural::RandomFillConfig;

    #[test]
    fn test_session_starts_on_origin() {
        let session = MapSession::new(&MapConfig::default()).unwrap();
        assert_eq!(session.focus(), session.origin());
        assert_eq!(session.focus_node().unwrap().level(), 0);
    }

    #[test]
    fn test_zoom_out_and_back_in() {
        let mut session = MapSession::new(&MapConfig::default()).unwrap();
        let origin = session.origin();

        session.zoom_out().unwrap();
        assert_eq!(session.focus_node().unwrap().level(), 1);

        assert_eq!(session.zoom_in(ChildPosition::CenterCenter).unwrap(), origin);
    }

    #[test]
    fn test_new_rejects_invalid_sections() {
        let mut config = MapConfig::default();
        config.hierarchy.registry_chunk_capacity = 0;
        assert!(matches!(MapSession::new(&config), Err(SessionError::Config(_))));

        let config = MapConfig {
            fill: Some(RandomFillConfig {
                low: f32::NAN,
                ..RandomFillConfig::default()
            }),
            ..MapConfig::default()
        };
        assert!(matches!(MapSession::new(&config), Err(SessionError::Config(_))));
    }

    #[test]
    fn test_shutdown_twice() {
        let mut session = MapSession::new(&MapConfig::default()).unwrap();
        assert!(matches!(session.shutdown(), ReleaseOutcome::Released { blocks: 1, .. }));
        assert_eq!(session.shutdown(), ReleaseOutcome::Empty);
        assert!(session.stats().is_err());
    }
}
