//! LIFO record of the positions visited while ascending.

use crate::block::ChildPosition;
use crate::error::{HierarchyError, HierarchyResult};

/// Positions recorded during ascent, replayed in reverse during descent.
///
/// Holds exactly one entry per ascended level. Grows as needed, so the
/// ascent depth is unbounded.
#[derive(Clone, Debug, Default)]
pub struct StepStack {
    steps: Vec<ChildPosition>,
}

impl StepStack {
    /// Creates an empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Records a position.
    #[inline]
    pub fn push(&mut self, position: ChildPosition) {
        self.steps.push(position);
    }

    /// Takes back the most recent position.
    ///
    /// # Errors
    ///
    /// `InternalInvariantViolation` if the stack is empty. A descent never
    /// takes more steps than its ascent recorded.
    #[inline]
    pub fn pop(&mut self) -> HierarchyResult<ChildPosition> {
        self.steps
            .pop()
            .ok_or_else(|| HierarchyError::invariant("step stack underflow during descent"))
    }

    /// Returns the number of recorded positions.
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if nothing is recorded.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Forgets every recorded position.
    #[inline]
    pub fn clear(&mut self) {
        self.steps.clear();
    }
}
