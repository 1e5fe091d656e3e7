//! # Child Layout
//!
//! Every block splits into a 3x3 grid of children, enumerated row-major:
//!
//! ```text
//! 0 1 2
//! 3 4 5
//! 6 7 8
//! ```
//!
//! Moving sideways inside one grid is index arithmetic. Moving across a grid
//! boundary lands on the mirrored position in the neighbouring grid.

use std::fmt;

/// Linear scale between a block and one of its children.
pub const LINEAR_SCALE_FACTOR: usize = 3;

/// Number of children every block has once its child set exists.
pub const CHILD_COUNT: usize = LINEAR_SCALE_FACTOR * LINEAR_SCALE_FACTOR;

/// Number of cardinal neighbours tracked per block.
pub const NEIGHBOR_COUNT: usize = 4;

/// Level of the origin block.
pub const ORIGIN_LEVEL: i64 = 0;

/// Side length of the child grid.
#[allow(clippy::cast_possible_truncation)]
const GRID_SIDE: u8 = LINEAR_SCALE_FACTOR as u8;

/// Position of a block inside its parent's 3x3 child grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ChildPosition {
    /// Index 0.
    TopLeft = 0,
    /// Index 1.
    TopCenter = 1,
    /// Index 2.
    TopRight = 2,
    /// Index 3.
    CenterLeft = 3,
    /// Index 4. Every generated ancestor of the origin sits here.
    CenterCenter = 4,
    /// Index 5.
    CenterRight = 5,
    /// Index 6.
    BottomLeft = 6,
    /// Index 7.
    BottomCenter = 7,
    /// Index 8.
    BottomRight = 8,
}

impl ChildPosition {
    /// All positions in row-major order.
    pub const ALL: [Self; CHILD_COUNT] = [
        Self::TopLeft,
        Self::TopCenter,
        Self::TopRight,
        Self::CenterLeft,
        Self::CenterCenter,
        Self::CenterRight,
        Self::BottomLeft,
        Self::BottomCenter,
        Self::BottomRight,
    ];

    /// Returns the row-major index (0-8).
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Converts a raw index. Anything outside 0-8 is the invalid position.
    #[inline]
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < CHILD_COUNT {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Returns the grid row (0 = top).
    #[inline]
    #[must_use]
    pub const fn row(self) -> u8 {
        self as u8 / GRID_SIDE
    }

    /// Returns the grid column (0 = left).
    #[inline]
    #[must_use]
    pub const fn column(self) -> u8 {
        self as u8 % GRID_SIDE
    }

    #[inline]
    const fn at(row: u8, column: u8) -> Self {
        Self::ALL[(row * GRID_SIDE + column) as usize]
    }

    /// Returns true if moving in `direction` leaves the parent's grid.
    #[inline]
    #[must_use]
    pub const fn is_on_edge(self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.row() == 0,
            Direction::Down => self.row() == GRID_SIDE - 1,
            Direction::Left => self.column() == 0,
            Direction::Right => self.column() == GRID_SIDE - 1,
        }
    }

    /// Moves one cell inside the same grid.
    ///
    /// Returns `None` when the move would cross the grid boundary.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Option<Self> {
        if self.is_on_edge(direction) {
            return None;
        }
        let (row, column) = (self.row(), self.column());
        Some(match direction {
            Direction::Up => Self::at(row - 1, column),
            Direction::Down => Self::at(row + 1, column),
            Direction::Left => Self::at(row, column - 1),
            Direction::Right => Self::at(row, column + 1),
        })
    }

    /// Mirrors the position across the grid along `direction`'s axis.
    ///
    /// For an edge position this is where the adjacent block sits inside the
    /// neighbouring grid: top row <-> bottom row for vertical moves, left
    /// column <-> right column for horizontal ones.
    #[must_use]
    pub const fn reflect(self, direction: Direction) -> Self {
        let (row, column) = (self.row(), self.column());
        match direction {
            Direction::Up | Direction::Down => Self::at(GRID_SIDE - 1 - row, column),
            Direction::Left | Direction::Right => Self::at(row, GRID_SIDE - 1 - column),
        }
    }
}

/// Cardinal direction to a same-level neighbour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    /// Towards row 0.
    Up = 0,
    /// Towards row 2.
    Down = 1,
    /// Towards column 0.
    Left = 2,
    /// Towards column 2.
    Right = 3,
}

impl Direction {
    /// All directions, in neighbour-slot order.
    pub const ALL: [Self; NEIGHBOR_COUNT] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns the neighbour slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the opposite direction.
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        })
    }
}
