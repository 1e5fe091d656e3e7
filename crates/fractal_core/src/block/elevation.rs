//! # Elevation Grid
//!
//! Leaf data owned by every block: a fixed 243x243 buffer of elevations.
//! 243 = 3^5, so a grid splits evenly into the nine child regions, and
//! each region again into nine, five times over.
//!
//! The grid has no knowledge of the hierarchy. Content generators fill it
//! through the bulk transforms below.

use crate::block::layout::{ChildPosition, LINEAR_SCALE_FACTOR};

/// Grid width in cells.
pub const ELEVATION_WIDTH: usize = 243;

/// Grid height in cells.
pub const ELEVATION_HEIGHT: usize = 243;

/// Total cells per grid.
pub const ELEVATION_CELLS: usize = ELEVATION_WIDTH * ELEVATION_HEIGHT;

/// Width of a child region: the grid side over the scale factor.
pub const REGION_SIDE: usize = ELEVATION_WIDTH / LINEAR_SCALE_FACTOR;

/// Elevation new blocks start with unless configured otherwise.
pub const DEFAULT_ELEVATION: f32 = 0.0;

/// A 243x243 grid of elevations, stored row-major (`y * width + x`).
#[derive(Clone, Debug, PartialEq)]
pub struct ElevationGrid {
    cells: Box<[f32]>,
}

impl ElevationGrid {
    /// Creates a grid with every cell set to `value`.
    #[must_use]
    pub fn filled(value: f32) -> Self {
        Self {
            cells: vec![value; ELEVATION_CELLS].into_boxed_slice(),
        }
    }

    /// Creates a grid with every cell set to `value`, without aborting on
    /// allocator exhaustion.
    ///
    /// # Returns
    ///
    /// The grid, or None if the buffer could not be allocated.
    #[must_use]
    pub fn try_filled(value: f32) -> Option<Self> {
        let mut cells = Vec::new();
        cells.try_reserve_exact(ELEVATION_CELLS).ok()?;
        cells.resize(ELEVATION_CELLS, value);
        Some(Self {
            cells: cells.into_boxed_slice(),
        })
    }

    /// Returns the width in cells.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        ELEVATION_WIDTH
    }

    /// Returns the height in cells.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        ELEVATION_HEIGHT
    }

    #[inline]
    const fn offset(x: usize, y: usize) -> Option<usize> {
        if x < ELEVATION_WIDTH && y < ELEVATION_HEIGHT {
            Some(y * ELEVATION_WIDTH + x)
        } else {
            None
        }
    }

    /// Gets the elevation at a cell.
    ///
    /// # Returns
    ///
    /// The elevation, or None if `(x, y)` is outside the grid.
    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        Self::offset(x, y).map(|offset| self.cells[offset])
    }

    /// Sets the elevation at a cell. Out-of-range writes are ignored.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        if let Some(offset) = Self::offset(x, y) {
            self.cells[offset] = value;
        }
    }

    /// Returns the raw cells, row-major.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.cells
    }

    /// Returns the raw cells mutably, row-major.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.cells
    }

    /// Returns the cells as bytes, ready for a texture upload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.cells)
    }

    /// Returns which child region of the block covers a cell.
    #[must_use]
    pub const fn region(x: usize, y: usize) -> Option<ChildPosition> {
        if x < ELEVATION_WIDTH && y < ELEVATION_HEIGHT {
            ChildPosition::from_index((y / REGION_SIDE) * LINEAR_SCALE_FACTOR + x / REGION_SIDE)
        } else {
            None
        }
    }

    /// Sets every cell to `value`.
    pub fn fill(&mut self, value: f32) {
        self.cells.fill(value);
    }

    /// Fills the middle ninth with `inner` and the surrounding ring with `outer`.
    pub fn fill_middle(&mut self, inner: f32, outer: f32) {
        self.fill_nine_regions([outer, outer, outer, outer, inner, outer, outer, outer, outer]);
    }

    /// Fills each of the nine child regions with its own value.
    ///
    /// `values` is indexed like the child layout (row-major, top-left first).
    pub fn fill_nine_regions(&mut self, values: [f32; 9]) {
        for (y, row) in self.cells.chunks_exact_mut(ELEVATION_WIDTH).enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                if let Some(region) = Self::region(x, y) {
                    *cell = values[region.index()];
                }
            }
        }
    }

    /// Fills the left half with `left` and the right half with `right`.
    pub fn fill_halves(&mut self, left: f32, right: f32) {
        for row in self.cells.chunks_exact_mut(ELEVATION_WIDTH) {
            let (west, east) = row.split_at_mut(ELEVATION_WIDTH / 2);
            west.fill(left);
            east.fill(right);
        }
    }

    /// Average of the in-bounds cells surrounding `(x, y)` (up to 8).
    ///
    /// # Returns
    ///
    /// The average, or None if `(x, y)` is outside the grid.
    #[must_use]
    pub fn surrounding_average(&self, x: usize, y: usize) -> Option<f32> {
        Self::offset(x, y)?;
        Some(neighbourhood_average(&self.cells, x, y))
    }

    /// Runs one neighbourhood-average smoothing pass.
    ///
    /// `factor` is clamped to `[0, 1]`: 1 replaces every cell with the
    /// average around it, 0.5 blends the cell half-and-half with that
    /// average, 0 leaves the grid unchanged. Every cell is computed from
    /// the values before the pass.
    pub fn smooth(&mut self, factor: f32) {
        let factor = factor.clamp(0.0, 1.0);
        if factor == 0.0 {
            return;
        }
        let snapshot = self.cells.clone();
        for (y, row) in self.cells.chunks_exact_mut(ELEVATION_WIDTH).enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                let average = neighbourhood_average(&snapshot, x, y);
                *cell = (1.0 - factor) * *cell + factor * average;
            }
        }
    }

    /// Returns the mean elevation over the whole grid.
    #[must_use]
    pub fn mean(&self) -> f32 {
        let total: f64 = self.cells.iter().map(|&v| f64::from(v)).sum();
        (total / ELEVATION_CELLS as f64) as f32
    }
}

impl Default for ElevationGrid {
    fn default() -> Self {
        Self::filled(DEFAULT_ELEVATION)
    }
}

fn neighbourhood_average(cells: &[f32], x: usize, y: usize) -> f32 {
    let mut sum = 0.0f32;
    let mut count = 0u8;
    for ny in y.saturating_sub(1)..=(y + 1).min(ELEVATION_HEIGHT - 1) {
        for nx in x.saturating_sub(1)..=(x + 1).min(ELEVATION_WIDTH - 1) {
            if nx == x && ny == y {
                continue;
            }
            sum += cells[ny * ELEVATION_WIDTH + nx];
            count += 1;
        }
    }
    sum / f32::from(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regions_tile_the_grid() {
        assert_eq!(REGION_SIDE * LINEAR_SCALE_FACTOR, ELEVATION_WIDTH);
        assert_eq!(REGION_SIDE * LINEAR_SCALE_FACTOR, ELEVATION_HEIGHT);

        let last = ELEVATION_WIDTH - 1;
        assert_eq!(ElevationGrid::region(REGION_SIDE - 1, 0), Some(ChildPosition::TopLeft));
        assert_eq!(ElevationGrid::region(REGION_SIDE, REGION_SIDE), Some(ChildPosition::CenterCenter));
        assert_eq!(ElevationGrid::region(last, last), Some(ChildPosition::BottomRight));
        assert_eq!(ElevationGrid::region(ELEVATION_WIDTH, 0), None);
    }

    #[test]
    fn test_filled_grid() {
        let grid = ElevationGrid::filled(2.5);
        assert_eq!(grid.as_slice().len(), ELEVATION_CELLS);
        assert_eq!(grid.get(0, 0), Some(2.5));
        assert_eq!(grid.get(242, 242), Some(2.5));
        assert_eq!(grid.get(243, 0), None);
    }

    #[test]
    fn test_try_filled_matches_filled() {
        let grid = ElevationGrid::try_filled(1.0).unwrap();
        assert_eq!(grid, ElevationGrid::filled(1.0));
    }

    #[test]
    fn test_set_out_of_range_is_ignored() {
        let mut grid = ElevationGrid::default();
        grid.set(500, 500, 9.0);
        grid.set(3, 4, 9.0);
        assert_eq!(grid.get(3, 4), Some(9.0));
        assert_eq!(grid.as_slice().iter().filter(|&&v| v == 9.0).count(), 1);
    }

    #[test]
    fn test_regions() {
        assert_eq!(ElevationGrid::region(0, 0), Some(ChildPosition::TopLeft));
        assert_eq!(ElevationGrid::region(80, 80), Some(ChildPosition::TopLeft));
        assert_eq!(ElevationGrid::region(81, 81), Some(ChildPosition::CenterCenter));
        assert_eq!(ElevationGrid::region(242, 0), Some(ChildPosition::TopRight));
        assert_eq!(ElevationGrid::region(0, 162), Some(ChildPosition::BottomLeft));
        assert_eq!(ElevationGrid::region(243, 0), None);
    }

    #[test]
    fn test_fill_nine_regions() {
        let mut grid = ElevationGrid::default();
        grid.fill_nine_regions([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(grid.get(10, 10), Some(1.0));
        assert_eq!(grid.get(100, 10), Some(2.0));
        assert_eq!(grid.get(200, 10), Some(3.0));
        assert_eq!(grid.get(120, 120), Some(5.0));
        assert_eq!(grid.get(240, 240), Some(9.0));
    }

    #[test]
    fn test_fill_middle() {
        let mut grid = ElevationGrid::default();
        grid.fill_middle(1.0, -1.0);
        assert_eq!(grid.get(121, 121), Some(1.0));
        assert_eq!(grid.get(80, 121), Some(-1.0));
        assert_eq!(grid.get(162, 121), Some(-1.0));
    }

    #[test]
    fn test_fill_halves() {
        let mut grid = ElevationGrid::default();
        grid.fill_halves(1.0, 2.0);
        assert_eq!(grid.get(120, 5), Some(1.0));
        assert_eq!(grid.get(121, 5), Some(2.0));
    }

    #[test]
    fn test_surrounding_average_corner_and_interior() {
        let mut grid = ElevationGrid::default();
        grid.set(1, 0, 3.0);
        grid.set(0, 1, 3.0);
        grid.set(1, 1, 3.0);
        // Corner has exactly three in-bounds neighbours.
        assert_eq!(grid.surrounding_average(0, 0), Some(3.0));
        // Interior sees 8 cells, 3 of them raised.
        let interior = grid.surrounding_average(1, 1).unwrap();
        assert!((interior - 6.0 / 8.0).abs() < 1e-6);
        assert_eq!(grid.surrounding_average(243, 243), None);
    }

    #[test]
    fn test_smooth_flattens_spike() {
        let mut grid = ElevationGrid::default();
        grid.set(100, 100, 8.0);
        let mean_before = grid.mean();

        grid.smooth(1.0);

        assert_eq!(grid.get(100, 100), Some(0.0));
        assert_eq!(grid.get(101, 100), Some(1.0));
        assert!((grid.mean() - mean_before).abs() < 1e-6);
    }

    #[test]
    fn test_smooth_zero_is_identity() {
        let mut grid = ElevationGrid::default();
        grid.set(7, 7, 4.0);
        let before = grid.clone();
        grid.smooth(0.0);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_as_bytes_length() {
        let grid = ElevationGrid::default();
        assert_eq!(grid.as_bytes().len(), ELEVATION_CELLS * 4);
    }
}
