//! Dense per-render record of which tile each grid cell selected

use crate::index::TileId;
use ndarray::Array2;
use std::collections::HashSet;

/// Per-cell record of placed tiles for one render
///
/// Cells hold 0 while empty and `id + 1` once a tile is placed. Each cell is
/// written exactly once, in row-major scan order, and read by later cells
/// through [`UsedTileGrid::used_within`], which makes the no-repeat
/// exclusion order-dependent by design.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsedTileGrid {
    cells: Array2<u32>,
}

impl UsedTileGrid {
    /// Create an all-empty grid of `grid_width` x `grid_height` cells
    pub fn new(grid_width: usize, grid_height: usize) -> Self {
        Self {
            cells: Array2::zeros((grid_height, grid_width)),
        }
    }

    /// Number of cells per row
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Record the tile chosen for cell (x, y)
    pub fn record(&mut self, x: usize, y: usize, id: TileId) {
        if let Some(cell) = self.cells.get_mut([y, x]) {
            *cell = id.0 + 1;
        }
    }

    /// Tile placed at cell (x, y), if any; `None` for out-of-bounds cells
    pub fn get(&self, x: usize, y: usize) -> Option<TileId> {
        self.cells
            .get([y, x])
            .and_then(|&value| value.checked_sub(1).map(TileId))
    }

    /// Tiles used by any visited cell within Chebyshev distance `radius`
    ///
    /// Scans the square window around (x, y) intersected with grid bounds.
    /// Cells later in scan order are still empty, so only earlier selections
    /// contribute to the ban set.
    pub fn used_within(&self, x: usize, y: usize, radius: u32) -> HashSet<TileId> {
        let r = i64::from(radius);
        let mut banned = HashSet::new();
        for dy in -r..=r {
            for dx in -r..=r {
                let nx = x as i64 + dx;
                let ny = y as i64 + dy;
                if nx < 0 || ny < 0 {
                    continue;
                }
                if let Some(id) = self.get(nx as usize, ny as usize) {
                    banned.insert(id);
                }
            }
        }
        banned
    }
}
