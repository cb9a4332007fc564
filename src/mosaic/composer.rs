//! Grid derivation, per-cell selection, and canvas painting

use crate::index::{AverageColor, ColorIndex};
use crate::io::configuration::{
    DEFAULT_NO_REPEAT_RADIUS, DEFAULT_SCALE_FACTOR, DEFAULT_TILE_UNIT_SIZE, MAX_NO_REPEAT_RADIUS,
};
use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::io::image::{open_tile, resize_exact};
use crate::io::progress::ProgressReporter;
use crate::mosaic::grid::UsedTileGrid;
use crate::mosaic::selection::{
    RandomSelector, fallback_candidates, filter_recent, gather_candidates,
};
use image::{RgbImage, imageops};

/// Rendering parameters, validated before use
#[derive(Clone, Copy, Debug)]
pub struct MosaicConfig {
    /// Side length, in source pixels, of one grid cell (at least 1)
    pub tile_unit_size: u32,
    /// Integer upscale applied to each tile in the output canvas (at least 1)
    pub scale_factor: u32,
    /// Chebyshev radius of the no-repeat window, in grid cells; 0 disables
    pub no_repeat_radius: u32,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            tile_unit_size: DEFAULT_TILE_UNIT_SIZE,
            scale_factor: DEFAULT_SCALE_FACTOR,
            no_repeat_radius: DEFAULT_NO_REPEAT_RADIUS,
        }
    }
}

impl MosaicConfig {
    /// Check all fields against their valid ranges
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::InvalidParameter`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if self.tile_unit_size == 0 {
            return Err(invalid_parameter(
                "tile_unit_size",
                &self.tile_unit_size,
                &"must be at least 1",
            ));
        }
        if self.scale_factor == 0 {
            return Err(invalid_parameter(
                "scale_factor",
                &self.scale_factor,
                &"must be at least 1",
            ));
        }
        if self.no_repeat_radius > MAX_NO_REPEAT_RADIUS {
            return Err(invalid_parameter(
                "no_repeat_radius",
                &self.no_repeat_radius,
                &format!("must be at most {MAX_NO_REPEAT_RADIUS}"),
            ));
        }
        Ok(())
    }

    /// Grid cell counts for a source of the given pixel dimensions
    pub const fn grid_dimensions(&self, width: u32, height: u32) -> (usize, usize) {
        (
            (width / self.tile_unit_size) as usize,
            (height / self.tile_unit_size) as usize,
        )
    }

    /// Side length, in output pixels, of one placed tile
    pub const fn tile_pixels(&self) -> u32 {
        self.tile_unit_size * self.scale_factor
    }
}

/// Result of a completed render
#[derive(Debug)]
pub struct RenderOutcome {
    /// The fully painted mosaic canvas
    pub canvas: RgbImage,
    /// The tile chosen for every grid cell
    pub placements: UsedTileGrid,
    /// Cells where the exhaustion fallback fired, in scan order
    ///
    /// A tile repeat inside the no-repeat window is a constraint violation
    /// only if neither colliding cell appears here.
    pub fallback_cells: Vec<[usize; 2]>,
}

/// Renders a source image as a mosaic of tiles drawn from a [`ColorIndex`]
pub struct MosaicComposer {
    config: MosaicConfig,
    selector: RandomSelector,
}

impl MosaicComposer {
    /// Create a composer with validated configuration and a seeded selector
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::InvalidParameter`] if the configuration is
    /// out of range.
    pub fn new(config: MosaicConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            selector: RandomSelector::new(seed),
        })
    }

    /// Render the mosaic, visiting grid cells in row-major order
    ///
    /// The source is downsampled to one proxy pixel per grid cell; each cell
    /// runs the candidate ladder against the proxy color, records its choice
    /// in the used-tile grid (visible to later cells), and paints the scaled
    /// tile into its disjoint canvas region. The canvas is only returned
    /// fully composed.
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::EmptyGrid`] when the source is smaller than one
    /// tile unit, [`MosaicError::EmptyCorpus`] when the index holds no tiles,
    /// and [`MosaicError::TileDecode`] when a selected tile fails to decode
    /// at placement time.
    pub fn render(
        &mut self,
        source: &RgbImage,
        index: &ColorIndex,
        progress: Option<&ProgressReporter>,
    ) -> Result<RenderOutcome> {
        let (grid_width, grid_height) = self
            .config
            .grid_dimensions(source.width(), source.height());
        if grid_width == 0 || grid_height == 0 {
            return Err(MosaicError::EmptyGrid {
                width: source.width(),
                height: source.height(),
                tile_unit_size: self.config.tile_unit_size,
            });
        }
        if index.is_empty() {
            return Err(MosaicError::EmptyCorpus);
        }

        // One low-resolution proxy supplies every cell's target color
        let proxy = resize_exact(source, grid_width as u32, grid_height as u32);

        let tile_px = self.config.tile_pixels();
        let mut canvas = RgbImage::new(grid_width as u32 * tile_px, grid_height as u32 * tile_px);
        let mut placements = UsedTileGrid::new(grid_width, grid_height);
        let mut fallback_cells = Vec::new();

        for y in 0..grid_height {
            for x in 0..grid_width {
                let target = proxy
                    .get_pixel_checked(x as u32, y as u32)
                    .copied()
                    .map_or(AverageColor::new(0, 0, 0), AverageColor::from);

                let mut candidates = gather_candidates(index, target);
                filter_recent(
                    &mut candidates,
                    &placements,
                    x,
                    y,
                    self.config.no_repeat_radius,
                );

                if candidates.is_empty() {
                    candidates = fallback_candidates(index, &mut self.selector);
                    fallback_cells.push([x, y]);
                }

                let Some(chosen) = self.selector.choose(&candidates) else {
                    return Err(MosaicError::EmptyCorpus);
                };
                placements.record(x, y, chosen);

                let Some(path) = index.path(chosen) else {
                    return Err(MosaicError::InvalidTileIndex {
                        index: chosen.0,
                        max_tiles: index.tile_count(),
                    });
                };
                let tile = open_tile(path)?;
                let scaled = resize_exact(&tile, tile_px, tile_px);
                imageops::replace(
                    &mut canvas,
                    &scaled,
                    i64::from(x as u32 * tile_px),
                    i64::from(y as u32 * tile_px),
                );

                if let Some(reporter) = progress {
                    reporter.advance();
                }
            }
        }

        Ok(RenderOutcome {
            canvas,
            placements,
            fallback_cells,
        })
    }
}
