//! Mosaic composition: candidate selection, used-tile grid, and rendering
//!
//! The composer downsamples the source to one proxy pixel per grid cell,
//! selects a tile per cell through a three-tier candidate ladder (exact
//! color match, nearest-color widening, whole-corpus fallback), and paints
//! the full-resolution canvas.

/// Grid derivation, per-cell selection, and canvas painting
pub mod composer;
/// Dense per-render record of placed tiles
pub mod grid;
/// Candidate selection ladder and seeded random source
pub mod selection;

pub use composer::{MosaicComposer, MosaicConfig, RenderOutcome};
pub use grid::UsedTileGrid;
