//! Color extraction and the color-indexed tile database
//!
//! Tiles are identified by average color: each tile image is resampled to a
//! small fixed resolution, its per-channel mean is taken, and the resulting
//! [`color::AverageColor`] keys the [`database::ColorIndex`].

/// Average color type and per-image color extraction
pub mod color;
/// Color-indexed tile database with nearest-color lookup
pub mod database;

pub use color::AverageColor;
pub use database::{ColorIndex, TileId};
