//! Photo-mosaic renderer built on a color-indexed tile database
//!
//! The system scans a directory of small tile images, indexes them by average
//! color, and reconstructs a source image as a grid of tiles chosen by
//! nearest-color search under a local anti-repetition constraint.

#![forbid(unsafe_code)]

/// Color extraction and the color-indexed tile database
pub mod index;
/// Input/output operations, configuration, and error handling
pub mod io;
/// Mosaic composition: candidate selection, used-tile grid, and rendering
pub mod mosaic;

pub use io::error::{MosaicError, Result};
