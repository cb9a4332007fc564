//! Error types for index construction and rendering

use std::fmt;
use std::path::PathBuf;

/// Main error type for all mosaic operations
///
/// Index construction absorbs per-tile decode failures (the tile is skipped);
/// everything surfaced through this enum is structural and aborts the
/// operation that produced it.
#[derive(Debug)]
pub enum MosaicError {
    /// Tile corpus directory does not exist or is not a directory
    TilesDirectory {
        /// Path that failed validation
        path: PathBuf,
    },

    /// Failed to load an image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// A tile that was indexed successfully became unreadable at placement time
    ///
    /// Skipping would leave a hole in the canvas, so this aborts the render.
    TileDecode {
        /// Path to the tile file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Source image is smaller than one tile unit, producing a zero-size grid
    EmptyGrid {
        /// Source image width in pixels
        width: u32,
        /// Source image height in pixels
        height: u32,
        /// Configured tile unit size
        tile_unit_size: u32,
    },

    /// The color index holds no tiles at all, so nothing can be placed
    EmptyCorpus,

    /// A selected tile id does not resolve to a path in the index
    InvalidTileIndex {
        /// The unresolvable tile id
        index: u32,
        /// Number of tiles the index holds
        max_tiles: usize,
    },

    /// Configuration parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to save the rendered mosaic to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TilesDirectory { path } => {
                write!(f, "Tiles folder does not exist: {}", path.display())
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::TileDecode { path, source } => {
                write!(
                    f,
                    "Failed to decode tile '{}' during placement: {source}",
                    path.display()
                )
            }
            Self::EmptyGrid {
                width,
                height,
                tile_unit_size,
            } => {
                write!(
                    f,
                    "Source image ({width}x{height}) is smaller than one tile unit ({tile_unit_size}px); nothing to render"
                )
            }
            Self::EmptyCorpus => {
                write!(f, "Color index contains no tiles; nothing to place")
            }
            Self::InvalidTileIndex { index, max_tiles } => {
                write!(f, "Tile id {index} is out of bounds (index holds {max_tiles} tiles)")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export mosaic to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. }
            | Self::TileDecode { source, .. }
            | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for mosaic results
pub type Result<T> = std::result::Result<T, MosaicError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_grid_display() {
        let err = MosaicError::EmptyGrid {
            width: 10,
            height: 10,
            tile_unit_size: 16,
        };
        let message = err.to_string();
        assert!(message.contains("10x10"));
        assert!(message.contains("16px"));
    }

    #[test]
    fn test_invalid_parameter_helper() {
        let err = invalid_parameter("no_repeat_radius", &13, &"must be at most 12");
        match err {
            MosaicError::InvalidParameter {
                parameter, value, ..
            } => {
                assert_eq!(parameter, "no_repeat_radius");
                assert_eq!(value, "13");
            }
            _ => unreachable!("Expected InvalidParameter error type"),
        }
    }
}
