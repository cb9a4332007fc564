//! Image loading, resampling, and export helpers

use crate::io::configuration::JPEG_QUALITY;
use crate::io::error::{MosaicError, Result};
use image::RgbImage;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Open an image file and convert it to the 3-channel RGB working model
///
/// # Errors
///
/// Returns [`MosaicError::ImageLoad`] if the file cannot be opened or decoded.
pub fn open_rgb(path: &Path) -> Result<RgbImage> {
    let img = image::open(path).map_err(|e| MosaicError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(img.to_rgb8())
}

/// Open a previously indexed tile for placement into the canvas
///
/// # Errors
///
/// Returns [`MosaicError::TileDecode`]; a tile that validated at index build
/// time but fails here aborts the render rather than leaving a hole.
pub fn open_tile(path: &Path) -> Result<RgbImage> {
    let img = image::open(path).map_err(|e| MosaicError::TileDecode {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(img.to_rgb8())
}

/// Resize an image to exact dimensions with Lanczos3 resampling
///
/// The same filter is used everywhere colors are compared: index sampling,
/// the low-resolution source proxy, and tile placement.
pub fn resize_exact(image: &RgbImage, width: u32, height: u32) -> RgbImage {
    imageops::resize(image, width, height, FilterType::Lanczos3)
}

/// Save the rendered canvas as a JPEG at quality [`JPEG_QUALITY`]
///
/// Parent directories are created as needed. Nothing is written until the
/// canvas is fully composed, so a failed render never leaves partial output.
///
/// # Errors
///
/// Returns an error if directory creation, file creation, or encoding fails.
pub fn save_jpeg(canvas: &RgbImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| MosaicError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }

    let file = File::create(path).map_err(|e| MosaicError::FileSystem {
        path: path.to_path_buf(),
        operation: "create file",
        source: e,
    })?;
    let writer = BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(writer, JPEG_QUALITY);
    canvas
        .write_with_encoder(encoder)
        .map_err(|e| MosaicError::ImageExport {
            path: path.to_path_buf(),
            source: e,
        })
}
