//! Average color type and per-image color extraction

use crate::io::configuration::SAMPLE_RESOLUTION;
use crate::io::error::Result;
use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Quantized average RGB color of a tile image
///
/// Derived deterministically by resampling the image to
/// [`SAMPLE_RESOLUTION`]² pixels and truncating the per-channel mean to an
/// integer. Two tiles with identical average color are interchangeable for
/// indexing purposes, so this type is the [`ColorIndex`](crate::index::ColorIndex)
/// key: exact equality, hashable, and totally ordered for deterministic
/// tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AverageColor(pub [u8; 3]);

impl AverageColor {
    /// Create a color from individual channel values
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self([red, green, blue])
    }

    /// Channel values in RGB order
    pub const fn channels(self) -> [u8; 3] {
        self.0
    }

    /// Squared Euclidean distance in RGB space
    ///
    /// Flat per-channel differences with no gamma correction or perceptual
    /// weighting. Maximum value is 3 * 255² = 195_075, well within `u32`.
    pub const fn distance_squared(self, other: Self) -> u32 {
        let [r1, g1, b1] = self.0;
        let [r2, g2, b2] = other.0;
        let dr = r1 as i32 - r2 as i32;
        let dg = g1 as i32 - g2 as i32;
        let db = b1 as i32 - b2 as i32;
        (dr * dr + dg * dg + db * db) as u32
    }
}

impl From<image::Rgb<u8>> for AverageColor {
    fn from(pixel: image::Rgb<u8>) -> Self {
        Self(pixel.0)
    }
}

/// Per-channel mean of an image, truncated to integer channels
pub fn average_color(image: &RgbImage) -> AverageColor {
    let mut sums = [0u64; 3];
    for pixel in image.pixels() {
        for (sum, &value) in sums.iter_mut().zip(pixel.0.iter()) {
            *sum += u64::from(value);
        }
    }

    let count = (u64::from(image.width()) * u64::from(image.height())).max(1);
    let mut mean = [0u8; 3];
    for (slot, sum) in mean.iter_mut().zip(sums) {
        *slot = (sum / count) as u8;
    }
    AverageColor(mean)
}

/// Decode a tile file and compute its average color
///
/// The image is resampled to [`SAMPLE_RESOLUTION`]² with Lanczos3 before
/// averaging so the result is stable against noise and decode cost stays
/// bounded for arbitrarily large tiles.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded.
pub fn tile_average_color(path: &Path) -> Result<AverageColor> {
    let img = crate::io::image::open_rgb(path)?;
    let sample = crate::io::image::resize_exact(&img, SAMPLE_RESOLUTION, SAMPLE_RESOLUTION);
    Ok(average_color(&sample))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_distance_squared() {
        let black = AverageColor::new(0, 0, 0);
        let white = AverageColor::new(255, 255, 255);
        assert_eq!(black.distance_squared(black), 0);
        assert_eq!(black.distance_squared(white), 3 * 255 * 255);
        assert_eq!(black.distance_squared(white), white.distance_squared(black));
    }

    #[test]
    fn test_average_of_solid_image() {
        let img = RgbImage::from_pixel(4, 4, Rgb([10, 200, 37]));
        assert_eq!(average_color(&img), AverageColor::new(10, 200, 37));
    }

    #[test]
    fn test_average_truncates_channel_means() {
        // Two pixels of 0 and 1 average to 0.5, which truncates to 0
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([0, 0, 3]));
        img.put_pixel(1, 0, Rgb([1, 0, 4]));
        assert_eq!(average_color(&img), AverageColor::new(0, 0, 3));
    }
}
