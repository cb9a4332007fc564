//! Policy constants and runtime configuration defaults

// Candidate ladder policy. These are fixed by design, not configurable.
/// Exact-match candidate count below which nearest-color widening kicks in
pub const WIDENING_THRESHOLD: usize = 10;
/// Number of nearest color keys consulted during widening
pub const NEAREST_COLOR_LIMIT: usize = 50;
/// Widening stops once the candidate pool reaches this size
pub const CANDIDATE_POOL_LIMIT: usize = 400;
/// Tiles drawn from the whole corpus when every candidate was filtered out
pub const FALLBACK_SAMPLE_SIZE: usize = 30;

/// Side length of the square resample used for average color extraction
///
/// Bounds per-tile decode cost and stabilizes the mean against pixel noise.
pub const SAMPLE_RESOLUTION: u32 = 100;

// Default values for configurable parameters
/// Default side length of one grid cell, in source pixels
pub const DEFAULT_TILE_UNIT_SIZE: u32 = 16;
/// Default integer upscale applied to each tile in the output canvas
pub const DEFAULT_SCALE_FACTOR: u32 = 8;
/// Default Chebyshev radius, in grid cells, of the no-repeat window
pub const DEFAULT_NO_REPEAT_RADIUS: u32 = 5;
/// Maximum accepted no-repeat radius
pub const MAX_NO_REPEAT_RADIUS: u32 = 12;
/// Fixed seed for reproducible tile selection
pub const DEFAULT_SEED: u64 = 42;

// Filesystem defaults
/// Default tile corpus directory
pub const DEFAULT_TILES_DIR: &str = "tiles";
/// Default output file
pub const DEFAULT_OUTPUT_FILE: &str = "mosaic_result.jpg";
/// Cache file created inside the tiles directory when no override is given
pub const CACHE_FILE_NAME: &str = ".photomosaic_cache.json";
/// Bumped whenever the cache schema changes; mismatches force a rebuild
pub const CACHE_FORMAT_VERSION: u32 = 1;

/// File extensions (lowercase) recognized as tile images
pub const RECOGNIZED_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "webp", "bmp", "tiff", "gif", "heic", "avif", "svg",
];

// Output settings
/// JPEG quality for the rendered mosaic
pub const JPEG_QUALITY: u8 = 95;
