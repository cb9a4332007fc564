//! End-to-end render behavior: grids, fallbacks, anti-repeat, determinism

use image::{Rgb, RgbImage};
use photomosaic::MosaicError;
use photomosaic::index::ColorIndex;
use photomosaic::mosaic::{MosaicComposer, MosaicConfig, RenderOutcome};
use std::path::Path;

fn write_solid_tile(dir: &Path, name: &str, color: [u8; 3]) {
    RgbImage::from_pixel(8, 8, Rgb(color))
        .save(dir.join(name))
        .unwrap();
}

/// Source image with one solid color per 16px block
fn block_source(grid_width: u32, grid_height: u32) -> RgbImage {
    RgbImage::from_fn(grid_width * 16, grid_height * 16, |px, py| {
        let bx = (px / 16) as u8;
        let by = (py / 16) as u8;
        Rgb([bx * 50, by * 50, 100])
    })
}

fn config(no_repeat_radius: u32, scale_factor: u32) -> MosaicConfig {
    MosaicConfig {
        tile_unit_size: 16,
        scale_factor,
        no_repeat_radius,
    }
}

fn render(
    source: &RgbImage,
    index: &ColorIndex,
    cfg: MosaicConfig,
    seed: u64,
) -> photomosaic::Result<RenderOutcome> {
    MosaicComposer::new(cfg, seed)?.render(source, index, None)
}

#[test]
fn test_single_tile_corpus_without_no_repeat() {
    let tiles = tempfile::tempdir().unwrap();
    write_solid_tile(tiles.path(), "only.png", [90, 90, 90]);
    let index = ColorIndex::build_from(tiles.path()).unwrap();

    let source = RgbImage::from_pixel(32, 32, Rgb([90, 90, 90]));
    let outcome = render(&source, &index, config(0, 1), 42).unwrap();

    assert_eq!(outcome.placements.width(), 2);
    assert_eq!(outcome.placements.height(), 2);
    assert_eq!(outcome.canvas.dimensions(), (32, 32));
    assert!(outcome.fallback_cells.is_empty());

    let only = index.all_tiles()[0];
    for y in 0..2 {
        for x in 0..2 {
            assert_eq!(outcome.placements.get(x, y), Some(only));
        }
    }
    // The placed tile is solid, so the canvas is too
    assert_eq!(outcome.canvas.get_pixel(0, 0), &Rgb([90, 90, 90]));
    assert_eq!(outcome.canvas.get_pixel(31, 31), &Rgb([90, 90, 90]));
}

#[test]
fn test_single_tile_corpus_survives_no_repeat_via_fallback() {
    let tiles = tempfile::tempdir().unwrap();
    write_solid_tile(tiles.path(), "only.png", [90, 90, 90]);
    let index = ColorIndex::build_from(tiles.path()).unwrap();

    let source = RgbImage::from_pixel(32, 32, Rgb([90, 90, 90]));
    let outcome = render(&source, &index, config(1, 1), 42).unwrap();

    // Every cell after the first collides with a neighbor; the exhaustion
    // fallback places the single available tile anyway
    let only = index.all_tiles()[0];
    for y in 0..2 {
        for x in 0..2 {
            assert_eq!(outcome.placements.get(x, y), Some(only));
        }
    }
    assert_eq!(outcome.fallback_cells.len(), 3);
    assert!(!outcome.fallback_cells.contains(&[0, 0]));
}

#[test]
fn test_source_smaller_than_one_tile_unit_fails() {
    let tiles = tempfile::tempdir().unwrap();
    write_solid_tile(tiles.path(), "only.png", [90, 90, 90]);
    let index = ColorIndex::build_from(tiles.path()).unwrap();

    let source = RgbImage::from_pixel(10, 10, Rgb([90, 90, 90]));
    let err = render(&source, &index, config(0, 1), 42).unwrap_err();
    assert!(matches!(err, MosaicError::EmptyGrid { .. }));
}

#[test]
fn test_empty_corpus_fails() {
    let tiles = tempfile::tempdir().unwrap();
    let index = ColorIndex::build_from(tiles.path()).unwrap();
    assert!(index.is_empty());

    let source = RgbImage::from_pixel(32, 32, Rgb([90, 90, 90]));
    let err = render(&source, &index, config(0, 1), 42).unwrap_err();
    assert!(matches!(err, MosaicError::EmptyCorpus));
}

#[test]
fn test_scale_factor_multiplies_canvas_dimensions() {
    let tiles = tempfile::tempdir().unwrap();
    write_solid_tile(tiles.path(), "only.png", [90, 90, 90]);
    let index = ColorIndex::build_from(tiles.path()).unwrap();

    let source = RgbImage::from_pixel(48, 32, Rgb([90, 90, 90]));
    let outcome = render(&source, &index, config(0, 3), 42).unwrap();
    assert_eq!(outcome.canvas.dimensions(), (3 * 16 * 3, 2 * 16 * 3));
}

#[test]
fn test_no_repeat_window_holds_outside_fallback_cells() {
    let tiles = tempfile::tempdir().unwrap();
    for i in 0..80u8 {
        write_solid_tile(
            tiles.path(),
            &format!("tile_{i:03}.png"),
            [i.wrapping_mul(3), 255 - i, i],
        );
    }
    let index = ColorIndex::build_from(tiles.path()).unwrap();

    let source = RgbImage::from_pixel(64, 64, Rgb([120, 120, 120]));
    let radius = 2usize;
    let outcome = render(&source, &index, config(radius as u32, 1), 7).unwrap();

    let grid = &outcome.placements;
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let here = grid.get(x, y).unwrap();
            let forced = outcome.fallback_cells.contains(&[x, y]);
            for ny in y.saturating_sub(radius)..=(y + radius).min(grid.height() - 1) {
                for nx in x.saturating_sub(radius)..=(x + radius).min(grid.width() - 1) {
                    if (nx, ny) == (x, y) {
                        continue;
                    }
                    if grid.get(nx, ny) == Some(here) {
                        // A repeat inside the window is only legal when the
                        // exhaustion fallback fired for one of the two cells
                        assert!(
                            forced || outcome.fallback_cells.contains(&[nx, ny]),
                            "tiles repeat at ({x},{y}) and ({nx},{ny}) without fallback"
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn test_fixed_seed_reproduces_the_placement_grid() {
    let tiles = tempfile::tempdir().unwrap();
    for i in 0..30u8 {
        write_solid_tile(
            tiles.path(),
            &format!("tile_{i:02}.png"),
            [i * 8, 128, 255 - i * 8],
        );
    }
    let index = ColorIndex::build_from(tiles.path()).unwrap();
    let source = block_source(4, 4);

    let first = render(&source, &index, config(2, 1), 1234).unwrap();
    let second = render(&source, &index, config(2, 1), 1234).unwrap();

    assert_eq!(first.placements, second.placements);
    assert_eq!(first.fallback_cells, second.fallback_cells);
}
