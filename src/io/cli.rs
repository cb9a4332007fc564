//! Command-line interface and run orchestration

use crate::index::ColorIndex;
use crate::io::cache;
use crate::io::configuration::{
    CACHE_FILE_NAME, DEFAULT_NO_REPEAT_RADIUS, DEFAULT_OUTPUT_FILE, DEFAULT_SCALE_FACTOR,
    DEFAULT_SEED, DEFAULT_TILES_DIR,
};
use crate::io::error::Result;
use crate::io::image::{open_rgb, save_jpeg};
use crate::io::progress::ProgressReporter;
use crate::mosaic::composer::{MosaicComposer, MosaicConfig};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "photomosaic")]
#[command(
    author,
    version,
    about = "Reconstruct an image as a mosaic of small tile images"
)]
/// Command-line arguments for the mosaic renderer
pub struct Cli {
    /// Source image to reconstruct
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Folder containing the tile images
    #[arg(short, long, default_value = DEFAULT_TILES_DIR)]
    pub tiles: PathBuf,

    /// Output file (JPEG)
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Exact cache file to use or create (defaults to one inside the tiles folder)
    #[arg(long)]
    pub cache: Option<PathBuf>,

    /// Force rebuilding the color index even if a cache exists
    #[arg(long)]
    pub rebuild: bool,

    /// Anti-repeat radius in grid cells, 0-12 (0 disables)
    #[arg(long = "no-repeat", default_value_t = DEFAULT_NO_REPEAT_RADIUS)]
    pub no_repeat_radius: u32,

    /// Final tile size multiplier
    #[arg(long, default_value_t = DEFAULT_SCALE_FACTOR)]
    pub scale: u32,

    /// Random seed for reproducible tile selection
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Cache file location, honoring the explicit override
    pub fn cache_path(&self) -> PathBuf {
        self.cache
            .clone()
            .unwrap_or_else(|| self.tiles.join(CACHE_FILE_NAME))
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Orchestrates cache load-or-build, rendering, and export
pub struct MosaicRunner {
    cli: Cli,
}

impl MosaicRunner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the full pipeline: index, render, save
    ///
    /// # Errors
    ///
    /// Returns an error if the tiles directory is invalid, the source image
    /// cannot be loaded, configuration is out of range, rendering fails, or
    /// the output cannot be written.
    // Allow print for user-facing diagnostics on stderr
    #[allow(clippy::print_stderr)]
    pub fn run(&self) -> Result<()> {
        let index = self.load_or_build_index()?;
        if !self.cli.quiet {
            eprintln!(
                "Database ready: {} colors, {} tiles",
                index.color_count(),
                index.tile_count()
            );
        }

        let source = open_rgb(&self.cli.source)?;
        let config = MosaicConfig {
            no_repeat_radius: self.cli.no_repeat_radius,
            scale_factor: self.cli.scale,
            ..MosaicConfig::default()
        };
        let mut composer = MosaicComposer::new(config, self.cli.seed)?;

        let (grid_width, grid_height) = config.grid_dimensions(source.width(), source.height());
        let progress = self.cli.should_show_progress().then(|| {
            ProgressReporter::new((grid_width * grid_height) as u64, "Placing tiles")
        });
        let outcome = composer.render(&source, &index, progress.as_ref())?;
        if let Some(reporter) = &progress {
            reporter.finish();
        }

        save_jpeg(&outcome.canvas, &self.cli.output)?;
        if !self.cli.quiet {
            eprintln!(
                "Mosaic saved to {} ({} cells, {} fallback placements)",
                self.cli.output.display(),
                grid_width * grid_height,
                outcome.fallback_cells.len()
            );
        }
        Ok(())
    }

    // Allow print for cache diagnostics on stderr
    #[allow(clippy::print_stderr)]
    fn load_or_build_index(&self) -> Result<ColorIndex> {
        let cache_path = self.cli.cache_path();

        if !self.cli.rebuild {
            if let Some(index) = cache::load_index(&cache_path) {
                if !self.cli.quiet {
                    eprintln!(
                        "Cache loaded from {} ({} colors)",
                        cache_path.display(),
                        index.color_count()
                    );
                }
                return Ok(index);
            }
        }

        let files = ColorIndex::collect_tile_files(&self.cli.tiles)?;
        if !self.cli.quiet {
            eprintln!(
                "Building database from {} images in {}",
                files.len(),
                self.cli.tiles.display()
            );
        }
        let progress = self
            .cli
            .should_show_progress()
            .then(|| ProgressReporter::new(files.len() as u64, "Indexing tiles"));
        let index = ColorIndex::build_from_files(files, progress.as_ref());
        if let Some(reporter) = &progress {
            reporter.finish();
        }

        // The cache is an optimization; failing to write it is not fatal
        match cache::save_index(&index, &cache_path) {
            Ok(()) => {
                if !self.cli.quiet {
                    eprintln!("Cache saved to {}", cache_path.display());
                }
            }
            Err(err) => {
                if !self.cli.quiet {
                    eprintln!(
                        "Warning: failed to save cache to {}: {err}",
                        cache_path.display()
                    );
                }
            }
        }

        Ok(index)
    }
}
