//! Color-indexed tile database with nearest-color lookup

use crate::index::color::{self, AverageColor};
use crate::io::configuration::RECOGNIZED_EXTENSIONS;
use crate::io::error::{MosaicError, Result};
use crate::io::progress::ProgressReporter;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Opaque handle identifying one tile in the index
///
/// Indexes into the path arena owned by [`ColorIndex`]; the index never
/// retains decoded pixel data, only identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u32);

/// Mapping from quantized average color to the set of tiles sharing it
///
/// Built once per tile-folder snapshot and read-only during a render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorIndex {
    /// Arena of tile paths, in directory enumeration order
    tiles: Vec<PathBuf>,
    /// Color key to ids of tiles whose average color equals the key
    by_color: HashMap<AverageColor, Vec<TileId>>,
}

impl ColorIndex {
    /// Build an index by scanning `directory` for recognized tile images
    ///
    /// Per-tile decode failures exclude the tile, never the whole build.
    /// An empty result is not an error at this layer; it surfaces later as
    /// [`MosaicError::EmptyCorpus`] at render time.
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::TilesDirectory`] if `directory` does not exist
    /// or is not a directory, or a filesystem error if it cannot be read.
    pub fn build_from(directory: &Path) -> Result<Self> {
        let files = Self::collect_tile_files(directory)?;
        Ok(Self::build_from_files(files, None))
    }

    /// Enumerate files directly under `directory` with a recognized extension
    ///
    /// Subdirectories and unrecognized extensions are ignored. Results are
    /// sorted so index construction order is reproducible across runs.
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::TilesDirectory`] if `directory` is missing or
    /// not a directory, or a filesystem error if enumeration fails.
    pub fn collect_tile_files(directory: &Path) -> Result<Vec<PathBuf>> {
        if !directory.is_dir() {
            return Err(MosaicError::TilesDirectory {
                path: directory.to_path_buf(),
            });
        }

        // Canonicalize so the index stores absolute paths; a cached index
        // must stay valid when the process is later run from elsewhere.
        let folder = directory
            .canonicalize()
            .map_err(|e| MosaicError::FileSystem {
                path: directory.to_path_buf(),
                operation: "resolve directory",
                source: e,
            })?;

        let entries = std::fs::read_dir(&folder).map_err(|e| MosaicError::FileSystem {
            path: folder.clone(),
            operation: "read directory",
            source: e,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| MosaicError::FileSystem {
                    path: folder.clone(),
                    operation: "read directory entry",
                    source: e,
                })?
                .path();
            if path.is_file() && has_recognized_extension(&path) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Index the given files, skipping any that fail to decode
    pub fn build_from_files(files: Vec<PathBuf>, progress: Option<&ProgressReporter>) -> Self {
        let mut index = Self::default();
        for path in files {
            if let Ok(avg) = color::tile_average_color(&path) {
                index.insert(avg, path);
            }
            if let Some(reporter) = progress {
                reporter.advance();
            }
        }
        index
    }

    /// Reassemble an index from persisted (color, paths) entries
    pub fn from_entries(entries: impl IntoIterator<Item = (AverageColor, Vec<PathBuf>)>) -> Self {
        let mut index = Self::default();
        for (avg, paths) in entries {
            for path in paths {
                index.insert(avg, path);
            }
        }
        index
    }

    fn insert(&mut self, avg: AverageColor, path: PathBuf) -> TileId {
        let id = TileId(self.tiles.len() as u32);
        self.tiles.push(path);
        self.by_color.entry(avg).or_default().push(id);
        id
    }

    /// Tiles whose average color equals `avg` exactly (possibly empty)
    pub fn lookup_exact(&self, avg: AverageColor) -> &[TileId] {
        self.by_color.get(&avg).map_or(&[], Vec::as_slice)
    }

    /// Every tile in the index; the last-resort fallback pool
    pub fn all_tiles(&self) -> Vec<TileId> {
        (0..self.tiles.len() as u32).map(TileId).collect()
    }

    /// Up to `limit` distinct color keys ranked by squared RGB distance
    ///
    /// Full scan over all keys; the key count is bounded by the tile corpus
    /// size, not by image resolution. Distance ties break on the smaller
    /// color key so the ranking is reproducible across runs.
    pub fn nearest_colors(&self, target: AverageColor, limit: usize) -> Vec<AverageColor> {
        let mut ranked: Vec<(u32, AverageColor)> = self
            .by_color
            .keys()
            .map(|&key| (key.distance_squared(target), key))
            .collect();
        ranked.sort_unstable();
        ranked.truncate(limit);
        ranked.into_iter().map(|(_, key)| key).collect()
    }

    /// Path of the tile identified by `id`
    pub fn path(&self, id: TileId) -> Option<&Path> {
        self.tiles.get(id.0 as usize).map(PathBuf::as_path)
    }

    /// Number of indexed tiles
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Number of distinct average colors
    pub fn color_count(&self) -> usize {
        self.by_color.len()
    }

    /// Whether the index holds no tiles at all
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Iterate over (color, tile set) entries in arbitrary order
    pub fn iter_colors(&self) -> impl Iterator<Item = (AverageColor, &[TileId])> + '_ {
        self.by_color
            .iter()
            .map(|(&avg, ids)| (avg, ids.as_slice()))
    }
}

/// Check a path against the fixed, case-insensitive extension allow-list
fn has_recognized_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let lower = ext.to_ascii_lowercase();
            RECOGNIZED_EXTENSIONS.iter().any(|known| *known == lower)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(colors: &[[u8; 3]]) -> ColorIndex {
        ColorIndex::from_entries(colors.iter().enumerate().map(|(i, &c)| {
            (
                AverageColor(c),
                vec![PathBuf::from(format!("tile_{i}.png"))],
            )
        }))
    }

    #[test]
    fn test_extension_allow_list_is_case_insensitive() {
        assert!(has_recognized_extension(Path::new("a.png")));
        assert!(has_recognized_extension(Path::new("b.JPEG")));
        assert!(has_recognized_extension(Path::new("c.WebP")));
        assert!(!has_recognized_extension(Path::new("d.txt")));
        assert!(!has_recognized_extension(Path::new("noextension")));
    }

    #[test]
    fn test_nearest_colors_ranked_by_distance() {
        let index = index_of(&[[0, 0, 0], [100, 100, 100], [255, 255, 255]]);
        let ranked = index.nearest_colors(AverageColor::new(10, 10, 10), 3);
        assert_eq!(
            ranked,
            vec![
                AverageColor::new(0, 0, 0),
                AverageColor::new(100, 100, 100),
                AverageColor::new(255, 255, 255),
            ]
        );
    }

    #[test]
    fn test_nearest_colors_respects_limit_and_breaks_ties() {
        // Both keys are equidistant from the target; the smaller key wins
        let index = index_of(&[[20, 0, 0], [0, 0, 0]]);
        let ranked = index.nearest_colors(AverageColor::new(10, 0, 0), 1);
        assert_eq!(ranked, vec![AverageColor::new(0, 0, 0)]);
    }

    #[test]
    fn test_lookup_exact_is_partitioned_by_color() {
        let index = index_of(&[[1, 2, 3], [1, 2, 3], [9, 9, 9]]);
        // from_entries assigns one id per entry; same color merges into one key
        assert_eq!(index.color_count(), 2);
        assert_eq!(index.tile_count(), 3);
        assert_eq!(index.lookup_exact(AverageColor::new(1, 2, 3)).len(), 2);
        assert_eq!(index.lookup_exact(AverageColor::new(9, 9, 9)).len(), 1);
        assert!(index.lookup_exact(AverageColor::new(0, 0, 0)).is_empty());
    }
}
