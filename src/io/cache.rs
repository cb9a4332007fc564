//! Color index cache persistence
//!
//! The cache is a versioned JSON document: a list of entries mapping an
//! average color (three integers) to the absolute paths of the tiles sharing
//! it. Any load failure — missing file, unreadable data, schema mismatch —
//! is a cache miss that triggers a rebuild, never a fatal error.

use crate::index::{AverageColor, ColorIndex};
use crate::io::configuration::CACHE_FORMAT_VERSION;
use crate::io::error::{MosaicError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize)]
struct CacheEntry {
    color: AverageColor,
    tiles: Vec<PathBuf>,
}

#[derive(Serialize, Deserialize)]
struct CacheFile {
    version: u32,
    entries: Vec<CacheEntry>,
}

/// Load a previously saved index from `path`
///
/// Returns `None` when the cache is absent, corrupt, or written by an
/// incompatible schema version.
pub fn load_index(path: &Path) -> Option<ColorIndex> {
    let file = File::open(path).ok()?;
    let cache: CacheFile = serde_json::from_reader(BufReader::new(file)).ok()?;
    if cache.version != CACHE_FORMAT_VERSION {
        return None;
    }
    Some(ColorIndex::from_entries(
        cache
            .entries
            .into_iter()
            .map(|entry| (entry.color, entry.tiles)),
    ))
}

/// Save the index to `path`, creating parent directories as needed
///
/// Entries are sorted by color key so the file content is stable for a given
/// index.
///
/// # Errors
///
/// Returns a filesystem error if the directory, file, or write fails.
pub fn save_index(index: &ColorIndex, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| MosaicError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }

    let mut entries: Vec<CacheEntry> = index
        .iter_colors()
        .map(|(color, ids)| CacheEntry {
            color,
            tiles: ids
                .iter()
                .filter_map(|&id| index.path(id))
                .map(Path::to_path_buf)
                .collect(),
        })
        .collect();
    entries.sort_by_key(|entry| entry.color);

    let file = File::create(path).map_err(|e| MosaicError::FileSystem {
        path: path.to_path_buf(),
        operation: "create file",
        source: e,
    })?;
    let writer = BufWriter::new(file);
    serde_json::to_writer(
        writer,
        &CacheFile {
            version: CACHE_FORMAT_VERSION,
            entries,
        },
    )
    .map_err(|e| MosaicError::FileSystem {
        path: path.to_path_buf(),
        operation: "write cache",
        source: e.into(),
    })
}
