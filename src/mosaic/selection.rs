//! Candidate selection ladder and seeded random source
//!
//! Selection degrades gracefully through three tiers: exact color match,
//! nearest-color widening when exact matches are sparse, and a uniform
//! whole-corpus sample once the no-repeat filter has excluded everything.
//! Each tier is an independent function so it can be tested in isolation.

use crate::index::{AverageColor, ColorIndex, TileId};
use crate::io::configuration::{
    CANDIDATE_POOL_LIMIT, FALLBACK_SAMPLE_SIZE, NEAREST_COLOR_LIMIT, WIDENING_THRESHOLD,
};
use crate::mosaic::grid::UsedTileGrid;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Seeded random selector for reproducible stochastic choices
///
/// All selection randomness flows through this type; with a fixed seed, a
/// fixed corpus, and a fixed source image, the placement grid is
/// bit-identical across runs.
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform choice from a slice; `None` when the slice is empty
    pub fn choose(&mut self, candidates: &[TileId]) -> Option<TileId> {
        if candidates.is_empty() {
            return None;
        }
        let picked = self.rng.random_range(0..candidates.len());
        candidates.get(picked).copied()
    }

    /// Up to `amount` elements drawn uniformly without replacement
    pub fn sample(&mut self, pool: &[TileId], amount: usize) -> Vec<TileId> {
        let amount = amount.min(pool.len());
        // Partial Fisher-Yates over a scratch copy
        let mut scratch: Vec<TileId> = pool.to_vec();
        for i in 0..amount {
            let j = self.rng.random_range(i..scratch.len());
            scratch.swap(i, j);
        }
        scratch.truncate(amount);
        scratch
    }
}

/// Exact-match candidates, widened with nearest colors when sparse
///
/// When fewer than [`WIDENING_THRESHOLD`] tiles share the target color
/// exactly, the [`NEAREST_COLOR_LIMIT`] closest color keys contribute their
/// full tile sets, stopping once the pool reaches [`CANDIDATE_POOL_LIMIT`].
/// The exact key ranks first among nearest colors, so its tiles may appear
/// twice; duplicates stay, preserving their selection weight.
pub fn gather_candidates(index: &ColorIndex, target: AverageColor) -> Vec<TileId> {
    let mut candidates: Vec<TileId> = index.lookup_exact(target).to_vec();

    if candidates.len() < WIDENING_THRESHOLD {
        for key in index.nearest_colors(target, NEAREST_COLOR_LIMIT) {
            candidates.extend_from_slice(index.lookup_exact(key));
            if candidates.len() >= CANDIDATE_POOL_LIMIT {
                break;
            }
        }
    }

    candidates
}

/// Remove tiles used by earlier cells within the no-repeat window
///
/// A radius of 0 disables the constraint. An already-empty candidate list is
/// left untouched so exhaustion is attributed to the widening tier, not here.
pub fn filter_recent(
    candidates: &mut Vec<TileId>,
    used: &UsedTileGrid,
    x: usize,
    y: usize,
    radius: u32,
) {
    if radius == 0 || candidates.is_empty() {
        return;
    }
    let banned = used.used_within(x, y, radius);
    if banned.is_empty() {
        return;
    }
    candidates.retain(|id| !banned.contains(id));
}

/// Last-resort pool: a uniform sample from the entire corpus
///
/// Ignores color and repeat constraints entirely. Returns at most
/// [`FALLBACK_SAMPLE_SIZE`] tiles; empty only when the corpus itself is empty.
pub fn fallback_candidates(index: &ColorIndex, selector: &mut RandomSelector) -> Vec<TileId> {
    selector.sample(&index.all_tiles(), FALLBACK_SAMPLE_SIZE)
}
