//! The tile compute-cache: lazy per-tile computation behind an LRU store.
//!
//! This module is the center of the crate. A [`TileComputeCache`] owns the
//! fixed strip partition of a scene, a bounded access-ordered collection of
//! [`TileDataBlock`]s, and the producer hook. Filling a query window walks
//! the partition, resolves each intersecting tile (cache hit, or produce and
//! validate), and stitches the per-tile contributions into the caller's
//! destination buffer.
//!
//! # Cache Key
//!
//! Tiles are keyed by their [`Rect`] in the partition; the partition is
//! total, so a tile rectangle identifies a tile unambiguously.
//!
//! # Eviction
//!
//! The cache is bounded by a count of distinct tile keys. Admitting a new
//! tile at capacity evicts the least-recently-used resident tile and
//! disposes its block. Recency is updated on every access, so a hot tile is
//! never evicted merely because other tiles are being requested.

use std::hash::Hash;
use std::num::NonZeroUsize;

use lru::LruCache;
use serde::Serialize;
use tracing::{debug, trace};

use crate::error::CacheError;
use crate::geom::{linear_index, Rect};

use super::block::TileDataBlock;
use super::producer::TileProducer;

// =============================================================================
// Cache Statistics
// =============================================================================

/// Counters describing cache behavior since construction.
///
/// `hits` and `misses` count tile admissions (per tile, per fill);
/// `producer_calls` counts producer invocations, which can be lower than
/// `misses` in whole-tile mode where one call populates every band.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Tile lookups that found a resident block
    pub hits: u64,

    /// Tile lookups that admitted a new block
    pub misses: u64,

    /// Blocks evicted to stay within capacity
    pub evictions: u64,

    /// Producer invocations
    pub producer_calls: u64,
}

// =============================================================================
// Tile Compute Cache
// =============================================================================

/// Bounded compute-cache over the strip tiles of one scene.
///
/// Owned by a [`RasterComputeEngine`](crate::RasterComputeEngine); not
/// internally synchronized. `fill` takes `&mut self`, so unsynchronized
/// sharing across threads is unrepresentable; callers that need sharing
/// wrap the owning engine in their own lock.
///
/// [`fill`](TileComputeCache::fill) is the single read path; everything else
/// is observability and lifecycle.
pub struct TileComputeCache<B> {
    /// Scene bounds; every query must lie inside
    scene: Rect,

    /// The fixed strip partition, in top-to-bottom order
    tiles: Vec<Rect>,

    /// Resident blocks in access order, bounded by capacity
    blocks: LruCache<Rect, TileDataBlock<B>>,

    /// The computation hook, fixed at construction
    producer: TileProducer<B>,

    /// Behavior counters
    stats: CacheStats,
}

impl<B> TileComputeCache<B>
where
    B: Clone + Eq + Hash + std::fmt::Debug,
{
    /// Create a cache over `tiles` (the precomputed partition of `scene`)
    /// holding at most `capacity` resident blocks.
    pub fn new(
        scene: Rect,
        tiles: Vec<Rect>,
        capacity: NonZeroUsize,
        producer: TileProducer<B>,
    ) -> Self {
        Self {
            scene,
            tiles,
            blocks: LruCache::new(capacity),
            producer,
            stats: CacheStats::default(),
        }
    }

    /// Fill `dest` with the samples of `band` over the `query` window.
    ///
    /// Walks the partition in order; for every tile intersecting `query`,
    /// resolves the tile's block (producing it on demand), validates the
    /// producer's buffer contract, and copies the intersection into `dest`.
    /// `dest` is laid out row-major over `query` with index 0 at the
    /// query's top-left corner.
    ///
    /// # Errors
    ///
    /// - [`CacheError::QueryOutOfBounds`] if `query` is not fully inside
    ///   the scene (queries are never clipped)
    /// - [`CacheError::DestinationTooSmall`] if `dest` is shorter than the
    ///   query area
    /// - [`CacheError::Producer`] if the producer fails; the source error
    ///   is propagated unchanged
    /// - [`CacheError::BandNotPopulated`] / [`CacheError::SampleCountMismatch`]
    ///   if the producer returns without honoring the buffer contract
    ///
    /// On any error the offending tile is removed from the cache, so a
    /// subsequent call retries it cleanly. Rows already copied for earlier
    /// tiles remain in `dest`; validation runs before any copying for the
    /// failing tile, so an invalid buffer never reaches `dest`.
    pub fn fill(&mut self, band: &B, query: Rect, dest: &mut [f32]) -> Result<(), CacheError> {
        if !self.scene.contains(&query) {
            return Err(CacheError::QueryOutOfBounds {
                query,
                scene: self.scene,
            });
        }

        let required = query.area();
        if dest.len() < required {
            return Err(CacheError::DestinationTooSmall {
                required,
                actual: dest.len(),
            });
        }

        trace!(query = %query, band = ?band, "filling query window");

        let Self {
            tiles,
            blocks,
            producer,
            stats,
            ..
        } = self;
        let capacity = blocks.cap().get();

        for &tile in tiles.iter() {
            let Some(ix) = tile.intersection(&query) else {
                continue;
            };

            // Admission. The victim is popped before the new block goes in,
            // so the block being populated is always most-recently-used and
            // never its own admission's victim.
            if blocks.contains(&tile) {
                stats.hits += 1;
            } else {
                if blocks.len() >= capacity {
                    if let Some((victim, mut victim_block)) = blocks.pop_lru() {
                        debug!(tile = %victim, "evicting least recently used tile");
                        victim_block.dispose();
                        stats.evictions += 1;
                    }
                }
                stats.misses += 1;
            }
            let block = blocks.get_or_insert_mut(tile, || TileDataBlock::new(tile));

            // Compute on demand.
            if block.get(band).is_none() {
                stats.producer_calls += 1;
                debug!(tile = %tile, band = ?band, producer = producer.name(), "computing tile");

                let result = match producer {
                    TileProducer::WholeTile { compute, .. } => compute(tile, &mut *block),
                    TileProducer::SingleBand { compute, .. } => compute(band, tile, &mut *block),
                };
                if let Err(source) = result {
                    // Leave the tile absent, not partially populated.
                    blocks.pop(&tile);
                    return Err(CacheError::Producer {
                        producer: producer.name().to_string(),
                        tile,
                        source,
                    });
                }
            }

            // Validate the buffer contract before copying anything for this
            // tile. A wrong-length buffer would corrupt the index arithmetic
            // below silently.
            let expected = tile.area();
            let buffer = match block.get(band) {
                Some(buffer) if buffer.len() == expected => buffer,
                Some(buffer) => {
                    let actual = buffer.len();
                    blocks.pop(&tile);
                    return Err(CacheError::SampleCountMismatch {
                        producer: producer.name().to_string(),
                        tile,
                        expected,
                        actual,
                    });
                }
                None => {
                    blocks.pop(&tile);
                    return Err(CacheError::BandNotPopulated {
                        producer: producer.name().to_string(),
                        tile,
                    });
                }
            };

            copy_window(buffer, tile, ix, query, dest);
        }

        Ok(())
    }

    /// The fixed strip partition this cache serves.
    pub fn tile_rects(&self) -> &[Rect] {
        &self.tiles
    }

    /// Scene bounds.
    pub fn scene(&self) -> Rect {
        self.scene
    }

    /// Number of currently resident tiles.
    pub fn resident_tiles(&self) -> usize {
        self.blocks.len()
    }

    /// Maximum number of resident tiles.
    pub fn capacity(&self) -> usize {
        self.blocks.cap().get()
    }

    /// Whether `tile` is resident, without updating LRU order.
    pub fn is_resident(&self, tile: &Rect) -> bool {
        self.blocks.contains(tile)
    }

    /// Behavior counters since construction.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Drop every resident block. Counters are kept.
    pub fn clear(&mut self) {
        for (_, block) in self.blocks.iter_mut() {
            block.dispose();
        }
        self.blocks.clear();
    }

    /// Release all resident blocks; the cache is empty afterwards.
    pub fn dispose(&mut self) {
        self.clear();
    }
}

impl<B> std::fmt::Debug for TileComputeCache<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TileComputeCache")
            .field("scene", &self.scene)
            .field("tiles", &self.tiles.len())
            .field("resident", &self.blocks.len())
            .field("capacity", &self.blocks.cap().get())
            .field("producer", &self.producer.name())
            .field("stats", &self.stats)
            .finish()
    }
}

// =============================================================================
// Stitching
// =============================================================================

/// Copy the `ix` window of a tile buffer into the destination buffer.
///
/// `src` is laid out row-major over `tile`, `dest` row-major over `query`;
/// `ix` is their non-empty intersection. When the intersection spans the
/// full width of both layouts the rows are contiguous on both sides and one
/// bulk copy suffices; otherwise rows are copied one at a time.
fn copy_window(src: &[f32], tile: Rect, ix: Rect, query: Rect, dest: &mut [f32]) {
    let row_len = ix.width as usize;

    if ix.width == tile.width && ix.width == query.width {
        let src_start = linear_index(ix.x, ix.y, &tile);
        let dest_start = linear_index(ix.x, ix.y, &query);
        let len = row_len * ix.height as usize;
        dest[dest_start..dest_start + len].copy_from_slice(&src[src_start..src_start + len]);
        return;
    }

    for row in 0..ix.height {
        let src_start = linear_index(ix.x, ix.y + row, &tile);
        let dest_start = linear_index(ix.x, ix.y + row, &query);
        dest[dest_start..dest_start + row_len]
            .copy_from_slice(&src[src_start..src_start + row_len]);
    }
}

// =============================================================================
// Tests
// =============================================================================
