//! Per-tile band store.
//!
//! A [`TileDataBlock`] holds the sample buffers of exactly one tile
//! rectangle, one buffer per band. Buffers are allocated lazily on first
//! write; the tile rectangle is fixed at construction and equals the
//! block's key in the tile cache.

use std::collections::HashMap;
use std::hash::Hash;

use crate::geom::Rect;

/// Keyed store holding the per-band sample buffers of one tile.
///
/// A buffer, once created, has length exactly `rect.width * rect.height`
/// as long as the producer honors its contract; the cache validates this
/// after every producer call. Blocks are created on a cache miss and
/// destroyed when evicted or when the cache is disposed.
///
/// # Example
///
/// ```
/// use raster_tile_cache::{Rect, TileDataBlock};
///
/// let mut block: TileDataBlock<&str> = TileDataBlock::new(Rect::new(0, 0, 4, 2));
///
/// let buffer = block.create_or_get(&"radiance");
/// buffer[0] = 1.5;
///
/// assert_eq!(block.get(&"radiance").unwrap().len(), 8);
/// assert!(block.get(&"reflectance").is_none());
/// ```
#[derive(Debug)]
pub struct TileDataBlock<B> {
    rect: Rect,
    bands: HashMap<B, Vec<f32>>,
}

impl<B> TileDataBlock<B>
where
    B: Clone + Eq + Hash,
{
    /// Create an empty block for the given tile rectangle.
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            bands: HashMap::new(),
        }
    }

    /// The tile rectangle this block stores samples for.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Samples of `band`, or `None` if the band has not been populated.
    pub fn get(&self, band: &B) -> Option<&[f32]> {
        self.bands.get(band).map(Vec::as_slice)
    }

    /// The buffer for `band`, allocating a zero-filled buffer of the tile's
    /// area on first use.
    ///
    /// Returns the existing buffer unchanged when the band is already
    /// present. Producers fill the returned buffer in place.
    pub fn create_or_get(&mut self, band: &B) -> &mut Vec<f32> {
        let len = self.rect.area();
        self.bands
            .entry(band.clone())
            .or_insert_with(|| vec![0.0; len])
    }

    /// Store a caller-built buffer for `band`, replacing any existing one.
    ///
    /// No length check happens here; the cache validates the sample count
    /// against the tile area after the producer returns.
    pub fn insert(&mut self, band: B, samples: Vec<f32>) {
        self.bands.insert(band, samples);
    }

    /// Number of bands currently populated.
    pub fn band_count(&self) -> usize {
        self.bands.len()
    }

    /// Whether no band has been populated yet.
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Release all band buffers.
    ///
    /// Invoked by the cache when the block is evicted and on dispose.
    pub fn dispose(&mut self) {
        self.bands.clear();
        self.bands.shrink_to_fit();
    }
}
