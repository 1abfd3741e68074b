//! Producer hooks: the pluggable computation behind the cache.
//!
//! A producer fills tile buffers on demand. Two calling conventions exist
//! and are fixed per engine instance: *whole-tile* producers compute every
//! band of a tile in one call, *single-band* producers compute exactly the
//! band that was requested. The cache invokes the matching hook exclusively
//! and validates the result afterwards.

use std::fmt;

use crate::error::ProducerError;
use crate::geom::Rect;

use super::block::TileDataBlock;

/// Whole-tile computation hook: fills every band of `tile` into the block.
pub type WholeTileFn<B> =
    Box<dyn FnMut(Rect, &mut TileDataBlock<B>) -> Result<(), ProducerError> + Send>;

/// Single-band computation hook: fills exactly the requested band.
pub type SingleBandFn<B> =
    Box<dyn FnMut(&B, Rect, &mut TileDataBlock<B>) -> Result<(), ProducerError> + Send>;

/// The tile computation supplied by the caller, in one of two shapes.
///
/// The shape is chosen once, at engine construction. Closures are `FnMut`,
/// so a producer may carry state (an upstream reader, invocation counters
/// in tests). The `name` identifies the producer in computation-contract
/// faults and trace events.
///
/// On return from either hook, `block.get(band)` must be populated with
/// exactly `tile.width * tile.height` samples for the requested band;
/// the cache fails the fill otherwise.
///
/// # Example
///
/// ```
/// use raster_tile_cache::TileProducer;
///
/// let producer: TileProducer<&str> = TileProducer::single_band("ramp", |band, _tile, block| {
///     let buffer = block.create_or_get(band);
///     for (i, sample) in buffer.iter_mut().enumerate() {
///         *sample = i as f32;
///     }
///     Ok(())
/// });
///
/// assert_eq!(producer.name(), "ramp");
/// assert!(!producer.is_whole_tile());
/// ```
pub enum TileProducer<B> {
    /// Computes every band of a tile in a single call.
    WholeTile {
        /// Diagnostic label quoted in faults
        name: String,
        /// The computation hook
        compute: WholeTileFn<B>,
    },

    /// Computes exactly one band of a tile per call.
    SingleBand {
        /// Diagnostic label quoted in faults
        name: String,
        /// The computation hook
        compute: SingleBandFn<B>,
    },
}

impl<B> TileProducer<B> {
    /// Create a whole-tile producer.
    pub fn whole_tile<F>(name: impl Into<String>, compute: F) -> Self
    where
        F: FnMut(Rect, &mut TileDataBlock<B>) -> Result<(), ProducerError> + Send + 'static,
    {
        Self::WholeTile {
            name: name.into(),
            compute: Box::new(compute),
        }
    }

    /// Create a single-band producer.
    pub fn single_band<F>(name: impl Into<String>, compute: F) -> Self
    where
        F: FnMut(&B, Rect, &mut TileDataBlock<B>) -> Result<(), ProducerError> + Send + 'static,
    {
        Self::SingleBand {
            name: name.into(),
            compute: Box::new(compute),
        }
    }

    /// The producer's diagnostic name.
    pub fn name(&self) -> &str {
        match self {
            Self::WholeTile { name, .. } => name,
            Self::SingleBand { name, .. } => name,
        }
    }

    /// Whether this producer computes all bands of a tile per call.
    pub fn is_whole_tile(&self) -> bool {
        matches!(self, Self::WholeTile { .. })
    }
}

impl<B> fmt::Debug for TileProducer<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (variant, name) = match self {
            Self::WholeTile { name, .. } => ("WholeTile", name),
            Self::SingleBand { name, .. } => ("SingleBand", name),
        };
        f.debug_struct("TileProducer")
            .field("mode", &variant)
            .field("name", name)
            .finish()
    }
}
