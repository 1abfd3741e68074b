use thiserror::Error;

use crate::geom::Rect;

/// Failure raised by a tile producer, propagated unchanged out of a fill.
pub type ProducerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors detected when constructing an engine or validating its configuration
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Scene dimensions must both be positive
    #[error("Invalid scene size: {width}x{height} (both dimensions must be positive)")]
    InvalidSceneSize { width: u32, height: u32 },

    /// Tile height must be positive
    #[error("Invalid tile height: {0} (must be positive)")]
    InvalidTileHeight(u32),

    /// Cache capacity must admit at least one tile
    #[error("Invalid cache capacity: {0} (must admit at least one tile)")]
    InvalidCacheCapacity(usize),
}

/// Errors that can occur while filling a query window from the tile cache
#[derive(Debug, Error)]
pub enum CacheError {
    /// Query rectangle is not fully contained in the scene.
    ///
    /// Queries are never silently clipped; the caller must request a window
    /// inside the scene bounds.
    #[error("Query {query} exceeds scene bounds {scene}")]
    QueryOutOfBounds { query: Rect, scene: Rect },

    /// Destination buffer is shorter than the query area
    #[error("Destination buffer too small: need {required} samples, got {actual}")]
    DestinationTooSmall { required: usize, actual: usize },

    /// Producer returned without populating the requested band
    #[error("Producer '{producer}' did not populate the requested band for tile {tile}")]
    BandNotPopulated { producer: String, tile: Rect },

    /// Producer populated the band with the wrong number of samples
    #[error("Producer '{producer}' stored {actual} samples for tile {tile}, expected {expected}")]
    SampleCountMismatch {
        producer: String,
        tile: Rect,
        expected: usize,
        actual: usize,
    },

    /// Producer failed while computing a tile
    #[error("Producer '{producer}' failed for tile {tile}: {source}")]
    Producer {
        producer: String,
        tile: Rect,
        #[source]
        source: ProducerError,
    },
}

impl CacheError {
    /// Whether this error is a computation-contract violation: the producer
    /// returned successfully but broke the buffer contract.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            CacheError::BandNotPopulated { .. } | CacheError::SampleCountMismatch { .. }
        )
    }
}
