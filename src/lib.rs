//! # Raster Tile Cache
//!
//! A bounded compute-cache for tiled rasters.
//!
//! This library lets a large two-dimensional raster, decomposed into named
//! data layers (*bands*), be read through arbitrary rectangular windows
//! while the actual pixel values are computed lazily, in fixed-size strip
//! tiles, by a pluggable producer. Computed tiles are kept in a bounded LRU
//! cache so repeated or overlapping reads avoid recomputation.
//!
//! ## Features
//!
//! - **Windowed reads**: query any rectangle inside the scene, aligned to
//!   tile boundaries or not; results are stitched across tiles
//! - **Lazy, at-most-once computation**: the producer runs only for tiles
//!   (and bands) that are actually read, once per residency
//! - **Bounded memory**: resident tiles are capped and evicted in
//!   least-recently-used order
//! - **Validated producer contract**: a producer that returns the wrong
//!   number of samples fails the read instead of corrupting it
//! - **Two producer shapes**: compute all bands of a tile in one call, or
//!   exactly the requested band
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`geom`] - rectangles, the strip partitioner, halo expansion
//! - [`tile`] - the tile cache, per-tile band blocks, producer hooks
//! - [`engine`] - the public read entry point, [`RasterComputeEngine`]
//! - [`config`] - engine configuration and defaults
//! - [`error`] - configuration and fill error types
//!
//! ## Example
//!
//! ```
//! use raster_tile_cache::{EngineConfig, RasterComputeEngine, Rect, TileProducer};
//!
//! // A producer that fills each pixel with its absolute row index.
//! let producer = TileProducer::single_band("row-index", |band: &&str, tile, block| {
//!     let buffer = block.create_or_get(band);
//!     for row in 0..tile.height {
//!         for col in 0..tile.width {
//!             buffer[(row * tile.width + col) as usize] = (tile.y + row) as f32;
//!         }
//!     }
//!     Ok(())
//! });
//!
//! let config = EngineConfig::default().with_tile_height(40).with_cache_capacity(15);
//! let mut engine = RasterComputeEngine::with_config(100, 100, config, producer)?;
//!
//! // A window straddling the first two strips
//! let window = Rect::new(10, 30, 20, 20);
//! let mut samples = vec![0.0; window.area()];
//! engine.read_into(&"elevation", window, &mut samples)?;
//!
//! assert_eq!(samples[0], 30.0);            // first window row
//! assert_eq!(samples[19 * 20], 49.0);      // last window row
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod geom;
pub mod tile;

// Re-export commonly used types
pub use config::{EngineConfig, DEFAULT_CACHE_CAPACITY, DEFAULT_TILE_HEIGHT};
pub use engine::RasterComputeEngine;
pub use error::{CacheError, ConfigError, ProducerError};
pub use geom::{linear_index, NeighborhoodCalculator, Rect, TilePartitioner};
pub use tile::{CacheStats, SingleBandFn, TileComputeCache, TileDataBlock, TileProducer, WholeTileFn};
