//! The public read entry point over a tiled raster.
//!
//! A [`RasterComputeEngine`] binds a scene's dimensions, a strip partition
//! and a bounded tile cache to one producer, and serves arbitrary window
//! reads through [`read_into`](RasterComputeEngine::read_into).

use std::hash::Hash;
use std::num::NonZeroUsize;

use tracing::debug;

use crate::config::EngineConfig;
use crate::error::{CacheError, ConfigError};
use crate::geom::{NeighborhoodCalculator, Rect, TilePartitioner};
use crate::tile::{CacheStats, TileComputeCache, TileProducer};

/// Windowed read access to a lazily computed, band-structured raster.
///
/// The engine is configured once per raster: scene dimensions, a fixed
/// strip partition and a cache capacity are chosen at construction and the
/// producer mode (whole-tile or single-band) is fixed for the engine's
/// lifetime. Reads may use any window inside the scene; tile computation
/// and caching are transparent.
///
/// # Example
///
/// ```
/// use raster_tile_cache::{RasterComputeEngine, Rect, TileProducer};
///
/// let producer = TileProducer::single_band("constant", |band: &&str, _tile, block| {
///     block.create_or_get(band).fill(1.0);
///     Ok(())
/// });
///
/// let mut engine = RasterComputeEngine::new(100, 100, producer)?;
///
/// let window = Rect::new(10, 30, 20, 20);
/// let mut samples = vec![0.0; window.area()];
/// engine.read_into(&"radiance", window, &mut samples)?;
///
/// assert!(samples.iter().all(|&s| s == 1.0));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct RasterComputeEngine<B> {
    scene: Rect,
    tile_height: u32,
    cache: TileComputeCache<B>,
}

impl<B> RasterComputeEngine<B>
where
    B: Clone + Eq + Hash + std::fmt::Debug,
{
    /// Create an engine with the default tile height and cache capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSceneSize`] if either dimension is
    /// zero.
    pub fn new(
        scene_width: u32,
        scene_height: u32,
        producer: TileProducer<B>,
    ) -> Result<Self, ConfigError> {
        Self::with_config(scene_width, scene_height, EngineConfig::default(), producer)
    }

    /// Create an engine with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if either scene dimension, the tile
    /// height, or the cache capacity is zero.
    pub fn with_config(
        scene_width: u32,
        scene_height: u32,
        config: EngineConfig,
        producer: TileProducer<B>,
    ) -> Result<Self, ConfigError> {
        if scene_width == 0 || scene_height == 0 {
            return Err(ConfigError::InvalidSceneSize {
                width: scene_width,
                height: scene_height,
            });
        }
        config.validate()?;
        let capacity = NonZeroUsize::new(config.cache_capacity)
            .ok_or(ConfigError::InvalidCacheCapacity(config.cache_capacity))?;

        let scene = Rect::from_size(scene_width, scene_height);
        let tiles: Vec<Rect> =
            TilePartitioner::new(scene_width, scene_height, config.tile_height).collect();

        debug!(
            scene = %scene,
            tiles = tiles.len(),
            tile_height = config.tile_height,
            capacity = config.cache_capacity,
            producer = producer.name(),
            "raster compute engine ready"
        );

        Ok(Self {
            scene,
            tile_height: config.tile_height,
            cache: TileComputeCache::new(scene, tiles, capacity, producer),
        })
    }

    /// Read the samples of `band` over `window` into `dest`.
    ///
    /// `dest` is laid out row-major over `window` with index 0 at the
    /// window's top-left corner and must hold at least `window.area()`
    /// samples. Tiles intersecting the window are computed on demand and
    /// cached; see [`TileComputeCache::fill`] for the error contract.
    pub fn read_into(
        &mut self,
        band: &B,
        window: Rect,
        dest: &mut [f32],
    ) -> Result<(), CacheError> {
        self.cache.fill(band, window, dest)
    }

    /// The scene rectangle this engine serves.
    pub fn scene(&self) -> Rect {
        self.scene
    }

    /// Configured strip tile height in rows.
    pub fn tile_height(&self) -> u32 {
        self.tile_height
    }

    /// Number of strips in the partition.
    pub fn tile_count(&self) -> usize {
        self.cache.tile_rects().len()
    }

    /// The fixed strip partition, top to bottom.
    pub fn tile_rects(&self) -> &[Rect] {
        self.cache.tile_rects()
    }

    /// Number of currently resident tiles.
    pub fn resident_tiles(&self) -> usize {
        self.cache.resident_tiles()
    }

    /// Cache behavior counters since construction.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drop every resident tile; subsequent reads recompute.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// A margin calculator clamped to this engine's scene, for producers
    /// that read a halo of context pixels from an upstream source.
    pub fn neighborhood(&self) -> NeighborhoodCalculator {
        NeighborhoodCalculator::new(self.scene)
    }

    /// Consume the engine, releasing the cache and all resident blocks.
    pub fn dispose(mut self) {
        self.cache.dispose();
    }
}

impl<B> std::fmt::Debug for RasterComputeEngine<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterComputeEngine")
            .field("scene", &self.scene)
            .field("tile_height", &self.tile_height)
            .field("cache", &self.cache)
            .finish()
    }
}
