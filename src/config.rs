//! Engine configuration.
//!
//! An [`EngineConfig`] fixes the two tuning knobs of an engine: the strip
//! tile height and the resident-tile capacity of the cache. Both have
//! defaults that suit mid-sized scenes; hosts embedding the engine can
//! carry the config in their own configuration files via serde.
//!
//! # Example
//!
//! ```
//! use raster_tile_cache::EngineConfig;
//!
//! let config = EngineConfig::default()
//!     .with_tile_height(64)
//!     .with_cache_capacity(32);
//!
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// =============================================================================
// Default Values
// =============================================================================

/// Default strip tile height in rows.
pub const DEFAULT_TILE_HEIGHT: u32 = 40;

/// Default cache capacity in resident tiles.
pub const DEFAULT_CACHE_CAPACITY: usize = 15;

// =============================================================================
// Engine Configuration
// =============================================================================

/// Tuning knobs for a [`RasterComputeEngine`](crate::RasterComputeEngine).
///
/// `tile_height` trades cache granularity against per-tile overhead: taller
/// strips mean fewer producer calls for large reads but coarser eviction.
/// `cache_capacity` bounds the number of resident tiles (a count of tile
/// keys, not bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum height of each strip tile in rows.
    pub tile_height: u32,

    /// Maximum number of tiles resident in the cache.
    pub cache_capacity: usize,
}

impl EngineConfig {
    /// Create a configuration with the default tile height and capacity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the strip tile height.
    pub fn with_tile_height(mut self, tile_height: u32) -> Self {
        self.tile_height = tile_height;
        self
    }

    /// Set the resident-tile capacity.
    pub fn with_cache_capacity(mut self, cache_capacity: usize) -> Self {
        self.cache_capacity = cache_capacity;
        self
    }

    /// Check that the configuration can drive an engine.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTileHeight`] for a zero tile height
    /// and [`ConfigError::InvalidCacheCapacity`] for a zero capacity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tile_height == 0 {
            return Err(ConfigError::InvalidTileHeight(self.tile_height));
        }
        if self.cache_capacity == 0 {
            return Err(ConfigError::InvalidCacheCapacity(self.cache_capacity));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tile_height: DEFAULT_TILE_HEIGHT,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}
