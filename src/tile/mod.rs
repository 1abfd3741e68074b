//! Tile cache layer.
//!
//! This module provides the lazily computed, size-bounded tile store that
//! windowed raster reads are served from.
//!
//! # Architecture
//!
//! The cache sits between the read entry point and the caller's producer:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          RasterComputeEngine            │
//! └────────────────────┬────────────────────┘
//!                      │ fill(band, query, dest)
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │            TileComputeCache             │
//! │  ┌──────────────┐  ┌─────────────────┐  │
//! │  │ LRU blocks   │  │  stitch copy    │  │
//! │  │ (per-tile    │  │  (tile-local →  │  │
//! │  │  band store) │  │   query-local)  │  │
//! │  └──────────────┘  └─────────────────┘  │
//! └────────────────────┬────────────────────┘
//!                      │ compute(tile, block)
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │       TileProducer (caller code)        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`TileComputeCache`]: tile selection, lazy computation, LRU eviction,
//!   contract validation, result stitching
//! - [`TileDataBlock`]: per-tile band → sample-buffer store
//! - [`TileProducer`]: the two producer calling conventions (whole-tile /
//!   single-band)
//! - [`CacheStats`]: hit/miss/eviction/producer-call counters

mod block;
mod cache;
mod producer;

pub use block::TileDataBlock;
pub use cache::{CacheStats, TileComputeCache};
pub use producer::{SingleBandFn, TileProducer, WholeTileFn};
