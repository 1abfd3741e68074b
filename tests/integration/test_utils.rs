//! Test utilities for integration tests.
//!
//! Provides deterministic producers whose invocation counts are observable
//! through shared atomic counters, plus small read helpers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use raster_tile_cache::{EngineConfig, RasterComputeEngine, Rect, TileProducer};

/// Scene used by most scenarios: 100x100 pixels, 40-row strips, so the
/// partition is T0 = (0,0,100,40), T1 = (0,40,100,40), T2 = (0,80,100,20).
pub const SCENE_WIDTH: u32 = 100;
pub const SCENE_HEIGHT: u32 = 100;
pub const TILE_HEIGHT: u32 = 40;

pub const T0: Rect = Rect {
    x: 0,
    y: 0,
    width: 100,
    height: 40,
};
pub const T1: Rect = Rect {
    x: 0,
    y: 40,
    width: 100,
    height: 40,
};
pub const T2: Rect = Rect {
    x: 0,
    y: 80,
    width: 100,
    height: 20,
};

/// Deterministic sample value for `band` at the absolute pixel `(x, y)`.
///
/// Values stay well below 2^24 so every one of them is exact in `f32`.
pub fn sample(band: &str, x: u32, y: u32) -> f32 {
    (band.len() as u32 * 250_000 + y * 1_000 + x) as f32
}

/// Fill one band of a tile with [`sample`] values.
fn fill_band(band: &str, tile: Rect, buffer: &mut [f32]) {
    for row in 0..tile.height {
        for col in 0..tile.width {
            buffer[(row * tile.width + col) as usize] = sample(band, tile.x + col, tile.y + row);
        }
    }
}

/// Engine with a single-band producer writing [`sample`] values, plus the
/// producer's shared invocation counter.
pub fn ramp_engine(
    config: EngineConfig,
) -> (RasterComputeEngine<&'static str>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_in_producer = calls.clone();

    let producer: TileProducer<&'static str> = TileProducer::single_band("ramp", move |band: &&'static str, tile, block| {
        calls_in_producer.fetch_add(1, Ordering::SeqCst);
        fill_band(band, tile, block.create_or_get(band));
        Ok(())
    });

    let engine = RasterComputeEngine::with_config(SCENE_WIDTH, SCENE_HEIGHT, config, producer)
        .expect("valid test configuration");
    (engine, calls)
}

/// Engine with a whole-tile producer filling every band in `bands` per
/// call, plus the producer's shared invocation counter.
pub fn whole_tile_engine(
    bands: &'static [&'static str],
    config: EngineConfig,
) -> (RasterComputeEngine<&'static str>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_in_producer = calls.clone();

    let producer = TileProducer::whole_tile("ramp-all-bands", move |tile, block| {
        calls_in_producer.fetch_add(1, Ordering::SeqCst);
        for band in bands {
            fill_band(band, tile, block.create_or_get(band));
        }
        Ok(())
    });

    let engine = RasterComputeEngine::with_config(SCENE_WIDTH, SCENE_HEIGHT, config, producer)
        .expect("valid test configuration");
    (engine, calls)
}

/// Read `window` of `band` into a fresh buffer.
pub fn read(
    engine: &mut RasterComputeEngine<&'static str>,
    band: &'static str,
    window: Rect,
) -> Vec<f32> {
    let mut dest = vec![0.0; window.area()];
    engine
        .read_into(&band, window, &mut dest)
        .expect("read inside scene bounds");
    dest
}

/// Assert that `dest` holds exactly the [`sample`] values of `window`.
pub fn assert_window(dest: &[f32], band: &str, window: Rect) {
    for row in 0..window.height {
        for col in 0..window.width {
            let expected = sample(band, window.x + col, window.y + row);
            let actual = dest[(row * window.width + col) as usize];
            assert_eq!(
                actual, expected,
                "band {band:?}, window {window}, pixel ({col}, {row})"
            );
        }
    }
}

/// Install a test subscriber once; set `RUST_LOG` to see cache trace output.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
