//! Windowed-read stitching tests.
//!
//! Tests verify:
//! - A window inside a single tile round-trips exactly
//! - Windows straddling tile boundaries equal the per-tile contributions
//!   concatenated by row
//! - The bulk copy fast path and the row-by-row path produce identical data

use raster_tile_cache::{EngineConfig, Rect};

use super::test_utils::{assert_window, init_tracing, ramp_engine, read, sample, SCENE_HEIGHT, SCENE_WIDTH};

fn default_config() -> EngineConfig {
    EngineConfig::default()
}

// =============================================================================
// Single-Tile Round Trip
// =============================================================================

#[test]
fn test_window_inside_one_tile() {
    init_tracing();
    let (mut engine, calls) = ramp_engine(default_config());

    let window = Rect::new(5, 10, 8, 4);
    let dest = read(&mut engine, "b", window);

    assert_window(&dest, "b", window);
    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[test]
fn test_window_equals_whole_tile() {
    let (mut engine, _) = ramp_engine(default_config());

    let window = Rect::new(0, 40, SCENE_WIDTH, 40);
    let dest = read(&mut engine, "b", window);

    assert_window(&dest, "b", window);
}

#[test]
fn test_one_pixel_window() {
    let (mut engine, _) = ramp_engine(default_config());

    let window = Rect::new(73, 91, 1, 1);
    let dest = read(&mut engine, "b", window);

    assert_eq!(dest, vec![sample("b", 73, 91)]);
}

// =============================================================================
// Cross-Tile Stitching
// =============================================================================

#[test]
fn test_window_straddling_two_tiles() {
    let (mut engine, calls) = ramp_engine(default_config());

    let window = Rect::new(10, 30, 20, 20);
    let dest = read(&mut engine, "b", window);

    assert_window(&dest, "b", window);
    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 2);

    // Row 0 of the destination comes from the first strip, row 10 from the
    // second: the boundary crossing is at window row 10 (absolute y = 40).
    assert_eq!(dest[0], sample("b", 10, 30));
    assert_eq!(dest[10 * 20], sample("b", 10, 40));
}

#[test]
fn test_window_straddling_matches_independent_tile_reads() {
    let (mut engine, _) = ramp_engine(default_config());

    let straddling = Rect::new(25, 35, 30, 10);
    let combined = read(&mut engine, "b", straddling);

    // Read the two halves independently and concatenate by row
    let upper = read(&mut engine, "b", Rect::new(25, 35, 30, 5));
    let lower = read(&mut engine, "b", Rect::new(25, 40, 30, 5));
    let mut expected = upper;
    expected.extend_from_slice(&lower);

    assert_eq!(combined, expected);
}

#[test]
fn test_window_spanning_all_tiles() {
    let (mut engine, calls) = ramp_engine(default_config());

    let window = Rect::new(40, 0, 10, SCENE_HEIGHT);
    let dest = read(&mut engine, "b", window);

    assert_window(&dest, "b", window);
    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 3);
}

#[test]
fn test_full_scene_read() {
    let (mut engine, _) = ramp_engine(default_config());

    let window = Rect::from_size(SCENE_WIDTH, SCENE_HEIGHT);
    let dest = read(&mut engine, "b", window);

    assert_window(&dest, "b", window);
}

#[test]
fn test_window_on_clipped_last_strip() {
    let (mut engine, _) = ramp_engine(default_config());

    // The last strip is only 20 rows tall (y 80..100)
    let window = Rect::new(30, 85, 40, 15);
    let dest = read(&mut engine, "b", window);

    assert_window(&dest, "b", window);
}

// =============================================================================
// Fast Path vs Row Path
// =============================================================================

#[test]
fn test_bulk_and_row_paths_agree() {
    // Full-width window: bulk path. Narrow window over the same rows: row
    // path. Every shared pixel must be identical.
    let (mut engine, _) = ramp_engine(default_config());

    let full = Rect::new(0, 20, SCENE_WIDTH, 30);
    let narrow = Rect::new(15, 20, 50, 30);

    let bulk = read(&mut engine, "b", full);
    let rows = read(&mut engine, "b", narrow);

    for row in 0..30u32 {
        for col in 0..50u32 {
            let from_bulk = bulk[(row * SCENE_WIDTH + 15 + col) as usize];
            let from_rows = rows[(row * 50 + col) as usize];
            assert_eq!(from_bulk, from_rows, "pixel ({col}, {row})");
        }
    }
}

#[test]
fn test_repeated_overlapping_windows_are_consistent() {
    let (mut engine, _) = ramp_engine(default_config());

    let first = read(&mut engine, "b", Rect::new(10, 30, 20, 20));
    let second = read(&mut engine, "b", Rect::new(10, 30, 20, 20));
    assert_eq!(first, second);

    // A shifted overlap agrees on the shared region
    let shifted = read(&mut engine, "b", Rect::new(15, 35, 20, 20));
    assert_window(&shifted, "b", Rect::new(15, 35, 20, 20));
}
