//! Halo expansion and buffer addressing for tile-local reads.
//!
//! Producers that need context pixels around their target window (for
//! convolution kernels, resampling and the like) expand the target by a
//! fixed margin before requesting data upstream. The expansion is clamped
//! to the scene so a request never reaches outside the raster.

use super::Rect;

/// Expands target rectangles by fixed margins, clamped to the scene.
///
/// # Example
///
/// ```
/// use raster_tile_cache::{NeighborhoodCalculator, Rect};
///
/// let calc = NeighborhoodCalculator::new(Rect::from_size(100, 100));
/// let source = calc.expand(Rect::new(0, 40, 100, 40), 3, 3);
///
/// // Clamped at the left/right scene edges, grown above and below
/// assert_eq!(source, Rect::new(0, 37, 100, 46));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct NeighborhoodCalculator {
    scene: Rect,
}

impl NeighborhoodCalculator {
    /// Create a calculator clamping to the given scene rectangle.
    pub fn new(scene: Rect) -> Self {
        Self { scene }
    }

    /// The scene rectangle this calculator clamps to.
    pub fn scene(&self) -> Rect {
        self.scene
    }

    /// Grow `target` by `margin_x` columns on the left and right and
    /// `margin_y` rows above and below, then clamp the result to the scene.
    ///
    /// For a `target` inside the scene the result always contains `target`
    /// and never exceeds the scene bounds.
    pub fn expand(&self, target: Rect, margin_x: u32, margin_y: u32) -> Rect {
        let x0 = target.x.saturating_sub(margin_x).max(self.scene.x);
        let y0 = target.y.saturating_sub(margin_y).max(self.scene.y);
        let x1 = target
            .right()
            .saturating_add(margin_x)
            .min(self.scene.right());
        let y1 = target
            .bottom()
            .saturating_add(margin_y)
            .min(self.scene.bottom());

        Rect::new(x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0))
    }
}

/// Linear offset of the absolute pixel `(x, y)` in a buffer laid out
/// row-major over `rect`.
///
/// The caller must pass a pixel inside `rect`; anything else is a caller
/// error (debug-asserted).
#[inline]
pub fn linear_index(x: u32, y: u32, rect: &Rect) -> usize {
    debug_assert!(
        rect.contains_point(x, y),
        "pixel ({x}, {y}) outside rect {rect}"
    );
    (y - rect.y) as usize * rect.width as usize + (x - rect.x) as usize
}
