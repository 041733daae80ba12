use crate::raycast::{RayHit, Side};

/// Vertical extent of one column's wall slice, in framebuffer rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawSpan {
    pub column: usize,
    pub wall_top: usize,
    pub wall_bottom: usize,
    pub orientation: Side,
}

/// Wall slice height in pixels. Zero, negative and infinitely near distances give a
/// saturated height; NaN gives zero.
#[inline]
pub fn line_height(perp_dist: f64, screen_height: usize) -> i64 {
    if perp_dist <= 0.0 {
        return i64::MAX;
    }
    // float -> int `as` casts saturate, inf becomes i64::MAX
    (screen_height as f64 / perp_dist).floor() as i64
}

pub fn project(hit: &RayHit, column: usize, screen_height: usize) -> DrawSpan {
    let h = screen_height as i64;
    let max_row = (h - 1).max(0);
    let line = line_height(hit.perp_dist, screen_height).max(0);

    let top = (h / 2 - line / 2).clamp(0, max_row);
    let bottom = (h / 2 + line / 2).clamp(0, max_row);

    DrawSpan {
        column,
        wall_top: top as usize,
        wall_bottom: bottom as usize,
        orientation: hit.side,
    }
}
