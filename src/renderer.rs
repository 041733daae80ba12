use crate::{assets::Sprite, projector::DrawSpan, raycast::Side};

const OVERLAY_INSET: usize = 40;

#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    // BGRA8 in little-endian memory
    (b as u32) | ((g as u32) << 8) | ((r as u32) << 16)
    // Alpha at 0
}

/// Flat colours for the untextured renderer.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub ceiling: u32,
    pub floor: u32,
    pub wall_x: u32, // east/west faces
    pub wall_y: u32, // north/south faces
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            ceiling: pack_rgb(135, 206, 235),
            floor: pack_rgb(100, 100, 100),
            wall_x: pack_rgb(0, 10, 0),
            wall_y: pack_rgb(152, 133, 88),
        }
    }
}

impl Palette {
    #[inline]
    pub fn wall(&self, side: Side) -> u32 {
        match side {
            Side::X => self.wall_x,
            Side::Y => self.wall_y,
        }
    }
}

/// Fills each span's column: ceiling above `wall_top`, shaded wall, floor below `wall_bottom`.
pub fn render_frame(
    buf: &mut [u32],
    width: usize,
    height: usize,
    spans: &[DrawSpan],
    palette: &Palette,
) {
    debug_assert_eq!(buf.len(), width * height);

    for span in spans {
        let x = span.column;
        if x >= width {
            continue;
        }
        let top = span.wall_top.min(height);
        let bottom = span.wall_bottom.min(height.saturating_sub(1));
        let wall = palette.wall(span.orientation);

        let mut idx = x;
        for y in 0..height {
            buf[idx] = if y < top {
                palette.ceiling
            } else if y <= bottom {
                wall
            } else {
                palette.floor
            };
            idx += width;
        }
    }
}

/// Screen rectangle `(x, y, w, h)` of the weapon overlay: centred, bottom-aligned.
pub fn overlay_rect(width: usize, height: usize) -> Option<(usize, usize, usize, usize)> {
    let w = (width / 2).saturating_sub(OVERLAY_INSET);
    let h = (height / 2).saturating_sub(OVERLAY_INSET);
    if w == 0 || h == 0 {
        return None;
    }
    Some(((width - w) / 2, height - h, w, h))
}

/// Nearest-neighbour blit of `sprite` into the overlay rectangle. Pixels with alpha
/// below one half are skipped.
pub fn draw_overlay(buf: &mut [u32], width: usize, height: usize, sprite: &Sprite) {
    let Some((ox, oy, w, h)) = overlay_rect(width, height) else {
        return;
    };
    if sprite.width == 0 || sprite.height == 0 {
        return;
    }

    for dy in 0..h {
        let sy = dy * sprite.height / h;
        let row = (oy + dy) * width;
        for dx in 0..w {
            let sx = dx * sprite.width / w;
            let px = sprite.get(sx, sy);
            if (px >> 24) < 0x80 {
                continue;
            }
            buf[row + ox + dx] = px & 0x00FF_FFFF;
        }
    }
}
