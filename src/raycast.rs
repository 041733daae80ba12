use crate::{camera::Camera, map::OccupancyGrid};

/// Which family of grid lines the ray crossed last before the hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Crossed a vertical line (constant x): east/west face.
    X,
    /// Crossed a horizontal line (constant y): north/south face.
    Y,
}

/// Result of tracing one screen column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance along the camera's forward axis, not Euclidean. No fisheye.
    pub perp_dist: f64,
    pub side: Side,
    pub step: [i32; 2],
    /// Cell that stopped the ray; may lie outside the grid.
    pub map: [i32; 2],
}

/// Smallest reported distance. A camera standing on a grid line next to a wall would
/// otherwise get `0.0 / negative`, i.e. `-0.0`.
pub const MIN_PERP_DIST: f64 = 1e-6;

/// Normalized camera-space x for a column, in [-1, 1).
#[inline]
pub fn camera_x(column: usize, total_columns: usize) -> f64 {
    2.0 * column as f64 / total_columns as f64 - 1.0
}

/// Ray direction for a column: a linear blend of `dir` and `plane`.
#[inline]
pub fn ray_dir(camera: &Camera, column: usize, total_columns: usize) -> [f64; 2] {
    let cx = camera_x(column, total_columns);
    let dir = camera.dir();
    let plane = camera.plane();
    [dir[0] + plane[0] * cx, dir[1] + plane[1] * cx]
}

pub fn cast_column(
    grid: &OccupancyGrid,
    camera: &Camera,
    column: usize,
    total_columns: usize,
) -> RayHit {
    cast_ray(grid, camera.pos, ray_dir(camera, column, total_columns))
}

/// DDA grid traversal from `origin` along `ray`.
///
/// A zero ray component gives an infinite `delta` on that axis, so it never wins the
/// `side_dist` comparison. Out-of-bounds cells are walls, so the loop terminates on any
/// finite grid.
pub fn cast_ray(grid: &OccupancyGrid, origin: [f64; 2], ray: [f64; 2]) -> RayHit {
    let [px, py] = origin;
    let mut map_x = px.floor() as i32;
    let mut map_y = py.floor() as i32;

    let delta_x = (1.0 / ray[0]).abs();
    let delta_y = (1.0 / ray[1]).abs();

    let (step_x, mut side_x) = initial_side(px, map_x, ray[0], delta_x);
    let (step_y, mut side_y) = initial_side(py, map_y, ray[1], delta_y);

    let side = loop {
        let side = if side_x < side_y {
            side_x += delta_x;
            map_x += step_x;
            Side::X
        } else {
            side_y += delta_y;
            map_y += step_y;
            Side::Y
        };
        if grid.is_wall(map_x, map_y) {
            break side;
        }
    };

    let perp_dist = match side {
        Side::X => (map_x as f64 - px + (1 - step_x) as f64 / 2.0) / ray[0],
        Side::Y => (map_y as f64 - py + (1 - step_y) as f64 / 2.0) / ray[1],
    }
    .max(MIN_PERP_DIST);

    RayHit {
        perp_dist,
        side,
        step: [step_x, step_y],
        map: [map_x, map_y],
    }
}

#[inline]
fn initial_side(pos: f64, cell: i32, ray: f64, delta: f64) -> (i32, f64) {
    // 0 * inf is NaN when the origin sits on a grid line; keep it infinite instead.
    if delta.is_infinite() {
        return (if ray < 0.0 { -1 } else { 1 }, f64::INFINITY);
    }
    if ray < 0.0 {
        (-1, (pos - cell as f64) * delta)
    } else {
        (1, (cell as f64 + 1.0 - pos) * delta)
    }
}
