use crate::{camera::Camera, map::OccupancyGrid};

/// World-space unit intent from camera-relative axes.
///
/// `forward` follows the facing direction, `strafe` follows the view plane (positive is
/// toward the right edge of the screen). The sum is normalized so diagonals are no faster
/// than axial moves; zero input yields a zero vector.
pub fn intent_from_axes(camera: &Camera, forward: f64, strafe: f64) -> [f64; 2] {
    let [dx, dy] = camera.dir();
    // right-hand perpendicular, same orientation as the view plane
    let right = [-dy, dx];

    let mx = dx * forward + right[0] * strafe;
    let my = dy * forward + right[1] * strafe;

    let len = (mx * mx + my * my).sqrt();
    if len <= f64::EPSILON {
        return [0.0, 0.0];
    }
    [mx / len, my / len]
}

/// Axis-separated collision: returns the camera position after moving `intent * speed`.
///
/// X is tested against the current row, then Y against the already-resolved column, so
/// the camera slides along walls and never ends inside one.
pub fn resolve(grid: &OccupancyGrid, camera: &Camera, intent: [f64; 2], speed: f64) -> [f64; 2] {
    let [mut x, mut y] = camera.pos;
    let cand_x = x + intent[0] * speed;
    let cand_y = y + intent[1] * speed;

    if !grid.is_wall(cand_x.floor() as i32, y.floor() as i32) {
        x = cand_x;
    }
    if !grid.is_wall(x.floor() as i32, cand_y.floor() as i32) {
        y = cand_y;
    }
    [x, y]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::DEFAULT_HALF_FOV_SCALE;
    use std::f64::consts::FRAC_1_SQRT_2;

    fn corridor() -> OccupancyGrid {
        "#####\n#...#\n#.###\n#####\n".parse().unwrap()
    }

    fn cam(pos: [f64; 2]) -> Camera {
        Camera::new(pos, 0.0, DEFAULT_HALF_FOV_SCALE)
    }

    #[test]
    fn free_move_applies_both_axes() {
        let grid = corridor();
        let pos = resolve(&grid, &cam([1.5, 1.5]), [1.0, 0.0], 0.25);
        assert_eq!(pos, [1.75, 1.5]);
    }

    #[test]
    fn blocked_axis_holds_and_other_slides() {
        let grid = corridor();
        // up-right from the corridor: y is blocked by the top wall, x slides
        let c = cam([2.5, 1.2]);
        let pos = resolve(&grid, &c, [FRAC_1_SQRT_2, -FRAC_1_SQRT_2], 0.5);
        assert!((pos[0] - (2.5 + 0.5 * FRAC_1_SQRT_2)).abs() < 1e-12);
        assert_eq!(pos[1], 1.2);
    }

    #[test]
    fn head_on_wall_does_not_move() {
        let grid = corridor();
        let c = cam([3.5, 1.5]);
        assert_eq!(resolve(&grid, &c, [1.0, 0.0], 0.6), [3.5, 1.5]);
    }

    #[test]
    fn diagonal_into_corner_never_enters_wall() {
        // (2,2) is a wall; moving from (1.9,1.9) toward it must not end there.
        let grid = corridor();
        let c = cam([1.9, 1.9]);
        let [x, y] = resolve(&grid, &c, [FRAC_1_SQRT_2, FRAC_1_SQRT_2], 0.2);
        assert!(!grid.is_wall(x.floor() as i32, y.floor() as i32));
    }

    #[test]
    fn intent_is_normalized() {
        let c = cam([0.0, 0.0]);
        assert_eq!(intent_from_axes(&c, 0.0, 0.0), [0.0, 0.0]);
        assert_eq!(intent_from_axes(&c, 1.0, 0.0), [1.0, 0.0]);
        // strafe right is along +y when facing +x (matches the view plane)
        assert_eq!(intent_from_axes(&c, 0.0, 1.0), [0.0, 1.0]);

        let [x, y] = intent_from_axes(&c, 1.0, -1.0);
        assert!(((x * x + y * y).sqrt() - 1.0).abs() < 1e-12);
        assert!((x - FRAC_1_SQRT_2).abs() < 1e-12 && (y + FRAC_1_SQRT_2).abs() < 1e-12);
    }
}
