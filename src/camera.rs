/// Default view-plane length relative to the unit direction vector (about 66 degrees FOV).
pub const DEFAULT_HALF_FOV_SCALE: f64 = 0.66;

/// Player viewpoint in grid space.
///
/// `dir` and `plane` are derived from `angle` and only ever written by
/// [`Camera::recompute_basis`]. Horizontal field of view is `2 * atan(half_fov_scale)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub pos: [f64; 2], // (x, y) in grid units, fraction = offset inside the cell
    angle: f64,        // radians, never wrapped
    dir: [f64; 2],
    plane: [f64; 2],
    half_fov_scale: f64,
}

impl Camera {
    pub fn new(pos: [f64; 2], angle: f64, half_fov_scale: f64) -> Self {
        let mut camera = Self {
            pos,
            angle,
            dir: [1.0, 0.0],
            plane: [0.0, half_fov_scale],
            half_fov_scale,
        };
        camera.recompute_basis();
        camera
    }

    /// Adds to the facing angle. The basis is stale until [`Camera::recompute_basis`].
    #[inline]
    pub fn rotate(&mut self, delta: f64) {
        self.angle += delta;
    }

    pub fn recompute_basis(&mut self) {
        let (s, c) = self.angle.sin_cos();
        self.dir = [c, s];
        // perpendicular (-y, x), pointing to the right-hand side of the screen
        self.plane = [-s * self.half_fov_scale, c * self.half_fov_scale];
    }

    #[inline]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    #[inline]
    pub fn dir(&self) -> [f64; 2] {
        self.dir
    }

    #[inline]
    pub fn plane(&self) -> [f64; 2] {
        self.plane
    }

    #[inline]
    pub fn half_fov_scale(&self) -> f64 {
        self.half_fov_scale
    }

    pub fn fov_degrees(&self) -> f64 {
        (2.0 * self.half_fov_scale.atan()).to_degrees()
    }

    /// Grid cell containing the camera.
    #[inline]
    pub fn cell(&self) -> [i32; 2] {
        [self.pos[0].floor() as i32, self.pos[1].floor() as i32]
    }
}

/// View-plane scale that yields the given horizontal field of view.
pub fn half_fov_scale_from_degrees(fov_deg: f64) -> f64 {
    (0.5 * fov_deg.to_radians()).tan()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn basis_follows_angle() {
        let mut cam = Camera::new([1.5, 1.5], 0.0, DEFAULT_HALF_FOV_SCALE);
        assert_eq!(cam.dir(), [1.0, 0.0]);
        assert!(close(cam.plane()[0], 0.0) && close(cam.plane()[1], 0.66));

        cam.rotate(FRAC_PI_2);
        // stale until recomputed
        assert_eq!(cam.dir(), [1.0, 0.0]);
        cam.recompute_basis();
        assert!(close(cam.dir()[0], 0.0) && close(cam.dir()[1], 1.0));
        assert!(close(cam.plane()[0], -0.66) && close(cam.plane()[1], 0.0));
    }

    #[test]
    fn plane_stays_perpendicular_for_unwrapped_angles() {
        let mut cam = Camera::new([0.0, 0.0], 0.0, 0.8);
        for _ in 0..1000 {
            cam.rotate(0.37);
            cam.recompute_basis();
            let [dx, dy] = cam.dir();
            let [px, py] = cam.plane();
            assert!(close(dx * px + dy * py, 0.0));
            assert!(close((dx * dx + dy * dy).sqrt(), 1.0));
            assert!(close((px * px + py * py).sqrt(), 0.8));
        }
        assert!(cam.angle() > 2.0 * PI);
    }

    #[test]
    fn fov_helpers_agree() {
        let scale = half_fov_scale_from_degrees(90.0);
        assert!(close(scale, 1.0));
        let cam = Camera::new([0.0, 0.0], 0.0, DEFAULT_HALF_FOV_SCALE);
        assert!((cam.fov_degrees() - 66.8).abs() < 0.1);
        let cam = Camera::new([0.0, 0.0], 0.0, half_fov_scale_from_degrees(60.0));
        assert!(close(cam.fov_degrees(), 60.0));
    }

    #[test]
    fn cell_floors_position() {
        let cam = Camera::new([2.99, 0.01], 0.0, DEFAULT_HALF_FOV_SCALE);
        assert_eq!(cam.cell(), [2, 0]);
    }
}
