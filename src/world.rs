use crate::{
    camera::Camera,
    frame::compose_frame_into,
    map::OccupancyGrid,
    movement::{intent_from_axes, resolve},
    projector::DrawSpan,
};

/// What the input backend hands the simulation for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub rotation: f64, // radians, already scaled by dt / sensitivity
    pub forward: f64,  // -1, 0 or +1
    pub strafe: f64,   // -1, 0 or +1
}

/// Frame-loop context: the only owner of the map and the viewpoint.
pub struct World {
    pub grid: OccupancyGrid,
    pub camera: Camera,
    pub move_speed: f64, // grid units per second
}

impl World {
    pub fn new(grid: OccupancyGrid, camera: Camera, move_speed: f64) -> Self {
        Self {
            grid,
            camera,
            move_speed,
        }
    }

    /// Rotation, basis recompute, then collision-checked movement.
    pub fn advance(&mut self, input: &FrameInput, dt_s: f64) {
        self.camera.rotate(input.rotation);
        self.camera.recompute_basis();

        if input.forward != 0.0 || input.strafe != 0.0 {
            let intent = intent_from_axes(&self.camera, input.forward, input.strafe);
            self.camera.pos = resolve(&self.grid, &self.camera, intent, self.move_speed * dt_s);
        }
    }

    pub fn compose_frame(&self, spans: &mut Vec<DrawSpan>, width: usize, height: usize) {
        compose_frame_into(spans, &self.grid, &self.camera, width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::DEFAULT_HALF_FOV_SCALE;
    use std::f64::consts::FRAC_PI_2;

    fn world() -> World {
        let grid: OccupancyGrid = "######\n#....#\n#....#\n######\n".parse().unwrap();
        let camera = Camera::new([1.5, 1.5], 0.0, DEFAULT_HALF_FOV_SCALE);
        World::new(grid, camera, 2.0)
    }

    #[test]
    fn rotation_is_applied_before_movement() {
        let mut w = world();
        let input = FrameInput {
            rotation: FRAC_PI_2,
            forward: 1.0,
            strafe: 0.0,
        };
        w.advance(&input, 0.25);
        // now facing +y; half a unit down the column
        assert!((w.camera.pos[0] - 1.5).abs() < 1e-9);
        assert!((w.camera.pos[1] - 2.0).abs() < 1e-9);
        assert!((w.camera.dir()[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn idle_frame_keeps_position() {
        let mut w = world();
        w.advance(&FrameInput::default(), 0.1);
        assert_eq!(w.camera.pos, [1.5, 1.5]);
    }

    #[test]
    fn composes_full_width() {
        let w = world();
        let mut spans = Vec::new();
        w.compose_frame(&mut spans, 80, 60);
        assert_eq!(spans.len(), 80);
    }
}
