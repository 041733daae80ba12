use std::collections::HashSet;

use winit::event::ElementState;
use winit::keyboard::KeyCode;

use crate::world::FrameInput;

/// Turn rates and mouse sensitivity used when sampling the keyboard/mouse state.
#[derive(Debug, Clone, Copy)]
pub struct InputTuning {
    pub turn_speed: f64,        // rad/s for arrow keys
    pub mouse_sensitivity: f64, // rad per pixel of relative motion
}

/// Held keys plus relative mouse motion accumulated since the last frame.
#[derive(Debug, Default)]
pub struct InputState {
    keys_down: HashSet<KeyCode>,
    mouse_dx: f64,
}

impl InputState {
    pub fn key(&mut self, code: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                self.keys_down.insert(code);
            }
            ElementState::Released => {
                self.keys_down.remove(&code);
            }
        }
    }

    pub fn mouse_motion(&mut self, dx: f64) {
        self.mouse_dx += dx;
    }

    pub fn is_down(&self, code: KeyCode) -> bool {
        self.keys_down.contains(&code)
    }

    /// Samples the current state into a [`FrameInput`] and drains the mouse accumulator.
    pub fn frame_input(&mut self, tuning: &InputTuning, dt_s: f64) -> FrameInput {
        let mut forward = 0.0;
        let mut strafe = 0.0;
        if self.is_down(KeyCode::KeyW) {
            forward += 1.0;
        }
        if self.is_down(KeyCode::KeyS) {
            forward -= 1.0;
        }
        if self.is_down(KeyCode::KeyD) {
            strafe += 1.0;
        }
        if self.is_down(KeyCode::KeyA) {
            strafe -= 1.0;
        }

        // Left and right are separate cases; holding both cancels out.
        let mut turn = 0.0;
        if self.is_down(KeyCode::ArrowLeft) {
            turn -= 1.0;
        }
        if self.is_down(KeyCode::ArrowRight) {
            turn += 1.0;
        }

        let mouse = std::mem::take(&mut self.mouse_dx);
        FrameInput {
            rotation: turn * tuning.turn_speed * dt_s + mouse * tuning.mouse_sensitivity,
            forward,
            strafe,
        }
    }
}
