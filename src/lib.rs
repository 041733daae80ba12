//! Grid-map raycaster: per-column DDA wall casting over an occupancy grid, plus the
//! window-side adapters (input sampling, framebuffer fill, upscale, overlay sprite).

pub mod camera;
pub mod frame;
pub mod map;
pub mod movement;
pub mod projector;
pub mod raycast;
pub mod world;

pub mod assets;
pub mod config;
pub mod input;
pub mod renderer;
pub mod scaler;
