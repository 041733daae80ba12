use std::path::PathBuf;

use anyhow::{Result, ensure};
use clap::Parser;

use crate::camera::{DEFAULT_HALF_FOV_SCALE, half_fov_scale_from_degrees};
use crate::input::InputTuning;

/// First-person grid-map raycaster.
#[derive(Debug, Clone, Parser)]
#[command(name = "rat-hunt", version)]
pub struct Config {
    /// Map file: rows of `#` (wall) and `.` (open); `;` starts a comment line
    #[arg(value_name = "MAP")]
    pub map: PathBuf,

    /// Internal framebuffer width, one ray per column
    #[arg(long, default_value_t = 640)]
    pub width: usize,

    /// Internal framebuffer height
    #[arg(long, default_value_t = 480)]
    pub height: usize,

    /// View-plane scale; field of view is 2 * atan(scale)
    #[arg(long, default_value_t = DEFAULT_HALF_FOV_SCALE, conflicts_with = "fov_degrees")]
    pub fov_scale: f64,

    /// Horizontal field of view in degrees, instead of --fov-scale
    #[arg(long)]
    pub fov_degrees: Option<f64>,

    /// Movement speed in grid cells per second
    #[arg(long, default_value_t = 3.0)]
    pub move_speed: f64,

    /// Arrow-key turn speed in radians per second
    #[arg(long, default_value_t = 3.0)]
    pub turn_speed: f64,

    /// Radians of rotation per pixel of mouse motion
    #[arg(long, default_value_t = 0.002)]
    pub mouse_sensitivity: f64,

    /// PNG drawn as the weapon overlay
    #[arg(long, value_name = "PNG")]
    pub weapon: Option<PathBuf>,

    /// Preferred spawn position; falls back to the first open cell
    #[arg(long, value_name = "X,Y", value_parser = parse_point, default_value = "1.5,1.5")]
    pub spawn: [f64; 2],
}

fn parse_point(s: &str) -> Result<[f64; 2], String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got {s:?}"))?;
    let x = x.trim().parse::<f64>().map_err(|e| e.to_string())?;
    let y = y.trim().parse::<f64>().map_err(|e| e.to_string())?;
    Ok([x, y])
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.width >= 2 && self.height >= 2,
            "framebuffer must be at least 2x2, got {}x{}",
            self.width,
            self.height
        );
        match self.fov_degrees {
            Some(deg) => {
                ensure!(
                    deg > 0.0 && deg < 180.0,
                    "--fov-degrees must be in (0, 180), got {deg}"
                );
            }
            None => {
                ensure!(
                    self.fov_scale.is_finite() && self.fov_scale > 0.0,
                    "--fov-scale must be positive, got {}",
                    self.fov_scale
                );
            }
        }
        for (name, v) in [
            ("--move-speed", self.move_speed),
            ("--turn-speed", self.turn_speed),
            ("--mouse-sensitivity", self.mouse_sensitivity),
        ] {
            ensure!(v.is_finite() && v >= 0.0, "{name} must be non-negative, got {v}");
        }
        Ok(())
    }

    pub fn half_fov_scale(&self) -> f64 {
        self.fov_degrees
            .map(half_fov_scale_from_degrees)
            .unwrap_or(self.fov_scale)
    }

    pub fn input_tuning(&self) -> InputTuning {
        InputTuning {
            turn_speed: self.turn_speed,
            mouse_sensitivity: self.mouse_sensitivity,
        }
    }
}
