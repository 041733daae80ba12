use crate::{
    camera::Camera,
    map::OccupancyGrid,
    projector::{DrawSpan, project},
    raycast::cast_column,
};

/// Casts every column in index order and appends one span per column to `spans`.
///
/// `spans` is cleared first so the caller can reuse its allocation across frames.
pub fn compose_frame_into(
    spans: &mut Vec<DrawSpan>,
    grid: &OccupancyGrid,
    camera: &Camera,
    width: usize,
    height: usize,
) {
    spans.clear();
    spans.reserve(width);
    for column in 0..width {
        let hit = cast_column(grid, camera, column, width);
        spans.push(project(&hit, column, height));
    }
}

pub fn compose_frame(
    grid: &OccupancyGrid,
    camera: &Camera,
    width: usize,
    height: usize,
) -> Vec<DrawSpan> {
    let mut spans = Vec::with_capacity(width);
    compose_frame_into(&mut spans, grid, camera, width, height);
    spans
}
