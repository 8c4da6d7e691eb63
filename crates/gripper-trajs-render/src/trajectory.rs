use gripper_trajs_core::{GripperEventKind, Trajectory};
use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};

use crate::draw::{draw_hollow_circle_mut, draw_line_mut};

/// Colors and stroke settings for trajectory rendering.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TrajectoryStyle {
    /// Stroke width of path segments and event markers.
    pub thickness: u32,
    /// Radius of the open/close marker circles.
    pub marker_radius: i32,
    pub close_color: [u8; 3],
    pub open_color: [u8; 3],
}

impl Default for TrajectoryStyle {
    fn default() -> Self {
        Self {
            thickness: 2,
            marker_radius: 5,
            close_color: [0, 255, 0],
            open_color: [0, 0, 255],
        }
    }
}

/// Red-channel intensity for segment `index` out of `total` points.
///
/// Scales linearly with `(index + 1) / total`, so the path fades in from
/// near-black at the start of the window to full red at the end.
pub fn segment_intensity(index: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let scaled = (index + 1) as f64 / total as f64 * 255.0;
    scaled.round().clamp(0.0, 255.0) as u8
}

/// Draw the trajectory path and its open/close markers onto `img`.
///
/// A degenerate trajectory (no observed points) draws nothing.
pub fn render_trajectory(img: &mut RgbImage, trajectory: &Trajectory, style: &TrajectoryStyle) {
    let points = &trajectory.points;

    for i in 0..points.len().saturating_sub(1) {
        let color = Rgb([segment_intensity(i, points.len()), 0, 0]);
        draw_line_mut(img, points[i], points[i + 1], color, style.thickness);
    }

    for event in &trajectory.events {
        let color = match event.kind {
            GripperEventKind::Close => Rgb(style.close_color),
            GripperEventKind::Open => Rgb(style.open_color),
        };
        draw_hollow_circle_mut(img, event.point, style.marker_radius, color, style.thickness);
    }
}
