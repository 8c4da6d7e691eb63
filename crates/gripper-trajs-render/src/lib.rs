//! Raster rendering for gripper trajectory evaluation.
//!
//! Draws reconstructed trajectories and detection overlays onto
//! `image::RgbImage` buffers with plain line/circle/rectangle primitives.
//! Everything mutates the target image in place; callers own decoding and
//! encoding.

mod draw;
mod overlay;
mod trajectory;

pub use draw::{draw_hollow_circle_mut, draw_hollow_rect_mut, draw_line_mut};
pub use overlay::{render_detection, OverlayStyle};
pub use trajectory::{render_trajectory, segment_intensity, TrajectoryStyle};
