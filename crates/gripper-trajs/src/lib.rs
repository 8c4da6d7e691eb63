//! High-level facade for the `gripper-trajs-*` workspace.
//!
//! This crate ties the pieces together for batch evaluation of a
//! gripper-detection pipeline:
//! - load per-sequence detection records and robot-state annotations
//! - reconstruct end-effector trajectories ([`gripper_trajs_core`])
//! - render bounding-box overlays and trajectory images
//!   ([`gripper_trajs_render`])
//! - assemble per-sequence GIFs and export a keypoint dataset for
//!   fine-tuning
//!
//! ## Quickstart
//!
//! ```no_run
//! use gripper_trajs::eval::{run_eval, EvalConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = EvalConfig::new("detections/", "annotations/", "out/");
//! let summary = run_eval(&config)?;
//! println!("{} sequences, {} failed", summary.sequences, summary.failures);
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - [`core`]: detection/trajectory types and algorithms.
//! - [`render`]: raster drawing of trajectories and overlays.
//! - [`annotations`] / [`detections`]: JSON record loading.
//! - [`eval`]: per-sequence evaluation runs (overlays + trajectory images).
//! - [`gif`]: animated GIF assembly from rendered trajectory frames.
//! - [`dataset`]: JSONL keypoint export.

pub use gripper_trajs_core as core;
pub use gripper_trajs_render as render;

pub use gripper_trajs_core::{
    merge_detections, BoundingBox, Detection, PixelPoint, Trajectory, TrajectoryBuilder,
    TrajectoryKeypoints, TrajectoryParams,
};
pub use gripper_trajs_render::{OverlayStyle, TrajectoryStyle};

pub mod annotations;
pub mod dataset;
pub mod detections;
pub mod eval;
pub mod gif;
