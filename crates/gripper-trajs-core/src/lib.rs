//! Core types and algorithms for gripper trajectory reconstruction.
//!
//! This crate is intentionally small and purely computational. It does *not*
//! depend on any image codec or inference backend: detections come in as
//! plain bounding boxes, the gripper-width signal as a slice of floats, and
//! the output is a [`Trajectory`] of integer pixel points plus open/close
//! events ready for a renderer.

mod bbox;
mod logger;
mod trajectory;
mod width;

pub use bbox::{merge_detections, BoundingBox, Detection, PixelPoint};
pub use trajectory::{
    extract_center_points, fill_center_point_gaps, nearest_present_point, GripperEvent,
    GripperEventKind, Trajectory, TrajectoryBuilder, TrajectoryError, TrajectoryKeypoints,
    TrajectoryParams,
};
pub use width::{realign_width_series, GripperState, GripperStateTracker, WidthSample};

pub use logger::init_with_level;
