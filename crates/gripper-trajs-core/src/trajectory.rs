use serde::{Deserialize, Serialize};

use crate::bbox::{Detection, PixelPoint};
use crate::width::{realign_width_series, GripperState, GripperStateTracker, WidthSample};

/// Tunables for trajectory reconstruction.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TrajectoryParams {
    /// Width below which the gripper counts as closed.
    pub close_threshold: f64,
    /// Lead of the width annotation over the camera stream, in steps.
    pub width_offset: usize,
}

impl Default for TrajectoryParams {
    fn default() -> Self {
        Self {
            close_threshold: 0.05,
            width_offset: 4,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum TrajectoryError {
    #[error(
        "realigned width series has {widths} samples but the detection window has {points} frames \
         (start index or annotation record does not match the rollout)"
    )]
    WidthSeriesMismatch { widths: usize, points: usize },
}

/// Open/close transition kind.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum GripperEventKind {
    Close,
    Open,
}

/// One gripper transition, anchored to a trajectory point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GripperEvent {
    /// Segment index within the trajectory window.
    pub index: usize,
    pub point: PixelPoint,
    pub kind: GripperEventKind,
}

/// Reconstructed end-effector path over one rollout window.
///
/// `points` is empty when no frame in the window had a detection; otherwise
/// it has one point per frame, gaps filled from the nearest observed frame.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Trajectory {
    pub points: Vec<PixelPoint>,
    pub widths: Vec<WidthSample>,
    pub events: Vec<GripperEvent>,
    /// Frames in the window with no detection.
    pub missing_detections: usize,
}

impl Trajectory {
    /// Compact summary for dataset export.
    pub fn keypoints(&self) -> TrajectoryKeypoints {
        let close_points = self
            .events
            .iter()
            .filter(|e| e.kind == GripperEventKind::Close)
            .map(|e| e.point)
            .collect();
        let open_points = self
            .events
            .iter()
            .filter(|e| e.kind == GripperEventKind::Open)
            .map(|e| e.point)
            .collect();
        TrajectoryKeypoints {
            path: self.points.clone(),
            close_points,
            open_points,
        }
    }
}

/// Trajectory path plus transition points, stripped of per-frame widths.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryKeypoints {
    pub path: Vec<PixelPoint>,
    pub close_points: Vec<PixelPoint>,
    pub open_points: Vec<PixelPoint>,
}

/// Extract per-frame box midpoints from `start_index` to the end of the
/// rollout. Frames without a detection yield `None`.
pub fn extract_center_points(
    rollout: &[Option<Detection>],
    start_index: usize,
) -> Vec<Option<PixelPoint>> {
    rollout
        .iter()
        .skip(start_index)
        .map(|frame| frame.as_ref().map(|d| d.bbox.center_pixel()))
        .collect()
}

/// Find the observed point nearest to `index` by frame distance.
///
/// Searches outward at distance 1, 2, 3, ... checking the earlier index
/// before the later one, so exact ties resolve to the earlier frame.
/// Returns `None` when no slot holds a point.
pub fn nearest_present_point(points: &[Option<PixelPoint>], index: usize) -> Option<PixelPoint> {
    for dist in 1..points.len() {
        if let Some(before) = index.checked_sub(dist) {
            if let Some(p) = points[before] {
                return Some(p);
            }
        }
        if let Some(Some(p)) = points.get(index + dist) {
            return Some(*p);
        }
    }
    None
}

/// Substitute every gap with the nearest observed point.
///
/// The search runs against the original observations, so a slot filled
/// earlier in the pass never becomes a source for a later gap. Returns the
/// filled sequence (empty when nothing was observed at all) together with
/// the number of gap frames.
pub fn fill_center_point_gaps(points: &[Option<PixelPoint>]) -> (Vec<PixelPoint>, usize) {
    let missing = points.iter().filter(|p| p.is_none()).count();
    if missing == points.len() {
        return (Vec::new(), missing);
    }

    let filled = points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            p.or_else(|| nearest_present_point(points, i))
                .expect("at least one observed point exists")
        })
        .collect();

    (filled, missing)
}

/// Reconstructs trajectories from per-frame detections and the
/// gripper-width annotation.
#[derive(Clone, Copy, Debug, Default)]
pub struct TrajectoryBuilder {
    params: TrajectoryParams,
}

impl TrajectoryBuilder {
    pub fn new(params: TrajectoryParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &TrajectoryParams {
        &self.params
    }

    /// Build the trajectory for `rollout[start_index..]`.
    ///
    /// `gripper_widths` is the raw desired-width series from the annotation
    /// record, one value per control step over the whole rollout; it is
    /// realigned and sliced here. The realigned series must line up with
    /// the detection window exactly, otherwise the annotation record and
    /// the rollout do not belong together and the build fails.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            level = "info",
            skip(self, rollout, gripper_widths),
            fields(frames = rollout.len(), start_index)
        )
    )]
    pub fn build(
        &self,
        rollout: &[Option<Detection>],
        start_index: usize,
        gripper_widths: &[f64],
    ) -> Result<Trajectory, TrajectoryError> {
        let centers = extract_center_points(rollout, start_index);
        let widths =
            realign_width_series(gripper_widths, self.params.width_offset, start_index);

        if widths.len() != centers.len() {
            return Err(TrajectoryError::WidthSeriesMismatch {
                widths: widths.len(),
                points: centers.len(),
            });
        }

        let (points, missing_detections) = fill_center_point_gaps(&centers);

        let events = if points.is_empty() {
            Vec::new()
        } else {
            self.track_events(&points, &widths)
        };

        Ok(Trajectory {
            points,
            widths,
            events,
            missing_detections,
        })
    }

    fn track_events(&self, points: &[PixelPoint], widths: &[WidthSample]) -> Vec<GripperEvent> {
        let mut tracker =
            GripperStateTracker::from_first_sample(widths[0], self.params.close_threshold);

        let mut events = Vec::new();
        for i in 0..points.len().saturating_sub(1) {
            match tracker.update(widths[i]) {
                Some(GripperState::Closed) => events.push(GripperEvent {
                    index: i,
                    point: points[i],
                    kind: GripperEventKind::Close,
                }),
                Some(GripperState::Open) => events.push(GripperEvent {
                    index: i,
                    point: points[i],
                    kind: GripperEventKind::Open,
                }),
                None => {}
            }
        }
        events
    }
}
