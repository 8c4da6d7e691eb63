use serde::{Deserialize, Serialize};

/// One slot of the realigned gripper-width signal.
///
/// `Missing` marks realignment padding (the annotation stream has no width
/// for that frame yet). A missing sample never satisfies a threshold
/// comparison in either direction, so it can never trigger an open/close
/// transition.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum WidthSample {
    Missing,
    Width(f64),
}

impl WidthSample {
    pub fn value(&self) -> Option<f64> {
        match self {
            WidthSample::Missing => None,
            WidthSample::Width(w) => Some(*w),
        }
    }
}

/// Realign the desired-gripper-width annotation to the image frame index.
///
/// The width annotations come from the control loop and lead the camera
/// stream by `offset` steps: width sample `i` describes frame `i + offset`.
/// Prepending `offset` missing slots and dropping the trailing `offset`
/// values shifts the series so that slot `i` lines up with frame `i`; the
/// result is then sliced to begin at `start_index`.
///
/// The returned series has length `widths.len() - start_index` (saturating
/// to empty when `start_index` runs past the end).
pub fn realign_width_series(widths: &[f64], offset: usize, start_index: usize) -> Vec<WidthSample> {
    let kept = widths.len().saturating_sub(offset);
    let realigned: Vec<WidthSample> = std::iter::repeat(WidthSample::Missing)
        .take(offset.min(widths.len()))
        .chain(widths[..kept].iter().copied().map(WidthSample::Width))
        .collect();

    if start_index >= realigned.len() {
        return Vec::new();
    }
    realigned[start_index..].to_vec()
}

/// Discrete gripper state inferred from the width signal.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum GripperState {
    Open,
    Closed,
}

/// Thresholds the width signal into open/close transitions.
///
/// The state flips only when a real width sample crosses the threshold in
/// the direction opposite to the current state; samples on the same side of
/// the threshold, and missing samples, leave the state untouched.
#[derive(Clone, Copy, Debug)]
pub struct GripperStateTracker {
    state: GripperState,
    threshold: f64,
}

impl GripperStateTracker {
    /// Initialize from the first realigned width sample.
    ///
    /// A first sample at or above the threshold starts the tracker open;
    /// anything else, including a missing sample, starts it closed.
    pub fn from_first_sample(first: WidthSample, threshold: f64) -> Self {
        let state = match first.value() {
            Some(w) if w >= threshold => GripperState::Open,
            _ => GripperState::Closed,
        };
        Self { state, threshold }
    }

    pub fn state(&self) -> GripperState {
        self.state
    }

    /// Feed the next sample; returns the new state only on a transition.
    pub fn update(&mut self, sample: WidthSample) -> Option<GripperState> {
        let Some(width) = sample.value() else {
            return None;
        };

        match self.state {
            GripperState::Open if width < self.threshold => {
                self.state = GripperState::Closed;
                Some(GripperState::Closed)
            }
            GripperState::Closed if width >= self.threshold => {
                self.state = GripperState::Open;
                Some(GripperState::Open)
            }
            _ => None,
        }
    }
}
