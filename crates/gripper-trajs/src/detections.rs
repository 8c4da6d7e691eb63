//! Per-sequence detection records produced by the inference pipeline.
//!
//! The upstream detector writes one JSON record per (sequence, camera) with
//! zero or more scored boxes per frame. This toolkit only reads them.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use gripper_trajs_core::{merge_detections, Detection};

#[derive(thiserror::Error, Debug)]
pub enum DetectionsError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// One frame of a recorded rollout plus its detections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Stable frame identifier, `<sequence>_cam_<n>_img_<m>`.
    pub image_id: String,
    /// Path of the recorded camera image.
    pub file_name: PathBuf,
    /// Raw detections for this frame; may be empty.
    #[serde(default)]
    pub detections: Vec<Detection>,
}

/// Detection record for one (sequence, camera) rollout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceDetections {
    pub sequence: String,
    pub frames: Vec<FrameRecord>,
}

impl SequenceDetections {
    /// Load a JSON record from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, DetectionsError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this record to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), DetectionsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Collapse each frame's detections into at most one merged instance.
    pub fn merged_rollout(&self) -> Vec<Option<Detection>> {
        self.frames
            .iter()
            .map(|f| merge_detections(&f.detections))
            .collect()
    }
}
