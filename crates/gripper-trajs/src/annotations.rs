//! Robot-state annotation records.
//!
//! The annotation store persists one record per sequence, keyed by the
//! sequence name. The only field consumed here is `des_gripper_width`, the
//! desired gripper width per control step; the record format itself belongs
//! to the annotation store.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum AnnotationError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Per-sequence robot-state record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RobotStateRecord {
    /// Desired gripper width, one value per control step.
    pub des_gripper_width: Vec<f64>,
}

impl RobotStateRecord {
    /// Load a JSON record from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, AnnotationError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this record to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), AnnotationError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Derive the annotation-store key from a frame's image id.
///
/// Image ids carry camera and frame-number suffixes
/// (`<sequence>_cam_<n>_img_<m>`); the annotation record is keyed by the
/// sequence alone, so the last four `_`-separated tokens are dropped.
pub fn annotation_key(image_id: &str) -> String {
    let tokens: Vec<&str> = image_id.split('_').collect();
    let keep = tokens.len().saturating_sub(4);
    tokens[..keep].join("_")
}

/// Resolve the annotation record path for a frame's image id.
pub fn annotation_path(annotations_root: impl AsRef<Path>, image_id: &str) -> PathBuf {
    annotations_root
        .as_ref()
        .join(format!("{}.json", annotation_key(image_id)))
}
