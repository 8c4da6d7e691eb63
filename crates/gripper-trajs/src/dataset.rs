//! Keypoint dataset export for vision-language fine-tuning.
//!
//! Writes one JSON line per (sequence, frame): the frame image path plus
//! the trajectory keypoints from that frame to the end of the rollout
//! (path points, close points, open points). Downstream training consumes
//! the file as-is.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{error, info};
use serde::{Deserialize, Serialize};

use gripper_trajs_core::{TrajectoryBuilder, TrajectoryKeypoints, TrajectoryParams};

use crate::annotations::{annotation_path, RobotStateRecord};
use crate::detections::SequenceDetections;
use crate::eval::{list_sequence_records, EvalError};

/// One dataset sample: a frame image and the keypoints of the trajectory
/// that starts at it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetRecord {
    pub sequence: String,
    pub image_id: String,
    pub file_name: PathBuf,
    /// Frame index within the rollout where this trajectory starts.
    pub start_index: usize,
    pub keypoints: TrajectoryKeypoints,
    /// Frames of this trajectory window with no detection.
    pub missing_detections: usize,
}

/// Settings for dataset export.
#[derive(Clone, Debug)]
pub struct DatasetConfig {
    pub detections_root: PathBuf,
    pub annotations_root: PathBuf,
    /// Output JSONL file.
    pub output: PathBuf,
    pub params: TrajectoryParams,
}

impl DatasetConfig {
    pub fn new(
        detections_root: impl Into<PathBuf>,
        annotations_root: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            detections_root: detections_root.into(),
            annotations_root: annotations_root.into(),
            output: output.into(),
            params: TrajectoryParams::default(),
        }
    }
}

/// Build the dataset records for one sequence.
pub fn sequence_records(
    seq: &SequenceDetections,
    annotations_root: impl AsRef<Path>,
    params: TrajectoryParams,
) -> Result<Vec<DatasetRecord>, EvalError> {
    if seq.frames.is_empty() {
        return Err(EvalError::NoFrames(seq.sequence.clone()));
    }

    let rollout = seq.merged_rollout();
    let record = RobotStateRecord::load_json(annotation_path(
        annotations_root,
        &seq.frames[0].image_id,
    ))?;
    let builder = TrajectoryBuilder::new(params);

    seq.frames
        .iter()
        .enumerate()
        .map(|(i, frame)| {
            let trajectory = builder.build(&rollout, i, &record.des_gripper_width)?;
            Ok(DatasetRecord {
                sequence: seq.sequence.clone(),
                image_id: frame.image_id.clone(),
                file_name: frame.file_name.clone(),
                start_index: i,
                keypoints: trajectory.keypoints(),
                missing_detections: trajectory.missing_detections,
            })
        })
        .collect()
}

/// Export every sequence under the detections root as JSONL.
///
/// Returns the number of records written. Sequences that fail to process
/// are logged and skipped.
pub fn export_dataset(config: &DatasetConfig) -> Result<usize, EvalError> {
    let paths = list_sequence_records(&config.detections_root)?;

    let file = File::create(&config.output)?;
    let mut out = BufWriter::new(file);

    let mut written = 0;
    for path in paths {
        let outcome = SequenceDetections::load_json(&path)
            .map_err(EvalError::from)
            .and_then(|seq| sequence_records(&seq, &config.annotations_root, config.params));
        let records = match outcome {
            Ok(records) => records,
            Err(err) => {
                error!("sequence record {} failed: {err}", path.display());
                continue;
            }
        };

        for record in &records {
            serde_json::to_writer(&mut out, record)?;
            out.write_all(b"\n")?;
            written += 1;
        }
    }
    out.flush()?;

    info!("exported {written} dataset records to {}", config.output.display());
    Ok(written)
}
