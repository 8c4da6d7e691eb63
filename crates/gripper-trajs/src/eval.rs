//! Batch evaluation runs over recorded sequences.
//!
//! For every detection record under the detections root this renders
//! bounding-box overlays and per-frame trajectory images, mirroring the
//! layout the GIF assembler expects:
//!
//! ```text
//! <output_root>/<sequence>/bboxes/<image_id>_bbox_<i>.jpg
//! <output_root>/<sequence>/trajs/<image_id>_traj_<i>.jpg
//! ```
//!
//! A failure in one sequence is logged and counted; the run continues with
//! the remaining sequences.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};

use gripper_trajs_core::{TrajectoryBuilder, TrajectoryError, TrajectoryParams};
use gripper_trajs_render::{render_detection, render_trajectory, OverlayStyle, TrajectoryStyle};

use crate::annotations::{annotation_path, AnnotationError, RobotStateRecord};
use crate::detections::{DetectionsError, SequenceDetections};

#[derive(thiserror::Error, Debug)]
pub enum EvalError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Detections(#[from] DetectionsError),
    #[error(transparent)]
    Annotation(#[from] AnnotationError),
    #[error(transparent)]
    Trajectory(#[from] TrajectoryError),
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error("sequence {0} has no frames")]
    NoFrames(String),
}

/// Settings for one evaluation run.
#[derive(Clone, Debug)]
pub struct EvalConfig {
    /// Directory of per-sequence detection records (`*.json`).
    pub detections_root: PathBuf,
    /// Directory of robot-state annotation records.
    pub annotations_root: PathBuf,
    /// Root for rendered output images.
    pub output_root: PathBuf,
    pub params: TrajectoryParams,
    pub trajectory_style: TrajectoryStyle,
    pub overlay_style: OverlayStyle,
    /// Render bounding-box overlays.
    pub visualize_boxes: bool,
    /// Render per-frame trajectory images.
    pub build_trajectories: bool,
    /// Stop after the trajectory of the first frame of each sequence.
    pub first_only: bool,
}

impl EvalConfig {
    pub fn new(
        detections_root: impl Into<PathBuf>,
        annotations_root: impl Into<PathBuf>,
        output_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            detections_root: detections_root.into(),
            annotations_root: annotations_root.into(),
            output_root: output_root.into(),
            params: TrajectoryParams::default(),
            trajectory_style: TrajectoryStyle::default(),
            overlay_style: OverlayStyle::default(),
            visualize_boxes: true,
            build_trajectories: true,
            first_only: false,
        }
    }
}

/// Outcome counts of a batch run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct EvalSummary {
    pub sequences: usize,
    pub failures: usize,
}

/// Per-sequence outcome.
#[derive(Clone, Debug)]
pub struct SequenceReport {
    pub sequence: String,
    pub frames: usize,
    /// Frames of the full rollout window with no detection.
    pub missing_detections: usize,
    pub bbox_images: usize,
    pub trajectory_images: usize,
}

/// List detection records under `root`, sorted by file name.
pub fn list_sequence_records(root: impl AsRef<Path>) -> Result<Vec<PathBuf>, EvalError> {
    let mut records: Vec<PathBuf> = fs::read_dir(root)?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    records.sort();
    Ok(records)
}

/// Evaluate every sequence record under the detections root.
pub fn run_eval(config: &EvalConfig) -> Result<EvalSummary, EvalError> {
    let records = list_sequence_records(&config.detections_root)?;
    info!("evaluating {} sequence records", records.len());

    let mut summary = EvalSummary::default();
    for path in records {
        summary.sequences += 1;
        let outcome = SequenceDetections::load_json(&path)
            .map_err(EvalError::from)
            .and_then(|seq| eval_sequence(config, &seq));
        match outcome {
            Ok(report) => {
                info!(
                    "{}: {} frames, {} bbox images, {} trajectory images",
                    report.sequence, report.frames, report.bbox_images, report.trajectory_images
                );
            }
            Err(err) => {
                summary.failures += 1;
                error!("sequence record {} failed: {err}", path.display());
            }
        }
    }
    Ok(summary)
}

/// Render overlays and trajectories for a single sequence.
pub fn eval_sequence(
    config: &EvalConfig,
    seq: &SequenceDetections,
) -> Result<SequenceReport, EvalError> {
    if seq.frames.is_empty() {
        return Err(EvalError::NoFrames(seq.sequence.clone()));
    }

    let rollout = seq.merged_rollout();
    let seq_dir = config.output_root.join(&seq.sequence);

    let mut report = SequenceReport {
        sequence: seq.sequence.clone(),
        frames: seq.frames.len(),
        missing_detections: 0,
        bbox_images: 0,
        trajectory_images: 0,
    };

    if config.visualize_boxes {
        let bbox_dir = seq_dir.join("bboxes");
        fs::create_dir_all(&bbox_dir)?;

        for (i, frame) in seq.frames.iter().enumerate() {
            // Skip frames where the gripper was not detected.
            let Some(detection) = rollout[i] else {
                debug!("{}: no detection in frame {i}", seq.sequence);
                continue;
            };

            let mut img = image::open(&frame.file_name)?.to_rgb8();
            render_detection(&mut img, &detection, &config.overlay_style);
            img.save(bbox_dir.join(format!("{}_bbox_{i:02}.jpg", frame.image_id)))?;
            report.bbox_images += 1;
        }
    }

    if config.build_trajectories {
        let record = RobotStateRecord::load_json(annotation_path(
            &config.annotations_root,
            &seq.frames[0].image_id,
        ))?;
        let builder = TrajectoryBuilder::new(config.params);

        let traj_dir = seq_dir.join("trajs");
        fs::create_dir_all(&traj_dir)?;

        for (i, frame) in seq.frames.iter().enumerate() {
            let trajectory = builder.build(&rollout, i, &record.des_gripper_width)?;
            if i == 0 {
                report.missing_detections = trajectory.missing_detections;
                if trajectory.missing_detections > 0 {
                    warn!(
                        "{}: {} of {} frames without detection",
                        seq.sequence,
                        trajectory.missing_detections,
                        seq.frames.len()
                    );
                }
            }

            let mut img = image::open(&frame.file_name)?.to_rgb8();
            render_trajectory(&mut img, &trajectory, &config.trajectory_style);
            img.save(traj_dir.join(format!("{}_traj_{i:02}.jpg", frame.image_id)))?;
            report.trajectory_images += 1;

            if config.first_only {
                break;
            }
        }
    }

    Ok(report)
}
