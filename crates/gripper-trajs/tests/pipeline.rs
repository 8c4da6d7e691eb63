//! End-to-end runs over a synthetic rollout: eval rendering, GIF assembly
//! and dataset export.

mod common;

use gripper_trajs::dataset::{export_dataset, DatasetConfig};
use gripper_trajs::eval::{eval_sequence, run_eval, EvalConfig};
use gripper_trajs::gif::{build_gifs, GifConfig};
use gripper_trajs::core::TrajectoryParams;
use gripper_trajs::detections::SequenceDetections;
use gripper_trajs::dataset::DatasetRecord;
use gripper_trajs::PixelPoint;

use common::{write_fixture, SEQUENCE};

fn zero_offset() -> TrajectoryParams {
    TrajectoryParams {
        close_threshold: 0.05,
        width_offset: 0,
    }
}

#[test]
fn eval_renders_overlays_and_trajectories() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = write_fixture(dir.path());
    let out = dir.path().join("out");

    let mut config = EvalConfig::new(
        &fixture.detections_root,
        &fixture.annotations_root,
        &out,
    );
    config.params = zero_offset();

    let summary = run_eval(&config).unwrap();
    assert_eq!(summary.sequences, 1);
    assert_eq!(summary.failures, 0);

    let seq_dir = out.join(SEQUENCE);
    // Frame 2 has no detection: four overlays, five trajectory images.
    let bboxes: Vec<_> = std::fs::read_dir(seq_dir.join("bboxes")).unwrap().collect();
    assert_eq!(bboxes.len(), 4);
    let trajs: Vec<_> = std::fs::read_dir(seq_dir.join("trajs")).unwrap().collect();
    assert_eq!(trajs.len(), 5);
    assert!(seq_dir
        .join("trajs")
        .join(format!("{SEQUENCE}_cam_1_img_000_traj_00.jpg"))
        .is_file());
}

#[test]
fn eval_reports_missing_detections() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = write_fixture(dir.path());

    let record = fixture.detections_root.join(format!("{SEQUENCE}_cam_1.json"));
    let seq = SequenceDetections::load_json(record).unwrap();

    let mut config = EvalConfig::new(
        &fixture.detections_root,
        &fixture.annotations_root,
        dir.path().join("out"),
    );
    config.params = zero_offset();

    let report = eval_sequence(&config, &seq).unwrap();
    assert_eq!(report.frames, 5);
    assert_eq!(report.missing_detections, 1);
    assert_eq!(report.bbox_images, 4);
    assert_eq!(report.trajectory_images, 5);
}

#[test]
fn eval_continues_past_a_broken_sequence() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = write_fixture(dir.path());

    // A record whose annotation store entry does not exist.
    std::fs::write(
        fixture.detections_root.join("broken_seq.json"),
        r#"{"sequence": "broken", "frames": [
            {"image_id": "broken_cam_1_img_000", "file_name": "missing.jpg"}
        ]}"#,
    )
    .unwrap();

    let mut config = EvalConfig::new(
        &fixture.detections_root,
        &fixture.annotations_root,
        dir.path().join("out"),
    );
    config.params = zero_offset();

    let summary = run_eval(&config).unwrap();
    assert_eq!(summary.sequences, 2);
    assert_eq!(summary.failures, 1);
}

#[test]
fn first_only_renders_a_single_trajectory() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = write_fixture(dir.path());
    let out = dir.path().join("out");

    let mut config = EvalConfig::new(
        &fixture.detections_root,
        &fixture.annotations_root,
        &out,
    );
    config.params = zero_offset();
    config.visualize_boxes = false;
    config.first_only = true;

    run_eval(&config).unwrap();

    let trajs: Vec<_> = std::fs::read_dir(out.join(SEQUENCE).join("trajs"))
        .unwrap()
        .collect();
    assert_eq!(trajs.len(), 1);
}

#[test]
fn gifs_are_assembled_per_camera() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = write_fixture(dir.path());
    let out = dir.path().join("out");

    let mut config = EvalConfig::new(
        &fixture.detections_root,
        &fixture.annotations_root,
        &out,
    );
    config.params = zero_offset();
    config.visualize_boxes = false;
    run_eval(&config).unwrap();

    let dest = dir.path().join("gifs");
    let written = build_gifs(&GifConfig::new(&out, &dest)).unwrap();
    assert_eq!(written, 1);

    let gif = dest.join(format!("{SEQUENCE}_cam_1.gif"));
    assert!(gif.is_file());
    // Sanity-check the payload decodes back as a GIF.
    let decoded = image::open(&gif).unwrap();
    assert_eq!(decoded.width(), 64);
}

#[test]
fn dataset_export_writes_keypoints_per_frame() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = write_fixture(dir.path());
    let output = dir.path().join("dataset.jsonl");

    let mut config = DatasetConfig::new(
        &fixture.detections_root,
        &fixture.annotations_root,
        &output,
    );
    config.params = zero_offset();

    let written = export_dataset(&config).unwrap();
    assert_eq!(written, 5);

    let raw = std::fs::read_to_string(&output).unwrap();
    let records: Vec<DatasetRecord> = raw
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(records.len(), 5);
    let first = &records[0];
    assert_eq!(first.sequence, SEQUENCE);
    assert_eq!(first.start_index, 0);
    assert_eq!(first.keypoints.path.len(), 5);
    // Frame 2's gap fills from frame 1 (tie resolves to the earlier frame).
    assert_eq!(first.keypoints.path[2], first.keypoints.path[1]);
    assert_eq!(first.missing_detections, 1);
    // Close at frame 1, reopen at frame 3.
    assert_eq!(first.keypoints.close_points, vec![PixelPoint::new(20, 24)]);
    assert_eq!(first.keypoints.open_points, vec![PixelPoint::new(40, 24)]);

    // The last window holds a single frame.
    assert_eq!(records[4].start_index, 4);
    assert_eq!(records[4].keypoints.path.len(), 1);
    assert!(records[4].keypoints.close_points.is_empty());
}
