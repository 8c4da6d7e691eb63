#![allow(dead_code)] // not every test file uses every helper

use std::path::{Path, PathBuf};

use image::RgbImage;

use gripper_trajs::annotations::RobotStateRecord;
use gripper_trajs::detections::{FrameRecord, SequenceDetections};
use gripper_trajs::{BoundingBox, Detection};

/// Synthetic rollout rooted in a temp directory:
/// five 64x48 frames with the gripper moving left to right, the width
/// signal closing at frame 1 and reopening at frame 3 (with zero offset).
pub struct Fixture {
    pub detections_root: PathBuf,
    pub annotations_root: PathBuf,
    pub images_root: PathBuf,
}

pub const SEQUENCE: &str = "seq_000";
pub const WIDTHS: [f64; 5] = [0.10, 0.03, 0.03, 0.06, 0.06];

pub fn write_fixture(root: &Path) -> Fixture {
    let fixture = Fixture {
        detections_root: root.join("detections"),
        annotations_root: root.join("annotations"),
        images_root: root.join("images"),
    };
    std::fs::create_dir_all(&fixture.detections_root).unwrap();
    std::fs::create_dir_all(&fixture.annotations_root).unwrap();
    std::fs::create_dir_all(&fixture.images_root).unwrap();

    let mut frames = Vec::new();
    for i in 0..5u32 {
        let image_id = format!("{SEQUENCE}_cam_1_img_{i:03}");
        let file_name = fixture.images_root.join(format!("{image_id}.jpg"));
        RgbImage::new(64, 48).save(&file_name).unwrap();

        let cx = 10.0 + i as f32 * 10.0;
        let detections = if i == 2 {
            Vec::new() // a frame with no detection
        } else {
            vec![Detection {
                bbox: BoundingBox::new(cx - 4.0, 20.0, cx + 4.0, 28.0),
                score: 0.9,
            }]
        };

        frames.push(FrameRecord {
            image_id,
            file_name,
            detections,
        });
    }

    SequenceDetections {
        sequence: SEQUENCE.to_string(),
        frames,
    }
    .write_json(fixture.detections_root.join(format!("{SEQUENCE}_cam_1.json")))
    .unwrap();

    RobotStateRecord {
        des_gripper_width: WIDTHS.to_vec(),
    }
    .write_json(fixture.annotations_root.join(format!("{SEQUENCE}.json")))
    .unwrap();

    fixture
}
