//! CLI smoke tests.

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

use common::{write_fixture, SEQUENCE};

fn cli() -> Command {
    Command::cargo_bin("gripper-trajs").unwrap()
}

#[test]
fn eval_subcommand_renders_images() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = write_fixture(dir.path());
    let out = dir.path().join("out");

    cli()
        .arg("eval")
        .arg("--detections")
        .arg(&fixture.detections_root)
        .arg("--annotations")
        .arg(&fixture.annotations_root)
        .arg("--out")
        .arg(&out)
        .arg("--width-offset")
        .arg("0")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 sequences evaluated, 0 failed"));

    assert!(out.join(SEQUENCE).join("bboxes").is_dir());
    assert!(out.join(SEQUENCE).join("trajs").is_dir());
}

#[test]
fn export_dataset_subcommand_writes_jsonl() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = write_fixture(dir.path());
    let output = dir.path().join("dataset.jsonl");

    cli()
        .arg("export-dataset")
        .arg("--detections")
        .arg(&fixture.detections_root)
        .arg("--annotations")
        .arg(&fixture.annotations_root)
        .arg("--out")
        .arg(&output)
        .arg("--width-offset")
        .arg("0")
        .assert()
        .success()
        .stdout(predicate::str::contains("5 dataset records written"));

    assert!(output.is_file());
}

#[test]
fn missing_detections_root_fails() {
    cli()
        .arg("eval")
        .arg("--detections")
        .arg("/nonexistent/detections")
        .arg("--annotations")
        .arg("/nonexistent/annotations")
        .arg("--out")
        .arg("/tmp/gripper-trajs-test-out")
        .assert()
        .failure();
}

#[test]
fn help_lists_subcommands() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("eval"))
        .stdout(predicate::str::contains("gifs"))
        .stdout(predicate::str::contains("export-dataset"));
}
