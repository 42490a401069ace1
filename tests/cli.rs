use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

mod common;
use common::Layout;

fn yolo2coco() -> Command {
    let mut cmd = Command::cargo_bin("yolo2coco").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("YOLO2COCO_LABELS_DIR")
        .env_remove("YOLO2COCO_IMAGES_DIR")
        .env_remove("YOLO2COCO_OUTPUT")
        .env_remove("YOLO2COCO_IMAGE_SUFFIX")
        .env_remove("YOLO2COCO_NUM_CATEGORIES");
    cmd
}

fn sample_layout(root: &std::path::Path) -> Layout {
    let layout = Layout::new(root);
    layout
        .image("a", 100, 200)
        .label("a", "0 0.5 0.5 0.2 0.4\n")
        .label("missing", "0 0.5 0.5 0.2 0.4\n");
    layout
}

#[test]
fn outputs_tool_name() {
    let mut cmd = yolo2coco();
    cmd.arg("-V");
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("yolo2coco "));
}

#[test]
fn converts_with_default_paths() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let layout = sample_layout(temp.path());

    let mut cmd = yolo2coco();
    cmd.current_dir(temp.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Conversion complete! COCO annotations saved in output_coco.json",
        ))
        .stdout(predicate::str::contains("skipped 1 label file(s)"));

    let output = fs::read_to_string(layout.output_path()).expect("read output");
    let json: serde_json::Value = serde_json::from_str(&output).expect("parse output");
    assert_eq!(json["images"].as_array().unwrap().len(), 1);
    assert_eq!(json["annotations"][0]["bbox"], serde_json::json!([40, 60, 20, 80]));
    assert_eq!(json["annotations"][0]["area"], 1600);
    assert_eq!(json["categories"].as_array().unwrap().len(), 26);
}

#[test]
fn explicit_paths_and_options() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let layout = sample_layout(temp.path());
    let output = temp.path().join("custom.json");

    let mut cmd = yolo2coco();
    cmd.arg("--labels-dir")
        .arg(layout.labels_dir())
        .arg("--images-dir")
        .arg(layout.images_dir())
        .arg("-o")
        .arg(&output)
        .args(["--num-categories", "3", "--sorted"]);
    cmd.assert().success();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).expect("read output"))
            .expect("parse output");
    assert_eq!(json["categories"].as_array().unwrap().len(), 3);
    assert_eq!(json["categories"][2]["name"], "category_2");
}

#[test]
fn options_fall_back_to_environment() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let layout = sample_layout(temp.path());
    let output = temp.path().join("from_env.json");

    let mut cmd = yolo2coco();
    cmd.env("YOLO2COCO_LABELS_DIR", layout.labels_dir())
        .env("YOLO2COCO_IMAGES_DIR", layout.images_dir())
        .env("YOLO2COCO_OUTPUT", &output);
    cmd.assert().success();

    assert!(output.is_file());
}

#[test]
fn json_report_is_machine_readable() {
    let temp = tempfile::tempdir().expect("create temp dir");
    sample_layout(temp.path());

    let mut cmd = yolo2coco();
    cmd.current_dir(temp.path()).args(["--report", "json"]);
    let assert = cmd.assert().success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf-8 stdout");
    let report: serde_json::Value = serde_json::from_str(&stdout).expect("parse report");
    assert_eq!(report["counts"]["label_files"], 2);
    assert_eq!(report["counts"]["images"], 1);
    assert_eq!(report["skipped"][0]["label_file"], "missing.txt");
    assert_eq!(report["output"], "output_coco.json");
}

#[test]
fn json_report_still_announces_completion() {
    let temp = tempfile::tempdir().expect("create temp dir");
    sample_layout(temp.path());

    let mut cmd = yolo2coco();
    cmd.current_dir(temp.path())
        .env("RUST_LOG", "warn")
        .args(["--report", "json"]);
    let assert = cmd.assert().success().stderr(predicate::str::contains(
        "Conversion complete! COCO annotations saved in output_coco.json",
    ));

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf-8 stdout");
    assert!(!stdout.contains("Conversion complete!"));
    serde_json::from_str::<serde_json::Value>(&stdout).expect("stdout is only the report");
}

#[test]
fn malformed_label_fails_without_output() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let layout = Layout::new(temp.path());
    layout.image("a", 10, 10).label("a", "0 0.5 zero 0.2 0.4\n");

    let mut cmd = yolo2coco();
    cmd.current_dir(temp.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid label line"));

    assert!(!layout.output_path().exists());
}

#[test]
fn missing_label_dir_fails() {
    let temp = tempfile::tempdir().expect("create temp dir");

    let mut cmd = yolo2coco();
    cmd.current_dir(temp.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to list label directory"));
}
