//! Integration tests for the CLI commands against pose files on disk.

use gaitsync_cli::commands::angles::AnglesOutput;
use gaitsync_cli::commands::retarget::{self, AngleSource};
use gaitsync_cli::commands::{angles, demo};
use gaitsync_cli::input::load_tick_input;
use gaitsync_core::{AngleMode, AngleSet, Pipeline, PipelineConfig, Space, TickStatus};
use std::fs;
use tempfile::TempDir;

const LOCAL_POSE: &str = r#"{
    "snapshot": {
        "space": "local",
        "left": {
            "hip": [-0.08207788, 0.0, 0.0],
            "knee": [-0.08207788, 0.2, 0.2],
            "ankle": [-0.08207788, 0.2, 0.48],
            "toe": [-0.08207788, 0.3, 0.55]
        },
        "right": {
            "hip": [0.08207788, 0.0, 0.0],
            "knee": [0.08207788, 0.0, 0.3],
            "ankle": [0.08207788, 0.0, 0.58],
            "toe": [0.08207788, 0.1, 0.65]
        }
    },
    "reference_frame": {"translation": [0.0, 0.95, 0.0]}
}"#;

fn write_file(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_angles_command_runs() {
    let dir = TempDir::new().unwrap();
    let pose = write_file(&dir, "pose.json", LOCAL_POSE);

    assert!(angles::run(&pose, None, false, true).is_ok());
    assert!(angles::run(&pose, None, true, false).is_ok());
}

#[test]
fn test_angles_command_with_config() {
    let dir = TempDir::new().unwrap();
    let pose = write_file(&dir, "pose.json", LOCAL_POSE);
    let config = write_file(&dir, "rig.json", r#"{"angle_mode": "unsigned"}"#);

    assert!(angles::run(&pose, Some(&config), false, true).is_ok());
}

#[test]
fn test_angles_command_rejects_bad_config() {
    let dir = TempDir::new().unwrap();
    let pose = write_file(&dir, "pose.json", LOCAL_POSE);
    let config = write_file(&dir, "rig.json", r#"{"angle_mode": "sideways"}"#);

    let err = angles::run(&pose, Some(&config), false, true).unwrap_err();
    assert!(format!("{:#}", err).contains("rig.json"));
}

#[test]
fn test_angles_command_missing_file() {
    let err = angles::run("/nonexistent/pose.json", None, false, true).unwrap_err();
    assert!(err.to_string().contains("pose.json"));
}

#[test]
fn test_pose_file_through_pipeline() {
    let dir = TempDir::new().unwrap();
    let pose = write_file(&dir, "pose.json", LOCAL_POSE);
    let input = load_tick_input(std::path::Path::new(&pose)).unwrap();

    let out = Pipeline::new(PipelineConfig::default())
        .unwrap()
        .tick(&input, None);
    assert_eq!(out.status, TickStatus::Fresh);
    assert!((out.angles.left.thigh + 45.0).abs() < 1e-3);
    assert!(out.angles.right.thigh.abs() < 1e-3);
}

#[test]
fn test_angles_output_reports_codes_and_joints() {
    let dir = TempDir::new().unwrap();
    let value: serde_json::Value = serde_json::from_str(LOCAL_POSE).unwrap();
    let pose = write_file(&dir, "bare.json", &value["snapshot"].to_string());
    let input = load_tick_input(std::path::Path::new(&pose)).unwrap();

    let output = Pipeline::default().tick(&input, None);
    let report = AnglesOutput::new(AngleMode::Signed, &input, output);
    assert_eq!(report.joints.left[1].space, Space::Local);
    assert_eq!(report.joints.right[3].position.z, 0.65);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["status"], "stale");
    assert_eq!(json["warnings"][0]["code"], "W001");
    assert_eq!(json["joints"]["left"].as_array().map(|a| a.len()), Some(4));
}

#[test]
fn test_bare_local_snapshot_is_stale_but_succeeds() {
    let dir = TempDir::new().unwrap();
    let value: serde_json::Value = serde_json::from_str(LOCAL_POSE).unwrap();
    let pose = write_file(&dir, "bare.json", &value["snapshot"].to_string());

    let input = load_tick_input(std::path::Path::new(&pose)).unwrap();
    assert!(input.reference_frame.is_none());
    let out = Pipeline::default().tick(&input, None);
    assert_eq!(out.status, TickStatus::Stale);

    assert!(angles::run(&pose, None, false, true).is_ok());
}

#[test]
fn test_retarget_command_runs() {
    let dir = TempDir::new().unwrap();
    let pose = write_file(&dir, "pose.json", LOCAL_POSE);

    assert!(retarget::run(AngleSource::Pose(&pose), None, true).is_ok());
    assert!(retarget::run(
        AngleSource::Direct {
            left: AngleSet::new(30.0, 30.0, 60.0),
            right: AngleSet::new(0.0, 0.0, 54.741),
        },
        None,
        false,
    )
    .is_ok());
}

#[test]
fn test_retarget_rejects_non_finite_angles() {
    let source = AngleSource::Direct {
        left: AngleSet::new(f32::NAN, 0.0, 0.0),
        right: AngleSet::new(0.0, 0.0, 54.741),
    };
    let err = retarget::run(source, None, true).unwrap_err();
    assert!(err.to_string().contains("finite"));
}

#[test]
fn test_angle_source_from_args() {
    let set = AngleSet::new(30.0, 30.0, 60.0);
    assert!(matches!(
        AngleSource::from_args(Some("pose.json"), None, None),
        Ok(AngleSource::Pose("pose.json"))
    ));
    assert!(matches!(
        AngleSource::from_args(None, Some(set), Some(set)),
        Ok(AngleSource::Direct { .. })
    ));
    assert!(AngleSource::from_args(None, Some(set), None).is_err());
    assert!(AngleSource::from_args(Some("pose.json"), Some(set), Some(set)).is_err());
}

#[test]
fn test_demo_command_runs() {
    assert!(demo::run(5, 0.1, false, false).is_ok());
    assert!(demo::run(5, 0.1, true, true).is_ok());
}
