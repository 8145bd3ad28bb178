// clipkit-cli/tests/cli_integration.rs
//
// Runs the `clipkit` binary for argument validation and the paths that do
// not need ffmpeg to be installed.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn clipkit() -> Command {
    let mut cmd = Command::cargo_bin("clipkit").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG").env_remove("CLIPKIT_FONT");
    cmd
}

#[test]
fn test_help_lists_commands() {
    clipkit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("progress"))
        .stdout(predicate::str::contains("overlay"))
        .stdout(predicate::str::contains("concat"))
        .stdout(predicate::str::contains("extract"))
        .stdout(predicate::str::contains("assemble"))
        .stdout(predicate::str::contains("resize"));
}

#[test]
fn test_resize_requires_a_target() {
    clipkit()
        .args(["resize", "in.mp4", "out.mp4"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Must specify width, height, or scale"));
}

#[test]
fn test_missing_input_file() {
    let dir = tempdir().unwrap();
    clipkit()
        .arg("overlay")
        .arg(dir.path().join("missing.mp4"))
        .arg(dir.path().join("out.mp4"))
        .arg("Hello")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_invalid_color_is_rejected() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.mp4");
    fs::write(&input, b"placeholder").unwrap();

    clipkit()
        .arg("overlay")
        .arg(&input)
        .arg(dir.path().join("out.mp4"))
        .arg("Hello")
        .args(["--color", "300,0,0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid color '300,0,0'"));
}

#[test]
fn test_argument_errors_exit_with_usage_code() {
    clipkit()
        .args(["extract", "in.mp4", "frames", "--interval", "0"])
        .assert()
        .code(2);

    clipkit()
        .args(["overlay", "in.mp4", "out.mp4", "Hi", "--position", "middle"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("bottom-center"));

    clipkit().args(["concat", "-o", "out.mp4"]).assert().code(2);

    clipkit().args(["progress", "--duration", "0"]).assert().code(2);

    clipkit()
        .args(["assemble", "frames", "out.mp4", "--fps", "-1"])
        .assert()
        .code(2);
}

#[test]
fn test_assemble_empty_folder_is_not_an_error() {
    let dir = tempdir().unwrap();
    let images = dir.path().join("images");
    fs::create_dir(&images).unwrap();
    fs::write(images.join("notes.txt"), b"not an image").unwrap();

    clipkit()
        .arg("images-to-video")
        .arg(&images)
        .arg(dir.path().join("out.mp4"))
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "No images found in the specified folder.",
        ));

    assert!(!dir.path().join("out.mp4").exists());
}

#[test]
fn test_assemble_missing_folder() {
    let dir = tempdir().unwrap();
    clipkit()
        .arg("assemble")
        .arg(dir.path().join("nope"))
        .arg(dir.path().join("out.mp4"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Image folder not found"));
}

#[test]
fn test_log_dir_receives_log_file() {
    let dir = tempdir().unwrap();
    let images = dir.path().join("images");
    fs::create_dir(&images).unwrap();
    let logs = dir.path().join("logs");

    clipkit()
        .arg("assemble")
        .arg(&images)
        .arg(dir.path().join("out.mp4"))
        .arg("--log-dir")
        .arg(&logs)
        .assert()
        .success();

    let entries: Vec<_> = fs::read_dir(&logs)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(entries.len(), 1);

    let name = entries[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("clipkit_assemble_"), "unexpected log name {name}");
    assert!(name.ends_with(".log"));

    let contents = fs::read_to_string(&entries[0]).unwrap();
    assert!(contents.contains("No images found in the specified folder."));
    assert!(contents.contains("[INFO]"));
    assert!(!contents.contains('\u{1b}'));
}

#[test]
fn test_errors_are_written_to_the_log_file() {
    let dir = tempdir().unwrap();
    let logs = dir.path().join("logs");

    clipkit()
        .args(["resize", "in.mp4", "out.mp4", "--log-dir"])
        .arg(&logs)
        .assert()
        .code(1);

    let entry = fs::read_dir(&logs).unwrap().next().unwrap().unwrap();
    let contents = fs::read_to_string(entry.path()).unwrap();
    assert!(contents.contains("Error: Invalid input: Must specify width, height, or scale"));
}
