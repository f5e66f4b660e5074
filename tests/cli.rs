extern crate assert_cmd;
extern crate image;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

fn derham() -> Command {
    Command::cargo_bin("derham").unwrap()
}

#[test]
fn renders_a_preset_to_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blancmange.png");
    derham()
        .args(&["-o", path.to_str().unwrap(), "-s", "120x80", "-p", "blancmange"])
        .args(&["--seed", "42", "-b", "500", "-c", "0.95"])
        .assert()
        .success();
    let img = image::open(&path).unwrap().to_luma();
    assert_eq!(img.dimensions(), (120, 80));
    assert!(img.into_raw().contains(&255));
}

#[test]
fn renders_explicit_parameters_with_progress() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("curve.png");
    derham()
        .args(&["-o", path.to_str().unwrap(), "-s", "64x64", "-P", "-0.1,0.2,-0.1,0.2"])
        .args(&["--seed", "7", "-c", "0.9", "-t", "light", "--progress"])
        .assert()
        .success()
        .stderr(predicate::str::contains("done"));
    assert!(path.exists());
}

#[test]
fn unknown_preset_is_rejected() {
    derham()
        .args(&["-o", "never.png", "-p", "snowflake"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown preset"));
}

#[test]
fn out_of_range_parameters_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.png");
    derham()
        .args(&["-o", path.to_str().unwrap(), "-P", "1.5,0,0,0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Render failure: invalid parameter: delta"));
    assert!(!path.exists());
}

#[test]
fn empty_image_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.png");
    derham()
        .args(&["-o", path.to_str().unwrap(), "-s", "0x10", "-p", "koch"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Render failure"));
}

#[test]
fn batch_limit_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("limited.png");
    derham()
        .args(&["-o", path.to_str().unwrap(), "-s", "400x400", "-p", "peano"])
        .args(&["-b", "10", "-c", "1", "--max-batches", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("within 2 batches"));
}

#[test]
fn gallery_writes_every_preset() {
    let dir = tempfile::tempdir().unwrap();
    derham()
        .args(&["-o", dir.path().to_str().unwrap(), "--gallery", "-s", "32x24"])
        .args(&["--seed", "1", "-b", "200", "-c", "0.9", "--threads", "1"])
        .assert()
        .success();
    for name in &["levy-c", "koch", "peano", "gallery-01", "gallery-42"] {
        assert!(dir.path().join(format!("{}.png", name)).exists(), "{} missing", name);
    }
}

#[test]
fn log_events_follow_rust_log() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logged.png");
    derham()
        .env("RUST_LOG", "derham=info")
        .args(&["-o", path.to_str().unwrap(), "-s", "48x48", "-p", "koch"])
        .args(&["--seed", "3", "-c", "0.9"])
        .assert()
        .success()
        .stderr(predicate::str::contains("rendering curve").and(predicate::str::contains("curve complete")));
}

#[test]
fn gallery_directory_failure_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("plain-file");
    std::fs::write(&blocker, b"not a directory").unwrap();
    derham()
        .args(&["-o", blocker.join("gallery").to_str().unwrap(), "--gallery", "-s", "8x8"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Render failure: I/O error"));
}

#[test]
fn halfway_needs_params() {
    derham()
        .args(&["-o", "never.png", "-a", "0.3,0.3", "-p", "koch"])
        .assert()
        .failure();
    derham()
        .args(&["-o", "never.png", "-a", "0.3,0.3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--params"));
}

#[test]
fn progress_and_gallery_conflict() {
    derham()
        .args(&["-o", "never", "--gallery", "--progress"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}
