mod common;

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use common::{write_garbage, write_image};
use image::ImageFormat;
use predicates::prelude::*;

fn convrt() -> Command {
    let mut cmd = Command::cargo_bin("convrt").unwrap();
    cmd.env_remove("CONVRT_QUALITY")
        .env_remove("CONVRT_LENIENT_ARGS")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_no_arguments_prints_usage_and_fails() {
    convrt()
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Usage: convrt"));
}

#[test]
fn test_help_prints_usage_with_missing_argument_status() {
    convrt()
        .arg("--help")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("--optimize"));
}

#[test]
fn test_version() {
    convrt().arg("--version").assert().success();
}

#[test]
fn test_unknown_flag_is_rejected() {
    convrt()
        .args(["photo.jpg", "--bogus"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Usage: convrt"));
}

#[test]
fn test_malformed_quality_is_rejected() {
    convrt()
        .args(["photo.jpg", ".png", "-q", "high"])
        .assert()
        .code(2);
}

#[test]
fn test_nonexistent_file_still_exits_zero() {
    convrt()
        .args(["nonexistent.jpg", ".png"])
        .assert()
        .success()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_convert_to_png() {
    let temp = TempDir::new().unwrap();
    write_image(temp.path(), "photo.jpg", ImageFormat::Jpeg);

    convrt()
        .current_dir(temp.path())
        .args(["photo.jpg", ".png", "-w", "32"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully processed image!"))
        .stdout(predicate::str::contains("Resizing image to 32x0"))
        .stdout(predicate::str::contains("Output: photo.png"));

    temp.child("photo.png").assert(predicate::path::exists());
}

#[test]
fn test_optimize_writes_suffixed_file() {
    let temp = TempDir::new().unwrap();
    write_image(temp.path(), "photo.jpg", ImageFormat::Jpeg);

    convrt()
        .current_dir(temp.path())
        .args(["photo.jpg", "-o", "-q", "20"])
        .assert()
        .success();

    temp.child("photo_optimized.jpg")
        .assert(predicate::path::exists());
}

#[test]
fn test_missing_mode_reports_invalid_command() {
    let temp = TempDir::new().unwrap();
    write_image(temp.path(), "photo.png", ImageFormat::Png);

    convrt()
        .current_dir(temp.path())
        .arg("photo.png")
        .assert()
        .success()
        .stderr(predicate::str::contains("invalid command"));
}

#[test]
fn test_unsupported_target_names_supported_formats() {
    let temp = TempDir::new().unwrap();
    write_image(temp.path(), "photo.png", ImageFormat::Png);

    convrt()
        .current_dir(temp.path())
        .args(["photo.png", ".bmp"])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "unsupported format: bmp (supported formats: jpg, jpeg, png, gif, tiff, webp)",
        ));

    temp.child("photo.bmp").assert(predicate::path::missing());
}

#[test]
fn test_glob_batch_continues_after_failure() {
    let temp = TempDir::new().unwrap();
    write_image(temp.path(), "a.jpg", ImageFormat::Jpeg);
    write_garbage(temp.path(), "b.jpg");
    write_image(temp.path(), "c.jpg", ImageFormat::Jpeg);

    convrt()
        .current_dir(temp.path())
        .args(["*.jpg", ".webp"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Error processing b.jpg"))
        .stdout(predicate::str::contains("Processed 2 of 3 files, 1 failed"));

    temp.child("a.webp").assert(predicate::path::exists());
    temp.child("b.webp").assert(predicate::path::missing());
    temp.child("c.webp").assert(predicate::path::exists());
}

#[test]
fn test_directory_input_recurses_without_flag() {
    let temp = TempDir::new().unwrap();
    let nested = temp.child("nested");
    nested.create_dir_all().unwrap();
    write_image(temp.path(), "top.png", ImageFormat::Png);
    write_image(nested.path(), "deep.png", ImageFormat::Png);

    convrt()
        .arg(temp.path())
        .arg(".gif")
        .assert()
        .success();

    temp.child("top.gif").assert(predicate::path::exists());
    nested.child("deep.gif").assert(predicate::path::exists());
}

#[test]
fn test_quiet_suppresses_success_output() {
    let temp = TempDir::new().unwrap();
    write_image(temp.path(), "photo.png", ImageFormat::Png);

    convrt()
        .current_dir(temp.path())
        .args(["photo.png", ".jpg", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    temp.child("photo.jpg").assert(predicate::path::exists());
}

#[test]
fn test_lenient_mode_ignores_malformed_flags() {
    let temp = TempDir::new().unwrap();
    write_image(temp.path(), "photo.png", ImageFormat::Png);

    convrt()
        .current_dir(temp.path())
        .env("CONVRT_LENIENT_ARGS", "1")
        .args(["photo.png", ".jpg", "-q", "high", "--bogus"])
        .assert()
        .success();

    temp.child("photo.jpg").assert(predicate::path::exists());
}

#[test]
fn test_quality_from_environment() {
    let temp = TempDir::new().unwrap();
    write_image(temp.path(), "photo.png", ImageFormat::Png);

    convrt()
        .current_dir(temp.path())
        .env("CONVRT_QUALITY", "abc")
        .args(["photo.png", ".jpg"])
        .assert()
        .code(2);
}
