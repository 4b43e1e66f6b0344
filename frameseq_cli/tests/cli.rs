use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn frameseq(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("frameseq").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env_remove("FRAMESEQ_OUTPUT__DEFAULT_FORMAT")
        .env_remove("RUST_LOG");
    cmd
}

fn create_shot_directory() -> TempDir {
    let dir = TempDir::new().unwrap();
    let base = dir.path();

    for frame in 1..=5 {
        fs::write(base.join(format!("beauty.{frame:04}.exr")), b"").unwrap();
    }
    for frame in [10, 11, 12, 20] {
        fs::write(base.join(format!("plate.{frame}.dpx")), b"").unwrap();
    }
    fs::write(base.join("take.1.mov"), b"").unwrap();
    fs::write(base.join("take.2.mov"), b"").unwrap();
    fs::write(base.join("notes.txt"), b"").unwrap();
    fs::create_dir(base.join("comp")).unwrap();

    dir
}

#[test]
fn test_version() {
    let config = TempDir::new().unwrap();
    frameseq(config.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_ls_groups_sequences() {
    let config = TempDir::new().unwrap();
    let shot = create_shot_directory();

    frameseq(config.path())
        .arg("ls")
        .arg(shot.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("beauty.0001-0005.exr  [5 frames]"))
        .stdout(predicate::str::contains("plate.10-12,20.dpx  [4 frames]"))
        // .mov is not a default sequence extension
        .stdout(predicate::str::contains("take.1.mov"))
        .stdout(predicate::str::contains("notes.txt"));
}

#[test]
fn test_ls_no_defaults_groups_every_extension() {
    let config = TempDir::new().unwrap();
    let shot = create_shot_directory();

    frameseq(config.path())
        .args(["ls", "--no-defaults"])
        .arg(shot.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("take.1-2.mov"));
}

#[test]
fn test_ls_range_and_no_sequences() {
    let config = TempDir::new().unwrap();
    let shot = create_shot_directory();

    frameseq(config.path())
        .args(["ls", "--range"])
        .arg(shot.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("plate.10-20.dpx"));

    frameseq(config.path())
        .args(["ls", "--no-sequences"])
        .arg(shot.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("beauty.0003.exr"))
        .stdout(predicate::str::contains("beauty.0001-0005.exr").not());
}

#[test]
fn test_ls_include_pattern() {
    let config = TempDir::new().unwrap();
    let shot = create_shot_directory();

    frameseq(config.path())
        .args(["ls", "-i", "*.exr"])
        .arg(shot.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("beauty.0001-0005.exr"))
        .stdout(predicate::str::contains("notes.txt").not());
}

#[test]
fn test_ls_json() {
    let config = TempDir::new().unwrap();
    let shot = create_shot_directory();

    let output = frameseq(config.path())
        .args(["ls", "--format", "json", "--sort", "name", "--dirs-first"])
        .arg(shot.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = value.as_array().unwrap();
    assert_eq!(entries[0]["name"], "comp");
    assert_eq!(entries[0]["type"], "directory");

    let beauty = entries
        .iter()
        .find(|e| e["name"] == "beauty.0001-0005.exr")
        .unwrap();
    assert_eq!(beauty["frame_count"], 5);
    assert_eq!(beauty["pad"], 4);
    assert_eq!(beauty["first_frame"], 1);
    assert_eq!(beauty["last_frame"], 5);
}

#[test]
fn test_ls_recursive_csv() {
    let config = TempDir::new().unwrap();
    let shot = create_shot_directory();
    let comp = shot.path().join("comp");
    for frame in 100..=102 {
        fs::write(comp.join(format!("comp_v1.{frame}.png")), b"").unwrap();
    }

    frameseq(config.path())
        .args(["ls", "-r", "--format", "csv"])
        .arg(shot.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "name,directory,type,sequence,frame_count,pad,first_frame,last_frame",
        ))
        .stdout(predicate::str::contains("comp_v1.100-102.png"));
}

#[test]
fn test_ls_max_depth() {
    let config = TempDir::new().unwrap();
    let shot = create_shot_directory();
    let deep = shot.path().join("comp").join("precomp");
    fs::create_dir(&deep).unwrap();
    for frame in 1..=2 {
        fs::write(shot.path().join("comp").join(format!("comp_v1.{frame}.png")), b"").unwrap();
        fs::write(deep.join(format!("matte.{frame}.png")), b"").unwrap();
    }

    frameseq(config.path())
        .args(["ls", "-r", "--max-depth", "1"])
        .arg(shot.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("comp_v1.1-2.png"))
        .stdout(predicate::str::contains("matte.").not());

    frameseq(config.path())
        .args(["ls", "-r"])
        .arg(shot.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("matte.1-2.png"));
}

#[test]
fn test_ls_max_depth_requires_recursive() {
    let config = TempDir::new().unwrap();
    let shot = create_shot_directory();

    frameseq(config.path())
        .args(["ls", "--max-depth", "1"])
        .arg(shot.path())
        .assert()
        .failure();
}

#[cfg(unix)]
#[test]
fn test_ls_follow_links() {
    let config = TempDir::new().unwrap();
    let shot = create_shot_directory();
    let elsewhere = TempDir::new().unwrap();
    for frame in 1..=3 {
        fs::write(elsewhere.path().join(format!("lib.{frame}.exr")), b"").unwrap();
    }
    std::os::unix::fs::symlink(elsewhere.path(), shot.path().join("linked")).unwrap();

    frameseq(config.path())
        .args(["ls", "-r"])
        .arg(shot.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("lib.1-3.exr").not());

    frameseq(config.path())
        .args(["ls", "-r", "--follow-links"])
        .arg(shot.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("lib.1-3.exr"));
}

#[test]
fn test_ls_missing_directory() {
    let config = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();

    frameseq(config.path())
        .arg("ls")
        .arg(dir.path().join("missing"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to list"));
}

#[test]
fn test_expand_with_frames() {
    let config = TempDir::new().unwrap();

    frameseq(config.path())
        .args(["expand", "/shots/render.####.exr", "--frames", "1-3"])
        .assert()
        .success()
        .stdout("/shots/render.0001.exr\n/shots/render.0002.exr\n/shots/render.0003.exr\n");
}

#[test]
fn test_expand_from_disk() {
    let config = TempDir::new().unwrap();
    let shot = create_shot_directory();
    let pattern = shot.path().join("plate.#.dpx");

    frameseq(config.path())
        .args(["expand", "--no-directory"])
        .arg(&pattern)
        .assert()
        .success()
        .stdout("plate.10.dpx\nplate.11.dpx\nplate.12.dpx\nplate.20.dpx\n");
}

#[test]
fn test_expand_unmatched_wildcard() {
    let config = TempDir::new().unwrap();
    let shot = create_shot_directory();

    frameseq(config.path())
        .arg("expand")
        .arg(shot.path().join("missing.####.exr"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No files match"));
}

#[test]
fn test_info_from_member_frame() {
    let config = TempDir::new().unwrap();
    let shot = create_shot_directory();

    frameseq(config.path())
        .arg("info")
        .arg(shot.path().join("beauty.0003.exr"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Frames: 0001-0005"))
        .stdout(predicate::str::contains("Count: 5"))
        .stdout(predicate::str::contains("Padding: 4"));
}

#[test]
fn test_info_uses_default_extensions() {
    let config = TempDir::new().unwrap();
    let shot = create_shot_directory();

    // .mov is not grouped by `ls`, so `info` keeps it on its own as well
    frameseq(config.path())
        .arg("info")
        .arg(shot.path().join("take.1.mov"))
        .assert()
        .success()
        .stdout(predicate::str::contains("take.1.mov"))
        .stdout(predicate::str::contains("Frames:").not());

    frameseq(config.path())
        .args(["expand", "--no-directory"])
        .arg(shot.path().join("take.1.mov"))
        .assert()
        .success()
        .stdout("take.1.mov\n");
}

#[test]
fn test_frames_command() {
    let config = TempDir::new().unwrap();

    frameseq(config.path())
        .args(["frames", "1-3,5,6,7"])
        .assert()
        .success()
        .stdout("1-3,5,6,7 (6 frames)\n");

    frameseq(config.path())
        .args(["frames", "--sort", "5-3"])
        .assert()
        .success()
        .stdout("3-5 (3 frames)\n");

    frameseq(config.path())
        .args(["frames", "--list", "0008-0010"])
        .assert()
        .success()
        .stdout("0008\n0009\n0010\n");
}

#[test]
fn test_frames_invalid_spec() {
    let config = TempDir::new().unwrap();

    frameseq(config.path())
        .args(["frames", "1-x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid frame specification"));
}

#[test]
fn test_config_set_get_and_path() {
    let config = TempDir::new().unwrap();

    frameseq(config.path())
        .args(["config", "set", "listing.sort", "name"])
        .assert()
        .success();

    frameseq(config.path())
        .args(["config", "get", "listing.sort"])
        .assert()
        .success()
        .stdout("name\n");

    frameseq(config.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("frameseq"))
        .stdout(predicate::str::contains("config.toml"));

    frameseq(config.path())
        .args(["config", "set", "listing.sort", "size"])
        .assert()
        .failure();
}

#[test]
fn test_config_default_format_applies_to_ls() {
    let config = TempDir::new().unwrap();
    let shot = create_shot_directory();

    frameseq(config.path())
        .args(["config", "set", "output.default_format", "json"])
        .assert()
        .success();

    frameseq(config.path())
        .arg("ls")
        .arg(shot.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("["));
}

#[test]
fn test_completions() {
    let config = TempDir::new().unwrap();

    frameseq(config.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("frameseq"));
}
