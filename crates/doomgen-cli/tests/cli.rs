use assert_cmd::Command;
use doomgen::test_support::sample_flf;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn write_font(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("mini.flf");
    fs::write(&path, sample_flf()).unwrap();
    path
}

fn doomgen() -> Command {
    Command::cargo_bin("doomgen").unwrap()
}

#[test]
fn renders_ansi_to_stdout() {
    let dir = TempDir::new().unwrap();
    let font = write_font(&dir);
    doomgen()
        .args(["render", "AB", "--font"])
        .arg(&font)
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{1b}[38;2;"));
}

#[test]
fn writes_svg_file() {
    let dir = TempDir::new().unwrap();
    let font = write_font(&dir);
    let out = dir.path().join("banner.svg");
    doomgen()
        .args(["render", "DOOM", "--font"])
        .arg(&font)
        .arg("--output")
        .arg(&out)
        .assert()
        .success();
    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.contains("viewBox=\"0 0 "));
    assert!(svg.contains("<tspan"));
}

#[test]
fn shell_output_is_executable() {
    let dir = TempDir::new().unwrap();
    let font = write_font(&dir);
    let out = dir.path().join("banner.sh");
    doomgen()
        .args(["render", "A", "--font"])
        .arg(&font)
        .arg("--output")
        .arg(&out)
        .assert()
        .success();
    let script = fs::read_to_string(&out).unwrap();
    assert!(script.starts_with("#!/usr/bin/env bash"));
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(&out).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }
}

#[test]
fn snapshot_round_trips_through_convert() {
    let dir = TempDir::new().unwrap();
    let font = write_font(&dir);
    let json = dir.path().join("save.doomgen.json");
    doomgen()
        .args(["render", "HI", "--font"])
        .arg(&font)
        .arg("--output")
        .arg(&json)
        .args(["--palette", "toxic-waste", "--drip", "0"])
        .assert()
        .success();

    let ans = dir.path().join("banner.ans");
    doomgen()
        .arg("convert")
        .arg(&json)
        .arg("--output")
        .arg(&ans)
        .assert()
        .success();
    let text = fs::read_to_string(&ans).unwrap();
    assert!(text.contains("\u{1b}[38;2;"));
}

#[test]
fn convert_rejects_wrong_version() {
    let dir = TempDir::new().unwrap();
    let bad = dir.path().join("bad.doomgen.json");
    fs::write(&bad, r#"{"version": 2, "state": {}}"#).unwrap();
    doomgen()
        .arg("convert")
        .arg(&bad)
        .args(["--output", "out.svg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported snapshot version"));
}

#[test]
fn unknown_palette_fails_with_message() {
    let dir = TempDir::new().unwrap();
    let font = write_font(&dir);
    doomgen()
        .args(["render", "A", "--palette", "imp", "--font"])
        .arg(&font)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown palette"));
}

#[test]
fn missing_font_fails() {
    doomgen()
        .args(["render", "A", "--font", "/no/such/font.flf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("loading font"));
}

#[test]
fn unsupported_extension_fails() {
    let dir = TempDir::new().unwrap();
    let font = write_font(&dir);
    let out = dir.path().join("banner.tiff");
    doomgen()
        .args(["render", "A", "--font"])
        .arg(&font)
        .arg("--output")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported output extension"));
}

#[test]
fn palettes_lists_registry() {
    doomgen()
        .arg("palettes")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("hellfire")
                .and(predicate::str::contains("bfg-9000"))
                .and(predicate::str::contains("#ff4500")),
        );
}

#[test]
fn inspect_prints_font_metadata() {
    let dir = TempDir::new().unwrap();
    let font = write_font(&dir);
    doomgen()
        .arg("inspect")
        .arg(&font)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("flf2a$ 3 2 10 0 1")
                .and(predicate::str::contains("glyphs: 95")),
        );
}
