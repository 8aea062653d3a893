// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn av_settings(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("av-settings").expect("binary should build");
    cmd.current_dir(dir.path());
    for var in [
        "AV_BACKEND_URL",
        "AV_EVENT_BUS_URL",
        "AV_LICENSE_KEY",
        "AV_END_FRAME_INCLUSIVE",
        "AV_SHOW_THEME_SELECT",
        "AV_SHOW_ASSET_VIEW",
        "AV_WAVEFORM_ACTIVE",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_cli_help() {
    let tmp = TempDir::new().expect("tmp");
    av_settings(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("resolve"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn test_resolve_template_with_override() {
    let tmp = TempDir::new().expect("tmp");
    fs::write(
        tmp.path().join("prod.json"),
        r#"{"backendUrl": "/v2/api", "qc": {"features": {"markers": true}}}"#,
    )
    .expect("write");

    av_settings(&tmp)
        .args(["resolve", "--template", "frontend", "-o", "prod.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""backendUrl": "/v2/api""#))
        .stdout(predicate::str::contains(r#""markers": true"#))
        .stdout(predicate::str::contains(r#""assetStatus": false"#));
}

#[test]
fn test_resolve_env_layer_is_last() {
    let tmp = TempDir::new().expect("tmp");
    fs::write(tmp.path().join("a.toml"), "licenseKey = \"from-file\"\n").expect("write");

    av_settings(&tmp)
        .args(["resolve", "--template", "assets", "-o", "a.toml", "--env"])
        .env("AV_LICENSE_KEY", "from-env")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""licenseKey": "from-env""#));
}

#[test]
fn test_check_reports_unknown_shape() {
    let tmp = TempDir::new().expect("tmp");
    fs::write(
        tmp.path().join("bad.json"),
        r#"{"ingest": {"preferredAudioShapes": ["flac"]}}"#,
    )
    .expect("write");

    av_settings(&tmp)
        .args(["check", "--template", "frontend", "-o", "bad.json"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Unknown audio shape 'flac'").count(1));
}

#[test]
fn test_check_permissive_accepts_unknown_shape() {
    let tmp = TempDir::new().expect("tmp");
    fs::write(
        tmp.path().join("bad.json"),
        r#"{"ingest": {"preferredAudioShapes": ["flac"]}}"#,
    )
    .expect("write");

    av_settings(&tmp)
        .args(["check", "--template", "frontend", "-o", "bad.json", "--permissive"])
        .assert()
        .success()
        .stdout(predicate::str::contains("settings are valid"));
}

#[test]
fn test_check_json_output() {
    let tmp = TempDir::new().expect("tmp");
    fs::write(
        tmp.path().join("dangling.json"),
        r#"{"timeline": {"waveforms": {"active": "missing"}}}"#,
    )
    .expect("write");

    av_settings(&tmp)
        .args([
            "--format",
            "json",
            "check",
            "--template",
            "frontend",
            "-o",
            "dangling.json",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains(r#""valid":false"#));
}

#[test]
fn test_init_writes_template_and_refuses_overwrite() {
    let tmp = TempDir::new().expect("tmp");

    av_settings(&tmp)
        .args(["init", "--template", "assets"])
        .assert()
        .success();

    let written = fs::read_to_string(tmp.path().join("av-settings.json")).expect("read");
    assert!(written.contains("<licencense-key>"));

    av_settings(&tmp)
        .args(["init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    av_settings(&tmp)
        .args(["init", "--force"])
        .assert()
        .success();
}

#[test]
fn test_resolve_uses_discovered_file() {
    let tmp = TempDir::new().expect("tmp");
    fs::write(tmp.path().join("av-settings.json"), r#"{"showThemeSelect": true}"#)
        .expect("write");

    av_settings(&tmp)
        .arg("resolve")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""showThemeSelect": true"#));
}

#[test]
fn test_shapes_lists_kind() {
    let tmp = TempDir::new().expect("tmp");
    av_settings(&tmp)
        .args(["shapes", "--kind", "subtitle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("vtt"))
        .stdout(predicate::str::contains("h264").not());
}
