use assert_cmd::Command;
use tempfile::TempDir;

const BIN: &str = "lookupctl";

const SNAPSHOT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/fr24-bxl.json");
const DETECTIONS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/detections.json");

/// Empty home so that no local configuration file gets in the way.
///
fn lookupctl(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.env("HOME", home.path()).env_remove("FR24_API_KEY");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let out = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_empty_args() {
    let home = TempDir::new().unwrap();
    lookupctl(&home).assert().failure();
}

#[test]
fn test_help() {
    let home = TempDir::new().unwrap();
    lookupctl(&home).arg("-h").assert().success();
}

#[test]
fn test_version_opt() {
    let home = TempDir::new().unwrap();
    lookupctl(&home).arg("-V").assert().failure();
}

#[test]
fn test_version_keyword() {
    let home = TempDir::new().unwrap();
    lookupctl(&home).arg("version").assert().success();
}

#[test]
fn test_bad_keyword() {
    let home = TempDir::new().unwrap();
    lookupctl(&home).arg("bouh").assert().failure();
}

#[test]
fn test_missing_config() {
    let home = TempDir::new().unwrap();
    lookupctl(&home)
        .args(["-c", "/nonexistent/lookupctl.hcl", "version"])
        .assert()
        .failure();
}

#[test]
fn test_bounds() {
    let home = TempDir::new().unwrap();
    let out = stdout_of(lookupctl(&home).args(["bounds", "--lat", "50.8", "--lon", "4.4"]));
    assert!(out.contains("50.890,50.710,4.258,4.542"));
}

#[test]
fn test_bearing() {
    let home = TempDir::new().unwrap();
    let out = stdout_of(lookupctl(&home).args(["bearing", "--from", "0,0", "--to", "0,1"]));
    assert!(out.contains("bearing 90.0°"));
}

#[test]
fn test_match() {
    let home = TempDir::new().unwrap();
    let out = stdout_of(lookupctl(&home).args([
        "match", "--lat", "50.8", "--lon", "4.4", "--heading", "0", SNAPSHOT,
    ]));
    assert!(out.contains("SN2583"));

    let out = stdout_of(lookupctl(&home).args([
        "match", "--lat", "50.8", "--lon", "4.4", "--heading", "0", "--nearest", SNAPSHOT,
    ]));
    assert!(out.contains("FR4411"));
}

#[test]
fn test_match_nothing() {
    let home = TempDir::new().unwrap();
    let out = stdout_of(lookupctl(&home).args([
        "match", "--lat", "50.8", "--lon", "4.4", "--heading", "45", SNAPSHOT,
    ]));
    assert!(out.contains("no flight in view"));
}

#[test]
fn test_detect() {
    let home = TempDir::new().unwrap();
    let out = stdout_of(lookupctl(&home).args(["detect", DETECTIONS]));
    assert!(out.contains("2 detections kept out of 4"));
}

#[test]
fn test_track_simulated() {
    let home = TempDir::new().unwrap();
    let out = stdout_of(lookupctl(&home).args(["track", "-s", "-d", "2000", DETECTIONS]));
    assert!(out.contains("Tooltip"));
    assert!(out.contains("240.0"));
}

#[test]
fn test_fetch_no_key() {
    let home = TempDir::new().unwrap();
    lookupctl(&home)
        .args(["fetch", "--flight", "SN2583"])
        .assert()
        .failure();
}

#[test]
fn test_completion() {
    let home = TempDir::new().unwrap();
    lookupctl(&home).args(["completion", "bash"]).assert().success();
}
