//! Integration tests for the `loom` binary.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const OWNER: &str = "1237720626152607794";

/// A `loom` command with a credential, saving under `dir`.
fn loom(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("loom").unwrap();
    cmd.current_dir(dir.path())
        .env("LOOM_BOT_TOKEN", "test-token")
        .env_remove("LOOM_OWNER_ID")
        .env_remove("LOOM_DATA_DIR")
        .env_remove("LOOM_ON_CORRUPT")
        .env_remove("RUST_LOG")
        .arg("--data")
        .arg(dir.path().join("saves"));
    cmd
}

fn save_file(dir: &TempDir) -> PathBuf {
    dir.path().join("saves").join("local.save")
}

fn started() -> TempDir {
    let dir = TempDir::new().unwrap();
    loom(&dir).arg("start").assert().success();
    dir
}

// ---------------------------------------------------------------------------
// startup
// ---------------------------------------------------------------------------

#[test]
fn missing_credential_fails_fast() {
    let dir = TempDir::new().unwrap();
    loom(&dir)
        .env_remove("LOOM_BOT_TOKEN")
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("LOOM_BOT_TOKEN"));
    assert!(!save_file(&dir).exists());
}

#[test]
fn invalid_owner_fails_fast() {
    let dir = TempDir::new().unwrap();
    loom(&dir)
        .env("LOOM_OWNER_ID", "nobody")
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("LOOM_OWNER_ID"));
}

// ---------------------------------------------------------------------------
// start / choice / status
// ---------------------------------------------------------------------------

#[test]
fn start_prints_prologue() {
    let dir = TempDir::new().unwrap();
    loom(&dir)
        .arg("start")
        .assert()
        .success()
        .stdout(predicate::str::contains("The Loom Below — Prologue"))
        .stdout(predicate::str::contains("Remain silent and listen"));

    let saved = fs::read_to_string(save_file(&dir)).unwrap();
    assert!(saved.starts_with("LOOM_SAVE_JSON::{"));
}

#[test]
fn choice_advances_scene() {
    let dir = started();
    loom(&dir)
        .args(["choice", "attack the guard"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Chapter 1, Scene 2"))
        .stdout(predicate::str::contains(
            "Affinity `0` | Thread `1` | Resolve `0`",
        ));
}

#[test]
fn blank_choice_plays_a_turn() {
    let dir = started();
    loom(&dir)
        .args(["choice", " "])
        .assert()
        .success()
        .stdout(predicate::str::contains("Chapter 1, Scene 2"));
    loom(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("History entries: `3`"));
}

#[test]
fn status_counts_history() {
    let dir = started();
    loom(&dir).args(["choice", "wait"]).assert().success();
    loom(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Chapter: `1` | Scene: `2`"))
        .stdout(predicate::str::contains("History entries: `3`"));
}

#[test]
fn status_without_save_creates_default() {
    let dir = TempDir::new().unwrap();
    loom(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("History entries: `0`"));
    assert!(save_file(&dir).exists());
}

#[test]
fn scopes_are_separate_stories() {
    let dir = started();
    loom(&dir).args(["choice", "kill"]).assert().success();
    loom(&dir)
        .args(["--scope", "other", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Thread `0`"));
}

// ---------------------------------------------------------------------------
// authorization
// ---------------------------------------------------------------------------

#[test]
fn stranger_is_refused_and_save_untouched() {
    let dir = started();
    let before = fs::read_to_string(save_file(&dir)).unwrap();

    for args in [
        vec!["start"],
        vec!["choice", "attack"],
        vec!["status"],
        vec!["export"],
    ] {
        loom(&dir)
            .args(["--user", "5"])
            .args(&args)
            .assert()
            .failure()
            .stderr(predicate::str::contains("You are not allowed to use this bot."));
    }

    assert_eq!(fs::read_to_string(save_file(&dir)).unwrap(), before);
    assert!(!dir.path().join("loom_export.json").exists());
}

#[test]
fn owner_can_be_configured() {
    let dir = TempDir::new().unwrap();
    loom(&dir)
        .env("LOOM_OWNER_ID", "77")
        .args(["--user", "77", "start"])
        .assert()
        .success();
    loom(&dir)
        .env("LOOM_OWNER_ID", "77")
        .args(["--user", OWNER, "status"])
        .assert()
        .failure();
}

// ---------------------------------------------------------------------------
// export / import
// ---------------------------------------------------------------------------

#[test]
fn export_writes_pretty_json() {
    let dir = started();
    loom(&dir).args(["choice", "protect her"]).assert().success();
    loom(&dir)
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("Here is your export"));

    let text = fs::read_to_string(dir.path().join("loom_export.json")).unwrap();
    assert!(text.contains("\n  \"scene\": 2,"));
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["stats"]["affinity"], 1);
    assert_eq!(value["memory"].as_array().unwrap().len(), 3);
}

#[test]
fn export_to_custom_path() {
    let dir = started();
    let out = dir.path().join("backup.json");
    loom(&dir)
        .args(["export", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported to"));
    assert!(out.exists());
}

#[test]
fn import_roundtrip() {
    let dir = started();
    loom(&dir).args(["choice", "investigate"]).assert().success();
    loom(&dir).arg("export").assert().success();
    let exported = fs::read_to_string(save_file(&dir)).unwrap();

    loom(&dir).arg("start").assert().success();
    loom(&dir)
        .arg("import")
        .arg(dir.path().join("loom_export.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported save!"))
        .stdout(predicate::str::contains("Entries: `3`"));

    assert_eq!(fs::read_to_string(save_file(&dir)).unwrap(), exported);
}

#[test]
fn import_missing_stats_rejected() {
    let dir = started();
    let before = fs::read_to_string(save_file(&dir)).unwrap();
    let upload = dir.path().join("broken.json");
    fs::write(
        &upload,
        r#"{"title":"X","chapter":2,"scene":1,"memory":[]}"#,
    )
    .unwrap();

    loom(&dir)
        .arg("import")
        .arg(&upload)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required fields"));
    assert_eq!(fs::read_to_string(save_file(&dir)).unwrap(), before);
}

#[test]
fn import_requires_json_extension() {
    let dir = started();
    let upload = dir.path().join("save.txt");
    fs::write(&upload, "{}").unwrap();
    loom(&dir)
        .arg("import")
        .arg(&upload)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please upload a .json file."));
}

#[test]
fn import_invalid_json_rejected() {
    let dir = started();
    let upload = dir.path().join("save.json");
    fs::write(&upload, "{ definitely not").unwrap();
    loom(&dir)
        .arg("import")
        .arg(&upload)
        .assert()
        .failure()
        .stderr(predicate::str::contains("That file is not valid JSON."));
}

// ---------------------------------------------------------------------------
// corruption
// ---------------------------------------------------------------------------

#[test]
fn corrupted_save_resets_silently() {
    let dir = started();
    fs::write(save_file(&dir), "LOOM_SAVE_JSON::{{broken").unwrap();
    loom(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("History entries: `0`"));
}

#[test]
fn corrupted_save_can_fail_instead() {
    let dir = started();
    fs::write(save_file(&dir), "LOOM_SAVE_JSON::{{broken").unwrap();
    loom(&dir)
        .env("LOOM_ON_CORRUPT", "fail")
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("corrupted"));
    assert_eq!(
        fs::read_to_string(save_file(&dir)).unwrap(),
        "LOOM_SAVE_JSON::{{broken"
    );
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_reads_choices_until_quit() {
    let dir = started();
    loom(&dir)
        .arg("play")
        .write_stdin("help the stranger\n\n/status\n/quit\nattack\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Chapter 1, Scene 2"))
        .stdout(predicate::str::contains("History entries: `3`"));

    loom(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Thread `0`"));
}

#[test]
fn play_exports_from_the_loop() {
    let dir = started();
    loom(&dir)
        .arg("play")
        .write_stdin("observe\n/export\n/quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported to loom_export.json"));

    let text = fs::read_to_string(dir.path().join("loom_export.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["scene"], 2);
}
