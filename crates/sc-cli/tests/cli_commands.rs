//! End-to-end tests for the `sc` command-line interface.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const COIN_RUN: &str = r#"{
  "meta": {"name": "Coin Run", "createdAt": "2026-01-01T00:00:00Z"},
  "currentSceneId": "level-1",
  "variables": [{"id": "score", "name": "Score", "initialValue": 0}],
  "assets": [{"id": "img-1", "name": "hero.png"}],
  "scenes": [
    {
      "id": "level-1",
      "name": "Level 1",
      "view": "SIDE",
      "objects": [
        {"id": "hero", "name": "Hero", "type": "Player", "x": 0, "y": 0, "width": 32, "height": 32},
        {"id": "coin", "name": "Coin", "type": "Coin", "x": 100, "y": 0, "width": 16, "height": 16}
      ],
      "events": [
        {"id": "right", "condition": {"type": "KEY_PRESSED", "param": "ArrowRight"},
         "action": {"type": "MOVE_X", "target": "Player", "param": 5}},
        {"id": "grab", "condition": {"type": "COLLISION", "target": "Player", "param": "Coin"},
         "action": {"type": "DESTROY", "target": "OTHER"}},
        {"id": "score", "condition": {"type": "COLLISION", "target": "Player", "param": "Coin"},
         "action": {"type": "VAR_ADD", "target": "SELF", "variableId": "score", "value": 10}},
        {"id": "win", "condition": {"type": "VAR_GT", "variableId": "score", "value": 5},
         "action": {"type": "GOTO_SCENE", "sceneId": "win"}}
      ]
    },
    {"id": "win", "name": "Victory", "objects": [], "events": []}
  ]
}"#;

/// Create a temp directory holding a small two-scene project.
fn test_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("coin-run.json"), COIN_RUN).unwrap();
    dir
}

fn sc() -> Command {
    Command::cargo_bin("sc").unwrap()
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_project_file() {
    let dir = TempDir::new().unwrap();
    sc().current_dir(dir.path())
        .args(["init", "demo", "--preset", "shooter"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created project 'demo'"));

    let text = fs::read_to_string(dir.path().join("demo.json")).unwrap();
    assert!(text.contains("\"Bullet\""));
    assert!(text.contains("TOP_DOWN"));
}

#[test]
fn init_fails_if_file_exists() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("demo.json"), "{}").unwrap();
    sc().current_dir(dir.path())
        .args(["init", "demo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn init_rejects_unknown_preset() {
    let dir = TempDir::new().unwrap();
    sc().current_dir(dir.path())
        .args(["init", "demo", "--preset", "tower-defense"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown preset"));
}

#[test]
fn every_preset_passes_check() {
    for preset in ["empty", "platformer", "rpg", "racing", "shooter", "chase"] {
        let dir = TempDir::new().unwrap();
        sc().current_dir(dir.path())
            .args(["init", "game", "--preset", preset])
            .assert()
            .success();
        sc().current_dir(dir.path())
            .args(["check", "game.json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("All checks passed"));
    }
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_passes_valid_project() {
    let dir = test_project();
    sc().arg("check")
        .arg(dir.path().join("coin-run.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("All checks passed for 'Coin Run'"))
        .stdout(predicate::str::contains("4 rules"));
}

#[test]
fn check_reports_warnings_without_failing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("warn.json");
    fs::write(&path, COIN_RUN.replace("\"sceneId\": \"win\"", "\"sceneId\": \"nowhere\"")).unwrap();
    sc().arg("check")
        .arg(&path)
        .assert()
        .success()
        .stderr(predicate::str::contains("unknown scene 'nowhere'"));
}

#[test]
fn check_fails_on_errors() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, COIN_RUN.replace("\"currentSceneId\": \"level-1\"", "\"currentSceneId\": \"gone\"")).unwrap();
    sc().arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("current scene 'gone' does not exist"));
}

#[test]
fn check_fails_on_malformed_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, "{ not json").unwrap();
    sc().arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid project JSON"));
}

// ---------------------------------------------------------------------------
// scenes / show
// ---------------------------------------------------------------------------

#[test]
fn scenes_lists_all_scenes() {
    let dir = test_project();
    sc().arg("scenes")
        .arg(dir.path().join("coin-run.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Level 1"))
        .stdout(predicate::str::contains("Victory"))
        .stdout(predicate::str::contains("2 scenes"));
}

#[test]
fn show_displays_objects_and_rules() {
    let dir = test_project();
    sc().arg("show")
        .arg(dir.path().join("coin-run.json"))
        .arg("level 1")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hero"))
        .stdout(predicate::str::contains("Score += 10"))
        .stdout(predicate::str::contains("go to scene 'Victory'"));
}

#[test]
fn show_fails_unknown_scene() {
    let dir = test_project();
    sc().arg("show")
        .arg(dir.path().join("coin-run.json"))
        .arg("Bonus Level")
        .assert()
        .failure()
        .stderr(predicate::str::contains("scene not found"));
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

#[test]
fn run_without_input_stays_put() {
    let dir = test_project();
    sc().arg("run")
        .arg(dir.path().join("coin-run.json"))
        .args(["--ticks", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Scene: Level 1"))
        .stdout(predicate::str::contains("Coin"));
}

#[test]
fn run_with_keys_collects_coin_and_switches_scene() {
    let dir = test_project();
    sc().arg("run")
        .arg(dir.path().join("coin-run.json"))
        .args(["--ticks", "40", "--keys", "ArrowRight@1..40", "--verbose"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Scene: Victory"))
        .stdout(predicate::str::contains("switch to scene 'win' requested"))
        .stdout(predicate::str::contains("Score"));
}

#[test]
fn run_starts_in_requested_scene() {
    let dir = test_project();
    sc().arg("run")
        .arg(dir.path().join("coin-run.json"))
        .args(["--ticks", "5", "--scene", "victory"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Scene: Victory"));
}

#[test]
fn run_random_keys_is_deterministic() {
    let dir = test_project();
    let path = dir.path().join("coin-run.json");
    let output = |seed: &str| {
        sc().arg("run")
            .arg(&path)
            .args(["--ticks", "60", "--random-keys", "ArrowRight", "--seed", seed])
            .output()
            .unwrap()
            .stdout
    };
    assert_eq!(output("7"), output("7"));
}

#[test]
fn run_rejects_bad_key_spec() {
    let dir = test_project();
    sc().arg("run")
        .arg(dir.path().join("coin-run.json"))
        .args(["--keys", "ArrowRight"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid key spec"));
}

// ---------------------------------------------------------------------------
// export
// ---------------------------------------------------------------------------

#[test]
fn export_prints_frame_json() {
    let dir = test_project();
    let output = sc()
        .arg("export")
        .arg(dir.path().join("coin-run.json"))
        .args(["--ticks", "3"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let frame: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(frame["tick"], 3);
    assert_eq!(frame["sceneId"], "level-1");
    assert_eq!(frame["instances"].as_array().unwrap().len(), 2);
    assert_eq!(frame["variables"]["score"], 0.0);
}

#[test]
fn export_to_file() {
    let dir = test_project();
    let out = dir.path().join("frame.json");
    sc().arg("export")
        .arg(dir.path().join("coin-run.json"))
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported tick 0"));

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.contains("\"templateId\": \"hero\""));
}
