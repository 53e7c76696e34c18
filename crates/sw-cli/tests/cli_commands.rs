//! Integration tests for the `spacewar` CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn spacewar() -> Command {
    Command::cargo_bin("spacewar").unwrap()
}

/// A temp directory holding `tuning.toml` with the given contents.
fn tuning_file(contents: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("tuning.toml"), contents).unwrap();
    dir
}

#[test]
fn help_lists_commands() {
    spacewar()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("simulate").and(predicate::str::contains("tuning")));
}

// ---------------------------------------------------------------------------
// tuning
// ---------------------------------------------------------------------------

#[test]
fn tuning_prints_defaults() {
    spacewar()
        .arg("tuning")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("[ship]")
                .and(predicate::str::contains("max_speed = 5.0"))
                .and(predicate::str::contains("fire_cost = 5.0")),
        );
}

#[test]
fn tuning_merges_override_file() {
    let dir = tuning_file("[ship]\nfire_cost = 7.5\n");
    let path = dir.path().join("tuning.toml");
    spacewar()
        .args(["tuning", "--file", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("fire_cost = 7.5")
                .and(predicate::str::contains("thrust_cost = 0.5")),
        );
}

#[test]
fn tuning_rejects_invalid_values() {
    let dir = tuning_file("[motion]\nmax_speed = -1.0\n");
    let path = dir.path().join("tuning.toml");
    spacewar()
        .args(["tuning", "--file", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("error:").and(predicate::str::contains("motion.max_speed")),
        );
}

#[test]
fn tuning_rejects_malformed_toml() {
    let dir = tuning_file("[ship\nfire_cost = ");
    let path = dir.path().join("tuning.toml");
    spacewar()
        .args(["tuning", "--file", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse tuning"));
}

// ---------------------------------------------------------------------------
// simulate
// ---------------------------------------------------------------------------

#[test]
fn simulate_prints_summary() {
    spacewar()
        .args(["simulate", "--ticks", "120"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Spacewar")
                .and(predicate::str::contains("Ship Status"))
                .and(predicate::str::contains("P1"))
                .and(predicate::str::contains("P2")),
        );
}

#[test]
fn simulate_verbose_shows_event_log() {
    spacewar()
        .args(["simulate", "--ticks", "120", "--verbose"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Event Log"));
}

#[test]
fn simulate_json_is_valid() {
    let output = spacewar()
        .args(["simulate", "--ticks", "60", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON output");
    assert_eq!(json["seed"], 42);
    assert_eq!(json["ticks"], 60);
    assert_eq!(json["state"]["ships"].as_array().unwrap().len(), 2);
    assert_eq!(json["state"]["wells"].as_array().unwrap().len(), 1);
    assert_eq!(
        json["state"]["ships"][0]["subsystems"].as_array().unwrap().len(),
        5
    );
}

#[test]
fn simulate_is_deterministic() {
    let run = || {
        spacewar()
            .args(["simulate", "--ticks", "300", "--seed", "7", "--json"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone()
    };
    assert_eq!(run(), run());
}

#[test]
fn simulate_with_tuning_file() {
    let dir = tuning_file("[ship]\nstarting_lives = 1\n");
    let path = dir.path().join("tuning.toml");
    let output = spacewar()
        .args(["simulate", "--ticks", "1", "--json", "--tuning", path.to_str().unwrap()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["state"]["ships"][0]["lives"], 1);
}

#[test]
fn simulate_lives_flag_overrides_tuning() {
    let output = spacewar()
        .args(["simulate", "--ticks", "1", "--json", "--lives", "5"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["state"]["ships"][1]["lives"], 5);
}

#[test]
fn simulate_missing_tuning_file() {
    spacewar()
        .args(["simulate", "--tuning", "/nonexistent/tuning.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read tuning file"));
}

#[test]
fn simulate_rejects_negative_lives() {
    spacewar()
        .args(["simulate", "--ticks", "1", "--lives=-2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("starting_lives"));
}
