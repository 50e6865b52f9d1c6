//! End-to-end tests of the `certigrade` binary.

use indoc::indoc;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn certigrade(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_certigrade"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute certigrade")
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        eprintln!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        panic!("certigrade command failed");
    }
}

fn grade_args<'a>(card: &'a str, score: &'a str, base: &'a str) -> Vec<&'a str> {
    vec![
        "grade",
        "--card-id",
        card,
        "--centering",
        score,
        "--corners",
        score,
        "--edges",
        score,
        "--surface",
        score,
        "--base-value",
        base,
    ]
}

#[test]
fn grade_prints_json_result() {
    let dir = TempDir::new().unwrap();
    let mut args = grade_args("base1-4", "9", "100");
    args.extend(["--format", "json"]);

    let output = certigrade(dir.path(), &args);
    assert_success(&output);

    let json: Value = serde_json::from_slice(&output.stdout).expect("Output is not valid JSON");
    assert_eq!(json["cardId"], "base1-4");
    assert_eq!(json["overallGrade"], 9.0);
    assert_eq!(json["estimatedValue"], 250.0);
    assert_eq!(json["flaws"].as_array().unwrap().len(), 0);
}

#[test]
fn grade_writes_markdown_to_file() {
    let dir = TempDir::new().unwrap();
    let report = dir.path().join("reports").join("card.md");
    let mut args = grade_args("base1-4", "6.5", "40");
    args.extend(["--format", "markdown", "--output", report.to_str().unwrap()]);

    assert_success(&certigrade(dir.path(), &args));

    let text = fs::read_to_string(&report).unwrap();
    assert!(text.contains("# Pre-Grade Report: base1-4"));
    assert!(text.contains("## Detected Flaws"));
}

#[test]
fn out_of_range_score_fails() {
    let dir = TempDir::new().unwrap();
    let output = certigrade(
        dir.path(),
        &[
            "grade",
            "--card-id",
            "base1-4",
            "--centering",
            "11",
            "--corners",
            "9",
            "--edges",
            "9",
            "--surface",
            "9",
            "--base-value",
            "100",
        ],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("centering"), "stderr: {}", stderr);
    assert!(output.stdout.is_empty());
}

#[test]
fn negative_base_value_fails() {
    let dir = TempDir::new().unwrap();
    let output = certigrade(dir.path(), &grade_args("base1-4", "9", "-5"));

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("base value"));
}

#[test]
fn saved_gradings_appear_in_history() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("history.json");
    let store = store.to_str().unwrap();

    for (card, score) in [("base1-4", "9"), ("base1-2", "7.5")] {
        let mut args = grade_args(card, score, "100");
        args.extend(["--format", "json", "--save", "--user", "ash", "--store", store]);
        assert_success(&certigrade(dir.path(), &args));
    }

    let output = certigrade(
        dir.path(),
        &["history", "--user", "ash", "--store", store, "--format", "json"],
    );
    assert_success(&output);

    let records: Value = serde_json::from_slice(&output.stdout).unwrap();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["cardId"], "base1-2");
    assert_eq!(records[0]["gradingCompany"], "DeckLab AI");
    assert!(records[0]["verificationID"]
        .as_str()
        .unwrap()
        .starts_with("DL"));

    let output = certigrade(
        dir.path(),
        &[
            "history", "--user", "ash", "--store", store, "--card-id", "base1-4", "--format",
            "json",
        ],
    );
    assert_success(&output);
    let records: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(records.as_array().unwrap().len(), 1);
}

#[test]
fn batch_grades_valid_requests_and_reports_invalid_ones() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("requests.json");
    let report = dir.path().join("batch.json");
    fs::write(
        &input,
        indoc! {r#"
            [
              {"cardId": "a", "axisScores": {"centering": 9, "corners": 9, "edges": 9, "surface": 9}, "baseValue": 100},
              {"cardId": "b", "axisScores": {"centering": 11, "corners": 9, "edges": 9, "surface": 9}, "baseValue": 100}
            ]
        "#},
    )
    .unwrap();

    let output = certigrade(
        dir.path(),
        &[
            "batch",
            input.to_str().unwrap(),
            "--format",
            "json",
            "--output",
            report.to_str().unwrap(),
        ],
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("1 of 2"));

    let entries: Value = serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries[0]["result"]["estimatedValue"], 250.0);
    assert_eq!(entries[1]["cardId"], "b");
    assert_eq!(entries[1]["error"]["code"], "E050");
}

#[test]
fn config_file_changes_weights() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("surface-only.toml");
    fs::write(
        &config,
        indoc! {r#"
            [weights]
            centering = 0.0
            corners = 0.0
            edges = 0.0
            surface = 1.0
        "#},
    )
    .unwrap();

    let output = certigrade(
        dir.path(),
        &[
            "grade",
            "--card-id",
            "base1-4",
            "--centering",
            "2",
            "--corners",
            "2",
            "--edges",
            "2",
            "--surface",
            "10",
            "--base-value",
            "10",
            "--format",
            "json",
            "--config",
            config.to_str().unwrap(),
        ],
    );
    assert_success(&output);

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["overallGrade"], 10.0);
    assert_eq!(json["flaws"].as_array().unwrap().len(), 3);
}

#[test]
fn invalid_explicit_config_fails() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("bad.toml");
    fs::write(&config, "[weights]\ncentering = 0.9\n").unwrap();

    let mut args = grade_args("base1-4", "9", "100");
    args.extend(["--config", config.to_str().unwrap()]);
    let output = certigrade(dir.path(), &args);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("bad.toml"));
}

#[test]
fn discovered_config_sets_default_format() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".certigrade.toml"),
        "[output]\ndefault_format = \"json\"\n",
    )
    .unwrap();

    let output = certigrade(dir.path(), &grade_args("base1-4", "9", "100"));
    assert_success(&output);
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["overallGrade"], 9.0);
}

#[test]
fn init_creates_config_once() {
    let dir = TempDir::new().unwrap();

    assert_success(&certigrade(dir.path(), &["init"]));
    assert!(dir.path().join(".certigrade.toml").exists());

    assert!(!certigrade(dir.path(), &["init"]).status.success());
    assert_success(&certigrade(dir.path(), &["init", "--force"]));
}

#[test]
fn services_and_cost_catalogs() {
    let dir = TempDir::new().unwrap();

    let output = certigrade(dir.path(), &["services", "--format", "json"]);
    assert_success(&output);
    let services: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(services[0]["name"], "PSA");
    assert_eq!(services.as_array().unwrap().len(), 3);

    let output = certigrade(
        dir.path(),
        &[
            "cost",
            "--tier",
            "economy",
            "--base-value",
            "100",
            "--estimated-value",
            "250",
            "--format",
            "json",
        ],
    );
    assert_success(&output);
    let cost: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(cost["cost"], 20.0);
    assert_eq!(cost["turnaroundTime"], "45-60 business days");
    assert_eq!(cost["worthGrading"], true);
}

#[test]
fn cost_rejects_negative_base_value() {
    let dir = TempDir::new().unwrap();
    let output = certigrade(
        dir.path(),
        &[
            "cost",
            "--tier",
            "economy",
            "--base-value=-1000",
            "--estimated-value",
            "0",
            "--format",
            "json",
        ],
    );

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("base value"));
    assert!(output.stdout.is_empty());

    let output = certigrade(
        dir.path(),
        &["cost", "--tier", "economy", "--base-value", "100"],
    );
    assert!(!output.status.success());
}

#[cfg(target_os = "linux")]
#[test]
fn failed_output_file_write_is_reported() {
    let dir = TempDir::new().unwrap();
    let mut args = grade_args("base1-4", "9", "100");
    args.extend(["--format", "json", "--output", "/dev/full"]);

    let output = certigrade(dir.path(), &args);

    assert!(!output.status.success());
    assert!(!output.stderr.is_empty());
}
