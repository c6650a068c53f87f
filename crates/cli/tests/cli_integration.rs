//! CLI integration tests for the one-shot subcommands.
//!
//! Uses `assert_cmd` to spawn the `callboard` binary and verify
//! exit codes, stdout content, and stderr content.
//!
//! All tests set `current_dir` to the workspace root so the bundled
//! `data/calls.json` resolves through the default data path.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Locate the workspace root by walking up from CARGO_MANIFEST_DIR.
fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    // crates/cli -> workspace root is two levels up
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .to_path_buf()
}

/// Helper: create a Command for the `callboard` binary, rooted at workspace.
fn callboard() -> Command {
    let mut cmd = cargo_bin_cmd!("callboard");
    cmd.current_dir(workspace_root());
    cmd.env_remove("CALLBOARD_DATA");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().expect("run callboard");
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

// ──────────────────────────────────────────────
// 1. Help and version
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    callboard()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Sales call analytics dashboard backend",
        ));
}

#[test]
fn version_exits_0() {
    callboard()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("callboard"));
}

#[test]
fn no_subcommand_is_a_usage_error() {
    callboard().assert().failure().code(2);
}

// ──────────────────────────────────────────────
// 2. list
// ──────────────────────────────────────────────

#[test]
fn list_shows_all_bundled_calls() {
    callboard()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("PROSPECT"))
        .stdout(predicate::str::contains("Acme Corp"))
        .stdout(predicate::str::contains("Vandelay Imports"))
        .stdout(predicate::str::contains("Showing 8 of 8 calls"));
}

#[test]
fn list_search_is_case_insensitive_and_newest_first() {
    let json = stdout_json(callboard().args(["list", "--search", "ACME", "--output", "json"]));
    let ids: Vec<&str> = json
        .as_array()
        .expect("array")
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    // Hooli mentions Acme in its notes and is the more recent call.
    assert_eq!(ids, vec!["7", "1"]);
}

#[test]
fn list_outcome_filter_and_name_sort() {
    let json = stdout_json(callboard().args([
        "list",
        "--outcome",
        "follow-up",
        "--sort",
        "name",
        "--output",
        "json",
    ]));
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["prospectName"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Initech", "Wayne Ventures"]);
}

#[test]
fn list_with_no_matches_prints_empty_message() {
    callboard()
        .args(["list", "--search", "no such prospect"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No calls found matching your criteria.",
        ))
        .stdout(predicate::str::contains("Showing 0 of 8 calls"));
}

#[test]
fn list_limit_caps_output() {
    let json = stdout_json(callboard().args(["list", "--limit", "3", "--output", "json"]));
    assert_eq!(json.as_array().unwrap().len(), 3);
}

#[test]
fn list_rejects_unknown_sort_key() {
    callboard()
        .args(["list", "--sort", "random"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown sort key"));
}

#[test]
fn list_missing_data_file_exits_1() {
    callboard()
        .args(["list", "--data", "does/not/exist.json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn data_path_falls_back_to_env_var() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("one.json");
    fs::write(
        &path,
        r#"[{"id":"x1","prospectName":"Solo Co","date":"2024-03-01T09:00:00Z","duration":60,
            "status":"completed","outcome":"qualified","talkTimeRatio":0.5,
            "questionsAsked":2,"sentimentScore":0.9}]"#,
    )
    .unwrap();

    let mut cmd = callboard();
    cmd.env("CALLBOARD_DATA", &path);
    cmd.arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Solo Co"))
        .stdout(predicate::str::contains("Showing 1 of 1 calls"));
}

// ──────────────────────────────────────────────
// 3. show
// ──────────────────────────────────────────────

#[test]
fn show_prints_detail_view() {
    callboard()
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Acme Corp"))
        .stdout(predicate::str::contains("Jan 15, 2024"))
        .stdout(predicate::str::contains("Duration:        30:45"))
        .stdout(predicate::str::contains("Tags: enterprise, hot-lead"));
}

#[test]
fn show_json_is_the_record() {
    let json = stdout_json(callboard().args(["show", "4", "--output", "json"]));
    assert_eq!(json["prospectName"], "Umbrella Health");
    assert_eq!(json["outcome"], "closed-won");
}

#[test]
fn show_missing_id_exits_1() {
    callboard()
        .args(["show", "999"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("call not found: 999"));
}

// ──────────────────────────────────────────────
// 4. stats and dashboard
// ──────────────────────────────────────────────

#[test]
fn stats_text_summary() {
    callboard()
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total calls:    8"))
        .stdout(predicate::str::contains("Qualified:      3 (38%)"))
        .stdout(predicate::str::contains("Avg duration:   27m"));
}

#[test]
fn stats_json_reports_overall_and_filtered() {
    let json = stdout_json(callboard().args([
        "stats",
        "--search",
        "enterprise",
        "--output",
        "json",
    ]));
    assert_eq!(json["overall"]["total"], 8);
    assert_eq!(json["filtered"]["total"], 3);
    assert_eq!(json["filtered"]["qualifiedCount"], 2);
}

#[test]
fn dashboard_text_has_every_section() {
    callboard()
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sales Dashboard"))
        .stdout(predicate::str::contains("Outcomes"))
        .stdout(predicate::str::contains("Call length"))
        .stdout(predicate::str::contains("Daily calls"))
        .stdout(predicate::str::contains("Calls (all: 6 of 8)"));
}

#[test]
fn dashboard_qualified_filter_with_all() {
    let json = stdout_json(callboard().args([
        "dashboard",
        "--filter",
        "qualified",
        "--all",
        "--output",
        "json",
    ]));
    assert_eq!(json["filter"], "qualified");
    assert_eq!(json["matching"], 3);
    assert_eq!(json["calls"].as_array().unwrap().len(), 3);
    // Charts always describe the whole collection.
    assert_eq!(json["stats"]["total"], 8);
}

#[test]
fn dashboard_rejects_unknown_filter() {
    callboard()
        .args(["dashboard", "--filter", "hot"])
        .assert()
        .failure()
        .code(1);
}

// ──────────────────────────────────────────────
// 5. validate and generate
// ──────────────────────────────────────────────

#[test]
fn validate_bundled_data() {
    callboard()
        .args(["validate", "data/calls.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("valid (8 calls)"));
}

#[test]
fn validate_rejects_bad_outcome() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(
        &path,
        r#"{"calls":[{"id":"1","prospectName":"A","date":"2024-01-01T00:00:00Z","duration":1,
            "status":"completed","outcome":"maybe","talkTimeRatio":0.1,
            "questionsAsked":1,"sentimentScore":0.1}]}"#,
    )
    .unwrap();

    callboard()
        .arg("validate")
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid call collection"));
}

#[test]
fn validate_rejects_duplicate_ids() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dupes.json");
    let record = r#"{"id":"1","prospectName":"A","date":"2024-01-01T00:00:00Z","duration":1,
        "status":"completed","outcome":"qualified","talkTimeRatio":0.1,
        "questionsAsked":1,"sentimentScore":0.1}"#;
    fs::write(&path, format!("[{},{}]", record, record)).unwrap();

    callboard()
        .args(["validate", "--output", "json"])
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("\"valid\": false"));
}

#[test]
fn generate_with_seed_is_repeatable_and_valid() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");

    for path in [&first, &second] {
        callboard()
            .args(["generate", "--count", "12", "--seed", "42", "--out"])
            .arg(path)
            .assert()
            .success()
            .stderr(predicate::str::contains("wrote 12 calls"));
    }
    // Dates are relative to the current time; everything else follows the seed.
    let fingerprint = |path: &PathBuf| -> Vec<(String, u64, String)> {
        let doc: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        doc["calls"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| {
                (
                    c["prospectName"].as_str().unwrap().to_string(),
                    c["duration"].as_u64().unwrap(),
                    c["outcome"].as_str().unwrap().to_string(),
                )
            })
            .collect()
    };
    assert_eq!(fingerprint(&first), fingerprint(&second));

    callboard()
        .arg("validate")
        .arg(&first)
        .assert()
        .success()
        .stdout(predicate::str::contains("valid (12 calls)"));
}

#[test]
fn generate_to_stdout_is_a_collection() {
    let json = stdout_json(callboard().args(["generate", "--count", "3", "--seed", "7"]));
    assert_eq!(json["calls"].as_array().unwrap().len(), 3);
}
