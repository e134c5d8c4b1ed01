//! Integration tests for the `todo` CLI.
//!
//! Each test works in a temp directory, runs `todo` as a subprocess, and
//! verifies stdout, stderr and/or the data file.

use std::fs;
use std::path::Path;
use std::process::Command;

use pretty_assertions::assert_eq;

/// Run `todo` in `dir`, return (stdout, stderr, success).
fn run_todo(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_todo"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run todo");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `todo` expecting success, return stdout.
fn run_todo_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_todo(dir, args);
    if !success {
        panic!(
            "todo {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

/// Run `todo` expecting failure, return stderr.
fn run_todo_err(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_todo(dir, args);
    if success {
        panic!("todo {:?} unexpectedly succeeded:\nstdout: {}", args, stdout);
    }
    stderr
}

fn write_data(dir: &Path, content: &str) {
    fs::write(dir.join("data.json"), content).unwrap();
}

fn read_data(dir: &Path) -> String {
    fs::read_to_string(dir.join("data.json")).unwrap()
}

const TWO_TASKS: &str = r#"{
    "AB1": { "title": "Buy milk", "done": false },
    "AB2": { "title": "Call mom", "done": true }
}"#;

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

#[test]
fn test_list_empty_creates_file() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_todo_ok(tmp.path(), &["list"]);
    assert_eq!(out.trim(), "no tasks");
    assert_eq!(read_data(tmp.path()), "{}");
}

#[test]
fn test_list_orders_pending_first() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_data(
        tmp.path(),
        r#"{"X1": {"title": "Done one", "done": true}, "X2": {"title": "Open one", "done": false}}"#,
    );
    let out = run_todo_ok(tmp.path(), &["list"]);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines, vec!["[ ] X2        Open one", "[x] X1        Done one"]);
}

#[test]
fn test_list_filters() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_data(tmp.path(), TWO_TASKS);

    let out = run_todo_ok(tmp.path(), &["list", "--done"]);
    assert!(out.contains("Call mom"));
    assert!(!out.contains("Buy milk"));

    let out = run_todo_ok(tmp.path(), &["list", "--pending"]);
    assert!(out.contains("Buy milk"));
    assert!(!out.contains("Call mom"));
}

#[test]
fn test_list_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_data(tmp.path(), TWO_TASKS);
    let out = run_todo_ok(tmp.path(), &["list", "--json"]);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(
        value,
        serde_json::json!([
            {"id": "AB1", "title": "Buy milk", "done": false},
            {"id": "AB2", "title": "Call mom", "done": true}
        ])
    );
}

#[test]
fn test_show_by_prefix() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_data(tmp.path(), TWO_TASKS);
    let out = run_todo_ok(tmp.path(), &["show", "ab2"]);
    assert!(out.contains("[x] Call mom"));
    assert!(out.contains("id:   AB2"));
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

#[test]
fn test_add_prints_id_and_persists() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_todo_ok(tmp.path(), &["add", "Buy", "oat", "milk"]);
    let id = out.trim();
    assert_eq!(id.len(), 36);
    assert_eq!(id, id.to_uppercase());

    let data = read_data(tmp.path());
    let value: serde_json::Value = serde_json::from_str(&data).unwrap();
    assert_eq!(value[id]["title"], "Buy oat milk");
    assert_eq!(value[id]["done"], false);
    // Four-space pretty printing
    assert!(data.contains(&format!("\n    \"{}\": {{\n        \"title\"", id)));
}

#[test]
fn test_add_rejects_blank_title() {
    let tmp = tempfile::TempDir::new().unwrap();
    let err = run_todo_err(tmp.path(), &["add", "   "]);
    assert!(err.contains("empty"));
    assert_eq!(read_data(tmp.path()), "{}");
}

#[test]
fn test_toggle_and_mark_alias() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_data(tmp.path(), TWO_TASKS);

    let out = run_todo_ok(tmp.path(), &["toggle", "AB1"]);
    assert!(out.contains("[x] AB1"));
    run_todo_ok(tmp.path(), &["mark", "AB2"]);

    let value: serde_json::Value = serde_json::from_str(&read_data(tmp.path())).unwrap();
    assert_eq!(value["AB1"]["done"], true);
    assert_eq!(value["AB2"]["done"], false);
}

#[test]
fn test_rm_and_delete_alias() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_data(tmp.path(), TWO_TASKS);

    let out = run_todo_ok(tmp.path(), &["rm", "AB1"]);
    assert!(out.starts_with("deleted"));
    run_todo_ok(tmp.path(), &["delete", "AB2"]);
    assert_eq!(read_data(tmp.path()), "{}");
}

#[test]
fn test_unknown_id_fails_without_changes() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_data(tmp.path(), TWO_TASKS);
    let before = run_todo_ok(tmp.path(), &["list", "--json"]);

    let err = run_todo_err(tmp.path(), &["rm", "AB1", "nope"]);
    assert!(err.contains("task not found: nope"));
    assert_eq!(run_todo_ok(tmp.path(), &["list", "--json"]), before);
}

#[test]
fn test_ambiguous_prefix_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_data(tmp.path(), TWO_TASKS);
    let err = run_todo_err(tmp.path(), &["toggle", "ab"]);
    assert!(err.contains("ambiguous"));
}

// ---------------------------------------------------------------------------
// Data file recovery
// ---------------------------------------------------------------------------

#[test]
fn test_corrupt_file_is_reset() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_data(tmp.path(), "this is not json");
    let (stdout, stderr, success) = run_todo(tmp.path(), &["list"]);
    assert!(success);
    assert_eq!(stdout.trim(), "no tasks");
    assert!(stderr.contains("event=store_load"));
    assert_eq!(read_data(tmp.path()), "{}");
}

#[test]
fn test_invalid_entries_are_skipped() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_data(
        tmp.path(),
        r#"{"A": {"title": "keep", "done": false}, "B": {"title": "no done field"}}"#,
    );
    let out = run_todo_ok(tmp.path(), &["list"]);
    assert!(out.contains("keep"));
    assert!(!out.contains("no done field"));
}

// ---------------------------------------------------------------------------
// Paths and config
// ---------------------------------------------------------------------------

#[test]
fn test_file_flag() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_todo_ok(tmp.path(), &["--file", "work.json", "add", "Ship it"]);
    assert!(!tmp.path().join("data.json").exists());
    let out = run_todo_ok(tmp.path(), &["list", "-f", "work.json"]);
    assert!(out.contains("Ship it"));
}

#[test]
fn test_config_sets_data_file() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(
        tmp.path().join("todo.toml"),
        "[storage]\ndata_file = \"lists/home.json\"\n",
    )
    .unwrap();
    fs::create_dir_all(tmp.path().join("lists")).unwrap();

    run_todo_ok(tmp.path(), &["add", "Water plants"]);
    let data = fs::read_to_string(tmp.path().join("lists/home.json")).unwrap();
    assert!(data.contains("Water plants"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    let err = run_todo_err(tmp.path(), &["--config", "nope.toml", "list"]);
    assert!(err.contains("nope.toml"));
}
