//! Integration tests for the fca CLI

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

fn fca() -> Command {
    Command::new(env!("CARGO_BIN_EXE_fca"))
}

fn create_project() -> TempDir {
    let temp = tempdir().unwrap();
    let root = temp.path().join("project");
    fs::create_dir_all(root.join("src")).unwrap();
    fs::create_dir_all(root.join(".venv/lib")).unwrap();
    fs::write(root.join("a.txt"), "error error\n").unwrap();
    fs::write(root.join("src/main.rs"), "fn main() {\n    // Error handling\n}\n").unwrap();
    fs::write(root.join("README.md"), "# Project\n").unwrap();
    fs::write(root.join(".venv/lib/site.py"), "error\n").unwrap();
    temp
}

fn project(temp: &TempDir) -> String {
    temp.path().join("project").to_string_lossy().to_string()
}

fn config(temp: &TempDir) -> String {
    temp.path().join("config.json").to_string_lossy().to_string()
}

fn reports(temp: &TempDir) -> String {
    temp.path().join("reports").to_string_lossy().to_string()
}

fn only_report(dir: &Path) -> String {
    let entries: Vec<_> = fs::read_dir(dir).unwrap().map(|e| e.unwrap().path()).collect();
    assert_eq!(entries.len(), 1, "{entries:?}");
    fs::read_to_string(&entries[0]).unwrap()
}

#[test]
fn test_cli_help() {
    fca()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("stats"))
        .stdout(predicate::str::contains("names"));
}

#[test]
fn test_cli_version() {
    fca()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fca"));
}

#[test]
fn test_search_case_insensitive_json() {
    let temp = create_project();

    let output = fca()
        .args(["--no-config", "search", project(&temp).as_str(), "-t", "error", "--json", "--no-report"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).expect("Invalid JSON output");
    assert_eq!(parsed["totals"]["error"], 3);
    assert_eq!(parsed["files_with_matches"], 2);
    assert_eq!(parsed["case_sensitive"], false);
}

#[test]
fn test_search_case_sensitive() {
    let temp = create_project();

    let output = fca()
        .args([
            "--no-config",
            "search",
            project(&temp).as_str(),
            "-t",
            "Error",
            "--case-sensitive",
            "--json",
            "--no-report",
        ])
        .output()
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["totals"]["Error"], 1);
    assert_eq!(parsed["files_with_matches"], 1);
}

#[test]
fn test_search_writes_report() {
    let temp = create_project();

    fca()
        .args([
            "--no-config",
            "search",
            project(&temp).as_str(),
            "--term",
            "error",
            "--output-dir",
            reports(&temp).as_str(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total files with matches: 2"))
        .stdout(predicate::str::contains("Results saved to:"));

    let report = only_report(&temp.path().join("reports"));
    assert!(report.contains("String Search Report"));
    assert!(report.contains("Total occurrences: 3"));
}

#[test]
fn test_search_terms_file() {
    let temp = create_project();
    let terms = temp.path().join("terms.txt");
    fs::write(&terms, "// comment\n\nProject\nmain\n").unwrap();

    let output = fca()
        .args([
            "--no-config",
            "search",
            project(&temp).as_str(),
            "--terms-file",
            terms.to_str().unwrap(),
            "--json",
            "--no-report",
        ])
        .output()
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["terms"], serde_json::json!(["Project", "main"]));
    assert_eq!(parsed["totals"]["main"], 1);
}

#[test]
fn test_search_without_terms_fails() {
    let temp = create_project();

    fca()
        .args(["--no-config", "search", project(&temp).as_str(), "--no-report"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no search strings provided"));
}

#[test]
fn test_stats_table_output() {
    let temp = create_project();

    fca()
        .args(["--no-config", "stats", project(&temp).as_str(), "--no-report"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Extension"))
        .stdout(predicate::str::contains(".rs"))
        .stdout(predicate::str::contains("Total (3 files)"));
}

#[test]
fn test_stats_include_only() {
    let temp = create_project();

    let output = fca()
        .args(["--no-config", "stats", project(&temp).as_str(), "--include", "rs", "--json", "--no-report"])
        .output()
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["grand_total"]["file_count"], 1);
    assert_eq!(parsed["grand_total"]["lines"], 3);
    assert!(parsed["per_extension_totals"].get("rs").is_some());
}

#[test]
fn test_names_glob_and_exact() {
    let temp = create_project();

    let output = fca()
        .args([
            "--no-config",
            "names",
            project(&temp).as_str(),
            "-p",
            "*.md",
            "-p",
            "main.rs",
            "-p",
            "*.php",
            "--json",
            "--no-report",
        ])
        .output()
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["per_pattern_matches"]["*.md"].as_array().unwrap().len(), 1);
    assert_eq!(parsed["per_pattern_matches"]["main.rs"].as_array().unwrap().len(), 1);
    assert_eq!(parsed["per_pattern_matches"]["*.php"].as_array().unwrap().len(), 0);
}

#[test]
fn test_names_report_lists_invalid_pattern() {
    let temp = create_project();

    fca()
        .args([
            "--no-config",
            "names",
            project(&temp).as_str(),
            "-p",
            "[bad",
            "-p",
            "*.txt",
            "--output-dir",
            reports(&temp).as_str(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Patterns with matches: 1 / 1"));

    let report = only_report(&temp.path().join("reports"));
    assert!(report.contains("Invalid patterns:"));
    assert!(report.contains("[bad"));
}

#[test]
fn test_config_overrides_are_persisted() {
    let temp = create_project();

    fca()
        .args(["--config", config(&temp).as_str(), "stats", project(&temp).as_str(), "--exclude", "md", "--no-report"])
        .assert()
        .success();

    let saved = fs::read_to_string(temp.path().join("config.json")).unwrap();
    assert!(saved.contains("\"md\""));

    fca()
        .args(["--config", config(&temp).as_str(), "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"md\""))
        .stdout(predicate::str::contains(".venv"));

    // The persisted exclusion applies to later runs.
    fca()
        .args(["--config", config(&temp).as_str(), "stats", project(&temp).as_str(), "--no-report"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total (2 files)"));
}

#[test]
fn test_no_config_does_not_write() {
    let temp = create_project();

    fca()
        .args(["--no-config", "--config", config(&temp).as_str(), "stats", project(&temp).as_str(), "--exclude", "md", "--no-report"])
        .assert()
        .success();

    assert!(!temp.path().join("config.json").exists());
}

#[test]
fn test_invalid_path() {
    fca()
        .args(["--no-config", "stats", "/nonexistent/path", "--no-report"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}
