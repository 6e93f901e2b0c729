//! Integration tests for artifact generation and the validate mode

use perfgen::io::artifacts::{
    BENCHMARK_CSV, FYI_WATERFALL_JSON, WATERFALL_JSON, read_existing_fyi, validate_artifacts,
    write_artifacts,
};
use perfgen::services::generate;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

#[test]
fn test_generate_help() {
    let output = Command::new("cargo")
        .args(["run", "--bin", "perfgen", "--", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("perfgen"));
    assert!(stdout.contains("--validate-only"));
}

#[test]
fn test_generate_then_validate_is_clean() {
    let temp_dir = TempDir::new().unwrap();
    let artifacts = generate::generate_artifacts(None).unwrap();

    write_artifacts(temp_dir.path(), &artifacts).unwrap();

    // Re-generate against what was just written, as the validate mode does
    let existing = read_existing_fyi(temp_dir.path()).unwrap();
    let regenerated = generate::generate_artifacts(existing.as_deref()).unwrap();
    let stale = validate_artifacts(temp_dir.path(), &regenerated).unwrap();
    assert!(stale.is_empty(), "unexpected stale files: {stale:?}");
}

#[test]
fn test_validate_reports_stale_files() {
    let temp_dir = TempDir::new().unwrap();
    let artifacts = generate::generate_artifacts(None).unwrap();
    write_artifacts(temp_dir.path(), &artifacts).unwrap();

    fs::write(temp_dir.path().join(WATERFALL_JSON), "{}\n").unwrap();
    fs::remove_file(temp_dir.path().join(BENCHMARK_CSV)).unwrap();

    let stale = validate_artifacts(temp_dir.path(), &artifacts).unwrap();
    assert_eq!(stale, vec![WATERFALL_JSON, BENCHMARK_CSV]);
}

#[test]
fn test_generation_is_idempotent() {
    let first = generate::generate_artifacts(None).unwrap();
    let second = generate::generate_artifacts(None).unwrap();
    assert_eq!(first.waterfall_json, second.waterfall_json);
    assert_eq!(first.fyi_json, second.fyi_json);
    assert_eq!(first.benchmark_csv, second.benchmark_csv);
}

#[test]
fn test_fyi_regeneration_keeps_foreign_testers() {
    let temp_dir = TempDir::new().unwrap();

    // Seed the FYI file with a tester this generator does not own
    fs::write(
        temp_dir.path().join(FYI_WATERFALL_JSON),
        r#"{"Hand Maintained Tester": {"isolated_scripts": []}}"#,
    )
    .unwrap();

    let existing = read_existing_fyi(temp_dir.path()).unwrap();
    let artifacts = generate::generate_artifacts(existing.as_deref()).unwrap();

    let fyi: serde_json::Value = serde_json::from_str(&artifacts.fyi_json).unwrap();
    assert!(fyi.get("Hand Maintained Tester").is_some());
    assert!(fyi.get("Android Go").is_some());
}
