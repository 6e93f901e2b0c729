//! Integration tests for the expectations updater on real files

use crate::fixtures::{bot_data_json, write_file_sync};
use perfgen::services::expectations::{JsonBotDataProvider, OsHost, update_expectations};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_update_appends_flaky_lines() {
    let temp_dir = TempDir::new().unwrap();
    let expectations = temp_dir.path().join("TestExpectations");
    let bot_data = temp_dir.path().join("bots.json");
    write_file_sync(&expectations, b"# existing expectations\n").unwrap();
    write_file_sync(&bot_data, bot_data_json().as_bytes()).unwrap();

    let provider = JsonBotDataProvider::from_file(&bot_data).unwrap();
    let added = update_expectations(
        &OsHost,
        &provider,
        &expectations,
        &["Linux Tests".to_string(), "Win Tests".to_string()],
    )
    .unwrap();

    assert_eq!(added, 2);
    let content = fs::read_to_string(&expectations).unwrap();
    assert!(content.starts_with("# existing expectations\n"));
    // Results observed on different builders are unioned per test
    assert!(content.contains("fast/dom/flaky.html [ Failure Pass Timeout ]"));
    assert!(content.contains("fast/css/other-flaky.html [ Crash Pass ]"));
    assert!(!content.contains("fast/dom/stable.html"));
}

#[test]
fn test_update_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let expectations = temp_dir.path().join("TestExpectations");
    let bot_data = temp_dir.path().join("bots.json");
    write_file_sync(&expectations, b"").unwrap();
    write_file_sync(&bot_data, bot_data_json().as_bytes()).unwrap();

    let provider = JsonBotDataProvider::from_file(&bot_data).unwrap();
    let builders = vec!["Linux Tests".to_string(), "Win Tests".to_string()];

    let first = update_expectations(&OsHost, &provider, &expectations, &builders).unwrap();
    let after_first = fs::read_to_string(&expectations).unwrap();
    let second = update_expectations(&OsHost, &provider, &expectations, &builders).unwrap();
    let after_second = fs::read_to_string(&expectations).unwrap();

    assert_eq!(first, 2);
    assert_eq!(second, 0);
    assert_eq!(after_first, after_second);
}

#[test]
fn test_unknown_builder_fails() {
    let temp_dir = TempDir::new().unwrap();
    let expectations = temp_dir.path().join("TestExpectations");
    let bot_data = temp_dir.path().join("bots.json");
    write_file_sync(&expectations, b"").unwrap();
    write_file_sync(&bot_data, bot_data_json().as_bytes()).unwrap();

    let provider = JsonBotDataProvider::from_file(&bot_data).unwrap();
    let result = update_expectations(
        &OsHost,
        &provider,
        &expectations,
        &["Mystery Bot".to_string()],
    );
    assert!(matches!(result, Err(perfgen::Error::InvalidInput(_))));
}
