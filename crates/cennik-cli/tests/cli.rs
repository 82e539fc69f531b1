//! CLI integration tests, offline only.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn offline_run_writes_complete_document() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("pricing-data.json");

    Command::cargo_bin("cennik")
        .unwrap()
        .arg("--offline")
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("[OK]"));

    let data = std::fs::read_to_string(&output).unwrap();
    let value: serde_json::Value = serde_json::from_str(&data).unwrap();

    assert!(value.get("lastUpdate").is_some());
    let operators = value["operators"].as_object().unwrap();
    assert_eq!(operators.len(), 2);
    assert_eq!(
        value["operators"]["greenway"]["subscriptions"]
            .as_array()
            .unwrap()
            .len(),
        3
    );
    assert_eq!(
        value["operators"]["orlen"]["promotions"][0]["validFrom"],
        "2025-10-02"
    );
}

#[test]
fn unwritable_output_path_fails() {
    Command::cargo_bin("cennik")
        .unwrap()
        .arg("--offline")
        .arg("--output")
        .arg("/nonexistent-dir/pricing-data.json")
        .assert()
        .failure();
}
