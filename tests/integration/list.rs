//! List workflow: lenient discovery with preview data.

use crate::common::ProjectFixture;
use predicates::prelude::*;
use serde_json::Value;

#[test]
fn lists_resources_as_a_table() {
    let fixture = ProjectFixture::new();
    fixture.add_block("hero");
    fixture.add_template("landing");

    fixture
        .command()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("NAME"))
        .stdout(predicate::str::contains("hero"))
        .stdout(predicate::str::contains("landing"));
}

#[test]
fn json_output_includes_preview_data() {
    let fixture = ProjectFixture::new();
    let dir = fixture.add_block("hero");
    std::fs::write(dir.join("preview.json"), r#"{"image": "hero.png"}"#).unwrap();

    let output = fixture
        .command()
        .args(["list", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let records: Vec<Value> = serde_json::from_slice(&output).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["name"], "hero");
    assert_eq!(records[0]["type"], "block");
    assert_eq!(records[0]["version"], "1.0.0");
    assert_eq!(records[0]["category"], "testing");
    assert_eq!(records[0]["preview"]["image"], "hero.png");
}

#[test]
fn invalid_resources_are_skipped_not_fatal() {
    let fixture = ProjectFixture::new();
    fixture.add_block("good");
    fixture.add_invalid_block("broken");
    fixture.add_legacy_block("old");

    let output = fixture
        .command()
        .args(["list", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let records: Vec<Value> = serde_json::from_slice(&output).unwrap();
    let names: Vec<&str> = records.iter().filter_map(|r| r["name"].as_str()).collect();
    assert_eq!(names, vec!["good"]);
}

#[test]
fn empty_workspace_reports_no_resources() {
    let fixture = ProjectFixture::new();
    fixture
        .command()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No resources found."));
}
