//! Build workflow: strict discovery, partial-failure tallying, exit codes.

use crate::common::ProjectFixture;
use predicates::prelude::*;

#[test]
fn empty_workspace_is_a_clean_no_op() {
    let fixture = ProjectFixture::new();
    fixture
        .command()
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("No resources to build."));
}

#[test]
fn invalid_schema_aborts_strict_discovery() {
    let fixture = ProjectFixture::new();
    fixture.add_invalid_block("broken");

    fixture
        .command()
        .arg("build")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed validation"))
        .stderr(predicate::str::contains("cta"));
}

#[test]
fn legacy_resource_aborts_strict_discovery() {
    let fixture = ProjectFixture::new();
    fixture.add_legacy_block("old");

    fixture
        .command()
        .arg("build")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("must be migrated"))
        .stderr(predicate::str::contains("blocksmith migrate"));
}

#[test]
fn manifest_missing_version_aborts_strict_discovery() {
    let fixture = ProjectFixture::new();
    let dir = fixture.add_block("hero");
    std::fs::write(dir.join("package.json"), r#"{"name": "hero"}"#).unwrap();

    fixture
        .command()
        .arg("build")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("version"));
}

#[test]
fn per_resource_failure_yields_partial_exit_code() {
    let fixture = ProjectFixture::new();
    let dir = fixture.add_block("no-entry");
    std::fs::remove_file(dir.join("src/index.ts")).unwrap();

    fixture
        .command()
        .arg("build")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No entry point"))
        .stdout(predicate::str::contains("0 of 1"));
}

#[test]
fn unconfigured_directory_is_skipped_not_fatal() {
    let fixture = ProjectFixture::new();
    // A directory with only a manifest: skipped with a warning even though
    // build scans strictly, leaving nothing to build.
    let dir = fixture.path().join("blocks/bare");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("package.json"), r#"{"name": "bare", "version": "1.0.0"}"#).unwrap();

    fixture
        .command()
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("No resources to build."));
}
