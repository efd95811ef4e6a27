//! Migrate workflow: one-way upgrade, skips, dry-run, batch isolation.

use crate::common::ProjectFixture;
use predicates::prelude::*;
use serde_json::Value;

#[test]
fn migrates_legacy_block_end_to_end() {
    let fixture = ProjectFixture::new();
    let dir = fixture.add_legacy_block("hero-banner");

    fixture
        .command()
        .arg("migrate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Migrated 1"));

    let source = std::fs::read_to_string(dir.join("block.config.ts")).unwrap();
    assert!(source.contains("import { defineBlock } from \"@blocksmith/sdk\";"));
    assert!(source.contains("name: \"Hero Banner\""));
    // Legacy "text" canonicalizes to singleLine; "dropdown" to select.
    assert!(source.contains("type: \"singleLine\""));
    assert!(source.contains("type: \"select\""));
    assert!(source.contains("options: [\"wide\", \"narrow\"],"));
    // The layout default survives; the title default is dropped because the
    // field is required.
    assert!(source.contains("defaultValue: \"wide\""));
    assert!(!source.contains("defaultValue: \"Hello\""));

    let manifest: Value =
        serde_json::from_str(&std::fs::read_to_string(dir.join("package.json")).unwrap()).unwrap();
    assert!(manifest.get("blocksmith").is_none());
    assert_eq!(manifest["version"], "1.0.0");
}

#[test]
fn migrated_resource_builds_after_upgrade() {
    // The generated config is not consumed directly (it is a .ts source),
    // but discovery now treats the resource as migrated.
    let fixture = ProjectFixture::new();
    let dir = fixture.add_legacy_block("hero");
    std::fs::create_dir_all(dir.join("src")).unwrap();
    std::fs::write(dir.join("src/index.ts"), "export default () => null;\n").unwrap();

    fixture.command().arg("migrate").assert().success();

    // No legacy abort anymore; without the evaluator the config source
    // cannot be resolved, so strict discovery now fails on evaluation
    // rather than on migration.
    fixture
        .command()
        .arg("build")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("must be migrated").not());
}

#[test]
fn dry_run_previews_without_writing() {
    let fixture = ProjectFixture::new();
    let dir = fixture.add_legacy_block("hero");

    fixture
        .command()
        .args(["migrate", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("would write"));

    assert!(!dir.join("block.config.ts").exists());
    let manifest: Value =
        serde_json::from_str(&std::fs::read_to_string(dir.join("package.json")).unwrap()).unwrap();
    assert!(manifest.get("blocksmith").is_some());
}

#[test]
fn skips_non_legacy_and_already_migrated_resources() {
    let fixture = ProjectFixture::new();
    fixture.add_block("modern");
    let done = fixture.add_legacy_block("done");
    std::fs::write(done.join("block.config.ts"), "export default {}\n").unwrap();

    fixture
        .command()
        .arg("migrate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Migrated 0, skipped 2"));

    assert_eq!(
        std::fs::read_to_string(done.join("block.config.ts")).unwrap(),
        "export default {}\n"
    );
}

#[test]
fn one_failure_does_not_abort_the_batch() {
    let fixture = ProjectFixture::new();
    fixture.add_legacy_block("good");

    let bad = fixture.path().join("blocks/bad");
    std::fs::create_dir_all(&bad).unwrap();
    std::fs::write(
        bad.join("package.json"),
        r#"{"name": "bad", "version": "1.0.0", "blocksmith": {"schemaFields": 42}}"#,
    )
    .unwrap();

    fixture
        .command()
        .arg("migrate")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("failed 1"));

    assert!(fixture.path().join("blocks/good/block.config.ts").is_file());
}

#[test]
fn named_migration_ignores_other_resources() {
    let fixture = ProjectFixture::new();
    let first = fixture.add_legacy_block("first");
    let second = fixture.add_legacy_block("second");

    fixture.command().args(["migrate", "second"]).assert().success();

    assert!(!first.join("block.config.ts").exists());
    assert!(second.join("block.config.ts").is_file());
}
