//! Package workflow: manifest-only discovery, fail-fast lookup, archives.

use crate::common::ProjectFixture;
use predicates::prelude::*;

fn archive_names(path: &std::path::Path) -> Vec<String> {
    let file = std::fs::File::open(path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    (0..archive.len()).map(|i| archive.by_index(i).unwrap().name().to_string()).collect()
}

#[test]
fn packages_every_discovered_resource() {
    let fixture = ProjectFixture::new();
    fixture.add_block("hero");
    fixture.add_template("landing");

    fixture
        .command()
        .arg("package")
        .assert()
        .success()
        .stdout(predicate::str::contains("Packaged 2 resource(s)"));

    let hero = fixture.path().join("artifacts/hero-1.0.0.zip");
    assert!(hero.is_file());
    assert!(fixture.path().join("artifacts/landing-1.0.0.zip").is_file());

    let names = archive_names(&hero);
    assert!(names.contains(&"hero/package.json".to_string()));
    assert!(names.contains(&"hero/src/index.ts".to_string()));
    assert!(names.contains(&"hero/block.config.json".to_string()));
}

#[test]
fn legacy_resources_still_package() {
    // Packaging is manifest-only; the legacy configuration format is not a
    // problem for it.
    let fixture = ProjectFixture::new();
    fixture.add_legacy_block("old");

    fixture
        .command()
        .arg("package")
        .assert()
        .success()
        .stdout(predicate::str::contains("Packaged 1"));
}

#[test]
fn unknown_name_fails_fast_without_artifacts() {
    let fixture = ProjectFixture::new();
    fixture.add_block("hero");
    fixture.add_block("pricing");

    fixture
        .command()
        .args(["package", "hero", "missing"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("'missing' not found"));

    assert!(!fixture.path().join("artifacts").exists());
}

#[test]
fn misspelled_name_gets_a_suggestion() {
    let fixture = ProjectFixture::new();
    fixture.add_block("hero-banner");

    fixture
        .command()
        .args(["package", "hero-baner"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("did you mean 'hero-banner'?"));
}

#[test]
fn named_packaging_only_archives_named_resources() {
    let fixture = ProjectFixture::new();
    fixture.add_block("hero");
    fixture.add_block("pricing");

    fixture.command().args(["package", "pricing"]).assert().success();

    assert!(fixture.path().join("artifacts/pricing-1.0.0.zip").is_file());
    assert!(!fixture.path().join("artifacts/hero-1.0.0.zip").exists());
}

#[test]
fn resource_missing_manifest_is_skipped() {
    let fixture = ProjectFixture::new();
    fixture.add_block("hero");
    let bare = fixture.path().join("blocks/bare");
    std::fs::create_dir_all(&bare).unwrap();

    fixture
        .command()
        .arg("package")
        .assert()
        .success()
        .stdout(predicate::str::contains("Packaged 1"));
}
