//! Migrate command: upgrade resources from the legacy configuration format.
//!
//! For each discovered resource (or the named subset), the command converts
//! the manifest-embedded legacy schema into the current representation,
//! generates a configuration source file for hand-editing, and rewrites the
//! manifest with the namespaced metadata section removed. Migration is a
//! one-way upgrade; the legacy section is never regenerated here.
//!
//! Resources without legacy metadata and resources that already carry a
//! current configuration are skipped. Each resource migrates independently -
//! one failure never aborts the batch.

use crate::cli::CommandOutcome;
use crate::cli::common::humanize_slug;
use crate::manifest::PackageManifest;
use crate::scanner::{DiscoveredResource, SandboxResolver, ScanOptions, Scanner};
use crate::schema::{ResourceConfig, convert_legacy_schema, generate_config_source};
use crate::utils::fs::atomic_write;
use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use tracing::warn;

/// Upgrade resources from the legacy configuration format.
///
/// # Examples
///
/// ```bash
/// # Migrate everything that still uses the legacy format
/// blocksmith migrate
///
/// # Migrate specific resources
/// blocksmith migrate hero-banner
///
/// # Preview without writing
/// blocksmith migrate --dry-run
/// ```
#[derive(Parser, Debug)]
#[command(name = "migrate")]
pub struct MigrateCommand {
    /// Resources to migrate (all discovered resources when omitted).
    names: Vec<String>,

    /// Show what would be migrated without writing anything.
    #[arg(long)]
    dry_run: bool,
}

/// What happened to one resource.
enum Outcome {
    Migrated(PathBuf),
    SkippedNoLegacy,
    SkippedAlreadyMigrated,
}

impl MigrateCommand {
    /// Execute the migrate command.
    pub async fn execute(self, root: PathBuf) -> Result<CommandOutcome> {
        let resolver = SandboxResolver::new();
        let options = ScanOptions::new(&root).load_config(false).validate_schema(false);
        let resources = Scanner::new(options, &resolver, None).scan().await?;

        let targets: Vec<&DiscoveredResource> = if self.names.is_empty() {
            resources.iter().collect()
        } else {
            let mut targets = Vec::new();
            for name in &self.names {
                match resources.iter().find(|r| r.name == *name || r.manifest.name == *name) {
                    Some(resource) => targets.push(resource),
                    None => warn!("no resource named '{name}' found; skipping"),
                }
            }
            targets
        };

        if targets.is_empty() {
            println!("No resources to migrate.");
            return Ok(CommandOutcome::Success);
        }

        if self.dry_run {
            println!("🔍 Dry run - nothing will be written.");
        }

        let mut migrated = 0usize;
        let mut skipped = 0usize;
        let mut failures: Vec<(String, anyhow::Error)> = Vec::new();

        for resource in &targets {
            match migrate_resource(resource, self.dry_run) {
                Ok(Outcome::Migrated(config_path)) => {
                    migrated += 1;
                    let verb = if self.dry_run { "would write" } else { "wrote" };
                    println!("  {} {} - {verb} {}", "✓".green(), resource.name, config_path.display());
                }
                Ok(Outcome::SkippedNoLegacy) => {
                    skipped += 1;
                    println!("  {} {} - no legacy configuration", "·".dimmed(), resource.name);
                }
                Ok(Outcome::SkippedAlreadyMigrated) => {
                    skipped += 1;
                    println!("  {} {} - already migrated", "·".dimmed(), resource.name);
                }
                Err(e) => {
                    eprintln!("  {} {}: {e:#}", "✗".red(), resource.name);
                    failures.push((resource.name.clone(), e));
                }
            }
        }

        let summary = format!("Migrated {migrated}, skipped {skipped}, failed {}", failures.len());
        if failures.is_empty() {
            println!("✅ {}", summary.green());
            Ok(CommandOutcome::Success)
        } else {
            println!("⚠️  {}", summary.yellow());
            Ok(CommandOutcome::Partial)
        }
    }
}

/// Migrate one resource.
fn migrate_resource(resource: &DiscoveredResource, dry_run: bool) -> Result<Outcome> {
    let Some(metadata) = resource.manifest.legacy_metadata()? else {
        return Ok(Outcome::SkippedNoLegacy);
    };
    if resource.resource_type.has_current_config(&resource.path) {
        return Ok(Outcome::SkippedAlreadyMigrated);
    }

    let schema = convert_legacy_schema(&metadata);
    let config = ResourceConfig {
        name: humanize_slug(&resource.name),
        description: resource.manifest.description.clone().unwrap_or_default(),
        schema,
        ..ResourceConfig::default()
    };
    let source = generate_config_source(resource.resource_type, &config);
    let config_path = resource.path.join(resource.resource_type.config_source_name());

    if dry_run {
        return Ok(Outcome::Migrated(config_path));
    }

    atomic_write(&config_path, source.as_bytes())?;

    let mut manifest = resource.manifest.clone();
    manifest.strip_legacy_metadata();
    manifest.save(&PackageManifest::path_in(&resource.path))?;

    Ok(Outcome::Migrated(config_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MANIFEST_FILE;
    use serde_json::json;
    use std::path::Path;
    use tempfile::TempDir;

    fn legacy_block(root: &Path, slug: &str) -> PathBuf {
        let dir = root.join("blocks").join(slug);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join(MANIFEST_FILE),
            json!({
                "name": slug,
                "version": "1.0.0",
                "description": "An old block",
                "blocksmith": {
                    "schemaFields": [
                        {"key": "title", "type": "text", "label": "Title", "required": true},
                        {"key": "layout", "type": "dropdown", "label": "Layout",
                         "options": ["wide", "narrow"]}
                    ],
                    "defaultContent": {"layout": "wide"}
                }
            })
            .to_string(),
        )
        .unwrap();
        dir
    }

    fn command(names: &[&str], dry_run: bool) -> MigrateCommand {
        MigrateCommand { names: names.iter().map(ToString::to_string).collect(), dry_run }
    }

    #[tokio::test]
    async fn migrates_legacy_resource_end_to_end() {
        let ws = TempDir::new().unwrap();
        let dir = legacy_block(ws.path(), "hero-banner");

        let outcome = command(&[], false).execute(ws.path().to_path_buf()).await.unwrap();
        assert_eq!(outcome, CommandOutcome::Success);

        let source = std::fs::read_to_string(dir.join("block.config.ts")).unwrap();
        assert!(source.contains("defineBlock"));
        assert!(source.contains("name: \"Hero Banner\""));
        assert!(source.contains("type: \"singleLine\""));
        assert!(source.contains("defaultValue: \"wide\""));

        let manifest = PackageManifest::load(&dir.join(MANIFEST_FILE)).unwrap();
        assert!(!manifest.has_legacy_metadata());
        assert_eq!(manifest.version, "1.0.0");
    }

    #[tokio::test]
    async fn dry_run_writes_nothing() {
        let ws = TempDir::new().unwrap();
        let dir = legacy_block(ws.path(), "hero");

        let outcome = command(&[], true).execute(ws.path().to_path_buf()).await.unwrap();
        assert_eq!(outcome, CommandOutcome::Success);
        assert!(!dir.join("block.config.ts").exists());

        let manifest = PackageManifest::load(&dir.join(MANIFEST_FILE)).unwrap();
        assert!(manifest.has_legacy_metadata());
    }

    #[tokio::test]
    async fn skips_non_legacy_and_already_migrated() {
        let ws = TempDir::new().unwrap();

        // Non-legacy: plain manifest, no metadata section.
        let plain = ws.path().join("blocks/plain");
        std::fs::create_dir_all(&plain).unwrap();
        std::fs::write(
            plain.join(MANIFEST_FILE),
            json!({"name": "plain", "version": "1.0.0"}).to_string(),
        )
        .unwrap();

        // Already migrated: legacy section still present, but a current
        // config source exists.
        let done = legacy_block(ws.path(), "done");
        std::fs::write(done.join("block.config.ts"), "export default {}").unwrap();

        let outcome = command(&[], false).execute(ws.path().to_path_buf()).await.unwrap();
        assert_eq!(outcome, CommandOutcome::Success);
        assert!(!plain.join("block.config.ts").exists());
        // The pre-existing source is untouched.
        assert_eq!(
            std::fs::read_to_string(done.join("block.config.ts")).unwrap(),
            "export default {}"
        );
    }

    #[tokio::test]
    async fn one_failure_does_not_abort_the_batch() {
        let ws = TempDir::new().unwrap();
        legacy_block(ws.path(), "good");

        // Malformed legacy section: object with the wrong shape.
        let bad = ws.path().join("blocks/bad");
        std::fs::create_dir_all(&bad).unwrap();
        std::fs::write(
            bad.join(MANIFEST_FILE),
            json!({
                "name": "bad",
                "version": "1.0.0",
                "blocksmith": {"schemaFields": "not-a-list"}
            })
            .to_string(),
        )
        .unwrap();

        let outcome = command(&[], false).execute(ws.path().to_path_buf()).await.unwrap();
        assert_eq!(outcome, CommandOutcome::Partial);
        // The good resource still migrated.
        assert!(ws.path().join("blocks/good/block.config.ts").is_file());
    }

    #[tokio::test]
    async fn named_migration_only_touches_named_resources() {
        let ws = TempDir::new().unwrap();
        let first = legacy_block(ws.path(), "first");
        let second = legacy_block(ws.path(), "second");

        let outcome =
            command(&["second"], false).execute(ws.path().to_path_buf()).await.unwrap();
        assert_eq!(outcome, CommandOutcome::Success);
        assert!(!first.join("block.config.ts").exists());
        assert!(second.join("block.config.ts").is_file());
    }
}
