//! Package command: archive resources into distributable zip artifacts.
//!
//! Discovery is manifest-only - configuration is neither resolved nor
//! validated, since packaging ships the authored files verbatim. With
//! explicit names, every name is resolved before any archive is written and
//! the first unknown name aborts the whole invocation. Archiving itself then
//! proceeds resource-by-resource with per-resource failure tallying; earlier
//! archives from a partially failed batch stay on disk.

use crate::archiver::ZipArchiver;
use crate::cli::CommandOutcome;
use crate::cli::common::closest_name;
use crate::constants::{DEFAULT_ARTIFACTS_DIR, PACKAGE_EXCLUDES};
use crate::core::BlocksmithError;
use crate::scanner::{DiscoveredResource, SandboxResolver, ScanOptions, Scanner};
use crate::utils::progress::ProgressBar;
use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Archive resources into distributable zip artifacts.
///
/// # Examples
///
/// ```bash
/// # Package everything
/// blocksmith package
///
/// # Package specific resources
/// blocksmith package hero-banner pricing-table
/// ```
#[derive(Parser, Debug)]
#[command(name = "package")]
pub struct PackageCommand {
    /// Resources to package (all discovered resources when omitted).
    names: Vec<String>,

    /// Output directory (defaults to <root>/artifacts).
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

impl PackageCommand {
    /// Execute the package command.
    pub async fn execute(self, root: PathBuf) -> Result<CommandOutcome> {
        let resolver = SandboxResolver::new();
        let options = ScanOptions::new(&root).load_config(false).validate_schema(false);
        let resources = Scanner::new(options, &resolver, None).scan().await?;

        let selected = self.select(&resources)?;
        if selected.is_empty() {
            println!("No resources to package.");
            return Ok(CommandOutcome::Success);
        }

        let out_dir = self.out_dir.unwrap_or_else(|| root.join(DEFAULT_ARTIFACTS_DIR));
        println!("📦 Packaging {} resource(s)...", selected.len());
        let progress = ProgressBar::new(selected.len() as u64);
        let mut packaged = 0usize;
        let mut failures: Vec<(String, anyhow::Error)> = Vec::new();

        for resource in &selected {
            progress.set_message(resource.name.clone());
            match package_resource(resource, &out_dir) {
                Ok((artifact, bytes, digest)) => {
                    packaged += 1;
                    println!(
                        "  {} {} ({bytes} bytes, sha256 {}) -> {}",
                        "✓".green(),
                        resource.manifest.name,
                        &digest[..12],
                        artifact.display()
                    );
                }
                Err(e) => failures.push((resource.name.clone(), e)),
            }
            progress.inc(1);
        }
        progress.finish_and_clear();

        if failures.is_empty() {
            println!("✅ {}", format!("Packaged {packaged} resource(s)").green());
            Ok(CommandOutcome::Success)
        } else {
            for (name, error) in &failures {
                eprintln!("  {} {name}: {error:#}", "✗".red());
            }
            println!(
                "⚠️  {}",
                format!(
                    "Packaged {packaged} of {} resource(s); {} failed",
                    selected.len(),
                    failures.len()
                )
                .yellow()
            );
            Ok(CommandOutcome::Partial)
        }
    }

    /// Resolve the requested names against the discovered resources.
    ///
    /// The lookup pass completes (or fails) for all names before the caller
    /// writes any archive; an unknown name is fatal immediately.
    fn select<'r>(
        &self,
        resources: &'r [DiscoveredResource],
    ) -> Result<Vec<&'r DiscoveredResource>> {
        if self.names.is_empty() {
            return Ok(resources.iter().collect());
        }

        let mut selected = Vec::with_capacity(self.names.len());
        for name in &self.names {
            match resources.iter().find(|r| r.name == *name || r.manifest.name == *name) {
                Some(resource) => selected.push(resource),
                None => {
                    if let Some(suggestion) =
                        closest_name(name, resources.iter().map(|r| r.name.as_str()))
                    {
                        eprintln!("  did you mean '{suggestion}'?");
                    }
                    return Err(BlocksmithError::ResourceNotFound { name: name.clone() }.into());
                }
            }
        }
        Ok(selected)
    }
}

/// Archive one resource directory, returning the artifact path, its size in
/// bytes, and its sha256 digest.
fn package_resource(
    resource: &DiscoveredResource,
    out_dir: &Path,
) -> Result<(PathBuf, u64, String)> {
    let artifact = out_dir.join(artifact_file_name(
        &resource.manifest.name,
        &resource.manifest.version,
    ));
    let mut archiver = ZipArchiver::create(&artifact)?;

    let mut entries: Vec<PathBuf> = std::fs::read_dir(&resource.path)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect();
    entries.sort();
    for entry in entries {
        let file_name = entry
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        if PACKAGE_EXCLUDES.contains(&file_name.as_str()) {
            continue;
        }
        let dest = format!("{}/{file_name}", resource.name);
        if entry.is_dir() {
            archiver.add_directory(&entry, &dest)?;
        } else {
            archiver.add_file(&entry, &dest)?;
        }
    }

    let bytes = archiver.finalize()?;
    let digest = hex::encode(Sha256::digest(std::fs::read(&artifact)?));
    Ok((artifact, bytes, digest))
}

/// File name for an artifact, flattening scoped package names
/// (`@acme/hero` at 1.0.0 becomes `acme-hero-1.0.0.zip`).
fn artifact_file_name(name: &str, version: &str) -> String {
    let flat = name.trim_start_matches('@').replace('/', "-");
    format!("{flat}-{version}.zip")
}
