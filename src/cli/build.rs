//! Build command: bundle every discovered resource into versioned output.
//!
//! Discovery runs in strict mode with full validation - a structural problem
//! in any resource aborts the whole build before anything is written. Once
//! discovery succeeds, each resource builds independently: one bundling
//! failure is tallied and reported, never aborting the batch. Output lands
//! at `dist/<manifest name>/<manifest version>/` together with a manifest
//! carrying freshly derived legacy-shaped metadata for consumers of the old
//! format.

use crate::bundler::{BundleOptions, Bundler, EsbuildBundler, find_entry_point};
use crate::config::GlobalConfig;
use crate::cli::CommandOutcome;
use crate::constants::{DEFAULT_BUNDLE_TARGET, DEFAULT_DIST_DIR, MANIFEST_FILE};
use crate::core::BlocksmithError;
use crate::scanner::{DiscoveredResource, SandboxResolver, ScanOptions, Scanner};
use crate::schema::{generate_manifest_metadata, vocabulary};
use crate::utils::fs::{atomic_write, ensure_dir};
use crate::utils::progress::ProgressBar;
use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Build every resource into versioned dist output.
///
/// # Examples
///
/// ```bash
/// # Build all blocks and templates
/// blocksmith build
///
/// # Development build with sourcemaps, un-minified
/// blocksmith build --no-minify --sourcemap
/// ```
#[derive(Parser, Debug)]
#[command(name = "build")]
pub struct BuildCommand {
    /// Output directory (defaults to <root>/dist).
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Skip minification.
    #[arg(long)]
    no_minify: bool,

    /// Emit external sourcemaps next to the bundles.
    #[arg(long)]
    sourcemap: bool,

    /// JavaScript target passed to the bundler.
    #[arg(long)]
    target: Option<String>,
}

impl BuildCommand {
    /// Execute the build command.
    pub async fn execute(self, root: PathBuf) -> Result<CommandOutcome> {
        let global = GlobalConfig::load()?;
        let vocabulary = vocabulary::obtain(&global).await?;
        let resolver = SandboxResolver::new();
        let options = ScanOptions::new(&root).strict(true);
        let resources = Scanner::new(options, &resolver, Some(vocabulary)).scan().await?;

        if resources.is_empty() {
            println!("No resources to build.");
            return Ok(CommandOutcome::Success);
        }

        let out_dir = self.out_dir.unwrap_or_else(|| root.join(DEFAULT_DIST_DIR));
        let bundle_options = BundleOptions {
            minify: !self.no_minify,
            sourcemap: self.sourcemap,
            target: self.target.unwrap_or_else(|| DEFAULT_BUNDLE_TARGET.to_string()),
        };
        let bundler = EsbuildBundler::new();

        println!("🔨 Building {} resource(s)...", resources.len());
        let progress = ProgressBar::new(resources.len() as u64);
        let mut built = 0usize;
        let mut failures: Vec<(String, anyhow::Error)> = Vec::new();

        for resource in &resources {
            progress.set_message(resource.name.clone());
            match build_resource(&bundler, resource, &out_dir, &bundle_options).await {
                Ok(dest) => {
                    built += 1;
                    println!(
                        "  {} {} {} -> {}",
                        "✓".green(),
                        resource.manifest.name,
                        resource.manifest.version.dimmed(),
                        dest.display()
                    );
                }
                Err(e) => failures.push((resource.name.clone(), e)),
            }
            progress.inc(1);
        }
        progress.finish_and_clear();

        if failures.is_empty() {
            println!("✅ {}", format!("Built {built} resource(s)").green());
            Ok(CommandOutcome::Success)
        } else {
            for (name, error) in &failures {
                eprintln!("  {} {name}: {error:#}", "✗".red());
            }
            println!(
                "⚠️  {}",
                format!("Built {built} of {} resource(s); {} failed", resources.len(), failures.len())
                    .yellow()
            );
            Ok(CommandOutcome::Partial)
        }
    }
}

/// Build one resource: bundle its entry point and lay out the versioned
/// output directory.
async fn build_resource<B: Bundler>(
    bundler: &B,
    resource: &DiscoveredResource,
    out_dir: &Path,
    options: &BundleOptions,
) -> Result<PathBuf> {
    let entry = find_entry_point(&resource.path).ok_or_else(|| {
        BlocksmithError::EntryPointNotFound { name: resource.name.clone() }
    })?;
    let output = bundler.bundle(&entry, options).await?;

    let dest = out_dir.join(&resource.manifest.name).join(&resource.manifest.version);
    ensure_dir(&dest)?;
    atomic_write(&dest.join("index.js"), &output.script)?;
    if let Some(stylesheet) = &output.stylesheet {
        atomic_write(&dest.join("index.css"), stylesheet)?;
    }
    if let Some(sourcemap) = &output.sourcemap {
        atomic_write(&dest.join("index.js.map"), sourcemap)?;
    }

    let mut manifest = resource.manifest.clone();
    if let Some(config) = &resource.config {
        manifest.set_legacy_metadata(&generate_manifest_metadata(&config.schema))?;
    }
    manifest.save(&dest.join(MANIFEST_FILE))?;
    Ok(dest)
}
