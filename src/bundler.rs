//! The external bundler collaborator.
//!
//! Turning a resource's entry point into a distributable script (and
//! optional stylesheet) is delegated to the system `esbuild` binary, wrapped
//! behind the [`Bundler`] trait so the build workflow can be exercised
//! without a toolchain installed. A bundling failure propagates as a
//! per-resource build failure; it never aborts the batch.

use crate::constants::{BUNDLER_BIN, DEFAULT_BUNDLE_TARGET, ENTRY_POINT_CANDIDATES, SRC_DIR};
use crate::core::BlocksmithError;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

/// Options forwarded to the bundler.
#[derive(Debug, Clone)]
pub struct BundleOptions {
    /// Minify the output.
    pub minify: bool,
    /// Emit an external sourcemap.
    pub sourcemap: bool,
    /// JavaScript target (e.g. `es2020`).
    pub target: String,
}

impl Default for BundleOptions {
    fn default() -> Self {
        Self { minify: true, sourcemap: false, target: DEFAULT_BUNDLE_TARGET.to_string() }
    }
}

/// Output of one bundling run.
#[derive(Debug, Clone)]
pub struct BundleOutput {
    /// The bundled script.
    pub script: Vec<u8>,
    /// Extracted stylesheet, when the entry point imports CSS.
    pub stylesheet: Option<Vec<u8>>,
    /// External sourcemap, when requested.
    pub sourcemap: Option<Vec<u8>>,
}

/// Bundles an entry point into distributable assets.
pub trait Bundler {
    /// Bundle `entry` with `options`.
    fn bundle(
        &self,
        entry: &Path,
        options: &BundleOptions,
    ) -> impl Future<Output = Result<BundleOutput>> + Send;
}

/// Locate a resource's entry point under its `src` directory.
#[must_use]
pub fn find_entry_point(resource_dir: &Path) -> Option<PathBuf> {
    ENTRY_POINT_CANDIDATES
        .iter()
        .map(|candidate| resource_dir.join(SRC_DIR).join(candidate))
        .find(|path| path.is_file())
}

/// Production bundler wrapping the system `esbuild` binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EsbuildBundler;

impl EsbuildBundler {
    /// Create a bundler.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Bundler for EsbuildBundler {
    async fn bundle(&self, entry: &Path, options: &BundleOptions) -> Result<BundleOutput> {
        let esbuild = which::which(BUNDLER_BIN).map_err(|_| BlocksmithError::BundlerNotFound)?;
        let out_dir = tempfile::tempdir()?;

        let mut cmd = Command::new(esbuild);
        cmd.arg(entry)
            .arg("--bundle")
            .arg("--format=esm")
            .arg(format!("--target={}", options.target))
            .arg("--entry-names=bundle")
            .arg(format!("--outdir={}", out_dir.path().display()))
            .arg("--log-level=warning");
        if options.minify {
            cmd.arg("--minify");
        }
        if options.sourcemap {
            cmd.arg("--sourcemap=external");
        }

        debug!("bundling {}", entry.display());
        let output = cmd.output().await.map_err(|e| BlocksmithError::BundlerFailed {
            name: entry.display().to_string(),
            reason: e.to_string(),
        })?;
        if !output.status.success() {
            return Err(BlocksmithError::BundlerFailed {
                name: entry.display().to_string(),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        let script_path = out_dir.path().join("bundle.js");
        let script = std::fs::read(&script_path).map_err(|e| BlocksmithError::BundlerFailed {
            name: entry.display().to_string(),
            reason: format!("bundler produced no output: {e}"),
        })?;
        let stylesheet = std::fs::read(out_dir.path().join("bundle.css")).ok();
        let sourcemap = if options.sourcemap {
            std::fs::read(out_dir.path().join("bundle.js.map")).ok()
        } else {
            None
        };

        Ok(BundleOutput { script, stylesheet, sourcemap })
    }
}
