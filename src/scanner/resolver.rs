//! Configuration resolution.
//!
//! A resource's current-format configuration is authored as a source file
//! (`block.config.ts` and friends). The scanner must never execute that code
//! itself; resolution is delegated to a [`ConfigResolver`], and the
//! production implementation hands the file to the sandboxed `blocksmith-eval`
//! helper and consumes its JSON output. A pre-evaluated
//! `block.config.json` / `template.config.json`, when present, is consumed
//! directly without spawning anything - which is also what keeps tests free
//! of an SDK dependency.

use crate::constants::CONFIG_EVAL_BIN;
use crate::core::{BlocksmithError, ResourceType};
use crate::schema::ResourceConfig;
use anyhow::Result;
use std::path::Path;
use tokio::process::Command;
use tracing::debug;

/// Resolves a resource directory to already-evaluated configuration data.
pub trait ConfigResolver {
    /// Resolve the configuration for the resource in `dir`, or `None` when
    /// the directory carries no current-format configuration at all.
    fn resolve(
        &self,
        dir: &Path,
        resource_type: ResourceType,
    ) -> impl Future<Output = Result<Option<ResourceConfig>>> + Send;
}

/// The production resolver.
///
/// Prefers a pre-evaluated `*.config.json`; otherwise locates a
/// configuration source file and evaluates it out-of-process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SandboxResolver;

impl SandboxResolver {
    /// Create a resolver.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    async fn evaluate(&self, source: &Path) -> Result<ResourceConfig> {
        let evaluator =
            which::which(CONFIG_EVAL_BIN).map_err(|_| BlocksmithError::EvaluatorNotFound)?;
        debug!("evaluating {} with {}", source.display(), evaluator.display());

        let output = Command::new(evaluator)
            .arg("--json")
            .arg(source)
            .output()
            .await
            .map_err(|e| BlocksmithError::ConfigEvalFailed {
                file: source.display().to_string(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(BlocksmithError::ConfigEvalFailed {
                file: source.display().to_string(),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        let config = serde_json::from_slice(&output.stdout).map_err(|e| {
            BlocksmithError::ConfigParseError {
                file: source.display().to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(config)
    }
}

impl ConfigResolver for SandboxResolver {
    async fn resolve(
        &self,
        dir: &Path,
        resource_type: ResourceType,
    ) -> Result<Option<ResourceConfig>> {
        let json_path = dir.join(resource_type.config_json_name());
        if json_path.is_file() {
            let raw = std::fs::read_to_string(&json_path)?;
            let config = serde_json::from_str(&raw).map_err(|e| {
                BlocksmithError::ConfigParseError {
                    file: json_path.display().to_string(),
                    reason: e.to_string(),
                }
            })?;
            return Ok(Some(config));
        }

        match resource_type.find_config_source(dir) {
            Some(source) => self.evaluate(&source).await.map(Some),
            None => Ok(None),
        }
    }
}
