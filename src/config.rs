//! Global configuration.
//!
//! Workspace-independent settings live in `~/.blocksmith/config.toml`:
//! the registry URL and the auth token. Environment variables override the
//! file (`BLOCKSMITH_REGISTRY_URL`, `BLOCKSMITH_TOKEN`), and
//! `BLOCKSMITH_CONFIG` points at an alternative file, which is how tests
//! isolate themselves. A missing file simply yields defaults: without a
//! registry the CLI validates against the built-in vocabulary.

use crate::constants::{ENV_CONFIG, ENV_REGISTRY_URL, ENV_TOKEN};
use crate::core::BlocksmithError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings from the global config file plus environment overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Base URL of the registry, when configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_url: Option<String>,
    /// Auth token for registry operations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl GlobalConfig {
    /// Default config file location (`~/.blocksmith/config.toml`).
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".blocksmith").join("config.toml"))
    }

    /// Load the global configuration.
    ///
    /// Resolution order: `BLOCKSMITH_CONFIG` file path override, then the
    /// default location, then built-in defaults when no file exists.
    /// `BLOCKSMITH_REGISTRY_URL` and `BLOCKSMITH_TOKEN` override file values.
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(ENV_CONFIG)
            .map(PathBuf::from)
            .or_else(Self::default_path);

        let mut config = match path {
            Some(path) if path.is_file() => {
                let raw = std::fs::read_to_string(&path)?;
                toml::from_str(&raw).map_err(|e| BlocksmithError::ConfigError {
                    message: format!("invalid config file {}: {e}", path.display()),
                })?
            }
            _ => Self::default(),
        };

        if let Ok(url) = std::env::var(ENV_REGISTRY_URL) {
            if !url.is_empty() {
                config.registry_url = Some(url);
            }
        }
        if let Ok(token) = std::env::var(ENV_TOKEN) {
            if !token.is_empty() {
                config.token = Some(token);
            }
        }
        Ok(config)
    }

    /// The configured registry URL, if any.
    #[must_use]
    pub fn registry_url(&self) -> Option<&str> {
        self.registry_url.as_deref()
    }
}
