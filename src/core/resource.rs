//! Resource abstractions for Blocksmith.
//!
//! Resources are the fundamental units Blocksmith discovers, builds, and
//! packages: **blocks** and **templates**, each authored as one immediate
//! subdirectory of its collection directory.
//!
//! # Resource Model
//!
//! - **Block**: a self-contained UI component with a declared content schema
//! - **Template**: a full page composition, configured the same way
//!
//! Both kinds share one directory contract: a `package.json` manifest, a
//! configuration source file (`block.config.ts` / `template.config.ts`),
//! source code under `src/`, and optional `preview.json` data.
//!
//! # Examples
//!
//! ```rust
//! use blocksmith_cli::core::ResourceType;
//!
//! let block: ResourceType = "block".parse().unwrap();
//! assert_eq!(block.collection_dir(), "blocks");
//! assert_eq!(block.define_fn(), "defineBlock");
//! assert_eq!(ResourceType::Template.config_source_name(), "template.config.ts");
//! ```

use crate::constants::CONFIG_SOURCE_EXTENSIONS;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// The two kinds of authored resources.
///
/// Serializes to lowercase strings (`"block"`, `"template"`) for JSON
/// output compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    /// A self-contained UI component with a content schema.
    Block,
    /// A full page composition.
    Template,
}

impl ResourceType {
    /// All resource types, in the order collections are scanned.
    pub const ALL: [Self; 2] = [Self::Block, Self::Template];

    /// The top-level collection directory for this resource type.
    #[must_use]
    pub const fn collection_dir(self) -> &'static str {
        match self {
            Self::Block => "blocks",
            Self::Template => "templates",
        }
    }

    /// Base name of the configuration file (without extension).
    #[must_use]
    pub const fn config_basename(self) -> &'static str {
        match self {
            Self::Block => "block.config",
            Self::Template => "template.config",
        }
    }

    /// Canonical configuration source file name (the one migration generates).
    #[must_use]
    pub const fn config_source_name(self) -> &'static str {
        match self {
            Self::Block => "block.config.ts",
            Self::Template => "template.config.ts",
        }
    }

    /// Pre-evaluated configuration data file name.
    #[must_use]
    pub const fn config_json_name(self) -> &'static str {
        match self {
            Self::Block => "block.config.json",
            Self::Template => "template.config.json",
        }
    }

    /// Name of the SDK declaration helper used in generated config source.
    #[must_use]
    pub const fn define_fn(self) -> &'static str {
        match self {
            Self::Block => "defineBlock",
            Self::Template => "defineTemplate",
        }
    }

    /// Locate an existing configuration source file in `dir`, if any.
    ///
    /// Probes the recognized extensions in order (`.ts`, `.js`, `.mjs`).
    #[must_use]
    pub fn find_config_source(self, dir: &Path) -> Option<PathBuf> {
        CONFIG_SOURCE_EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("{}.{ext}", self.config_basename())))
            .find(|path| path.is_file())
    }

    /// True when `dir` already carries any current-format configuration,
    /// source or pre-evaluated.
    #[must_use]
    pub fn has_current_config(self, dir: &Path) -> bool {
        self.find_config_source(dir).is_some() || dir.join(self.config_json_name()).is_file()
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Block => write!(f, "block"),
            Self::Template => write!(f, "template"),
        }
    }
}

impl FromStr for ResourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "block" => Ok(Self::Block),
            "template" => Ok(Self::Template),
            other => Err(format!("invalid resource type: {other}")),
        }
    }
}
