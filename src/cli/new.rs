//! New command: scaffold a block or template.
//!
//! Creates the resource directory with a manifest, a starter configuration
//! source (generated with the same code generator migration uses), and an
//! entry-point stub.

use crate::cli::CommandOutcome;
use crate::cli::common::humanize_slug;
use crate::constants::{MANIFEST_FILE, SRC_DIR};
use crate::core::{BlocksmithError, ResourceType};
use crate::manifest::PackageManifest;
use crate::schema::model::TYPE_SINGLE_LINE;
use crate::schema::{FieldConfig, ResourceConfig, Schema, generate_config_source};
use crate::utils::fs::{atomic_write, ensure_dir};
use anyhow::{Result, bail};
use clap::Parser;
use colored::Colorize;
use regex::Regex;
use std::path::PathBuf;

const ENTRY_STUB: &str = "export default function render(content) {\n  return content;\n}\n";

/// Scaffold a new block or template.
///
/// # Examples
///
/// ```bash
/// blocksmith new block hero-banner
/// blocksmith new template landing-page --description "A landing page"
/// ```
#[derive(Parser, Debug)]
#[command(name = "new")]
pub struct NewCommand {
    /// Kind of resource to create.
    #[arg(value_enum)]
    resource_type: ResourceType,

    /// Directory slug for the new resource (lowercase, hyphen-separated).
    name: String,

    /// Short description for the manifest and configuration.
    #[arg(long)]
    description: Option<String>,
}

impl NewCommand {
    /// Execute the new command.
    pub async fn execute(self, root: PathBuf) -> Result<CommandOutcome> {
        let slug_pattern = Regex::new(r"^[a-z][a-z0-9]*(-[a-z0-9]+)*$")
            .map_err(|e| BlocksmithError::ConfigError { message: e.to_string() })?;
        if !slug_pattern.is_match(&self.name) {
            bail!(BlocksmithError::ConfigError {
                message: format!(
                    "'{}' is not a valid resource name (use lowercase letters, digits, and hyphens)",
                    self.name
                ),
            });
        }

        let dir = root.join(self.resource_type.collection_dir()).join(&self.name);
        if dir.exists() {
            bail!(BlocksmithError::ConfigError {
                message: format!("{} already exists", dir.display()),
            });
        }

        ensure_dir(&dir.join(SRC_DIR))?;

        let description = self.description.unwrap_or_default();
        let manifest = PackageManifest {
            name: self.name.clone(),
            version: "0.1.0".to_string(),
            description: if description.is_empty() { None } else { Some(description.clone()) },
            ..PackageManifest::default()
        };
        manifest.save(&dir.join(MANIFEST_FILE))?;

        let mut schema = Schema::new();
        schema.insert("title", FieldConfig::scalar(TYPE_SINGLE_LINE, "Title"));
        let config = ResourceConfig {
            name: humanize_slug(&self.name),
            description,
            schema,
            ..ResourceConfig::default()
        };
        let source = generate_config_source(self.resource_type, &config);
        atomic_write(&dir.join(self.resource_type.config_source_name()), source.as_bytes())?;

        atomic_write(&dir.join(SRC_DIR).join("index.ts"), ENTRY_STUB.as_bytes())?;

        println!(
            "✅ {}",
            format!("Created {} '{}' at {}", self.resource_type, self.name, dir.display()).green()
        );
        Ok(CommandOutcome::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn command(resource_type: ResourceType, name: &str) -> NewCommand {
        NewCommand { resource_type, name: name.to_string(), description: None }
    }

    #[tokio::test]
    async fn scaffolds_a_block() {
        let ws = TempDir::new().unwrap();
        let outcome = command(ResourceType::Block, "hero-banner")
            .execute(ws.path().to_path_buf())
            .await
            .unwrap();
        assert_eq!(outcome, CommandOutcome::Success);

        let dir = ws.path().join("blocks/hero-banner");
        assert!(dir.join("package.json").is_file());
        assert!(dir.join("src/index.ts").is_file());

        let source = std::fs::read_to_string(dir.join("block.config.ts")).unwrap();
        assert!(source.contains("defineBlock"));
        assert!(source.contains("name: \"Hero Banner\""));

        let manifest = PackageManifest::load(&dir.join("package.json")).unwrap();
        assert_eq!(manifest.name, "hero-banner");
        assert_eq!(manifest.version, "0.1.0");
    }

    #[tokio::test]
    async fn rejects_invalid_slugs() {
        let ws = TempDir::new().unwrap();
        for bad in ["Hero", "hero_banner", "-hero", "hero-", ""] {
            let result =
                command(ResourceType::Block, bad).execute(ws.path().to_path_buf()).await;
            assert!(result.is_err(), "expected '{bad}' to be rejected");
        }
    }

    #[tokio::test]
    async fn refuses_to_overwrite() {
        let ws = TempDir::new().unwrap();
        std::fs::create_dir_all(ws.path().join("templates/page")).unwrap();
        let result =
            command(ResourceType::Template, "page").execute(ws.path().to_path_buf()).await;
        assert!(result.is_err());
    }
}
