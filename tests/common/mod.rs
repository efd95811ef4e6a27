//! Shared test utilities for the integration suite.
//!
//! [`ProjectFixture`] builds a throwaway workspace with blocks and templates
//! in the layouts the scanner expects, and hands out pre-configured
//! [`assert_cmd`] commands pointed at it. Configuration is always written as
//! pre-evaluated `*.config.json`, so no sandbox evaluator is needed.

use assert_cmd::Command;
use serde_json::json;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary workspace for driving the real binary.
pub struct ProjectFixture {
    root: TempDir,
}

impl ProjectFixture {
    /// Create an empty workspace.
    pub fn new() -> Self {
        Self { root: TempDir::new().expect("failed to create temp workspace") }
    }

    /// The workspace root.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// A `blocksmith` command rooted at this workspace, isolated from the
    /// user's global configuration and registry.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("blocksmith").expect("binary builds");
        cmd.arg("--root")
            .arg(self.path())
            .env("BLOCKSMITH_NO_PROGRESS", "1")
            .env("BLOCKSMITH_CONFIG", self.path().join("no-such-config.toml"))
            .env_remove("BLOCKSMITH_REGISTRY_URL")
            .env_remove("BLOCKSMITH_TOKEN");
        cmd
    }

    /// Add a configured block with a manifest, config data, and entry point.
    pub fn add_block(&self, slug: &str) -> PathBuf {
        self.add_resource("blocks", slug)
    }

    /// Add a configured template.
    pub fn add_template(&self, slug: &str) -> PathBuf {
        self.add_resource("templates", slug)
    }

    /// Add a block whose manifest still carries the legacy metadata section
    /// and no current configuration.
    pub fn add_legacy_block(&self, slug: &str) -> PathBuf {
        let dir = self.path().join("blocks").join(slug);
        std::fs::create_dir_all(&dir).expect("create resource dir");
        std::fs::write(
            dir.join("package.json"),
            serde_json::to_string_pretty(&json!({
                "name": slug,
                "version": "1.0.0",
                "description": "A legacy block",
                "blocksmith": {
                    "schemaFields": [
                        {"key": "title", "type": "text", "label": "Title", "required": true},
                        {"key": "layout", "type": "dropdown", "label": "Layout",
                         "options": ["wide", "narrow"]}
                    ],
                    "defaultContent": {"layout": "wide", "title": "Hello"}
                }
            }))
            .expect("serialize manifest"),
        )
        .expect("write manifest");
        dir
    }

    /// Add a block whose schema fails validation (empty select options).
    pub fn add_invalid_block(&self, slug: &str) -> PathBuf {
        let dir = self.add_resource("blocks", slug);
        std::fs::write(
            dir.join("block.config.json"),
            json!({
                "name": slug,
                "schema": {"cta": {"type": "select", "label": "CTA", "options": []}}
            })
            .to_string(),
        )
        .expect("write config");
        dir
    }

    fn add_resource(&self, collection: &str, slug: &str) -> PathBuf {
        let dir = self.path().join(collection).join(slug);
        std::fs::create_dir_all(dir.join("src")).expect("create resource dir");
        std::fs::write(dir.join("src/index.ts"), "export default () => null;\n")
            .expect("write entry point");
        std::fs::write(
            dir.join("package.json"),
            json!({"name": slug, "version": "1.0.0"}).to_string(),
        )
        .expect("write manifest");
        let config_name = if collection == "blocks" {
            "block.config.json"
        } else {
            "template.config.json"
        };
        std::fs::write(
            dir.join(config_name),
            json!({
                "name": slug,
                "description": "A test resource",
                "category": "testing",
                "schema": {
                    "title": {"type": "singleLine", "label": "Title"}
                }
            })
            .to_string(),
        )
        .expect("write config");
        dir
    }
}
