//! List command: show the resources in the workspace.
//!
//! Uses the lenient discovery mode meant for interactive tooling: problems
//! are warned about and skipped rather than aborting, manifests are not
//! required, and preview data is attached.

use crate::cli::CommandOutcome;
use crate::config::GlobalConfig;
use crate::scanner::{DiscoveredResource, SandboxResolver, ScanOptions, Scanner};
use crate::schema::vocabulary;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use serde_json::json;
use std::path::PathBuf;

/// Output format for the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table.
    Table,
    /// JSON array for tooling.
    Json,
}

/// List the resources in the workspace.
#[derive(Parser, Debug)]
#[command(name = "list")]
pub struct ListCommand {
    /// Output format.
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
}

impl ListCommand {
    /// Execute the list command.
    pub async fn execute(self, root: PathBuf) -> Result<CommandOutcome> {
        let global = GlobalConfig::load()?;
        let vocabulary = vocabulary::obtain(&global).await?;
        let resolver = SandboxResolver::new();
        let options = ScanOptions::new(&root).require_package_json(false).load_preview(true);
        let resources = Scanner::new(options, &resolver, Some(vocabulary)).scan().await?;

        match self.format {
            OutputFormat::Json => print_json(&resources)?,
            OutputFormat::Table => print_table(&resources),
        }
        Ok(CommandOutcome::Success)
    }
}

fn print_json(resources: &[DiscoveredResource]) -> Result<()> {
    let records: Vec<serde_json::Value> = resources
        .iter()
        .map(|r| {
            json!({
                "type": r.resource_type,
                "name": r.name,
                "displayName": r.display_name,
                "version": r.manifest.version,
                "description": r.description,
                "category": r.category,
                "preview": r.preview,
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

fn print_table(resources: &[DiscoveredResource]) {
    if resources.is_empty() {
        println!("No resources found.");
        return;
    }

    let name_width = resources
        .iter()
        .map(|r| r.display_name.len())
        .chain(["NAME".len()])
        .max()
        .unwrap_or(4);
    let version_width = resources
        .iter()
        .map(|r| r.manifest.version.len())
        .chain(["VERSION".len()])
        .max()
        .unwrap_or(7);

    let header = format!(
        "{:<10} {:<name_width$} {:<version_width$} {:<14} DESCRIPTION",
        "TYPE", "NAME", "VERSION", "CATEGORY",
    );
    println!("{}", header.bold());
    for r in resources {
        println!(
            "{:<10} {:<name_width$} {:<version_width$} {:<14} {}",
            r.resource_type.to_string(),
            r.display_name,
            if r.manifest.version.is_empty() { "-" } else { r.manifest.version.as_str() },
            r.category.as_deref().unwrap_or("-"),
            r.description.as_deref().unwrap_or(""),
        );
    }
}
