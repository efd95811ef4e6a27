//! Command-line interface for Blocksmith.
//!
//! Each command is implemented as a separate module with its own argument
//! struct and execution logic:
//!
//! - `build` - bundle every discovered resource into versioned `dist` output
//! - `package` - archive resources into distributable zip artifacts
//! - `migrate` - upgrade legacy manifest-embedded configuration
//! - `list` - show the resources in the workspace
//! - `new` - scaffold a block or template
//!
//! # Global Options
//!
//! All commands support `--verbose`/`--quiet` for log verbosity,
//! `--no-progress` to disable spinners and bars, and `--root` to operate on
//! a workspace other than the current directory.
//!
//! # Exit Codes
//!
//! Commands return a [`std::process::ExitCode`]: `0` for success (including
//! clean no-ops), `1` for hard failures that abort the command, and `2` when
//! a batch completed but some resources failed.

pub mod common;

mod build;
mod list;
mod migrate;
mod new;
mod package;

use crate::constants::EXIT_PARTIAL;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Outcome of a command that completed without aborting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Everything succeeded (or there was nothing to do).
    Success,
    /// The batch completed but some resources failed.
    Partial,
}

impl CommandOutcome {
    /// Map the outcome to the process exit code.
    #[must_use]
    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Success => ExitCode::SUCCESS,
            Self::Partial => ExitCode::from(EXIT_PARTIAL),
        }
    }
}

/// Runtime configuration derived from the global CLI flags.
///
/// Translating flags into a value (instead of mutating the process
/// environment) keeps tests free of global state and gives programmatic
/// callers one injection point.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter directive; `None` honors `RUST_LOG` and defaults to `info`.
    pub log_level: Option<String>,
    /// Disable progress indicators.
    pub no_progress: bool,
}

impl CliConfig {
    /// Configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply this configuration to the process: install the tracing
    /// subscriber and disable progress indicators when requested.
    ///
    /// Call once at the start of execution.
    pub fn apply(&self) {
        if self.no_progress {
            crate::utils::progress::disable_progress();
        }
        let filter = match &self.log_level {
            Some(level) => EnvFilter::new(level.clone()),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        };
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .try_init();
    }
}

/// Main CLI structure for Blocksmith.
#[derive(Parser)]
#[command(
    name = "blocksmith",
    about = "Blocksmith CLI - build, package, and migrate content blocks and templates",
    version,
    author,
    long_about = "Blocksmith manages the authoring workflow for content blocks and templates: \
                  validated schemas, versioned builds, and distributable archives."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose (debug) output.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable progress bars and spinners.
    #[arg(long, global = true)]
    no_progress: bool,

    /// Workspace root containing the blocks/ and templates/ collections.
    ///
    /// Defaults to the current directory.
    #[arg(long, global = true)]
    root: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Build every resource into versioned dist output.
    Build(build::BuildCommand),

    /// Archive resources into distributable zip artifacts.
    Package(package::PackageCommand),

    /// Upgrade resources from the legacy configuration format.
    Migrate(migrate::MigrateCommand),

    /// List the resources in the workspace.
    List(list::ListCommand),

    /// Scaffold a new block or template.
    New(new::NewCommand),
}

impl Cli {
    /// Execute the CLI with configuration derived from the parsed flags.
    pub async fn execute(self) -> Result<ExitCode> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translate the global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };
        CliConfig { log_level, no_progress: self.no_progress }
    }

    /// Execute with an explicit configuration (dependency injection for
    /// tests and programmatic callers).
    pub async fn execute_with_config(self, config: CliConfig) -> Result<ExitCode> {
        config.apply();

        let root = match self.root {
            Some(root) => root,
            None => std::env::current_dir().context("failed to determine working directory")?,
        };

        let outcome = match self.command {
            Commands::Build(cmd) => cmd.execute(root).await?,
            Commands::Package(cmd) => cmd.execute(root).await?,
            Commands::Migrate(cmd) => cmd.execute(root).await?,
            Commands::List(cmd) => cmd.execute(root).await?,
            Commands::New(cmd) => cmd.execute(root).await?,
        };
        Ok(outcome.exit_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_sets_debug_level() {
        let cli = Cli::parse_from(["blocksmith", "--verbose", "list"]);
        let config = cli.build_config();
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn quiet_sets_error_level() {
        let cli = Cli::parse_from(["blocksmith", "--quiet", "list"]);
        let config = cli.build_config();
        assert_eq!(config.log_level.as_deref(), Some("error"));
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        let result = Cli::try_parse_from(["blocksmith", "--verbose", "--quiet", "list"]);
        assert!(result.is_err());
    }

    #[test]
    fn no_progress_is_carried() {
        let cli = Cli::parse_from(["blocksmith", "--no-progress", "list"]);
        assert!(cli.build_config().no_progress);
    }
}
