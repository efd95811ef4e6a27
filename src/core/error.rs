//! Error handling for Blocksmith.
//!
//! The error system is designed around two core principles:
//! 1. **Strongly-typed errors** for precise error handling in code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! Two main types cooperate:
//! - [`BlocksmithError`] - enumerated error types for all failure cases
//! - [`ErrorContext`] - wrapper that adds user-friendly suggestions and details
//!
//! Commands work with [`anyhow::Result`] and attach context as errors bubble
//! up; at the very top, `main` converts whatever arrives into an
//! [`ErrorContext`] via [`user_friendly_error`] and displays it with colors.
//!
//! # Error Categories
//!
//! - **Manifests**: [`BlocksmithError::ManifestNotFound`],
//!   [`BlocksmithError::ManifestParseError`], [`BlocksmithError::ManifestInvalid`]
//! - **Configuration**: [`BlocksmithError::ConfigEvalFailed`],
//!   [`BlocksmithError::ConfigParseError`], [`BlocksmithError::EvaluatorNotFound`]
//! - **Discovery**: [`BlocksmithError::MigrationRequired`],
//!   [`BlocksmithError::SchemaValidationFailed`], [`BlocksmithError::ResourceNotFound`]
//! - **Collaborators**: [`BlocksmithError::BundlerNotFound`],
//!   [`BlocksmithError::BundlerFailed`], [`BlocksmithError::ArchiveFailed`],
//!   [`BlocksmithError::RegistryError`], [`BlocksmithError::VocabularyUnavailable`]
//!
//! Common standard library and ecosystem errors convert automatically:
//! [`std::io::Error`], [`serde_json::Error`], and [`semver::Error`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use blocksmith_cli::core::{BlocksmithError, ErrorContext};
//!
//! let error = BlocksmithError::MigrationRequired {
//!     name: "hero-banner".to_string(),
//! };
//! let context = ErrorContext::new(error)
//!     .with_suggestion("Run `blocksmith migrate` to upgrade this resource");
//! context.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for Blocksmith operations.
///
/// Each variant represents a specific failure mode and carries the details
/// needed to explain it to a user (paths, resource names, collaborator
/// output). Error messages are written for end users, not just developers.
#[derive(Error, Debug)]
pub enum BlocksmithError {
    /// Manifest file (package.json) is missing from a resource directory.
    #[error("Manifest file package.json not found in {path}")]
    ManifestNotFound {
        /// Directory that was expected to contain the manifest
        path: String,
    },

    /// Manifest file exists but could not be parsed as JSON.
    #[error("Invalid manifest file syntax in {file}")]
    ManifestParseError {
        /// Path to the manifest file that failed to parse
        file: String,
        /// Specific reason for the parsing failure
        reason: String,
    },

    /// Manifest is parseable but incomplete or inconsistent.
    ///
    /// A resource manifest must carry a non-empty `name` and a semantic
    /// `version`; builds and archives are keyed by that pair.
    #[error("Invalid manifest for resource '{name}': {reason}")]
    ManifestInvalid {
        /// Name of the resource with the invalid manifest
        name: String,
        /// Why the manifest is invalid
        reason: String,
    },

    /// The sandboxed configuration evaluator reported a failure.
    #[error("Failed to evaluate configuration source {file}")]
    ConfigEvalFailed {
        /// Path to the configuration source file
        file: String,
        /// Evaluator stderr or failure reason
        reason: String,
    },

    /// Evaluated (or pre-evaluated) configuration data could not be decoded.
    #[error("Invalid configuration data in {file}: {reason}")]
    ConfigParseError {
        /// Path to the offending configuration file
        file: String,
        /// Decoding failure reason
        reason: String,
    },

    /// The sandboxed configuration evaluator binary is not installed.
    #[error("Configuration evaluator 'blocksmith-eval' not found in PATH")]
    EvaluatorNotFound,

    /// A resource still uses the legacy manifest-embedded configuration.
    ///
    /// Raised by strict-mode discovery; lenient discovery downgrades this to
    /// a warning and skips the resource.
    #[error("Resource '{name}' uses the legacy configuration format and must be migrated")]
    MigrationRequired {
        /// Name of the resource that requires migration
        name: String,
    },

    /// A resource's content schema failed validation.
    ///
    /// The full error list is part of the message so strict-mode discovery
    /// surfaces every problem before aborting.
    #[error("Schema for resource '{name}' failed validation:\n{}", errors.join("\n"))]
    SchemaValidationFailed {
        /// Name of the resource with the invalid schema
        name: String,
        /// All accumulated validation errors, in traversal order
        errors: Vec<String>,
    },

    /// An explicitly named resource does not exist.
    #[error("Resource '{name}' not found")]
    ResourceNotFound {
        /// Name of the resource that could not be found
        name: String,
    },

    /// No recognized entry point under the resource's `src` directory.
    #[error("No entry point found for resource '{name}' (expected src/index.ts|tsx|js|jsx)")]
    EntryPointNotFound {
        /// Name of the resource without an entry point
        name: String,
    },

    /// The external bundler binary is not installed.
    #[error("Bundler 'esbuild' not found in PATH")]
    BundlerNotFound,

    /// The external bundler reported a failure for one resource.
    #[error("Bundling failed for resource '{name}'")]
    BundlerFailed {
        /// Name of the resource that failed to bundle
        name: String,
        /// Bundler stderr or failure reason
        reason: String,
    },

    /// Writing an archive failed.
    #[error("Failed to create archive {path}: {reason}")]
    ArchiveFailed {
        /// Destination path of the archive
        path: String,
        /// Archiver failure reason
        reason: String,
    },

    /// The field-type vocabulary could not be obtained.
    ///
    /// Validation cannot run without the vocabulary, so this is fatal to any
    /// command that validates schemas.
    #[error("Field-type vocabulary unavailable: {reason}")]
    VocabularyUnavailable {
        /// Why the vocabulary could not be obtained
        reason: String,
    },

    /// A registry API call failed.
    #[error("Registry error during {operation}")]
    RegistryError {
        /// The registry operation that failed
        operation: String,
        /// Failure reason
        reason: String,
    },

    /// Global configuration problem.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// I/O error from [`std::io::Error`].
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error from [`serde_json::Error`].
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Semantic version parsing error from [`semver::Error`].
    #[error("Version error: {0}")]
    SemverError(#[from] semver::Error),
}

/// A user-facing wrapper around [`BlocksmithError`].
///
/// Adds an optional actionable suggestion (displayed green) and optional
/// details (displayed yellow) to the underlying error (displayed red).
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: BlocksmithError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: BlocksmithError) -> Self {
        Self { error, suggestion: None, details: None }
    }

    /// Add an actionable suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining why the error occurred or what it means.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors.
    ///
    /// Error message in red and bold, details in yellow, suggestion in green.
    /// This is the primary way Blocksmith presents errors to CLI users.
    pub fn display(&self) {
        eprintln!("{} {}", "error:".red().bold(), self.error);
        if let Some(details) = &self.details {
            eprintln!("  {}", details.yellow());
        }
        if let Some(suggestion) = &self.suggestion {
            eprintln!("  {} {}", "hint:".green().bold(), suggestion.green());
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;
        if let Some(details) = &self.details {
            write!(f, "\n  {details}")?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  hint: {suggestion}")?;
        }
        Ok(())
    }
}

/// Convert any error into a user-friendly [`ErrorContext`].
///
/// Downcasts to [`BlocksmithError`] where possible and attaches contextual
/// suggestions for the well-known failure modes; anything else is wrapped as
/// a generic configuration error carrying the original message chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let error = match error.downcast::<BlocksmithError>() {
        Ok(e) => e,
        Err(other) => {
            return ErrorContext::new(BlocksmithError::ConfigError {
                message: format!("{other:#}"),
            });
        }
    };

    match &error {
        BlocksmithError::ManifestNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Create a package.json with \"name\" and \"version\" fields")
            .with_details("Every block and template directory needs a manifest for identity and versioning"),
        BlocksmithError::MigrationRequired { name } => {
            let suggestion = format!("Run `blocksmith migrate {name}` to upgrade it to the current configuration format");
            ErrorContext::new(error)
                .with_suggestion(suggestion)
                .with_details("The legacy manifest-embedded schema format is no longer accepted by strict commands")
        }
        BlocksmithError::SchemaValidationFailed { .. } => ErrorContext::new(error)
            .with_suggestion("Fix the listed schema errors in the resource's configuration source file"),
        BlocksmithError::EvaluatorNotFound => ErrorContext::new(error)
            .with_suggestion("Install the Blocksmith SDK: npm install --save-dev @blocksmith/sdk")
            .with_details("Configuration source files are evaluated in a sandbox by the blocksmith-eval helper"),
        BlocksmithError::BundlerNotFound => ErrorContext::new(error)
            .with_suggestion("Install esbuild: npm install --global esbuild"),
        BlocksmithError::ResourceNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Run `blocksmith list` to see the resources in this workspace"),
        BlocksmithError::VocabularyUnavailable { .. } => ErrorContext::new(error)
            .with_suggestion("Check the registry URL in ~/.blocksmith/config.toml and your network connection"),
        _ => ErrorContext::new(error),
    }
}
