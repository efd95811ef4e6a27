//! Resource discovery.
//!
//! The scanner walks the two collection directories (`blocks/`, then
//! `templates/`), resolves each immediate subdirectory's configuration,
//! validates it, and yields normalized [`DiscoveredResource`] records. All
//! three workflows share this one traversal with different [`ScanOptions`],
//! so discovery semantics cannot drift between commands:
//!
//! - **build** scans strictly with full validation
//! - **package** scans manifest-only (no configuration resolution)
//! - **list** scans leniently with preview data attached
//!
//! Mode is entirely declarative - every behavioral difference between the
//! call sites is one of the documented option effects below; there is no
//! hidden mode-specific branching.
//!
//! # Per-directory decision sequence
//!
//! 1. With `load_config`: resolve the current-format configuration through
//!    the injected [`ConfigResolver`]. When none resolves: a manifest
//!    carrying legacy metadata means **migration required** - fatal in
//!    strict mode, a warning-and-skip otherwise; an unconfigured directory
//!    is a warning-and-skip regardless of strictness.
//! 2. With a resolved configuration and `validate_schema`: run the
//!    validator. Invalid schemas are fatal in strict mode (the full error
//!    list is part of the raised error), warning-and-skip otherwise.
//!    Validator warnings go to the diagnostic log in either mode.
//! 3. With `require_package_json`: a missing or incomplete manifest is
//!    fatal in strict mode, warning-and-skip otherwise.
//! 4. With `load_preview`: attach `preview.json` (empty object if absent).
//! 5. Emit the record.
//!
//! Resources are processed one at a time in directory-listing order; each
//! record is computed fresh with no shared state between resources.

pub mod resolver;

pub use resolver::{ConfigResolver, SandboxResolver};

use crate::constants::PREVIEW_FILE;
use crate::core::{BlocksmithError, ResourceType};
use crate::manifest::PackageManifest;
use crate::schema::{FieldTypeVocabulary, ResourceConfig, SchemaValidator};
use anyhow::Result;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Declarative discovery mode.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Workspace root containing the collection directories.
    pub root: PathBuf,
    /// Errors instead of warnings for structural problems. Default: false.
    pub strict: bool,
    /// Attempt to resolve a current-format configuration. Default: true.
    pub load_config: bool,
    /// Run the validator on resolved configurations. Default: true.
    pub validate_schema: bool,
    /// Attach preview data to emitted records. Default: false.
    pub load_preview: bool,
    /// Reject/skip resources without a valid manifest. Default: true.
    pub require_package_json: bool,
}

impl ScanOptions {
    /// Options with defaults, rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            strict: false,
            load_config: true,
            validate_schema: true,
            load_preview: false,
            require_package_json: true,
        }
    }

    /// Set strict mode.
    #[must_use]
    pub const fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set configuration resolution.
    #[must_use]
    pub const fn load_config(mut self, load_config: bool) -> Self {
        self.load_config = load_config;
        self
    }

    /// Set schema validation.
    #[must_use]
    pub const fn validate_schema(mut self, validate_schema: bool) -> Self {
        self.validate_schema = validate_schema;
        self
    }

    /// Set preview loading.
    #[must_use]
    pub const fn load_preview(mut self, load_preview: bool) -> Self {
        self.load_preview = load_preview;
        self
    }

    /// Set manifest requirement.
    #[must_use]
    pub const fn require_package_json(mut self, require: bool) -> Self {
        self.require_package_json = require;
        self
    }
}

/// A normalized discovery record.
#[derive(Debug, Clone)]
pub struct DiscoveredResource {
    /// Block or template.
    pub resource_type: ResourceType,
    /// Directory-derived slug.
    pub name: String,
    /// Resource directory.
    pub path: PathBuf,
    /// The manifest (default-empty when absent and not required).
    pub manifest: PackageManifest,
    /// Resolved configuration, when `load_config` was set and one resolved.
    pub config: Option<ResourceConfig>,
    /// Preview data, when `load_preview` was set.
    pub preview: Option<Value>,
    /// Configuration name, falling back to the directory slug.
    pub display_name: String,
    /// Configuration description, falling back to the manifest description.
    pub description: Option<String>,
    /// Configuration category.
    pub category: Option<String>,
}

/// Walks the collections and yields normalized resource records.
pub struct Scanner<'a, R> {
    options: ScanOptions,
    resolver: &'a R,
    vocabulary: Option<&'a FieldTypeVocabulary>,
}

impl<'a, R: ConfigResolver> Scanner<'a, R> {
    /// Create a scanner.
    ///
    /// `vocabulary` must be supplied when `options.load_config` and
    /// `options.validate_schema` are both set; validation cannot run
    /// without it.
    #[must_use]
    pub const fn new(
        options: ScanOptions,
        resolver: &'a R,
        vocabulary: Option<&'a FieldTypeVocabulary>,
    ) -> Self {
        Self { options, resolver, vocabulary }
    }

    /// Discover all resources under the workspace root.
    ///
    /// Returns records in collection order (`blocks/` before `templates/`),
    /// subdirectories sorted by name within each collection. Strict-mode
    /// structural problems abort the scan with the offending condition.
    pub async fn scan(&self) -> Result<Vec<DiscoveredResource>> {
        if self.options.load_config && self.options.validate_schema && self.vocabulary.is_none() {
            return Err(BlocksmithError::ConfigError {
                message: "schema validation requested without a field-type vocabulary".to_string(),
            }
            .into());
        }

        let mut resources = Vec::new();
        for resource_type in ResourceType::ALL {
            let collection = self.options.root.join(resource_type.collection_dir());
            if !collection.is_dir() {
                debug!("collection directory {} not present", collection.display());
                continue;
            }
            for dir in sorted_subdirectories(&collection)? {
                if let Some(record) = self.process(resource_type, &dir).await? {
                    resources.push(record);
                }
            }
        }
        Ok(resources)
    }

    /// Apply the decision sequence to one candidate directory.
    ///
    /// `Ok(None)` is a lenient skip; strict-mode problems return `Err`.
    async fn process(
        &self,
        resource_type: ResourceType,
        dir: &Path,
    ) -> Result<Option<DiscoveredResource>> {
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        // Manifest is loaded tolerantly up front: legacy detection needs its
        // contents even in modes that do not require it. Load failures are
        // held back until the manifest step so the configuration steps keep
        // their precedence.
        let manifest_path = PackageManifest::path_in(dir);
        let (manifest, manifest_err) = match PackageManifest::load(&manifest_path) {
            Ok(manifest) => (Some(manifest), None),
            Err(e) => (None, Some(e)),
        };

        // Step 1: configuration resolution.
        let config = if self.options.load_config {
            let resolved = match self.resolver.resolve(dir, resource_type).await {
                Ok(resolved) => resolved,
                Err(e) => {
                    if self.options.strict {
                        return Err(e);
                    }
                    warn!("skipping {resource_type} '{name}': {e:#}");
                    return Ok(None);
                }
            };
            match resolved {
                Some(config) => Some(config),
                None => {
                    let has_legacy =
                        manifest.as_ref().is_some_and(PackageManifest::has_legacy_metadata);
                    if has_legacy {
                        if self.options.strict {
                            return Err(
                                BlocksmithError::MigrationRequired { name: name.clone() }.into()
                            );
                        }
                        warn!(
                            "skipping {resource_type} '{name}': legacy configuration format, \
                             run `blocksmith migrate`"
                        );
                    } else {
                        // Unconfigured directories are never fatal.
                        warn!("skipping {resource_type} '{name}': no configuration found");
                    }
                    return Ok(None);
                }
            }
        } else {
            None
        };

        // Step 2: schema validation.
        if let (Some(config), true) = (&config, self.options.validate_schema) {
            if let Some(vocabulary) = self.vocabulary {
                let report = SchemaValidator::new(vocabulary).validate(&config.schema);
                for warning in &report.warnings {
                    warn!("{resource_type} '{name}': {warning}");
                }
                if !report.is_valid() {
                    if self.options.strict {
                        return Err(BlocksmithError::SchemaValidationFailed {
                            name: name.clone(),
                            errors: report.errors,
                        }
                        .into());
                    }
                    warn!(
                        "skipping {resource_type} '{name}': schema has {} validation error(s)",
                        report.errors.len()
                    );
                    for error in &report.errors {
                        warn!("  {error}");
                    }
                    return Ok(None);
                }
            }
        }

        // Step 3: manifest requirement.
        if self.options.require_package_json {
            match (&manifest, manifest_err) {
                (Some(manifest), _) => {
                    if let Err(e) = manifest.validate() {
                        if self.options.strict {
                            return Err(e.into());
                        }
                        warn!("skipping {resource_type} '{name}': {e}");
                        return Ok(None);
                    }
                }
                (None, Some(e)) => {
                    if self.options.strict {
                        return Err(e);
                    }
                    warn!("skipping {resource_type} '{name}': {e:#}");
                    return Ok(None);
                }
                (None, None) => unreachable!("manifest load yields a value or an error"),
            }
        }

        // Step 4: preview data.
        let preview = if self.options.load_preview {
            Some(load_preview(dir))
        } else {
            None
        };

        // Step 5: emit the normalized record.
        let manifest = manifest.unwrap_or_default();
        let display_name = config
            .as_ref()
            .map(|c| c.name.clone())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| name.clone());
        let description = config
            .as_ref()
            .map(|c| c.description.clone())
            .filter(|d| !d.is_empty())
            .or_else(|| manifest.description.clone());
        let category = config.as_ref().and_then(|c| c.category.clone());

        Ok(Some(DiscoveredResource {
            resource_type,
            name,
            path: dir.to_path_buf(),
            manifest,
            config,
            preview,
            display_name,
            description,
            category,
        }))
    }
}

fn sorted_subdirectories(collection: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs: Vec<PathBuf> = std::fs::read_dir(collection)
        .map_err(|e| BlocksmithError::ConfigError {
            message: format!("cannot read collection {}: {e}", collection.display()),
        })?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();
    Ok(dirs)
}

fn load_preview(dir: &Path) -> Value {
    let path = dir.join(PREVIEW_FILE);
    match std::fs::read_to_string(&path) {
        Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("ignoring malformed {}: {e}", path.display());
            Value::Object(serde_json::Map::new())
        }),
        Err(_) => Value::Object(serde_json::Map::new()),
    }
}
