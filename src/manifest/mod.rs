//! Resource manifest (package.json) parsing and rewriting.
//!
//! Every resource carries a `package.json` manifest providing its identity:
//! a required `name` and a required semantic `version`. Builds and archives
//! are keyed by that pair. Historically the manifest also embedded the
//! resource's schema under the namespaced `"blocksmith"` section; migration
//! removes that section, and the build workflow re-derives a fresh one into
//! `dist` manifests for consumers of the old shape.
//!
//! Unknown manifest fields are preserved verbatim across load/save so a
//! migration rewrite never destroys author data.

use crate::constants::{MANIFEST_FILE, METADATA_NAMESPACE};
use crate::core::BlocksmithError;
use crate::schema::LegacyMetadata;
use crate::utils::fs::atomic_write;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// A resource's package manifest.
///
/// `name`, `version`, and `description` are modeled explicitly; everything
/// else round-trips through `extra` untouched, including the namespaced
/// legacy metadata section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageManifest {
    /// Package name (identity).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Semantic version string (identity).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    /// Optional description, used as a fallback for resources whose
    /// configuration does not provide one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// All other manifest fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PackageManifest {
    /// Path of the manifest file inside a resource directory.
    #[must_use]
    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(MANIFEST_FILE)
    }

    /// Load and parse the manifest from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|_| BlocksmithError::ManifestNotFound {
            path: path.parent().unwrap_or(path).display().to_string(),
        })?;
        let manifest = serde_json::from_str(&raw).map_err(|e| BlocksmithError::ManifestParseError {
            file: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(manifest)
    }

    /// Serialize the manifest back to `path` as pretty-printed JSON.
    ///
    /// The write is atomic (temp file + rename) so a crash never leaves a
    /// truncated manifest behind.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut rendered = serde_json::to_string_pretty(self)
            .with_context(|| format!("failed to serialize manifest for {}", path.display()))?;
        rendered.push('\n');
        atomic_write(path, rendered.as_bytes())
            .with_context(|| format!("failed to write manifest {}", path.display()))
    }

    /// Check the identity invariant: non-empty name, parseable semver version.
    pub fn validate(&self) -> Result<(), BlocksmithError> {
        if self.name.trim().is_empty() {
            return Err(BlocksmithError::ManifestInvalid {
                name: self.name.clone(),
                reason: "missing \"name\"".to_string(),
            });
        }
        if self.version.trim().is_empty() {
            return Err(BlocksmithError::ManifestInvalid {
                name: self.name.clone(),
                reason: "missing \"version\"".to_string(),
            });
        }
        if let Err(e) = semver::Version::parse(&self.version) {
            return Err(BlocksmithError::ManifestInvalid {
                name: self.name.clone(),
                reason: format!("\"version\" is not a semantic version: {e}"),
            });
        }
        Ok(())
    }

    /// Parse the manifest version as semver.
    pub fn parsed_version(&self) -> Result<semver::Version, semver::Error> {
        semver::Version::parse(&self.version)
    }

    /// True when the manifest carries a namespaced legacy metadata section.
    #[must_use]
    pub fn has_legacy_metadata(&self) -> bool {
        self.extra.get(METADATA_NAMESPACE).is_some_and(Value::is_object)
    }

    /// Decode the namespaced legacy metadata section, if present.
    pub fn legacy_metadata(&self) -> Result<Option<LegacyMetadata>> {
        match self.extra.get(METADATA_NAMESPACE) {
            None => Ok(None),
            Some(value) => {
                let metadata: LegacyMetadata = serde_json::from_value(value.clone())
                    .with_context(|| {
                        format!("malformed \"{METADATA_NAMESPACE}\" section in manifest for '{}'", self.name)
                    })?;
                Ok(Some(metadata))
            }
        }
    }

    /// Remove the namespaced metadata section. Returns whether it was present.
    pub fn strip_legacy_metadata(&mut self) -> bool {
        self.extra.shift_remove(METADATA_NAMESPACE).is_some()
    }

    /// Insert (or replace) the namespaced metadata section.
    pub fn set_legacy_metadata(&mut self, metadata: &LegacyMetadata) -> Result<()> {
        let value = serde_json::to_value(metadata).context("failed to serialize manifest metadata")?;
        self.extra.insert(METADATA_NAMESPACE.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write_manifest(dir: &Path, value: serde_json::Value) -> PathBuf {
        let path = dir.join(MANIFEST_FILE);
        std::fs::write(&path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
        path
    }

    #[test]
    fn load_reads_identity_and_preserves_extras() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(
            dir.path(),
            json!({
                "name": "hero-banner",
                "version": "1.2.0",
                "description": "A banner",
                "scripts": {"test": "true"}
            }),
        );
        let manifest = PackageManifest::load(&path).unwrap();
        assert_eq!(manifest.name, "hero-banner");
        assert_eq!(manifest.version, "1.2.0");
        assert!(manifest.extra.contains_key("scripts"));
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn load_missing_file_is_manifest_not_found() {
        let dir = TempDir::new().unwrap();
        let err = PackageManifest::load(&dir.path().join(MANIFEST_FILE)).unwrap_err();
        let err = err.downcast::<BlocksmithError>().unwrap();
        assert!(matches!(err, BlocksmithError::ManifestNotFound { .. }));
    }

    #[test]
    fn load_bad_json_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(MANIFEST_FILE);
        std::fs::write(&path, "{not json").unwrap();
        let err = PackageManifest::load(&path).unwrap_err();
        let err = err.downcast::<BlocksmithError>().unwrap();
        assert!(matches!(err, BlocksmithError::ManifestParseError { .. }));
    }

    #[test]
    fn validate_rejects_missing_or_bad_version() {
        let manifest: PackageManifest =
            serde_json::from_value(json!({"name": "x"})).unwrap();
        assert!(manifest.validate().is_err());

        let manifest: PackageManifest =
            serde_json::from_value(json!({"name": "x", "version": "not-semver"})).unwrap();
        assert!(manifest.validate().is_err());

        let manifest: PackageManifest =
            serde_json::from_value(json!({"name": "x", "version": "0.1.0"})).unwrap();
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn legacy_metadata_round_trip_and_strip() {
        let mut manifest: PackageManifest = serde_json::from_value(json!({
            "name": "hero",
            "version": "1.0.0",
            "blocksmith": {
                "schemaFields": [{"key": "title", "type": "text", "label": "Title"}],
                "defaultContent": {"title": "Hi"}
            }
        }))
        .unwrap();

        assert!(manifest.has_legacy_metadata());
        let metadata = manifest.legacy_metadata().unwrap().unwrap();
        assert_eq!(metadata.schema_fields[0].key, "title");

        assert!(manifest.strip_legacy_metadata());
        assert!(!manifest.has_legacy_metadata());
        assert!(!manifest.strip_legacy_metadata());
    }

    #[test]
    fn malformed_legacy_section_is_an_error() {
        let manifest: PackageManifest = serde_json::from_value(json!({
            "name": "hero",
            "version": "1.0.0",
            "blocksmith": {"schemaFields": "not-a-list"}
        }))
        .unwrap();
        assert!(manifest.legacy_metadata().is_err());
    }

    #[test]
    fn save_round_trips_without_losing_fields() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(
            dir.path(),
            json!({"name": "hero", "version": "1.0.0", "keywords": ["cms"]}),
        );
        let mut manifest = PackageManifest::load(&path).unwrap();
        manifest.version = "1.0.1".to_string();
        manifest.save(&path).unwrap();

        let reloaded = PackageManifest::load(&path).unwrap();
        assert_eq!(reloaded.version, "1.0.1");
        assert_eq!(reloaded.extra.get("keywords"), Some(&json!(["cms"])));
    }
}
