//! Global constants used throughout the Blocksmith codebase.
//!
//! File names, directory layout, collaborator binary names, and environment
//! variable names that are used across multiple modules. Defining them
//! centrally improves maintainability and makes magic strings more
//! discoverable.

/// The per-resource manifest file name.
pub const MANIFEST_FILE: &str = "package.json";

/// Key of the namespaced metadata section inside a resource manifest.
///
/// The legacy configuration format lives under this key; the build workflow
/// also writes a freshly derived section under it into `dist` manifests for
/// consumers that still expect the old shape.
pub const METADATA_NAMESPACE: &str = "blocksmith";

/// The npm package that provides the `defineBlock`/`defineTemplate` helpers
/// imported by generated configuration source files.
pub const SDK_PACKAGE: &str = "@blocksmith/sdk";

/// The sandboxed configuration evaluator binary (shipped with the SDK).
///
/// The scanner never evaluates configuration source itself; it invokes this
/// external program and consumes its JSON output.
pub const CONFIG_EVAL_BIN: &str = "blocksmith-eval";

/// The external bundler binary used by the build workflow.
pub const BUNDLER_BIN: &str = "esbuild";

/// Extensions recognized for configuration source files, in probe order.
pub const CONFIG_SOURCE_EXTENSIONS: &[&str] = &["ts", "js", "mjs"];

/// Name of the per-resource source directory.
pub const SRC_DIR: &str = "src";

/// Recognized entry-point file names under [`SRC_DIR`], in probe order.
pub const ENTRY_POINT_CANDIDATES: &[&str] = &["index.ts", "index.tsx", "index.js", "index.jsx"];

/// Optional per-resource preview data file.
pub const PREVIEW_FILE: &str = "preview.json";

/// Default output directory for the build workflow.
pub const DEFAULT_DIST_DIR: &str = "dist";

/// Default output directory for the package workflow.
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// Top-level resource directory entries excluded from archives.
pub const PACKAGE_EXCLUDES: &[&str] = &["node_modules", "dist", ".git"];

/// Default JavaScript target passed to the bundler.
pub const DEFAULT_BUNDLE_TARGET: &str = "es2020";

/// Registry endpoint path for the field-type vocabulary.
pub const FIELD_TYPES_PATH: &str = "v1/field-types";

/// Registry endpoint path for package publishing.
pub const PACKAGES_PATH: &str = "v1/packages";

/// Environment variable that disables progress indicators.
pub const ENV_NO_PROGRESS: &str = "BLOCKSMITH_NO_PROGRESS";

/// Environment variable overriding the global config file location.
pub const ENV_CONFIG: &str = "BLOCKSMITH_CONFIG";

/// Environment variable overriding the registry URL.
pub const ENV_REGISTRY_URL: &str = "BLOCKSMITH_REGISTRY_URL";

/// Environment variable overriding the registry auth token.
pub const ENV_TOKEN: &str = "BLOCKSMITH_TOKEN";

/// Exit code for a batch that completed with some per-resource failures.
///
/// Distinguishable from full success (0) and from hard failures (1) so that
/// scripts can tell "everything was attempted, some resources failed" apart
/// from "the command aborted".
pub const EXIT_PARTIAL: u8 = 2;
