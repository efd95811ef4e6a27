//! Blocksmith - build, package, and migrate content blocks and templates.
//!
//! Blocksmith manages the authoring workflow for a content-management
//! system's **resources**: self-contained **blocks** and page **templates**
//! authored under two collection directories (`blocks/`, `templates/`),
//! each with a `package.json` manifest and a typed configuration source
//! declaring its content schema.
//!
//! # Architecture Overview
//!
//! Three workflows share one discovery and validation core:
//!
//! - `blocksmith build` - strict discovery, schema validation, bundling via
//!   the external bundler, versioned `dist/<name>/<version>/` output
//! - `blocksmith package` - manifest-only discovery, one zip artifact per
//!   resource
//! - `blocksmith migrate` - one-way upgrade from the legacy
//!   manifest-embedded configuration to a generated configuration source
//!
//! Because all three consume the same [`scanner`], discovery semantics
//! cannot drift between commands; the differences are declarative
//! [`scanner::ScanOptions`].
//!
//! # Core Modules
//!
//! - [`schema`] - the schema type model, validator, legacy transform, and
//!   configuration source generator
//! - [`scanner`] - resource discovery over the collection directories
//! - [`manifest`] - `package.json` parsing and rewriting
//! - [`cli`] - command implementations
//!
//! ## Collaborators
//!
//! - [`bundler`] - external bundler (esbuild) behind a trait
//! - [`archiver`] - zip artifact writing
//! - [`registry`] - registry HTTP client (field-type vocabulary, publishing)
//!
//! ## Supporting Modules
//!
//! - [`config`] - global configuration (`~/.blocksmith/config.toml`)
//! - [`core`] - error types and the resource model
//! - [`utils`] - filesystem and progress helpers
//!
//! # Example Workspace
//!
//! ```text
//! my-project/
//! ├── blocks/
//! │   └── hero-banner/
//! │       ├── package.json        # name + semantic version
//! │       ├── block.config.ts     # content schema declaration
//! │       ├── preview.json        # optional preview data
//! │       └── src/index.ts        # bundler entry point
//! └── templates/
//!     └── landing-page/
//!         ├── package.json
//!         ├── template.config.ts
//!         └── src/index.ts
//! ```
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Scaffold, validate, and build
//! blocksmith new block hero-banner
//! blocksmith list
//! blocksmith build
//!
//! # Produce distributable archives
//! blocksmith package hero-banner
//!
//! # Upgrade legacy resources
//! blocksmith migrate --dry-run
//! blocksmith migrate
//! ```

pub mod archiver;
pub mod bundler;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod manifest;
pub mod registry;
pub mod scanner;
pub mod schema;
pub mod utils;
