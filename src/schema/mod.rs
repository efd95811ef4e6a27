//! Content schemas: the type model, validation, legacy conversion, and
//! configuration source generation.
//!
//! A resource declares its content contract as a [`Schema`] - an ordered,
//! recursive mapping of field keys to [`FieldConfig`] declarations. This
//! module is the heart of the CLI: the same model, validator, and transforms
//! back the build, package, and migrate workflows so discovery semantics
//! cannot drift between commands.
//!
//! # Submodules
//!
//! - [`model`] - the schema tree, field sum type, and resource configuration
//! - [`vocabulary`] - the externally-supplied field-type vocabulary
//! - [`validator`] - recursive validation with dotted error paths
//! - [`legacy`] - the superseded manifest-embedded format and its upgrade
//! - [`transform`] - deriving legacy-shaped manifest metadata from a schema
//! - [`codegen`] - rendering configuration source files

pub mod codegen;
pub mod legacy;
pub mod model;
pub mod transform;
pub mod validator;
pub mod vocabulary;

pub use codegen::generate_config_source;
pub use legacy::{LegacyField, LegacyItemSchema, LegacyMetadata, canonical_type, convert_legacy_schema};
pub use model::{FieldConfig, FieldKind, Pricing, PricingModel, ResourceConfig, Schema};
pub use transform::{convert_schema_to_legacy, extract_default_content, generate_manifest_metadata};
pub use validator::{SchemaValidator, ValidationReport};
pub use vocabulary::FieldTypeVocabulary;
