//! Schema validation.
//!
//! Validates a [`Schema`] (and, recursively, every nested repeater schema)
//! against the field-type vocabulary and the type-specific structural rules.
//! Validation accumulates every problem it finds - it never stops at the
//! first error - and each message carries a dotted path from the schema root
//! (`parent.child`) so every error is locatable without ambiguity.
//!
//! The required-plus-default contradiction (a `required` field declaring a
//! `defaultValue` that can never be observed) is reported on the warning
//! side channel and does not affect validity.
//!
//! # Examples
//!
//! ```rust
//! use blocksmith_cli::schema::{FieldTypeVocabulary, Schema, SchemaValidator};
//!
//! let vocabulary = FieldTypeVocabulary::builtin();
//! let validator = SchemaValidator::new(&vocabulary);
//!
//! let schema: Schema = serde_json::from_str(r#"{
//!     "title": {"type": "singleLine", "label": "Title"},
//!     "cta": {"type": "select", "label": "CTA", "options": []}
//! }"#).unwrap();
//!
//! let report = validator.validate(&schema);
//! assert!(!report.is_valid());
//! assert!(report.errors[0].contains("cta"));
//! ```

use crate::schema::model::{FieldKind, Schema};
use crate::schema::vocabulary::FieldTypeVocabulary;

/// Outcome of validating one schema.
///
/// `errors` determine validity; `warnings` are advisory diagnostics surfaced
/// separately by callers (log output), never through the error list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Accumulated errors, in depth-first traversal order.
    pub errors: Vec<String>,
    /// Accumulated advisory warnings, same ordering.
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// A schema is valid exactly when no errors were accumulated.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validates schemas against an injected field-type vocabulary.
pub struct SchemaValidator<'a> {
    vocabulary: &'a FieldTypeVocabulary,
}

impl<'a> SchemaValidator<'a> {
    /// Create a validator over the given vocabulary.
    #[must_use]
    pub const fn new(vocabulary: &'a FieldTypeVocabulary) -> Self {
        Self { vocabulary }
    }

    /// Validate `schema` and every nested repeater schema.
    #[must_use]
    pub fn validate(&self, schema: &Schema) -> ValidationReport {
        let mut report = ValidationReport::default();
        self.walk(schema, "", &mut report);
        report
    }

    fn walk(&self, schema: &Schema, prefix: &str, report: &mut ValidationReport) {
        for (key, field) in schema.iter() {
            let path = if prefix.is_empty() {
                key.to_string()
            } else {
                format!("{prefix}.{key}")
            };

            let type_name = field.type_name();
            if !self.vocabulary.contains(type_name) {
                report.errors.push(format!(
                    "field `{path}` has unknown type `{type_name}` (valid types: {})",
                    self.vocabulary.names().join(", ")
                ));
            }

            match &field.kind {
                FieldKind::Scalar { .. } => {}
                FieldKind::Select { options } => {
                    if options.as_ref().is_none_or(Vec::is_empty) {
                        report.errors.push(format!(
                            "select field `{path}` must declare at least one option"
                        ));
                    }
                }
                FieldKind::Repeater { schema: nested, min_items, max_items } => {
                    match nested {
                        Some(nested) if !nested.is_empty() => self.walk(nested, &path, report),
                        _ => report.errors.push(format!(
                            "repeater field `{path}` must declare a non-empty nested schema"
                        )),
                    }
                    if let Some(min) = min_items {
                        if *min < 0 {
                            report.errors.push(format!(
                                "repeater field `{path}` has minItems {min}; must be >= 0"
                            ));
                        }
                    }
                    if let Some(max) = max_items {
                        if *max < 1 {
                            report.errors.push(format!(
                                "repeater field `{path}` has maxItems {max}; must be >= 1"
                            ));
                        }
                    }
                    if let (Some(min), Some(max)) = (min_items, max_items) {
                        if *min >= 0 && *max >= 1 && min > max {
                            report.errors.push(format!(
                                "repeater field `{path}` has minItems {min} exceeding maxItems {max}"
                            ));
                        }
                    }
                }
            }

            if field.required && field.default_value.is_some() {
                report.warnings.push(format!(
                    "field `{path}` is required but declares a defaultValue; the default can never be observed"
                ));
            }
        }
    }
}
