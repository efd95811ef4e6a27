//! Deriving legacy-shaped manifest metadata from a current schema.
//!
//! The build workflow writes a namespaced metadata section into each `dist`
//! manifest for consumers that still expect the old flat shape. This is the
//! current-to-legacy direction, and it is NOT the inverse of
//! [`convert_legacy_schema`](crate::schema::legacy::convert_legacy_schema):
//! type strings are emitted unchanged (no reverse canonicalization), so a
//! schema that originated from a legacy alias keeps its canonical name.
//!
//! Migration never uses this direction; it exists only to re-derive manifest
//! metadata.

use crate::schema::legacy::{LegacyField, LegacyItemSchema, LegacyMetadata};
use crate::schema::model::{FieldKind, Schema};
use serde_json::{Map, Value};

/// Flatten a current schema into ordered legacy field descriptors.
///
/// Repeater fields wrap their recursively-flattened nested fields in an
/// `itemSchema`, carrying `minItems`/`maxItems` along.
#[must_use]
pub fn convert_schema_to_legacy(schema: &Schema) -> Vec<LegacyField> {
    schema
        .iter()
        .map(|(key, field)| {
            let mut legacy = LegacyField {
                key: key.to_string(),
                field_type: field.type_name().to_string(),
                label: field.label.clone(),
                required: field.required,
                placeholder: field.placeholder.clone(),
                help_text: field.help_text.clone(),
                options: None,
                item_schema: None,
            };
            match &field.kind {
                FieldKind::Scalar { .. } => {}
                FieldKind::Select { options } => legacy.options = options.clone(),
                FieldKind::Repeater { schema: nested, min_items, max_items } => {
                    legacy.item_schema = Some(LegacyItemSchema {
                        fields: nested.as_ref().map(convert_schema_to_legacy).unwrap_or_default(),
                        min_items: *min_items,
                        max_items: *max_items,
                    });
                }
            }
            legacy
        })
        .collect()
}

/// Extract the default-content map from a schema.
///
/// Exactly one entry per top-level field that either declares a
/// `defaultValue` or is a repeater (which defaults to an empty sequence);
/// fields of other types with no default are absent from the result.
#[must_use]
pub fn extract_default_content(schema: &Schema) -> Map<String, Value> {
    let mut defaults = Map::new();
    for (key, field) in schema.iter() {
        if let Some(value) = &field.default_value {
            defaults.insert(key.to_string(), value.clone());
        } else if field.is_repeater() {
            defaults.insert(key.to_string(), Value::Array(Vec::new()));
        }
    }
    defaults
}

/// Assemble the namespaced manifest metadata section for a schema.
#[must_use]
pub fn generate_manifest_metadata(schema: &Schema) -> LegacyMetadata {
    LegacyMetadata {
        schema_fields: convert_schema_to_legacy(schema),
        default_content: extract_default_content(schema),
    }
}
