//! The legacy configuration format and its upgrade path.
//!
//! Before configuration moved into a typed source file per resource, the
//! schema lived inside the manifest's namespaced `"blocksmith"` section as an
//! ordered flat field list (`schemaFields`) plus a separate `defaultContent`
//! map. This module models that representation and converts it to the
//! current nested [`Schema`].
//!
//! Conversion is a one-way upgrade. Legacy type names are canonicalized
//! through a fixed alias table; the relationship is many-legacy-names-to-one
//! current name, so the original alias is not recoverable after conversion
//! (both `text` and `string` become `singleLine`).

use crate::schema::model::{
    FieldConfig, FieldKind, Schema, TYPE_IMAGE, TYPE_LINK, TYPE_MULTI_LINE, TYPE_NUMBER,
    TYPE_REPEATER, TYPE_RICH_TEXT, TYPE_SELECT, TYPE_SINGLE_LINE, TYPE_TOGGLE,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Fixed mapping from legacy type names to current ones.
///
/// Unknown names pass through unchanged so the validator can report them
/// in context instead of the conversion guessing.
pub const LEGACY_TYPE_ALIASES: &[(&str, &str)] = &[
    ("text", TYPE_SINGLE_LINE),
    ("string", TYPE_SINGLE_LINE),
    ("textarea", TYPE_MULTI_LINE),
    ("wysiwyg", TYPE_RICH_TEXT),
    ("html", TYPE_RICH_TEXT),
    ("dropdown", TYPE_SELECT),
    ("choice", TYPE_SELECT),
    ("list", TYPE_REPEATER),
    ("group", TYPE_REPEATER),
    ("boolean", TYPE_TOGGLE),
    ("checkbox", TYPE_TOGGLE),
    ("integer", TYPE_NUMBER),
    ("int", TYPE_NUMBER),
    ("float", TYPE_NUMBER),
    ("picture", TYPE_IMAGE),
    ("media", TYPE_IMAGE),
    ("url", TYPE_LINK),
    ("href", TYPE_LINK),
];

/// Canonicalize a legacy type name; unknown names pass through unchanged.
#[must_use]
pub fn canonical_type(name: &str) -> &str {
    LEGACY_TYPE_ALIASES
        .iter()
        .find(|(legacy, _)| *legacy == name)
        .map_or(name, |(_, current)| current)
}

/// One flat field descriptor of the legacy format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyField {
    /// Field key.
    pub key: String,
    /// Legacy (or current) type name.
    #[serde(rename = "type")]
    pub field_type: String,
    /// Human-readable label.
    #[serde(default)]
    pub label: String,
    /// Whether content is mandatory.
    #[serde(default)]
    pub required: bool,
    /// Editor placeholder text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Editor help text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    /// Selectable values, for select-typed fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// Nested item schema, for repeater-typed fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_schema: Option<LegacyItemSchema>,
}

/// Nested item schema of a legacy repeater field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LegacyItemSchema {
    /// Nested flat field descriptors.
    #[serde(default)]
    pub fields: Vec<LegacyField>,
    /// Minimum item count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<i64>,
    /// Maximum item count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<i64>,
}

/// The whole legacy section carried in a resource manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LegacyMetadata {
    /// Ordered flat field list.
    #[serde(default)]
    pub schema_fields: Vec<LegacyField>,
    /// Default content values, keyed by top-level field key.
    #[serde(default)]
    pub default_content: Map<String, Value>,
}

impl LegacyMetadata {
    /// True when the section declares neither fields nor defaults.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schema_fields.is_empty() && self.default_content.is_empty()
    }
}

/// Convert a legacy schema declaration to the current nested representation.
///
/// Structural conversion first: each flat field becomes a [`FieldConfig`]
/// with its type canonicalized, `label`/`required`/`placeholder`/`helpText`
/// copied verbatim, options copied for selects, and `itemSchema.fields`
/// recursively converted for repeaters (an absent `itemSchema` yields an
/// empty nested schema, which validation will flag for hand-editing).
///
/// Then `defaultContent` is merged: an entry whose key matches a converted
/// field becomes that field's `defaultValue` - unless the field is required,
/// in which case the default could never be observed and is dropped with a
/// diagnostic. Keys with no matching field are silently dropped.
#[must_use]
pub fn convert_legacy_schema(metadata: &LegacyMetadata) -> Schema {
    let mut schema = convert_fields(&metadata.schema_fields);

    for (key, value) in &metadata.default_content {
        match schema.get_mut(key) {
            Some(field) if field.required => {
                warn!(
                    "dropping defaultContent for required field `{key}`; \
                     a required field's default can never be observed"
                );
            }
            Some(field) => field.default_value = Some(value.clone()),
            None => debug!("defaultContent key `{key}` matches no schema field; dropped"),
        }
    }

    schema
}

fn convert_fields(fields: &[LegacyField]) -> Schema {
    let mut schema = Schema::new();
    for legacy in fields {
        let canonical = canonical_type(&legacy.field_type);
        let kind = match canonical {
            TYPE_SELECT => FieldKind::Select { options: legacy.options.clone() },
            TYPE_REPEATER => {
                let (nested, min_items, max_items) = match &legacy.item_schema {
                    Some(item) => (convert_fields(&item.fields), item.min_items, item.max_items),
                    None => (Schema::new(), None, None),
                };
                FieldKind::Repeater { schema: Some(nested), min_items, max_items }
            }
            other => FieldKind::Scalar { field_type: other.to_string() },
        };
        schema.insert(
            legacy.key.clone(),
            FieldConfig {
                kind,
                label: legacy.label.clone(),
                required: legacy.required,
                placeholder: legacy.placeholder.clone(),
                help_text: legacy.help_text.clone(),
                default_value: None,
            },
        );
    }
    schema
}
