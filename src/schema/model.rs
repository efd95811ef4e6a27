//! The content schema data model.
//!
//! A resource's content contract is a [`Schema`]: an ordered mapping from
//! field key to [`FieldConfig`]. Repeater fields nest another [`Schema`], so
//! the structure is an explicit recursive tree. Declaration order is
//! significant - validation errors, legacy conversion, and generated
//! configuration source all follow it - so [`Schema`] preserves insertion
//! order rather than sorting keys.
//!
//! [`FieldConfig`] is a closed sum type discriminated by the `type` string:
//! `select` and `repeater` carry kind-specific payloads, and every other
//! vocabulary member (plus any unknown type string) is a [`FieldKind::Scalar`].
//! Unknown types must survive parsing so the validator can report them with
//! their location instead of failing the whole document.
//!
//! # Examples
//!
//! ```rust
//! use blocksmith_cli::schema::{FieldConfig, Schema};
//!
//! let mut schema = Schema::new();
//! schema.insert("title", FieldConfig::scalar("singleLine", "Title").with_required(true));
//! schema.insert("cta", FieldConfig::select("Call to action", vec!["Buy".into(), "Try".into()]));
//!
//! let json = serde_json::to_string(&schema).unwrap();
//! let parsed: Schema = serde_json::from_str(&json).unwrap();
//! assert_eq!(parsed.len(), 2);
//! assert!(parsed.get("title").unwrap().required);
//! ```

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;

/// Canonical type name for single-line text fields.
pub const TYPE_SINGLE_LINE: &str = "singleLine";
/// Canonical type name for multi-line text fields.
pub const TYPE_MULTI_LINE: &str = "multiLine";
/// Canonical type name for rich-text fields.
pub const TYPE_RICH_TEXT: &str = "richText";
/// Canonical type name for numeric fields.
pub const TYPE_NUMBER: &str = "number";
/// Canonical type name for boolean toggle fields.
pub const TYPE_TOGGLE: &str = "toggle";
/// Canonical type name for selectable-option fields.
pub const TYPE_SELECT: &str = "select";
/// Canonical type name for image fields.
pub const TYPE_IMAGE: &str = "image";
/// Canonical type name for link fields.
pub const TYPE_LINK: &str = "link";
/// Canonical type name for color fields.
pub const TYPE_COLOR: &str = "color";
/// Canonical type name for date fields.
pub const TYPE_DATE: &str = "date";
/// Canonical type name for repeating nested-group fields.
pub const TYPE_REPEATER: &str = "repeater";

/// One entry of a [`Schema`]: a field key and its configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaEntry {
    /// Field key, unique within its schema.
    pub key: String,
    /// The field's configuration.
    pub field: FieldConfig,
}

/// An ordered mapping from field key to [`FieldConfig`].
///
/// Serializes as a JSON object; deserialization preserves declaration order
/// and rejects duplicate keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    entries: Vec<SchemaEntry>,
}

impl Schema {
    /// Create an empty schema.
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Number of fields at this level (nested repeater fields not counted).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when this level declares no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a field by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldConfig> {
        self.entries.iter().find(|e| e.key == key).map(|e| &e.field)
    }

    /// Look up a field by key, mutably.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut FieldConfig> {
        self.entries.iter_mut().find(|e| e.key == key).map(|e| &mut e.field)
    }

    /// Insert a field, replacing any existing field with the same key while
    /// keeping the original position.
    pub fn insert(&mut self, key: impl Into<String>, field: FieldConfig) {
        let key = key.into();
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(existing) => existing.field = field,
            None => self.entries.push(SchemaEntry { key, field }),
        }
    }

    /// Iterate over `(key, field)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldConfig)> {
        self.entries.iter().map(|e| (e.key.as_str(), &e.field))
    }

    /// Field keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.key, &entry.field)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SchemaVisitor;

        impl<'de> Visitor<'de> for SchemaVisitor {
            type Value = Schema;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field keys to field configurations")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Schema, A::Error> {
                let mut schema = Schema::new();
                while let Some((key, field)) = access.next_entry::<String, FieldConfig>()? {
                    if schema.get(&key).is_some() {
                        return Err(de::Error::custom(format!("duplicate field key `{key}`")));
                    }
                    schema.entries.push(SchemaEntry { key, field });
                }
                Ok(schema)
            }
        }

        deserializer.deserialize_map(SchemaVisitor)
    }
}

/// Kind-specific payload of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Any field type without a structural payload (`singleLine`, `number`,
    /// `image`, ... and unknown type strings, preserved for validation).
    Scalar {
        /// The declared type string.
        field_type: String,
    },
    /// A `select` field offering an ordered list of values.
    Select {
        /// Selectable values; must be present and non-empty to validate.
        options: Option<Vec<String>>,
    },
    /// A `repeater` field holding a bounded list of nested items.
    Repeater {
        /// Nested item schema; must be present and non-empty to validate.
        schema: Option<Schema>,
        /// Minimum number of items, when bounded below.
        min_items: Option<i64>,
        /// Maximum number of items, when bounded above.
        max_items: Option<i64>,
    },
}

/// Configuration of one content field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    /// Kind-specific payload (also determines the `type` string).
    pub kind: FieldKind,
    /// Human-readable label shown in the editor.
    pub label: String,
    /// Whether content for this field is mandatory.
    pub required: bool,
    /// Editor placeholder text.
    pub placeholder: Option<String>,
    /// Editor help text.
    pub help_text: Option<String>,
    /// Default content value. A required field with a default is a
    /// contradictory declaration; the validator warns about it.
    pub default_value: Option<Value>,
}

impl FieldConfig {
    /// Create a scalar field of the given type.
    #[must_use]
    pub fn scalar(field_type: impl Into<String>, label: impl Into<String>) -> Self {
        Self::with_kind(FieldKind::Scalar { field_type: field_type.into() }, label)
    }

    /// Create a `select` field with its options.
    #[must_use]
    pub fn select(label: impl Into<String>, options: Vec<String>) -> Self {
        Self::with_kind(FieldKind::Select { options: Some(options) }, label)
    }

    /// Create a `repeater` field with its nested schema.
    #[must_use]
    pub fn repeater(label: impl Into<String>, schema: Schema) -> Self {
        Self::with_kind(
            FieldKind::Repeater { schema: Some(schema), min_items: None, max_items: None },
            label,
        )
    }

    fn with_kind(kind: FieldKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            required: false,
            placeholder: None,
            help_text: None,
            default_value: None,
        }
    }

    /// Set the required flag.
    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Set the placeholder text.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Set the help text.
    #[must_use]
    pub fn with_help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = Some(help_text.into());
        self
    }

    /// Set the default value.
    #[must_use]
    pub fn with_default(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    /// The field's `type` discriminant string.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match &self.kind {
            FieldKind::Scalar { field_type } => field_type,
            FieldKind::Select { .. } => TYPE_SELECT,
            FieldKind::Repeater { .. } => TYPE_REPEATER,
        }
    }

    /// True for `repeater` fields.
    #[must_use]
    pub const fn is_repeater(&self) -> bool {
        matches!(self.kind, FieldKind::Repeater { .. })
    }
}

/// Flat serde representation of a field; `type` selects the [`FieldKind`].
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawField {
    #[serde(rename = "type")]
    field_type: String,
    #[serde(default)]
    label: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    help_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    schema: Option<Schema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min_items: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_items: Option<i64>,
}

impl From<RawField> for FieldConfig {
    fn from(raw: RawField) -> Self {
        let kind = if raw.field_type == TYPE_SELECT {
            FieldKind::Select { options: raw.options }
        } else if raw.field_type == TYPE_REPEATER {
            FieldKind::Repeater {
                schema: raw.schema,
                min_items: raw.min_items,
                max_items: raw.max_items,
            }
        } else {
            FieldKind::Scalar { field_type: raw.field_type }
        };
        Self {
            kind,
            label: raw.label,
            required: raw.required,
            placeholder: raw.placeholder,
            help_text: raw.help_text,
            default_value: raw.default_value,
        }
    }
}

impl From<&FieldConfig> for RawField {
    fn from(field: &FieldConfig) -> Self {
        let (options, schema, min_items, max_items) = match &field.kind {
            FieldKind::Scalar { .. } => (None, None, None, None),
            FieldKind::Select { options } => (options.clone(), None, None, None),
            FieldKind::Repeater { schema, min_items, max_items } => {
                (None, schema.clone(), *min_items, *max_items)
            }
        };
        Self {
            field_type: field.type_name().to_string(),
            label: field.label.clone(),
            required: field.required,
            placeholder: field.placeholder.clone(),
            help_text: field.help_text.clone(),
            default_value: field.default_value.clone(),
            options,
            schema,
            min_items,
            max_items,
        }
    }
}

impl Serialize for FieldConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RawField::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FieldConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawField::deserialize(deserializer).map(Into::into)
    }
}

/// Licensing descriptor for a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    /// Licensing model; defaults to the free tier.
    #[serde(default)]
    pub model: PricingModel,
    /// Price in `currency` units, for paid models.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// ISO currency code, for paid models.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl Pricing {
    /// True for the default free/unlicensed tier.
    #[must_use]
    pub fn is_free(&self) -> bool {
        self.model == PricingModel::Free
    }
}

/// Licensing models a resource can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum PricingModel {
    /// Free/unlicensed (the default).
    #[default]
    Free,
    /// Single up-front purchase.
    OneTime,
    /// Recurring subscription.
    Subscription,
}

impl PricingModel {
    /// The wire name of this model.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::OneTime => "oneTime",
            Self::Subscription => "subscription",
        }
    }
}

/// The declared content contract for a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ResourceConfig {
    /// Display name shown in the editor and catalogs.
    #[serde(default)]
    pub name: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Extended description, when the short one is not enough.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    /// Catalog category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Free-form tags.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
    /// Licensing descriptor.
    #[serde(default, skip_serializing_if = "Pricing::is_free")]
    pub pricing: Pricing,
    /// The content schema.
    #[serde(default)]
    pub schema: Schema,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn schema_preserves_declaration_order() {
        let json = r#"{
            "zeta": {"type": "singleLine", "label": "Z"},
            "alpha": {"type": "singleLine", "label": "A"}
        }"#;
        let schema: Schema = serde_json::from_str(json).unwrap();
        let keys: Vec<&str> = schema.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn schema_rejects_duplicate_keys() {
        let json = r#"{
            "title": {"type": "singleLine", "label": "A"},
            "title": {"type": "multiLine", "label": "B"}
        }"#;
        let err = serde_json::from_str::<Schema>(json).unwrap_err();
        assert!(err.to_string().contains("duplicate field key `title`"));
    }

    #[test]
    fn select_and_repeater_round_trip() {
        let json = json!({
            "cta": {"type": "select", "label": "CTA", "options": ["Buy", "Try"]},
            "items": {
                "type": "repeater",
                "label": "Items",
                "minItems": 1,
                "maxItems": 4,
                "schema": {
                    "title": {"type": "singleLine", "label": "Title", "required": true}
                }
            }
        });
        let schema: Schema = serde_json::from_value(json.clone()).unwrap();

        match &schema.get("cta").unwrap().kind {
            FieldKind::Select { options } => {
                assert_eq!(options.as_deref(), Some(&["Buy".to_string(), "Try".to_string()][..]));
            }
            other => panic!("expected select, got {other:?}"),
        }
        match &schema.get("items").unwrap().kind {
            FieldKind::Repeater { schema: nested, min_items, max_items } => {
                assert_eq!(*min_items, Some(1));
                assert_eq!(*max_items, Some(4));
                assert!(nested.as_ref().unwrap().get("title").unwrap().required);
            }
            other => panic!("expected repeater, got {other:?}"),
        }

        let round_tripped = serde_json::to_value(&schema).unwrap();
        assert_eq!(round_tripped, json);
    }

    #[test]
    fn unknown_type_parses_as_scalar() {
        let json = json!({"legacy": {"type": "wysiwyg", "label": "Body"}});
        let schema: Schema = serde_json::from_value(json).unwrap();
        assert_eq!(schema.get("legacy").unwrap().type_name(), "wysiwyg");
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut schema = Schema::new();
        schema.insert("a", FieldConfig::scalar(TYPE_SINGLE_LINE, "A"));
        schema.insert("b", FieldConfig::scalar(TYPE_SINGLE_LINE, "B"));
        schema.insert("a", FieldConfig::scalar(TYPE_MULTI_LINE, "A2"));
        let keys: Vec<&str> = schema.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(schema.get("a").unwrap().type_name(), TYPE_MULTI_LINE);
    }

    #[test]
    fn pricing_defaults_to_free() {
        let config: ResourceConfig = serde_json::from_str(r#"{"name": "Hero"}"#).unwrap();
        assert!(config.pricing.is_free());
        assert!(config.schema.is_empty());
    }

    #[test]
    fn resource_config_camel_case() {
        let config: ResourceConfig = serde_json::from_value(json!({
            "name": "Hero",
            "description": "A hero",
            "longDescription": "A longer hero",
            "category": "marketing",
            "tags": ["hero", "landing"],
            "pricing": {"model": "oneTime", "price": 19.0, "currency": "USD"},
            "schema": {}
        }))
        .unwrap();
        assert_eq!(config.long_description.as_deref(), Some("A longer hero"));
        assert_eq!(config.pricing.model, PricingModel::OneTime);
        assert!(config.tags.contains("landing"));
    }
}
