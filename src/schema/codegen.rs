//! Configuration source generation.
//!
//! Renders a [`ResourceConfig`] as the text of a configuration source file
//! in the canonical declaration style: a `defineBlock({...})` /
//! `defineTemplate({...})` call imported from the SDK. The output is meant
//! to be committed and hand-edited, so it favors readable two-space
//! indentation over compactness; nested repeater schemas indent recursively.
//!
//! This is code generation, not data serialization - the migrate workflow
//! and the `new` scaffolder both drive it.

use crate::constants::SDK_PACKAGE;
use crate::core::ResourceType;
use crate::schema::model::{FieldConfig, FieldKind, ResourceConfig, Schema};
use serde_json::Value;
use std::fmt::Write;

const INDENT: &str = "  ";

/// Render `config` as configuration source for a resource of `resource_type`.
#[must_use]
pub fn generate_config_source(resource_type: ResourceType, config: &ResourceConfig) -> String {
    let define = resource_type.define_fn();
    let mut out = String::new();

    let _ = writeln!(out, "import {{ {define} }} from \"{SDK_PACKAGE}\";");
    out.push('\n');
    let _ = writeln!(out, "export default {define}({{");
    let _ = writeln!(out, "{INDENT}name: {},", js_string(&config.name));
    if !config.description.is_empty() {
        let _ = writeln!(out, "{INDENT}description: {},", js_string(&config.description));
    }
    if let Some(long) = &config.long_description {
        let _ = writeln!(out, "{INDENT}longDescription: {},", js_string(long));
    }
    if let Some(category) = &config.category {
        let _ = writeln!(out, "{INDENT}category: {},", js_string(category));
    }
    if !config.tags.is_empty() {
        let tags: Vec<String> = config.tags.iter().map(|t| js_string(t)).collect();
        let _ = writeln!(out, "{INDENT}tags: [{}],", tags.join(", "));
    }
    if !config.pricing.is_free() {
        let mut parts = vec![format!("model: {}", js_string(config.pricing.model.as_str()))];
        if let Some(price) = config.pricing.price {
            parts.push(format!("price: {price}"));
        }
        if let Some(currency) = &config.pricing.currency {
            parts.push(format!("currency: {}", js_string(currency)));
        }
        let _ = writeln!(out, "{INDENT}pricing: {{ {} }},", parts.join(", "));
    }
    out.push_str(&render_schema(&config.schema, 1));
    out.push_str("});\n");
    out
}

fn render_schema(schema: &Schema, depth: usize) -> String {
    let pad = INDENT.repeat(depth);
    let mut out = String::new();
    if schema.is_empty() {
        let _ = writeln!(out, "{pad}schema: {{}},");
        return out;
    }
    let _ = writeln!(out, "{pad}schema: {{");
    for (key, field) in schema.iter() {
        out.push_str(&render_field(key, field, depth + 1));
    }
    let _ = writeln!(out, "{pad}}},");
    out
}

fn render_field(key: &str, field: &FieldConfig, depth: usize) -> String {
    let pad = INDENT.repeat(depth);
    let inner = INDENT.repeat(depth + 1);
    let mut out = String::new();

    let _ = writeln!(out, "{pad}{}: {{", object_key(key));
    let _ = writeln!(out, "{inner}type: {},", js_string(field.type_name()));
    let _ = writeln!(out, "{inner}label: {},", js_string(&field.label));
    if field.required {
        let _ = writeln!(out, "{inner}required: true,");
    }
    if let Some(placeholder) = &field.placeholder {
        let _ = writeln!(out, "{inner}placeholder: {},", js_string(placeholder));
    }
    if let Some(help) = &field.help_text {
        let _ = writeln!(out, "{inner}helpText: {},", js_string(help));
    }
    if let Some(default) = &field.default_value {
        let _ = writeln!(out, "{inner}defaultValue: {},", js_value(default));
    }
    match &field.kind {
        FieldKind::Scalar { .. } => {}
        FieldKind::Select { options } => {
            let rendered: Vec<String> =
                options.iter().flatten().map(|o| js_string(o)).collect();
            let _ = writeln!(out, "{inner}options: [{}],", rendered.join(", "));
        }
        FieldKind::Repeater { schema, min_items, max_items } => {
            if let Some(min) = min_items {
                let _ = writeln!(out, "{inner}minItems: {min},");
            }
            if let Some(max) = max_items {
                let _ = writeln!(out, "{inner}maxItems: {max},");
            }
            out.push_str(&render_schema(schema.as_ref().unwrap_or(&Schema::new()), depth + 1));
        }
    }
    let _ = writeln!(out, "{pad}}},");
    out
}

/// Quote and escape a string for embedding in generated source.
fn js_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Render an arbitrary JSON value as a source literal.
fn js_value(value: &Value) -> String {
    match value {
        Value::String(s) => js_string(s),
        other => serde_json::to_string(other).unwrap_or_else(|_| "null".to_string()),
    }
}

/// Render a schema key, quoting it when it is not a bare identifier.
fn object_key(key: &str) -> String {
    let mut chars = key.chars();
    let bare = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if bare { key.to_string() } else { js_string(key) }
}
