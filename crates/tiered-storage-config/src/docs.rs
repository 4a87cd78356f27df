// crates/tiered-storage-config/src/docs.rs
// ============================================================================
// Module: Schema Artifacts
// Description: JSON Schema and Markdown reference generated from a Schema.
// Purpose: Keep operator docs in sync with the declared keys and defaults.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Artifacts are derived from the same [`Schema`] value the validator uses, so
//! documented defaults and valid values cannot drift from enforced ones.
//! Output is deterministic: keys appear in declaration order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write;

use serde_json::Map;
use serde_json::Value;
use serde_json::json;

use crate::key::Check;
use crate::key::ConfigValue;
use crate::key::KeyDefault;
use crate::key::KeySpec;
use crate::key::ValueType;
use crate::schema::Schema;

// ============================================================================
// SECTION: Public API
// ============================================================================

impl Schema {
    /// Returns a draft 2020-12 JSON Schema describing the flat key map.
    ///
    /// `additionalProperties` stays open because undeclared keys are ignored.
    #[must_use]
    pub fn json_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for spec in self.keys() {
            let key = self.qualify(spec.name());
            if matches!(spec.default_behavior(), KeyDefault::Required) {
                required.push(Value::String(key.clone()));
            }
            properties.insert(key, key_schema(spec));
        }
        json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "title": self.prefix().unwrap_or("root"),
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": true
        })
    }

    /// Returns a Markdown table documenting every key.
    #[must_use]
    pub fn docs_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("| Key | Type | Default | Valid Values | Importance | Description |\n");
        out.push_str("|-----|------|---------|--------------|------------|-------------|\n");
        for spec in self.keys() {
            let valid = spec
                .check_rule()
                .map(Check::describe)
                .or_else(|| {
                    spec.capability().map(|required| format!("implements {}", required.name()))
                })
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "| `{}` | {} | {} | {} | {} | {} |",
                self.qualify(spec.name()),
                spec.value_type().as_str().to_lowercase(),
                render_default(spec.default_behavior()),
                valid,
                spec.importance_level().as_str(),
                spec.documentation()
            );
        }
        out
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds the property schema for a single key.
fn key_schema(spec: &KeySpec) -> Value {
    let mut schema = Map::new();
    let type_label = if spec.is_nullable() {
        json!(["string", "null"])
    } else {
        json!("string")
    };
    schema.insert("type".to_string(), type_label);
    match spec.value_type() {
        ValueType::Int | ValueType::Long => {
            schema.insert("pattern".to_string(), json!("^\\s*[+-]?[0-9]+\\s*$"));
        }
        ValueType::Boolean => {
            schema.insert("pattern".to_string(), json!("^\\s*([Tt][Rr][Uu][Ee]|[Ff][Aa][Ll][Ss][Ee])\\s*$"));
        }
        ValueType::Password => {
            schema.insert("writeOnly".to_string(), json!(true));
        }
        ValueType::String | ValueType::Path | ValueType::TypeName => {}
    }
    if let Some(Check::OneOf(choices)) = spec.check_rule() {
        schema.insert("enum".to_string(), json!(choices));
    }
    if let KeyDefault::Value(value) = spec.default_behavior() {
        schema.insert("default".to_string(), Value::String(value.render()));
    }
    if !spec.documentation().is_empty() {
        schema.insert("description".to_string(), json!(spec.documentation()));
    }
    Value::Object(schema)
}

/// Renders a default for the docs table.
fn render_default(default: &KeyDefault) -> String {
    match default {
        KeyDefault::Required => String::new(),
        KeyDefault::Unset => ConfigValue::Null.render(),
        KeyDefault::Value(value) => value.render(),
    }
}
