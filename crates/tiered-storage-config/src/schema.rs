// crates/tiered-storage-config/src/schema.rs
// ============================================================================
// Module: Schema and Validator
// Description: Ordered key specifications scoped to one backend namespace.
// Purpose: Validate raw maps once, fail fast, and emit typed values.
// Dependencies: tracing
// ============================================================================

//! ## Overview
//! A [`Schema`] is data: an ordered list of [`KeySpec`]s plus an optional
//! namespace prefix. Every backend contributes only its schema; the single
//! [`Schema::validate`] pass is shared by all of them.
//!
//! Validation walks keys in declaration order and aborts on the first error,
//! so no partially valid value set ever escapes. Keys under the namespace that
//! the schema does not declare are ignored and reported through
//! [`ValidatedConfig::unknown_keys`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::ConfigError;
use crate::error::SchemaError;
use crate::key::ConfigValue;
use crate::key::KeyDefault;
use crate::key::KeySpec;
use crate::key::ValueType;
use crate::raw::RawConfig;
use crate::raw::RawValue;
use crate::registry::TypeRegistry;
use crate::values::ValidatedConfig;

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Ordered key specifications for one backend kind.
///
/// # Invariants
/// - Qualified key names are unique.
/// - Every declared default passes its own key's conversion rules and check.
#[derive(Debug, Clone)]
pub struct Schema {
    /// Namespace prefix without the trailing dot.
    prefix: Option<String>,
    /// Key specifications in declaration order.
    keys: Vec<KeySpec>,
}

impl Schema {
    /// Starts a schema under `prefix` (or at the root when `None`).
    #[must_use]
    pub fn builder(prefix: Option<&str>) -> SchemaBuilder {
        SchemaBuilder {
            prefix: prefix.map(str::to_string),
            keys: Vec::new(),
        }
    }

    /// Returns the namespace prefix.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Returns key specifications in declaration order.
    #[must_use]
    pub fn keys(&self) -> &[KeySpec] {
        &self.keys
    }

    /// Returns the fully qualified form of a relative key name.
    #[must_use]
    pub fn qualify(&self, name: &str) -> String {
        qualify(self.prefix.as_deref(), name)
    }

    /// Validates `raw` against this schema.
    ///
    /// Type-name keys are looked up in `registry` during the same pass, so an
    /// unknown type is reported in key order like any other invalid value.
    /// Keys declaring a capability also run the capability and constructor
    /// checks here.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] encountered in declaration order.
    pub fn validate(
        &self,
        raw: &RawConfig,
        registry: &TypeRegistry,
    ) -> Result<ValidatedConfig, ConfigError> {
        let mut values = Vec::with_capacity(self.keys.len());
        for spec in &self.keys {
            let key = self.qualify(spec.name());
            let value = match raw.lookup(&key) {
                RawValue::Present(text) => spec.parse(&key, Some(text))?,
                RawValue::Null => spec.parse(&key, None)?,
                RawValue::Absent => match spec.default_behavior() {
                    KeyDefault::Required => return Err(ConfigError::missing(key)),
                    KeyDefault::Unset => ConfigValue::Null,
                    KeyDefault::Value(value) => value.clone(),
                },
            };
            if let ConfigValue::TypeName(name) = &value {
                match spec.capability() {
                    Some(requirement) => requirement.ensure(registry, &key, name)?,
                    None if !registry.contains(name) => {
                        return Err(ConfigError::TypeNotFound {
                            key,
                            name: name.clone(),
                        });
                    }
                    None => {}
                }
            }
            values.push((spec.name().to_string(), value));
        }

        let declared: BTreeSet<String> =
            self.keys.iter().map(|spec| self.qualify(spec.name())).collect();
        let unknown: Vec<String> = raw
            .keys()
            .filter(|key| self.in_namespace(key) && !declared.contains(*key))
            .map(str::to_string)
            .collect();
        for key in &unknown {
            debug!(key = key.as_str(), "ignoring undeclared configuration key");
        }
        debug!(
            prefix = self.prefix.as_deref().unwrap_or(""),
            keys = values.len(),
            unknown = unknown.len(),
            "validated configuration"
        );
        Ok(ValidatedConfig::new(self.prefix.clone(), values, unknown))
    }

    /// Returns true when `key` belongs to this schema's namespace.
    fn in_namespace(&self, key: &str) -> bool {
        self.prefix.as_deref().is_none_or(|prefix| {
            key.strip_prefix(prefix).is_some_and(|rest| rest.starts_with('.'))
        })
    }
}

// ============================================================================
// SECTION: Schema Builder
// ============================================================================

/// Builder that checks key uniqueness and default validity.
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    /// Namespace prefix without the trailing dot.
    prefix: Option<String>,
    /// Key specifications in declaration order.
    keys: Vec<KeySpec>,
}

impl SchemaBuilder {
    /// Appends a key specification.
    #[must_use]
    pub fn define(mut self, spec: KeySpec) -> Self {
        self.keys.push(spec);
        self
    }

    /// Freezes the schema.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] on duplicate keys or invalid defaults.
    pub fn build(self) -> Result<Schema, SchemaError> {
        let mut seen = BTreeSet::new();
        for spec in &self.keys {
            let key = qualify(self.prefix.as_deref(), spec.name());
            if !seen.insert(key.clone()) {
                return Err(SchemaError::DuplicateKey(key));
            }
            if spec.capability().is_some() && spec.value_type() != ValueType::TypeName {
                return Err(SchemaError::MisplacedCapability(key));
            }
            if let KeyDefault::Value(value) = spec.default_behavior() {
                if !value_matches_type(value, spec.value_type()) {
                    return Err(SchemaError::InvalidDefault {
                        key,
                        reason: format!("default is not of type {}", spec.value_type()),
                    });
                }
                spec.ensure_valid(&key, value).map_err(|err| SchemaError::InvalidDefault {
                    key: key.clone(),
                    reason: err.to_string(),
                })?;
            }
        }
        Ok(Schema {
            prefix: self.prefix,
            keys: self.keys,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Joins a prefix and relative key name with a dot.
fn qualify(prefix: Option<&str>, name: &str) -> String {
    prefix.map_or_else(|| name.to_string(), |prefix| format!("{prefix}.{name}"))
}

/// Returns true when a default value has the variant its key type produces.
const fn value_matches_type(value: &ConfigValue, value_type: ValueType) -> bool {
    matches!(
        (value, value_type),
        (ConfigValue::String(_), ValueType::String)
            | (ConfigValue::Password(_), ValueType::Password)
            | (ConfigValue::Int(_), ValueType::Int)
            | (ConfigValue::Long(_), ValueType::Long)
            | (ConfigValue::Boolean(_), ValueType::Boolean)
            | (ConfigValue::Path(_), ValueType::Path)
            | (ConfigValue::TypeName(_), ValueType::TypeName)
    )
}
