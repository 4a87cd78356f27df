// crates/tiered-storage-config/src/values.rs
// ============================================================================
// Module: Validated Values
// Description: Immutable typed value set produced by schema validation.
// Purpose: Give backends pure, non-revalidating reads over converted values.
// Dependencies: std
// ============================================================================

//! ## Overview
//! A [`ValidatedConfig`] is the only output of [`crate::Schema::validate`].
//! Getters are plain reads: they return `None` for null values and for keys
//! of a different type, and never re-run conversion.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;

use crate::error::ConfigError;
use crate::key::ConfigValue;
use crate::key::Password;
use crate::registry::Capability;
use crate::registry::TypeRegistry;

// ============================================================================
// SECTION: Validated Config
// ============================================================================

/// Typed values for every key declared by a schema.
///
/// # Invariants
/// - Holds exactly one value per declared key, in declaration order.
/// - Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedConfig {
    /// Namespace prefix of the producing schema.
    prefix: Option<String>,
    /// Relative key names paired with converted values.
    values: Vec<(String, ConfigValue)>,
    /// Undeclared keys found under the namespace.
    unknown: Vec<String>,
}

impl ValidatedConfig {
    /// Assembles a value set; only the validator calls this.
    pub(crate) fn new(
        prefix: Option<String>,
        values: Vec<(String, ConfigValue)>,
        unknown: Vec<String>,
    ) -> Self {
        Self {
            prefix,
            values,
            unknown,
        }
    }

    /// Returns the converted value for a relative key name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ConfigValue> {
        self.values.iter().find(|(key, _)| key == name).map(|(_, value)| value)
    }

    /// Returns a string value.
    #[must_use]
    pub fn string(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            ConfigValue::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns a secret value.
    #[must_use]
    pub fn password(&self, name: &str) -> Option<&Password> {
        match self.get(name)? {
            ConfigValue::Password(value) => Some(value),
            _ => None,
        }
    }

    /// Returns a 32-bit integer value.
    #[must_use]
    pub fn int(&self, name: &str) -> Option<i32> {
        match self.get(name)? {
            ConfigValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns a 64-bit integer value.
    #[must_use]
    pub fn long(&self, name: &str) -> Option<i64> {
        match self.get(name)? {
            ConfigValue::Long(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns a boolean value.
    #[must_use]
    pub fn boolean(&self, name: &str) -> Option<bool> {
        match self.get(name)? {
            ConfigValue::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns a normalized path value.
    #[must_use]
    pub fn path(&self, name: &str) -> Option<&Path> {
        match self.get(name)? {
            ConfigValue::Path(value) => Some(value),
            _ => None,
        }
    }

    /// Returns a type name value.
    #[must_use]
    pub fn type_name(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            ConfigValue::TypeName(value) => Some(value),
            _ => None,
        }
    }

    /// Resolves the type named by `name` into a fresh instance of `C`.
    ///
    /// # Errors
    ///
    /// Returns the resolver's [`ConfigError`] when the type is unknown, lacks
    /// capability `C`, or has no zero-argument constructor.
    pub fn resolve<C: Capability>(
        &self,
        name: &str,
        registry: &TypeRegistry,
    ) -> Result<Option<Box<C::Instance>>, ConfigError> {
        registry.resolve::<C>(&self.qualified_key(name), self.type_name(name))
    }

    /// Returns the fully qualified form of a relative key name.
    #[must_use]
    pub fn qualified_key(&self, name: &str) -> String {
        self.prefix.as_ref().map_or_else(|| name.to_string(), |prefix| format!("{prefix}.{name}"))
    }

    /// Returns undeclared keys found under the schema namespace.
    #[must_use]
    pub fn unknown_keys(&self) -> &[String] {
        &self.unknown
    }

    /// Returns the number of declared keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true when the schema declared no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
