// crates/tiered-storage-config/src/key.rs
// ============================================================================
// Module: Key Specifications
// Description: Declarative description of a single configuration key.
// Purpose: Express schemas as data with per-key conversion and checks.
// Dependencies: std
// ============================================================================

//! ## Overview
//! A [`KeySpec`] names a key, declares the type its raw string converts to,
//! whether it is required or carries a default, and an optional [`Check`]
//! applied to the converted value. Specs are immutable once a schema is built.
//!
//! Conversion never touches the filesystem or network: path values are
//! normalized lexically and type names are only looked up in the registry.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::error::NULL_LITERAL;
use crate::registry::Capability;
use crate::registry::CapabilityRequirement;

// ============================================================================
// SECTION: Value Types
// ============================================================================

/// Semantic type a raw string value converts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// Trimmed string.
    String,
    /// Trimmed string that is redacted when displayed.
    Password,
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    Long,
    /// Case-insensitive `true` / `false`.
    Boolean,
    /// Lexically normalized filesystem path.
    Path,
    /// Name of a type resolved through the type registry.
    TypeName,
}

impl ValueType {
    /// Returns the upper-case label used in messages and docs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Password => "PASSWORD",
            Self::Int => "INT",
            Self::Long => "LONG",
            Self::Boolean => "BOOLEAN",
            Self::Path => "PATH",
            Self::TypeName => "CLASS",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Values
// ============================================================================

/// Secret string whose `Debug` and `Display` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Placeholder printed instead of the secret.
    pub const HIDDEN: &'static str = "[hidden]";

    /// Wraps a secret value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the secret value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Self::HIDDEN)
    }
}

impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Self::HIDDEN)
    }
}

/// Converted configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    /// String value.
    String(String),
    /// Secret string value.
    Password(Password),
    /// 32-bit integer value.
    Int(i32),
    /// 64-bit integer value.
    Long(i64),
    /// Boolean value.
    Boolean(bool),
    /// Normalized path value.
    Path(PathBuf),
    /// Registered type name, not yet resolved to an instance.
    TypeName(String),
    /// Explicit or defaulted null.
    Null,
}

impl ConfigValue {
    /// Returns true for the null value.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Renders the value the way it appears in messages and docs.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::String(value) | Self::TypeName(value) => value.clone(),
            Self::Password(value) => value.to_string(),
            Self::Int(value) => value.to_string(),
            Self::Long(value) => value.to_string(),
            Self::Boolean(value) => value.to_string(),
            Self::Path(value) => value.display().to_string(),
            Self::Null => NULL_LITERAL.to_string(),
        }
    }

    /// Returns the value as an `i64` when it is numeric.
    fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(i64::from(*value)),
            Self::Long(value) => Some(*value),
            _ => None,
        }
    }
}

// ============================================================================
// SECTION: Defaults, Checks, Importance
// ============================================================================

/// Default behavior for a key that is absent from the raw map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyDefault {
    /// The key must be supplied.
    Required,
    /// The key is optional and resolves to null.
    Unset,
    /// The key resolves to the given value.
    Value(ConfigValue),
}

/// Custom check signature: `(qualified_key, value)`.
pub type CheckFn = fn(&str, &ConfigValue) -> Result<(), ConfigError>;

/// Check applied to a converted value, including null.
#[derive(Debug, Clone, Copy)]
pub enum Check {
    /// The value must be one of the listed strings (null is rejected).
    OneOf(&'static [&'static str]),
    /// The numeric value must be at least the bound.
    AtLeast(i64),
    /// The string or path value must be non-empty.
    NonEmpty,
    /// Arbitrary check supplied by the backend.
    Custom(CheckFn),
}

impl Check {
    /// Validates `value` for the fully qualified key `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the value fails the check.
    pub fn ensure_valid(&self, key: &str, value: &ConfigValue) -> Result<(), ConfigError> {
        match self {
            Self::OneOf(choices) => match value {
                ConfigValue::String(text) if choices.contains(&text.as_str()) => Ok(()),
                _ => Err(ConfigError::invalid(key, value.render())),
            },
            Self::AtLeast(min) => match value.as_i64() {
                Some(number) if number >= *min => Ok(()),
                _ if value.is_null() => {
                    Err(ConfigError::invalid_with_reason(key, NULL_LITERAL, "Value must be non-null"))
                }
                _ => Err(ConfigError::invalid_with_reason(
                    key,
                    value.render(),
                    format!("Value must be at least {min}"),
                )),
            },
            Self::NonEmpty => {
                let empty = match value {
                    ConfigValue::String(text) => text.is_empty(),
                    ConfigValue::Path(path) => path.as_os_str().is_empty(),
                    _ => false,
                };
                if empty {
                    Err(ConfigError::invalid_with_reason(
                        key,
                        value.render(),
                        "String must be non-empty",
                    ))
                } else {
                    Ok(())
                }
            }
            Self::Custom(check) => check(key, value),
        }
    }

    /// Returns the valid-values text used by generated docs.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::OneOf(choices) => format!("[{}]", choices.join(", ")),
            Self::AtLeast(min) => format!("[{min},...]"),
            Self::NonEmpty => "non-empty string".to_string(),
            Self::Custom(_) => String::new(),
        }
    }
}

/// Relative importance of a key, used for documentation ordering only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Importance {
    /// Must be understood before deploying the backend.
    High,
    /// Tuning knobs with sensible defaults.
    Medium,
    /// Rarely changed.
    Low,
}

impl Importance {
    /// Returns the lower-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

// ============================================================================
// SECTION: Key Specification
// ============================================================================

/// Declarative description of one configuration key.
///
/// # Invariants
/// - `name` is relative to the owning schema's namespace prefix.
/// - Nullable keys accept an explicit null without running conversion.
#[derive(Debug, Clone)]
pub struct KeySpec {
    /// Key name relative to the schema prefix.
    name: String,
    /// Target type of the conversion.
    value_type: ValueType,
    /// Behavior when the key is absent.
    default: KeyDefault,
    /// Optional check on the converted value.
    check: Option<Check>,
    /// Whether an explicit null is an accepted value.
    nullable: bool,
    /// Capability a type-name value must resolve to.
    capability: Option<CapabilityRequirement>,
    /// Documentation importance.
    importance: Importance,
    /// Operator-facing description.
    doc: String,
}

impl KeySpec {
    /// Creates a required key of the given type.
    #[must_use]
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            default: KeyDefault::Required,
            check: None,
            nullable: false,
            capability: None,
            importance: Importance::Medium,
            doc: String::new(),
        }
    }

    /// Sets the default value used when the key is absent.
    #[must_use]
    pub fn default_value(mut self, value: ConfigValue) -> Self {
        self.default = KeyDefault::Value(value);
        self
    }

    /// Marks the key optional with a null default; explicit nulls are accepted.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.default = KeyDefault::Unset;
        self.nullable = true;
        self
    }

    /// Attaches a check run on the converted value.
    #[must_use]
    pub const fn check(mut self, check: Check) -> Self {
        self.check = Some(check);
        self
    }

    /// Requires a type-name value to resolve to capability `C`.
    ///
    /// Validation then reports not-found, capability mismatch, and missing
    /// zero-argument constructor for this key in declaration order.
    #[must_use]
    pub fn requires<C: Capability>(mut self) -> Self {
        self.capability = Some(CapabilityRequirement::of::<C>());
        self
    }

    /// Sets the documentation importance.
    #[must_use]
    pub const fn importance(mut self, importance: Importance) -> Self {
        self.importance = importance;
        self
    }

    /// Sets the operator-facing description.
    #[must_use]
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    /// Returns the key name relative to the schema prefix.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared value type.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Returns the default behavior.
    #[must_use]
    pub const fn default_behavior(&self) -> &KeyDefault {
        &self.default
    }

    /// Returns the attached check, if any.
    #[must_use]
    pub const fn check_rule(&self) -> Option<&Check> {
        self.check.as_ref()
    }

    /// Returns the required capability, if any.
    #[must_use]
    pub const fn capability(&self) -> Option<&CapabilityRequirement> {
        self.capability.as_ref()
    }

    /// Returns true when explicit nulls are accepted.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Returns the documentation importance.
    #[must_use]
    pub const fn importance_level(&self) -> Importance {
        self.importance
    }

    /// Returns the description.
    #[must_use]
    pub fn documentation(&self) -> &str {
        &self.doc
    }

    /// Converts a supplied raw value (or the null marker) for this key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when conversion or the check fails.
    pub fn parse(&self, key: &str, raw: Option<&str>) -> Result<ConfigValue, ConfigError> {
        let value = match raw {
            Some(raw) => convert(key, raw, self.value_type)?,
            None if self.nullable => return Ok(ConfigValue::Null),
            None => ConfigValue::Null,
        };
        self.ensure_valid(key, &value)?;
        Ok(value)
    }

    /// Runs the check (and the non-nullable null rule) on a converted value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the value is rejected.
    pub fn ensure_valid(&self, key: &str, value: &ConfigValue) -> Result<(), ConfigError> {
        if let Some(check) = &self.check {
            check.ensure_valid(key, value)?;
        }
        if value.is_null() && !self.nullable {
            return Err(ConfigError::invalid(key, NULL_LITERAL));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Conversion
// ============================================================================

/// Converts a raw string into the declared type.
fn convert(key: &str, raw: &str, value_type: ValueType) -> Result<ConfigValue, ConfigError> {
    let trimmed = raw.trim();
    match value_type {
        ValueType::String => Ok(ConfigValue::String(trimmed.to_string())),
        ValueType::Password => Ok(ConfigValue::Password(Password::new(trimmed))),
        ValueType::TypeName => Ok(ConfigValue::TypeName(trimmed.to_string())),
        ValueType::Int => trimmed.parse::<i32>().map(ConfigValue::Int).map_err(|_| {
            ConfigError::invalid_with_reason(key, raw, "Not a number of type INT")
        }),
        ValueType::Long => trimmed.parse::<i64>().map(ConfigValue::Long).map_err(|_| {
            ConfigError::invalid_with_reason(key, raw, "Not a number of type LONG")
        }),
        ValueType::Boolean => {
            if trimmed.eq_ignore_ascii_case("true") {
                Ok(ConfigValue::Boolean(true))
            } else if trimmed.eq_ignore_ascii_case("false") {
                Ok(ConfigValue::Boolean(false))
            } else {
                Err(ConfigError::invalid_with_reason(
                    key,
                    raw,
                    "Expected value to be either true or false",
                ))
            }
        }
        ValueType::Path => Ok(ConfigValue::Path(normalize_path(Path::new(trimmed)))),
    }
}

/// Lexically normalizes a path without consulting the filesystem.
///
/// Redundant separators, trailing slashes and interior `.` components are
/// dropped. A leading `.` survives only when it is the whole path; `..` is
/// preserved because resolving it would require following symlinks.
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    let mut components = path.components().peekable();
    while let Some(component) = components.next() {
        if component == Component::CurDir && components.peek().is_some() {
            continue;
        }
        normalized.push(component.as_os_str());
    }
    normalized
}

// ============================================================================
// SECTION: Tests
// ============================================================================
