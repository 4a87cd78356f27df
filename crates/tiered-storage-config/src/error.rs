// crates/tiered-storage-config/src/error.rs
// ============================================================================
// Module: Config Errors
// Description: Error taxonomy for schema validation and capability resolution.
// Purpose: Produce literal, operator-actionable messages for malformed input.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Every construction-time failure surfaces as a [`ConfigError`]. The message
//! text of each variant is part of the public contract: operators and
//! downstream tooling match on it verbatim, so formats must not drift.
//! Errors are terminal; nothing in this crate retries or substitutes defaults
//! after a failure.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Literal rendered in messages when a supplied value is the null marker.
pub const NULL_LITERAL: &str = "null";

// ============================================================================
// SECTION: Config Errors
// ============================================================================

/// Configuration validation and resolution errors.
///
/// # Invariants
/// - Display output is stable and matched verbatim by operators.
/// - Each variant names the offending key (and value when one exists).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required key with no default was not supplied.
    #[error("Missing required configuration \"{key}\" which has no default value.")]
    MissingRequiredKey {
        /// Fully qualified key name.
        key: String,
    },
    /// A supplied value could not be converted or failed its check.
    #[error("Invalid value {value} for configuration {key}{}", reason_suffix(.reason.as_deref()))]
    InvalidValue {
        /// Fully qualified key name.
        key: String,
        /// Raw value as supplied, or `null` for the null marker.
        value: String,
        /// Optional detail appended after a colon.
        reason: Option<String>,
    },
    /// The named type is not known to the type registry.
    #[error("Invalid value {name} for configuration {key}: Class {name} could not be found.")]
    TypeNotFound {
        /// Fully qualified key name.
        key: String,
        /// Type name as supplied (trimmed).
        name: String,
    },
    /// The named type exists but does not provide the required capability.
    #[error("Invalid value class {name} for configuration {key}: Class must extend interface {capability}")]
    CapabilityMismatch {
        /// Fully qualified key name.
        key: String,
        /// Registered type name.
        name: String,
        /// Name of the required capability.
        capability: String,
    },
    /// The named type provides the capability but has no zero-argument constructor.
    #[error("Invalid value class {name} for configuration {key}: Class must have no args constructor")]
    NotDefaultConstructible {
        /// Fully qualified key name.
        key: String,
        /// Registered type name.
        name: String,
    },
    /// The backend's own schema definition is inconsistent.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl ConfigError {
    /// Builds a missing-required-key error.
    #[must_use]
    pub fn missing(key: impl Into<String>) -> Self {
        Self::MissingRequiredKey {
            key: key.into(),
        }
    }

    /// Builds an invalid-value error without a detail suffix.
    #[must_use]
    pub fn invalid(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.into(),
            reason: None,
        }
    }

    /// Builds an invalid-value error with a detail suffix.
    #[must_use]
    pub fn invalid_with_reason(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.into(),
            reason: Some(reason.into()),
        }
    }

    /// Returns the fully qualified key the error refers to, if any.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::MissingRequiredKey {
                key,
            }
            | Self::InvalidValue {
                key, ..
            }
            | Self::TypeNotFound {
                key, ..
            }
            | Self::CapabilityMismatch {
                key, ..
            }
            | Self::NotDefaultConstructible {
                key, ..
            } => Some(key),
            Self::Schema(_) => None,
        }
    }
}

// ============================================================================
// SECTION: Schema Errors
// ============================================================================

/// Errors raised while building a schema definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Two key specifications share a fully qualified name.
    #[error("Configuration {0} is defined twice.")]
    DuplicateKey(String),
    /// A declared default does not satisfy its own key specification.
    #[error("Invalid default configuration value for {key}: {reason}")]
    InvalidDefault {
        /// Fully qualified key name.
        key: String,
        /// Rendered validation failure.
        reason: String,
    },
    /// A capability requirement is attached to a key that is not a type name.
    #[error("Configuration {0} requires a capability but is not a type name.")]
    MisplacedCapability(String),
}

// ============================================================================
// SECTION: Registry Errors
// ============================================================================

/// Errors raised while building a type registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A type name was registered more than once.
    #[error("type already registered: {0}")]
    DuplicateType(String),
    /// A type name is empty or padded with whitespace.
    #[error("invalid type name: '{0}'")]
    InvalidName(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Renders the optional `: reason` suffix of an invalid-value message.
fn reason_suffix(reason: Option<&str>) -> String {
    reason.map_or_else(String::new, |reason| format!(": {reason}"))
}
