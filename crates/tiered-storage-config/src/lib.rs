// crates/tiered-storage-config/src/lib.rs
// ============================================================================
// Module: Tiered Storage Config Library
// Description: Schema, validation, and capability resolution engine.
// Purpose: Single validation path shared by every tiered storage backend.
// Dependencies: serde, serde_json, thiserror, tracing
// ============================================================================

//! ## Overview
//! `tiered-storage-config` turns the flat string map supplied by the plugin
//! host into typed, immutable values. Each storage backend declares a
//! [`Schema`] of [`KeySpec`]s under its own namespace prefix; the shared
//! [`Schema::validate`] pass converts values, applies defaults, and fails fast
//! with literal, operator-facing [`ConfigError`] messages.
//!
//! Keys naming pluggable components are resolved through a read-only
//! [`TypeRegistry`] of zero-argument factories grouped by [`Capability`].
//!
//! Invariants:
//! - Validation is single-pass and never returns a partially valid result.
//! - Undeclared keys under a schema namespace are ignored, not rejected.
//! - Resolution never caches instances across configuration objects.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod docs;
pub mod error;
pub mod key;
pub mod raw;
pub mod registry;
pub mod schema;
pub mod values;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use error::ConfigError;
pub use error::NULL_LITERAL;
pub use error::RegistryError;
pub use error::SchemaError;
pub use key::Check;
pub use key::CheckFn;
pub use key::ConfigValue;
pub use key::Importance;
pub use key::KeyDefault;
pub use key::KeySpec;
pub use key::Password;
pub use key::ValueType;
pub use key::normalize_path;
pub use raw::RawConfig;
pub use raw::RawValue;
pub use registry::Capability;
pub use registry::CapabilityRequirement;
pub use registry::Constructor;
pub use registry::ResolvableCheck;
pub use registry::TypeDescriptor;
pub use registry::TypeRegistry;
pub use registry::TypeRegistryBuilder;
pub use schema::Schema;
pub use schema::SchemaBuilder;
pub use values::ValidatedConfig;
