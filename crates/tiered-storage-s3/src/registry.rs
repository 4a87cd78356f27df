// crates/tiered-storage-s3/src/registry.rs
// ============================================================================
// Module: Built-in Type Registry
// Description: Process-wide registry of the S3 backend's named types.
// Purpose: Resolve `credentials.provider.class` without loading arbitrary code.
// Dependencies: tiered-storage-config, tracing
// ============================================================================

//! ## Overview
//! The built-in registry is assembled once on first use and is read-only
//! afterwards. Hosts that ship their own providers extend it by passing a
//! builder through [`register_builtin_types`] and handing the result to
//! [`crate::S3StorageConfig::with_registry`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::LazyLock;

use tiered_storage_config::Constructor;
use tiered_storage_config::TypeDescriptor;
use tiered_storage_config::TypeRegistry;
use tiered_storage_config::TypeRegistryBuilder;
use tracing::error;

use crate::credentials::CredentialsCapability;
use crate::credentials::CredentialsProvider;
use crate::credentials::DefaultCredentialsProviderChain;
use crate::credentials::EnvironmentCredentialsProvider;
use crate::credentials::ProfileFileCredentialsProvider;

// ============================================================================
// SECTION: Names
// ============================================================================

/// Registered name of [`DefaultCredentialsProviderChain`].
pub const DEFAULT_CHAIN_TYPE: &str = "tiered_storage_s3::credentials::DefaultCredentialsProviderChain";
/// Registered name of [`EnvironmentCredentialsProvider`].
pub const ENVIRONMENT_TYPE: &str = "tiered_storage_s3::credentials::EnvironmentCredentialsProvider";
/// Registered name of [`ProfileFileCredentialsProvider`].
pub const PROFILE_FILE_TYPE: &str = "tiered_storage_s3::credentials::ProfileFileCredentialsProvider";
/// Registered name of [`crate::StaticCredentialsProvider`].
pub const STATIC_TYPE: &str = "tiered_storage_s3::credentials::StaticCredentialsProvider";
/// Registered name of [`crate::S3Region`].
pub const REGION_TYPE: &str = "tiered_storage_s3::S3Region";
/// Registered name of [`crate::S3StorageConfig`].
pub const STORAGE_CONFIG_TYPE: &str = "tiered_storage_s3::S3StorageConfig";

// ============================================================================
// SECTION: Registration
// ============================================================================

/// Factory for [`DefaultCredentialsProviderChain`].
fn new_default_chain() -> Box<dyn CredentialsProvider> {
    Box::new(DefaultCredentialsProviderChain::new())
}

/// Factory for [`EnvironmentCredentialsProvider`].
fn new_environment() -> Box<dyn CredentialsProvider> {
    Box::new(EnvironmentCredentialsProvider::new())
}

/// Factory for [`ProfileFileCredentialsProvider`].
fn new_profile_file() -> Box<dyn CredentialsProvider> {
    Box::new(ProfileFileCredentialsProvider::new())
}

/// Adds the S3 backend's built-in types to `builder`.
///
/// The region and configuration types are registered without capabilities so
/// that naming them as a provider reports a capability mismatch instead of
/// not-found.
#[must_use]
pub fn register_builtin_types(builder: TypeRegistryBuilder) -> TypeRegistryBuilder {
    builder
        .register(
            TypeDescriptor::new(DEFAULT_CHAIN_TYPE)
                .implements::<CredentialsCapability>(Constructor::NoArgs(new_default_chain)),
        )
        .register(
            TypeDescriptor::new(ENVIRONMENT_TYPE)
                .implements::<CredentialsCapability>(Constructor::NoArgs(new_environment)),
        )
        .register(
            TypeDescriptor::new(PROFILE_FILE_TYPE)
                .implements::<CredentialsCapability>(Constructor::NoArgs(new_profile_file)),
        )
        .register(
            TypeDescriptor::new(STATIC_TYPE)
                .implements::<CredentialsCapability>(Constructor::WithArgs),
        )
        .register(TypeDescriptor::new(REGION_TYPE))
        .register(TypeDescriptor::new(STORAGE_CONFIG_TYPE))
}

/// Process-wide registry holding only the built-in types.
static BUILTIN: LazyLock<TypeRegistry> = LazyLock::new(|| {
    register_builtin_types(TypeRegistry::builder()).build().unwrap_or_else(|err| {
        error!(error = %err, "built-in type registry rejected; provider names will not resolve");
        TypeRegistry::empty()
    })
});

/// Returns the process-wide built-in registry.
#[must_use]
pub fn builtin_registry() -> &'static TypeRegistry {
    &BUILTIN
}

// ============================================================================
// SECTION: Tests
// ============================================================================
