// crates/tiered-storage-s3/src/lib.rs
// ============================================================================
// Module: Tiered Storage S3 Library
// Description: Configuration for the S3 object-storage backend.
// Purpose: Typed bucket, region, credentials, key material, and size settings.
// Dependencies: aws-config, aws-sdk-s3, tiered-storage-config, tracing
// ============================================================================

//! ## Overview
//! `tiered-storage-s3` declares the `remote.log.storage.s3` schema and turns
//! the host's raw map into an immutable [`S3StorageConfig`]. Credentials
//! providers are chosen by name from a [`tiered_storage_config::TypeRegistry`];
//! [`builtin_registry`] holds the providers shipped here.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod credentials;
pub mod region;
pub mod registry;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::S3StorageConfig;
pub use config::s3_schema;
pub use credentials::CredentialsCapability;
pub use credentials::CredentialsProvider;
pub use credentials::DefaultCredentialsProviderChain;
pub use credentials::EnvironmentCredentialsProvider;
pub use credentials::ProfileFileCredentialsProvider;
pub use credentials::StaticCredentialsProvider;
pub use region::S3Region;
pub use region::UnknownRegion;
pub use registry::builtin_registry;
pub use registry::register_builtin_types;
