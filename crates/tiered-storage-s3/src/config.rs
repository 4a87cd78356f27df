// crates/tiered-storage-s3/src/config.rs
// ============================================================================
// Module: S3 Storage Configuration
// Description: Schema and typed configuration for the S3 storage backend.
// Purpose: Validate the host's raw map once and expose immutable accessors.
// Dependencies: aws-sdk-s3, tiered-storage-config, tracing
// ============================================================================

//! ## Overview
//! Every key lives under `remote.log.storage.s3`. Construction validates the
//! raw map, parses the region, and resolves the optional credentials provider
//! in one synchronous step. Either a fully valid [`S3StorageConfig`] comes
//! back or the first [`ConfigError`] does.
//!
//! Invariants:
//! - Accessors never re-validate.
//! - Each configuration resolves its own provider instance.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::LazyLock;

use aws_sdk_s3::config::BehaviorVersion;
use tiered_storage_config::Check;
use tiered_storage_config::ConfigError;
use tiered_storage_config::ConfigValue;
use tiered_storage_config::Importance;
use tiered_storage_config::KeySpec;
use tiered_storage_config::Password;
use tiered_storage_config::RawConfig;
use tiered_storage_config::Schema;
use tiered_storage_config::SchemaError;
use tiered_storage_config::TypeRegistry;
use tiered_storage_config::ValidatedConfig;
use tiered_storage_config::ValueType;
use tracing::debug;

use crate::credentials::CredentialsCapability;
use crate::credentials::CredentialsProvider;
use crate::region::S3Region;
use crate::registry::builtin_registry;

// ============================================================================
// SECTION: Keys
// ============================================================================

/// Namespace prefix of every S3 backend key.
pub const PREFIX: &str = "remote.log.storage.s3";
/// Bucket holding the segments.
pub const BUCKET_NAME: &str = "bucket.name";
/// AWS region of the bucket.
pub const REGION: &str = "region";
/// Type name of the credentials provider.
pub const CREDENTIALS_PROVIDER_CLASS: &str = "credentials.provider.class";
/// PEM-encoded public key.
pub const PUBLIC_KEY_PEM: &str = "public_key_pem";
/// PEM-encoded private key.
pub const PRIVATE_KEY_PEM: &str = "private_key_pem";
/// I/O buffer size in bytes.
pub const IO_BUFFER_SIZE: &str = "io.buffer.size";
/// Upload part size in bytes.
pub const UPLOAD_PART_SIZE: &str = "upload.part.size";
/// Multipart upload part size in bytes.
pub const MULTIPART_UPLOAD_PART_SIZE: &str = "multipart.upload.part.size";

/// Default I/O buffer size.
pub const DEFAULT_IO_BUFFER_SIZE: i32 = 8_192;
/// Default upload part size.
pub const DEFAULT_UPLOAD_PART_SIZE: i32 = 1 << 19;
/// Default multipart upload part size.
pub const DEFAULT_MULTIPART_UPLOAD_PART_SIZE: i32 = 8_192;

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Builds the S3 backend schema.
fn build_schema() -> Result<Schema, SchemaError> {
    Schema::builder(Some(PREFIX))
        .define(
            KeySpec::new(BUCKET_NAME, ValueType::String)
                .importance(Importance::High)
                .doc("S3 bucket to store log segments"),
        )
        .define(
            KeySpec::new(REGION, ValueType::String)
                .default_value(ConfigValue::String(S3Region::DEFAULT.as_str().to_string()))
                .check(Check::OneOf(&S3Region::NAMES))
                .doc("AWS region where the S3 bucket is placed"),
        )
        .define(
            KeySpec::new(CREDENTIALS_PROVIDER_CLASS, ValueType::TypeName)
                .optional()
                .requires::<CredentialsCapability>()
                .importance(Importance::Low)
                .doc("AWS credentials provider; when unset the SDK defaults apply"),
        )
        .define(
            KeySpec::new(PUBLIC_KEY_PEM, ValueType::String)
                .importance(Importance::High)
                .doc("Public key used to encrypt segments"),
        )
        .define(
            KeySpec::new(PRIVATE_KEY_PEM, ValueType::Password)
                .importance(Importance::High)
                .doc("Private key used to decrypt segments"),
        )
        .define(
            KeySpec::new(IO_BUFFER_SIZE, ValueType::Int)
                .default_value(ConfigValue::Int(DEFAULT_IO_BUFFER_SIZE))
                .check(Check::AtLeast(1))
                .importance(Importance::Low)
                .doc("Buffer size used for segment I/O"),
        )
        .define(
            KeySpec::new(UPLOAD_PART_SIZE, ValueType::Int)
                .default_value(ConfigValue::Int(DEFAULT_UPLOAD_PART_SIZE))
                .check(Check::AtLeast(1))
                .importance(Importance::Low)
                .doc("Size of each uploaded segment part"),
        )
        .define(
            KeySpec::new(MULTIPART_UPLOAD_PART_SIZE, ValueType::Int)
                .default_value(ConfigValue::Int(DEFAULT_MULTIPART_UPLOAD_PART_SIZE))
                .check(Check::AtLeast(1))
                .importance(Importance::Low)
                .doc("Part size of S3 multipart uploads"),
        )
        .build()
}

/// Schema shared by every S3 configuration in the process.
static SCHEMA: LazyLock<Result<Schema, SchemaError>> = LazyLock::new(build_schema);

/// Returns the S3 backend schema.
///
/// # Errors
///
/// Returns [`SchemaError`] if the built-in key definitions are inconsistent.
pub fn s3_schema() -> Result<&'static Schema, SchemaError> {
    SCHEMA.as_ref().map_err(Clone::clone)
}

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Validated configuration of the S3 storage backend.
///
/// # Invariants
/// - Built only through [`Self::new`] or [`Self::with_registry`].
/// - Immutable after construction; `Debug` never prints the private key.
#[derive(Debug)]
pub struct S3StorageConfig {
    /// Bucket name.
    bucket_name: String,
    /// Bucket region.
    region: S3Region,
    /// Resolved credentials provider, if one was named.
    credentials_provider: Option<Box<dyn CredentialsProvider>>,
    /// PEM public key.
    public_key: String,
    /// PEM private key.
    private_key: Password,
    /// I/O buffer size.
    io_buffer_size: i32,
    /// Upload part size.
    upload_part_size: i32,
    /// Multipart upload part size.
    multipart_upload_part_size: i32,
    /// Undeclared keys found under [`PREFIX`].
    unknown_keys: Vec<String>,
}

impl S3StorageConfig {
    /// Validates `raw` and resolves providers through the built-in registry.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] raised by validation or resolution.
    pub fn new(raw: &RawConfig) -> Result<Self, ConfigError> {
        Self::with_registry(raw, builtin_registry())
    }

    /// Validates `raw` and resolves providers through `registry`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] raised by validation or resolution.
    pub fn with_registry(raw: &RawConfig, registry: &TypeRegistry) -> Result<Self, ConfigError> {
        let values = s3_schema()?.validate(raw, registry)?;
        let region_name = required(&values, REGION, ValidatedConfig::string)?;
        let region = region_name
            .parse::<S3Region>()
            .map_err(|_| ConfigError::invalid(values.qualified_key(REGION), region_name))?;
        let credentials_provider =
            values.resolve::<CredentialsCapability>(CREDENTIALS_PROVIDER_CLASS, registry)?;
        let config = Self {
            bucket_name: required(&values, BUCKET_NAME, ValidatedConfig::string)?.to_string(),
            region,
            credentials_provider,
            public_key: required(&values, PUBLIC_KEY_PEM, ValidatedConfig::string)?.to_string(),
            private_key: required(&values, PRIVATE_KEY_PEM, ValidatedConfig::password)?.clone(),
            io_buffer_size: required(&values, IO_BUFFER_SIZE, ValidatedConfig::int)?,
            upload_part_size: required(&values, UPLOAD_PART_SIZE, ValidatedConfig::int)?,
            multipart_upload_part_size: required(
                &values,
                MULTIPART_UPLOAD_PART_SIZE,
                ValidatedConfig::int,
            )?,
            unknown_keys: values.unknown_keys().to_vec(),
        };
        debug!(
            bucket = config.bucket_name.as_str(),
            region = config.region.as_str(),
            provider = config.credentials_provider.as_ref().map_or("none", |provider| provider.name()),
            "s3 storage configuration built"
        );
        Ok(config)
    }

    /// Returns the bucket name.
    #[must_use]
    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    /// Returns the bucket region.
    #[must_use]
    pub const fn region(&self) -> S3Region {
        self.region
    }

    /// Returns the resolved credentials provider, or `None` when unset.
    #[must_use]
    pub fn credentials_provider(&self) -> Option<&dyn CredentialsProvider> {
        self.credentials_provider.as_deref()
    }

    /// Returns the PEM public key.
    #[must_use]
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// Returns the PEM private key.
    #[must_use]
    pub const fn private_key(&self) -> &Password {
        &self.private_key
    }

    /// Returns the I/O buffer size.
    #[must_use]
    pub const fn io_buffer_size(&self) -> i32 {
        self.io_buffer_size
    }

    /// Returns the upload part size.
    #[must_use]
    pub const fn upload_part_size(&self) -> i32 {
        self.upload_part_size
    }

    /// Returns the multipart upload part size.
    #[must_use]
    pub const fn multipart_upload_part_size(&self) -> i32 {
        self.multipart_upload_part_size
    }

    /// Returns undeclared keys that were ignored.
    #[must_use]
    pub fn unknown_keys(&self) -> &[String] {
        &self.unknown_keys
    }

    /// Builds an AWS SDK client configuration from the region and, when a
    /// provider is set, that provider.
    ///
    /// The client asks the provider for credentials whenever it signs a
    /// request, so expiring credentials are refreshed.
    #[must_use]
    pub fn sdk_config(&self) -> aws_sdk_s3::Config {
        let mut builder = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(self.region.to_sdk_region());
        if let Some(provider) = &self.credentials_provider {
            builder = builder.credentials_provider(provider.shared_provider());
        }
        builder.build()
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads a value the schema guarantees, reporting the key as missing otherwise.
fn required<'a, T>(
    values: &'a ValidatedConfig,
    name: &str,
    read: fn(&'a ValidatedConfig, &str) -> Option<T>,
) -> Result<T, ConfigError> {
    read(values, name).ok_or_else(|| ConfigError::missing(values.qualified_key(name)))
}
