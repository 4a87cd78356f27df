// crates/tiered-storage-filesystem/src/config.rs
// ============================================================================
// Module: Filesystem Storage Configuration
// Description: Schema and typed configuration for the local-filesystem backend.
// Purpose: Validate the storage root once and expose it as a normalized path.
// Dependencies: tiered-storage-config, tracing
// ============================================================================

//! ## Overview
//! The filesystem backend reads a single root-level `root` key. The path is
//! normalized at construction and deliberately not checked for existence;
//! the backend reports missing directories when it first touches them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::sync::LazyLock;

use tiered_storage_config::Check;
use tiered_storage_config::ConfigError;
use tiered_storage_config::Importance;
use tiered_storage_config::KeySpec;
use tiered_storage_config::RawConfig;
use tiered_storage_config::Schema;
use tiered_storage_config::SchemaError;
use tiered_storage_config::TypeRegistry;
use tiered_storage_config::ValueType;
use tracing::debug;

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Key holding the storage root directory.
pub const ROOT: &str = "root";

/// Schema shared by every filesystem configuration in the process.
static SCHEMA: LazyLock<Result<Schema, SchemaError>> = LazyLock::new(|| {
    Schema::builder(None)
        .define(
            KeySpec::new(ROOT, ValueType::Path)
                .check(Check::NonEmpty)
                .importance(Importance::High)
                .doc("Root directory"),
        )
        .build()
});

/// Returns the filesystem backend schema.
///
/// # Errors
///
/// Returns [`SchemaError`] if the built-in key definitions are inconsistent.
pub fn filesystem_schema() -> Result<&'static Schema, SchemaError> {
    SCHEMA.as_ref().map_err(Clone::clone)
}

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Validated configuration of the local-filesystem backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSystemStorageConfig {
    /// Normalized storage root.
    root: PathBuf,
}

impl FileSystemStorageConfig {
    /// Validates `raw` and normalizes the storage root.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `root` is missing, null, or blank.
    pub fn new(raw: &RawConfig) -> Result<Self, ConfigError> {
        let values = filesystem_schema()?.validate(raw, &TypeRegistry::empty())?;
        let root = values
            .path(ROOT)
            .map(Path::to_path_buf)
            .ok_or_else(|| ConfigError::missing(values.qualified_key(ROOT)))?;
        debug!(root = %root.display(), "filesystem storage configuration built");
        Ok(Self {
            root,
        })
    }

    /// Returns the normalized storage root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}
