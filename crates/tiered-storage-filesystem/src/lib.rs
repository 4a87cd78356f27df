// crates/tiered-storage-filesystem/src/lib.rs
// ============================================================================
// Module: Tiered Storage Filesystem Library
// Description: Configuration for the local-filesystem storage backend.
// Purpose: Expose the validated storage root.
// Dependencies: tiered-storage-config, tracing
// ============================================================================

//! ## Overview
//! `tiered-storage-filesystem` declares the one-key `root` schema and builds
//! an immutable [`FileSystemStorageConfig`] from the host's raw map.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::FileSystemStorageConfig;
pub use config::filesystem_schema;
