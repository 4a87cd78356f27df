//! Filesystem storage configuration tests for tiered-storage-filesystem.
// crates/tiered-storage-filesystem/tests/filesystem_storage_config.rs
// =============================================================================
// Module: Filesystem Storage Config Tests
// Description: Validate root path handling.
// Purpose: Ensure the root is normalized, required, and never probed on disk.
// =============================================================================

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::path::Path;

use tiered_storage_config::RawConfig;
use tiered_storage_filesystem::FileSystemStorageConfig;
use tiered_storage_filesystem::filesystem_schema;

type TestResult = Result<(), String>;

fn assert_message(raw: &RawConfig, expected: &str) -> TestResult {
    match FileSystemStorageConfig::new(raw) {
        Err(error) => {
            let message = error.to_string();
            if message == expected {
                Ok(())
            } else {
                Err(format!("expected {expected:?}, got {message:?}"))
            }
        }
        Ok(config) => Err(format!("expected invalid config, got {config:?}")),
    }
}

#[test]
fn current_directory_root_is_kept() -> TestResult {
    let raw: RawConfig = [("root", ".")].into_iter().collect();
    let config = FileSystemStorageConfig::new(&raw).map_err(|err| err.to_string())?;
    assert_eq!(config.root(), Path::new("."));
    Ok(())
}

#[test]
fn root_is_normalized_without_touching_disk() -> TestResult {
    let raw: RawConfig = [("root", "./does/not//exist/")].into_iter().collect();
    let config = FileSystemStorageConfig::new(&raw).map_err(|err| err.to_string())?;
    assert_eq!(config.root(), Path::new("does/not/exist"));
    assert!(!config.root().exists());
    Ok(())
}

#[test]
fn existing_directory_is_accepted() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let mut raw = RawConfig::new();
    raw.insert("root", dir.path().to_string_lossy().as_ref());
    let config = FileSystemStorageConfig::new(&raw).map_err(|err| err.to_string())?;
    assert_eq!(config.root(), dir.path());
    Ok(())
}

#[test]
fn missing_root_reports_literal_message() -> TestResult {
    assert_message(
        &RawConfig::new(),
        "Missing required configuration \"root\" which has no default value.",
    )
}

#[test]
fn null_and_blank_roots_are_rejected() -> TestResult {
    let mut raw = RawConfig::new();
    raw.insert_null("root");
    assert_message(&raw, "Invalid value null for configuration root")?;
    raw.insert("root", "   ");
    assert_message(&raw, "Invalid value  for configuration root: String must be non-empty")
}

#[test]
fn schema_has_single_root_key() -> TestResult {
    let schema = filesystem_schema().map_err(|err| err.to_string())?;
    assert_eq!(schema.prefix(), None);
    assert_eq!(schema.keys().len(), 1);
    assert_eq!(schema.qualify("root"), "root");
    Ok(())
}
