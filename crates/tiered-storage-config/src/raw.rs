// crates/tiered-storage-config/src/raw.rs
// ============================================================================
// Module: Raw Configuration
// Description: Flat string-keyed map handed over by the plugin host.
// Purpose: Preserve the distinction between absent keys and explicit nulls.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The host reduces every config source to a flat map of dotted keys to string
//! values. A key may be missing entirely, or present with a null value; the
//! two are different inputs for validation (a missing key takes its default,
//! an explicit null does not).
//!
//! `Debug` output lists key names only because values may carry key material.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

// ============================================================================
// SECTION: Raw Values
// ============================================================================

/// Lookup result for a single raw key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawValue<'a> {
    /// The key is not present in the map.
    Absent,
    /// The key is present with the null marker.
    Null,
    /// The key is present with a string value.
    Present(&'a str),
}

// ============================================================================
// SECTION: Raw Config
// ============================================================================

/// Raw configuration map supplied at construction time.
///
/// # Invariants
/// - Keys are unique; inserting an existing key replaces its value.
/// - `None` values are explicit nulls, distinct from absent keys.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct RawConfig {
    /// Entries keyed by fully qualified key name.
    entries: BTreeMap<String, Option<String>>,
}

impl RawConfig {
    /// Creates an empty raw configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to a string value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), Some(value.into()));
    }

    /// Sets `key` to the explicit null marker.
    pub fn insert_null(&mut self, key: impl Into<String>) {
        self.entries.insert(key.into(), None);
    }

    /// Removes `key`, making it absent.
    pub fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    /// Looks up `key`.
    #[must_use]
    pub fn lookup(&self, key: &str) -> RawValue<'_> {
        match self.entries.get(key) {
            None => RawValue::Absent,
            Some(None) => RawValue::Null,
            Some(Some(value)) => RawValue::Present(value),
        }
    }

    /// Returns every key in the map, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Returns the number of keys, null-valued ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the map holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for RawConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawConfig").field("keys", &self.entries.keys()).finish()
    }
}

impl FromIterator<(String, String)> for RawConfig {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        iter.into_iter().map(|(key, value)| (key, Some(value))).collect()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for RawConfig {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        iter.into_iter().map(|(key, value)| (key.to_string(), Some(value.to_string()))).collect()
    }
}

impl FromIterator<(String, Option<String>)> for RawConfig {
    fn from_iter<I: IntoIterator<Item = (String, Option<String>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<(&'a str, Option<&'a str>)> for RawConfig {
    fn from_iter<I: IntoIterator<Item = (&'a str, Option<&'a str>)>>(iter: I) -> Self {
        iter.into_iter().map(|(key, value)| (key.to_string(), value.map(str::to_string))).collect()
    }
}

impl From<HashMap<String, String>> for RawConfig {
    fn from(map: HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl From<BTreeMap<String, Option<String>>> for RawConfig {
    fn from(entries: BTreeMap<String, Option<String>>) -> Self {
        Self {
            entries,
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
