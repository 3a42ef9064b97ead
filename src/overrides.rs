//! Local override cache for image references.
//!
//! The earliest version of the site had no backend at all: edits made in the
//! admin panel were kept in a browser-local key/value store, and uploaded
//! images were remembered as inline payloads keyed by their reference. This
//! module is that side-cache, kept for the same job — letting the resolver
//! serve an image payload directly when an override exists — but with two
//! fixes the original lacked:
//!
//! - **Bounded growth**: the original store grew without limit. Here the
//!   cache holds at most `max_entries`; inserting past the bound evicts the
//!   oldest entries in insertion order.
//! - **Versioned format**: a version mismatch or corrupt file loads as an
//!   empty cache instead of failing the whole process. Overrides are an
//!   optimization, never the source of truth.
//!
//! ## Storage
//!
//! The cache is a JSON file at `<data_dir>/.content-overrides.json`. It lives
//! alongside the content collections so wiping the data dir wipes it too.

use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

/// Name of the override cache file within the data directory.
const OVERRIDES_FILENAME: &str = ".content-overrides.json";

/// Version of the cache file format. Bump this to invalidate all existing
/// caches when the format changes.
const OVERRIDES_VERSION: u32 = 1;

/// A single override: an image reference mapped to an inline payload
/// (typically a `data:` URL the resolver can hand straight to a consumer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideEntry {
    pub key: String,
    pub value: String,
}

/// Durable key→value cache with insertion-order eviction.
///
/// Entries are kept as a vector rather than a map so eviction order is the
/// file order — oldest first, no timestamps needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverrideCache {
    pub version: u32,
    entries: Vec<OverrideEntry>,
    #[serde(skip)]
    max_entries: usize,
}

impl OverrideCache {
    /// Create an empty cache bounded to `max_entries`.
    pub fn empty(max_entries: usize) -> Self {
        Self {
            version: OVERRIDES_VERSION,
            entries: Vec::new(),
            max_entries: max_entries.max(1),
        }
    }

    /// Load from the data directory. Returns an empty cache if the file
    /// doesn't exist or can't be parsed (version mismatch, corruption).
    pub fn load(data_dir: &Path, max_entries: usize) -> Self {
        let path = data_dir.join(OVERRIDES_FILENAME);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(_) => return Self::empty(max_entries),
        };
        let mut cache: Self = match serde_json::from_str(&content) {
            Ok(c) => c,
            Err(_) => return Self::empty(max_entries),
        };
        if cache.version != OVERRIDES_VERSION {
            return Self::empty(max_entries);
        }
        cache.max_entries = max_entries.max(1);
        cache.enforce_bound();
        cache
    }

    /// Save to the data directory.
    pub fn save(&self, data_dir: &Path) -> io::Result<()> {
        let path = data_dir.join(OVERRIDES_FILENAME);
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }

    /// Look up an override payload by reference.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }

    /// Insert or replace an override. Re-inserting an existing key moves it
    /// to the back (treated as freshly used for eviction purposes).
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        self.entries.retain(|e| e.key != key);
        self.entries.push(OverrideEntry {
            key,
            value: value.into(),
        });
        self.enforce_bound();
    }

    /// Remove an override. Returns whether an entry was present.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.key != key);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn enforce_bound(&mut self) {
        if self.entries.len() > self.max_entries {
            let excess = self.entries.len() - self.max_entries;
            self.entries.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    // =========================================================================
    // Basics
    // =========================================================================

    #[test]
    fn empty_cache_has_no_entries() {
        let cache = OverrideCache::empty(8);
        assert!(cache.is_empty());
        assert_eq!(cache.get("anything"), None);
    }

    #[test]
    fn put_then_get() {
        let mut cache = OverrideCache::empty(8);
        cache.put("rooms/a.jpg", "data:image/jpeg;base64,AAAA");
        assert_eq!(cache.get("rooms/a.jpg"), Some("data:image/jpeg;base64,AAAA"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn put_replaces_existing_key() {
        let mut cache = OverrideCache::empty(8);
        cache.put("k", "v1");
        cache.put("k", "v2");
        assert_eq!(cache.get("k"), Some("v2"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn remove_reports_presence() {
        let mut cache = OverrideCache::empty(8);
        cache.put("k", "v");
        assert!(cache.remove("k"));
        assert!(!cache.remove("k"));
        assert_eq!(cache.get("k"), None);
    }

    // =========================================================================
    // Eviction
    // =========================================================================

    #[test]
    fn oldest_entries_evicted_past_bound() {
        let mut cache = OverrideCache::empty(3);
        cache.put("a", "1");
        cache.put("b", "2");
        cache.put("c", "3");
        cache.put("d", "4");
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("d"), Some("4"));
    }

    #[test]
    fn reinsert_refreshes_eviction_order() {
        let mut cache = OverrideCache::empty(2);
        cache.put("a", "1");
        cache.put("b", "2");
        cache.put("a", "1b"); // a is now newest
        cache.put("c", "3"); // evicts b, not a
        assert_eq!(cache.get("a"), Some("1b"));
        assert_eq!(cache.get("b"), None);
    }

    #[test]
    fn bound_of_zero_is_clamped_to_one() {
        let mut cache = OverrideCache::empty(0);
        cache.put("a", "1");
        assert_eq!(cache.len(), 1);
    }

    // =========================================================================
    // Save / Load roundtrip
    // =========================================================================

    #[test]
    fn save_and_load_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let mut cache = OverrideCache::empty(8);
        cache.put("x", "1");
        cache.put("y", "2");
        cache.save(tmp.path()).unwrap();

        let loaded = OverrideCache::load(tmp.path(), 8);
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.get("x"), Some("1"));
        assert_eq!(loaded.get("y"), Some("2"));
    }

    #[test]
    fn load_missing_file_returns_empty() {
        let tmp = TempDir::new().unwrap();
        let cache = OverrideCache::load(tmp.path(), 8);
        assert!(cache.is_empty());
    }

    #[test]
    fn load_corrupt_json_returns_empty() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(OVERRIDES_FILENAME), "not json").unwrap();
        let cache = OverrideCache::load(tmp.path(), 8);
        assert!(cache.is_empty());
    }

    #[test]
    fn load_wrong_version_returns_empty() {
        let tmp = TempDir::new().unwrap();
        let json = format!(
            r#"{{"version": {}, "entries": [{{"key":"k","value":"v"}}]}}"#,
            OVERRIDES_VERSION + 1
        );
        fs::write(tmp.path().join(OVERRIDES_FILENAME), json).unwrap();
        let cache = OverrideCache::load(tmp.path(), 8);
        assert!(cache.is_empty());
    }

    #[test]
    fn load_with_smaller_bound_trims_oldest() {
        let tmp = TempDir::new().unwrap();
        let mut cache = OverrideCache::empty(8);
        for i in 0..5 {
            cache.put(format!("k{i}"), format!("v{i}"));
        }
        cache.save(tmp.path()).unwrap();

        let loaded = OverrideCache::load(tmp.path(), 2);
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.get("k3"), Some("v3"));
        assert_eq!(loaded.get("k0"), None);
    }
}
