//! # Key-Value Store
//!
//! The persistence abstraction behind every container — the equivalent of
//! browser local storage.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Key-Value Store Contract                             │
//! │                                                                         │
//! │  Keys in use:                                                           │
//! │    auth_token      ─ opaque session token                               │
//! │    user_data       ─ serialized User                                    │
//! │    cart_<user_id>  ─ serialized Vec<CartLine>                           │
//! │                                                                         │
//! │  Semantics:                                                             │
//! │    • get/set/remove are synchronous, non-transactional                  │
//! │    • last write wins, no conflict detection                             │
//! │    • a malformed or unreadable value is ABSENT on read                  │
//! │    • write failures are logged and swallowed (local storage never       │
//! │      throws at the caller)                                              │
//! │    • no schema versioning                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing::{debug, warn};

/// Synchronous string-keyed storage.
///
/// Implementations must be shareable across the containers, which each hold
/// an `Arc<dyn KeyValueStore>` and read/write independently.
pub trait KeyValueStore: Send + Sync {
    /// Reads a value. Malformed or missing entries both come back as `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Writes a value, replacing any previous one (last write wins).
    fn set(&self, key: &str, value: &str);

    /// Deletes a key. No-op when absent.
    fn remove(&self, key: &str);
}

// =============================================================================
// Memory Store
// =============================================================================

/// In-memory store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().expect("kv mutex poisoned");
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.entries.lock().expect("kv mutex poisoned");
        entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.lock().expect("kv mutex poisoned");
        entries.remove(key);
    }
}

// =============================================================================
// JSON File Store
// =============================================================================

/// File-backed store: one JSON object per storefront installation.
///
/// The whole map is rewritten on every mutation. At this data scale (a
/// session token, a user record, a handful of carts) that is far simpler
/// than an incremental format and keeps the on-disk artifact inspectable.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl JsonFileStore {
    /// Opens the store at `path`, loading any existing document.
    ///
    /// An unreadable or malformed document starts the store empty — the
    /// read contract treats corruption as absence, not as failure.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<HashMap<String, String>>(&raw) {
                Ok(map) => map,
                Err(err) => {
                    warn!(?path, %err, "Discarding malformed store document");
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };

        debug!(?path, keys = entries.len(), "Opened file store");
        JsonFileStore {
            path,
            entries: Mutex::new(entries),
        }
    }

    /// Opens the store at the platform default location.
    ///
    /// ## Platform-Specific Paths
    /// - **macOS**: `~/Library/Application Support/com.shopfront.storefront/store.json`
    /// - **Windows**: `%APPDATA%\shopfront\storefront\store.json`
    /// - **Linux**: `~/.local/share/shopfront/store.json`
    ///
    /// ## Development Override
    /// Set `SHOPFRONT_DATA_PATH` to use a custom file path.
    pub fn open_default() -> Self {
        JsonFileStore::open(Self::default_path())
    }

    fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("SHOPFRONT_DATA_PATH") {
            return PathBuf::from(path);
        }

        match ProjectDirs::from("com", "shopfront", "storefront") {
            Some(dirs) => dirs.data_dir().join("store.json"),
            // Headless environments without a home directory fall back to cwd
            None => PathBuf::from("store.json"),
        }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrites the document. Failures are logged, never propagated — the
    /// in-memory view stays authoritative for the rest of the session.
    fn flush(&self, entries: &HashMap<String, String>) {
        let raw = match serde_json::to_string_pretty(entries) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(%err, "Could not serialize store document");
                return;
            }
        };

        if let Some(parent) = self.path.parent() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                warn!(?parent, %err, "Could not create store directory");
                return;
            }
        }

        if let Err(err) = std::fs::write(&self.path, raw) {
            warn!(path = ?self.path, %err, "Could not write store document");
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().expect("kv mutex poisoned");
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.entries.lock().expect("kv mutex poisoned");
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.lock().expect("kv mutex poisoned");
        if entries.remove(key).is_some() {
            self.flush(&entries);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("auth_token"), None);

        store.set("auth_token", "session-abc");
        assert_eq!(store.get("auth_token").as_deref(), Some("session-abc"));

        store.set("auth_token", "session-def");
        assert_eq!(store.get("auth_token").as_deref(), Some("session-def"));

        store.remove("auth_token");
        assert_eq!(store.get("auth_token"), None);
    }

    #[test]
    fn test_remove_missing_key_is_noop() {
        let store = MemoryStore::new();
        store.remove("never-set");
        assert_eq!(store.get("never-set"), None);
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = std::env::temp_dir().join("shopfront-kv-roundtrip");
        let path = dir.join("store.json");
        let _ = std::fs::remove_file(&path);

        {
            let store = JsonFileStore::open(&path);
            store.set("user_data", "{\"id\":\"1\"}");
        }

        // Reopen and find the persisted value
        let store = JsonFileStore::open(&path);
        assert_eq!(store.get("user_data").as_deref(), Some("{\"id\":\"1\"}"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_malformed_document_reads_as_empty() {
        let dir = std::env::temp_dir().join("shopfront-kv-malformed");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("store.json");
        std::fs::write(&path, "this is not json {").unwrap();

        let store = JsonFileStore::open(&path);
        assert_eq!(store.get("auth_token"), None);

        // Writing through the store replaces the corrupt document
        store.set("auth_token", "session-xyz");
        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get("auth_token").as_deref(), Some("session-xyz"));

        let _ = std::fs::remove_file(&path);
    }
}
