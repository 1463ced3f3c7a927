//! Whole-document persistence for the named collections.
//!
//! Every collection is one JSON value that is loaded and saved as a unit.
//! [`JsonFileStore`] keeps one `<name>.json` per collection under a root
//! directory; [`MemoryStore`] keeps them in process.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

use chirp_core::error::{FeedError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Activity log collection.
pub const EVENTS: &str = "events";
/// Posted messages collection.
pub const MESSAGES: &str = "messages";
/// Username to password collection.
pub const USERS: &str = "users";

// ── Storage ───────────────────────────────────────────────────────────────────

/// A set of named JSON documents.
pub trait Storage {
    /// Return the last value saved under `name`, or [`Value::Null`] when
    /// nothing usable has been saved.
    fn load(&self, name: &str) -> Result<Value>;

    /// Replace the whole value stored under `name`.
    fn save(&self, name: &str, value: &Value) -> Result<()>;
}

// ── JsonFileStore ─────────────────────────────────────────────────────────────

/// One pretty-printed JSON file per collection inside `root`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// The directory is created lazily on the first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of the file backing `name`.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.json"))
    }
}

impl Storage for JsonFileStore {
    fn load(&self, name: &str) -> Result<Value> {
        let path = self.path_for(name);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(collection = name, "no backing file; starting empty");
                return Ok(Value::Null);
            }
            Err(source) => return Err(FeedError::FileRead { path, source }),
        };

        if content.trim().is_empty() {
            return Ok(Value::Null);
        }

        match serde_json::from_str(&content) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(
                    error = %e,
                    path = %path.display(),
                    "malformed collection file; treating as empty"
                );
                Ok(Value::Null)
            }
        }
    }

    fn save(&self, name: &str, value: &Value) -> Result<()> {
        let path = self.path_for(name);
        std::fs::create_dir_all(&self.root).map_err(|source| FeedError::FileWrite {
            path: self.root.clone(),
            source,
        })?;

        let json = serde_json::to_string_pretty(value)?;

        // Write to a temp file then rename so readers never see half a file.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|source| FeedError::FileWrite {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &path).map_err(|source| FeedError::FileWrite {
            path: path.clone(),
            source,
        })?;

        debug!(collection = name, path = %path.display(), "collection saved");
        Ok(())
    }
}

// ── MemoryStore ───────────────────────────────────────────────────────────────

/// Process-local storage; nothing touches the disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RefCell<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStore {
    fn load(&self, name: &str) -> Result<Value> {
        Ok(self
            .collections
            .borrow()
            .get(name)
            .cloned()
            .unwrap_or(Value::Null))
    }

    fn save(&self, name: &str, value: &Value) -> Result<()> {
        self.collections
            .borrow_mut()
            .insert(name.to_string(), value.clone());
        Ok(())
    }
}

// ── Typed helpers ─────────────────────────────────────────────────────────────

/// Load `name` as `T`, falling back to `T::default()` when the document is
/// missing or does not have the expected shape.
pub fn load_collection<T>(storage: &dyn Storage, name: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let value = storage.load(name)?;
    if value.is_null() {
        return Ok(T::default());
    }

    match serde_json::from_value(value) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            warn!(error = %e, collection = name, "unexpected collection shape; treating as empty");
            Ok(T::default())
        }
    }
}

/// Serialise `data` and overwrite `name` with it.
pub fn save_collection<T>(storage: &dyn Storage, name: &str, data: &T) -> Result<()>
where
    T: Serialize,
{
    let value = serde_json::to_value(data)?;
    storage.save(name, &value)
}

/// Load `name`, let `f` mutate it, and save it back when `f` succeeds.
///
/// Nothing is written when `f` returns an error. This is the only
/// read-modify-write path; it is not atomic across processes.
pub fn update_collection<T, R, F>(storage: &dyn Storage, name: &str, f: F) -> Result<R>
where
    T: DeserializeOwned + Serialize + Default,
    F: FnOnce(&mut T) -> Result<R>,
{
    let mut data: T = load_collection(storage, name)?;
    let out = f(&mut data)?;
    save_collection(storage, name, &data)?;
    Ok(out)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_missing_collection_is_null() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert_eq!(store.load(EVENTS).unwrap(), Value::Null);
    }

    #[test]
    fn test_file_store_round_trip_preserves_order_and_nesting() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("data"));
        let value = json!([
            {"id": 1, "author": "a", "replies": []},
            {"id": 2, "author": "b", "replies": [{"author": "c", "reply": "x"}, {"author": "d", "reply": "y"}]},
        ]);

        store.save(MESSAGES, &value).unwrap();
        assert_eq!(store.load(MESSAGES).unwrap(), value);
        assert!(store.path_for(MESSAGES).exists());
        assert!(!store.path_for(MESSAGES).with_extension("json.tmp").exists());
    }

    #[test]
    fn test_file_store_save_overwrites_whole_document() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        store.save(USERS, &json!({"alice": "pw", "bob": "pw2"})).unwrap();
        store.save(USERS, &json!({"carol": "pw3"})).unwrap();
        assert_eq!(store.load(USERS).unwrap(), json!({"carol": "pw3"}));
    }

    #[test]
    fn test_file_store_malformed_file_is_null() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        std::fs::write(store.path_for(EVENTS), "[{\"type\": ").unwrap();
        assert_eq!(store.load(EVENTS).unwrap(), Value::Null);

        std::fs::write(store.path_for(USERS), "   \n").unwrap();
        assert_eq!(store.load(USERS).unwrap(), Value::Null);
    }

    #[test]
    fn test_file_store_unreadable_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        // A directory where the file should be cannot be read as a string.
        std::fs::create_dir_all(store.path_for(EVENTS)).unwrap();
        let err = store.load(EVENTS).unwrap_err();
        assert!(matches!(err, FeedError::FileRead { .. }));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.load(EVENTS).unwrap(), Value::Null);
        let value = json!([{"type": "create", "user": "a", "timestamp": "t"}]);
        store.save(EVENTS, &value).unwrap();
        assert_eq!(store.load(EVENTS).unwrap(), value);
    }

    #[test]
    fn test_load_collection_wrong_shape_defaults() {
        let store = MemoryStore::new();
        // Older data directories seeded missing stores with `{}`.
        store.save(EVENTS, &json!({})).unwrap();
        let events: Vec<chirp_core::models::Event> = load_collection(&store, EVENTS).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_update_collection_saves_on_success() {
        let store = MemoryStore::new();
        let len = update_collection(&store, USERS, |users: &mut BTreeMap<String, String>| {
            users.insert("alice".into(), "pw".into());
            Ok(users.len())
        })
        .unwrap();
        assert_eq!(len, 1);
        assert_eq!(store.load(USERS).unwrap(), json!({"alice": "pw"}));
    }

    #[test]
    fn test_update_collection_skips_save_on_error() {
        let store = MemoryStore::new();
        store.save(USERS, &json!({"alice": "pw"})).unwrap();

        let result = update_collection(&store, USERS, |users: &mut BTreeMap<String, String>| {
            users.insert("mallory".into(), "x".into());
            Err::<(), _>(FeedError::Auth)
        });

        assert!(matches!(result, Err(FeedError::Auth)));
        assert_eq!(store.load(USERS).unwrap(), json!({"alice": "pw"}));
    }
}
