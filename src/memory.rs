//! In-memory preference store.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use url::Url;

use crate::store::PreferenceStore;
use crate::value::Value;

/// A [`PreferenceStore`] backed by a single in-memory map.
///
/// Nothing is persisted. Useful as a test double for accessors and as a
/// scratch store; tests can seed it with arbitrary (including mistyped)
/// values through [`FromIterator`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all keys currently set, in no particular order.
    pub fn keys(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    /// Checks if the store contains a given key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.read().contains_key(key)
    }

    /// Returns number of stored entries.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.write().clear();
    }

    // A panic while holding the lock cannot leave the map half-updated, so
    // poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Value>> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Value>> {
        self.data.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PreferenceStore for MemoryStore {
    fn object(&self, key: &str) -> Option<Value> {
        self.read().get(key).cloned()
    }

    fn url(&self, key: &str) -> Option<Url> {
        match self.read().get(key) {
            Some(Value::Url(url)) => Some(url.clone()),
            _ => None,
        }
    }

    fn set_object(&self, key: &str, value: Option<Value>) {
        match value {
            Some(value) => {
                log::trace!("set `{key}` to {}", value.kind());
                self.write().insert(key.to_string(), value);
            }
            None => self.remove(key),
        }
    }

    fn set_url(&self, key: &str, url: Option<Url>) {
        self.set_object(key, url.map(Value::Url));
    }

    fn remove(&self, key: &str) {
        let removed = self.write().remove(key).is_some();
        if removed {
            log::trace!("removed `{key}`");
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let data = iter
            .into_iter()
            .map(|(key, value)| (key.into(), value))
            .collect();
        Self {
            data: RwLock::new(data),
        }
    }
}
