//! The preference store contract.

use url::Url;

use crate::value::Value;

/// A flat key-value store holding [`Value`]s.
///
/// Absence is distinct from any stored value: `object` returns `None` for an
/// unset key, and writing `None` removes the key instead of storing a
/// placeholder.
///
/// Methods take `&self`. The store is shared between accessors and is
/// expected to serialize access internally.
pub trait PreferenceStore: Send + Sync {
    /// Returns the value stored under `key`.
    fn object(&self, key: &str) -> Option<Value>;

    /// Returns the URL stored under `key`, or `None` if the key is unset or
    /// holds something else.
    fn url(&self, key: &str) -> Option<Url> {
        match self.object(key)? {
            Value::Url(url) => Some(url),
            _ => None,
        }
    }

    /// Stores `value` under `key`; `None` removes the key.
    fn set_object(&self, key: &str, value: Option<Value>);

    /// Stores `url` under `key` through the URL-specific path; `None` removes the key.
    ///
    /// Backends that cannot round-trip URLs through [`set_object`](Self::set_object)
    /// override this together with [`url`](Self::url).
    fn set_url(&self, key: &str, url: Option<Url>) {
        self.set_object(key, url.map(Value::Url));
    }

    /// Removes `key` from the store.
    fn remove(&self, key: &str) {
        self.set_object(key, None);
    }
}
