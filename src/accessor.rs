//! Typed accessors for plain values.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::store::PreferenceStore;
use crate::value::PreferenceValue;

/// A setting with a default value.
///
/// Reads return the stored value when it coerces to `T`, and the default
/// otherwise. The default is never written to the store.
///
/// # Example
/// ```rust
/// use std::sync::Arc;
/// use tinyprefs::{MemoryStore, Preference};
///
/// let store = Arc::new(MemoryStore::new());
/// let theme = Preference::new(store, "theme", "light".to_string());
///
/// assert_eq!(theme.get(), "light");
/// theme.set("dark".to_string());
/// assert_eq!(theme.get(), "dark");
/// ```
#[derive(Clone)]
pub struct Preference<T> {
    store: Arc<dyn PreferenceStore>,
    key: String,
    default: T,
}

impl<T: PreferenceValue + Clone> Preference<T> {
    /// Bind `key` in `store` with the value returned while it is unset.
    pub fn new(store: Arc<dyn PreferenceStore>, key: impl Into<String>, default: T) -> Self {
        Self {
            store,
            key: key.into(),
            default,
        }
    }

    /// The key this setting is stored under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The value returned when the key is unset or holds a mismatched value.
    pub fn default_value(&self) -> &T {
        &self.default
    }

    /// Returns the stored value, or the default if the key is unset or holds
    /// a value that does not coerce to `T`.
    pub fn get(&self) -> T {
        T::load(self.store.as_ref(), &self.key).unwrap_or_else(|| self.default.clone())
    }

    /// Writes `value` under the key.
    pub fn set(&self, value: T) {
        value.save(self.store.as_ref(), &self.key);
    }

    /// Removes the stored value so reads fall back to the default again.
    pub fn reset(&self) {
        self.store.remove(&self.key);
    }
}

/// A setting without a default.
///
/// Reads return `None` both when the key is unset and when the stored value
/// does not coerce to `T`. Writing `None` removes the key.
pub struct OptionalPreference<T> {
    store: Arc<dyn PreferenceStore>,
    key: String,
    _marker: PhantomData<fn() -> T>,
}

// `T` is never held, so cloning does not require `T: Clone`.
impl<T> Clone for OptionalPreference<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            key: self.key.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: PreferenceValue> OptionalPreference<T> {
    /// Bind `key` in `store`.
    pub fn new(store: Arc<dyn PreferenceStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            _marker: PhantomData,
        }
    }

    /// The key this setting is stored under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the stored value, or `None` if the key is unset or holds a
    /// value that does not coerce to `T`.
    pub fn get(&self) -> Option<T> {
        T::load(self.store.as_ref(), &self.key)
    }

    /// Writes `value` under the key; `None` removes the key.
    pub fn set(&self, value: Option<T>) {
        match value {
            Some(value) => value.save(self.store.as_ref(), &self.key),
            None => self.store.remove(&self.key),
        }
    }

    /// Same as `set(None)`.
    pub fn remove(&self) {
        self.store.remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryStore, Value};
    use pretty_assertions::assert_eq;
    use url::Url;

    #[test]
    fn test_default_until_set() {
        let store = Arc::new(MemoryStore::new());
        let count = Preference::new(store.clone(), "count", 128i64);

        assert_eq!(count.get(), 128);
        assert!(store.is_empty());

        count.set(255);
        assert_eq!(count.get(), 255);
        assert_eq!(store.object("count"), Some(Value::Integer(255)));
    }

    #[test]
    fn test_last_write_wins() {
        let store = Arc::new(MemoryStore::new());
        let names = Preference::new(store, "names", vec!["a".to_string()]);

        names.set(vec!["b".to_string(), "c".to_string()]);
        names.set(vec!["d".to_string()]);
        assert_eq!(names.get(), vec!["d".to_string()]);
    }

    #[test]
    fn test_reset_restores_default() {
        let store = Arc::new(MemoryStore::new());
        let enabled = Preference::new(store.clone(), "enabled", true);

        enabled.set(false);
        assert!(!enabled.get());

        enabled.reset();
        assert!(enabled.get());
        assert!(!store.contains_key("enabled"));
        assert!(*enabled.default_value());
    }

    #[test]
    fn test_wrong_type_falls_back() {
        let store: Arc<MemoryStore> =
            Arc::new([("key1", Value::Integer(7))].into_iter().collect());
        let string = Preference::new(store.clone(), "key1", "str".to_string());
        let opt_string = OptionalPreference::<String>::new(store.clone(), "key1");

        assert_eq!(string.get(), "str");
        assert_eq!(opt_string.get(), None);

        // The mistyped value is left alone until overwritten
        assert_eq!(store.object("key1"), Some(Value::Integer(7)));
    }

    #[test]
    fn test_accessors_share_a_key() {
        let store = Arc::new(MemoryStore::new());
        let required = Preference::new(store.clone(), "shared", 1i32);
        let optional = OptionalPreference::<i32>::new(store, "shared");

        optional.set(Some(5));
        assert_eq!(required.get(), 5);

        optional.remove();
        assert_eq!(required.get(), 1);
        assert_eq!(required.key(), optional.key());
    }

    #[test]
    fn test_optional_clone_without_clone_value() {
        struct Opaque;

        impl PreferenceValue for Opaque {
            fn to_value(&self) -> Option<Value> {
                Some(Value::Bool(true))
            }

            fn from_value(value: Value) -> Option<Self> {
                matches!(value, Value::Bool(true)).then_some(Opaque)
            }
        }

        let store = Arc::new(MemoryStore::new());
        let opaque = OptionalPreference::<Opaque>::new(store.clone(), "opaque");
        let copy = opaque.clone();

        opaque.set(Some(Opaque));
        assert!(copy.get().is_some());
        assert_eq!(copy.key(), "opaque");
    }

    #[test]
    fn test_optional_none_removes_key() {
        let store = Arc::new(MemoryStore::new());
        let opt_int = OptionalPreference::<i64>::new(store.clone(), "key16");

        assert_eq!(opt_int.get(), None);
        opt_int.set(Some(512));
        assert_eq!(opt_int.get(), Some(512));

        opt_int.set(None);
        assert_eq!(opt_int.get(), None);
        assert!(!store.keys().contains(&"key16".to_string()));
    }

    #[test]
    fn test_url_goes_through_url_path() {
        let store = Arc::new(MemoryStore::new());
        let default = Url::parse("file:///").unwrap();
        let url = Url::parse("https://google.com").unwrap();
        let homepage = Preference::new(store.clone(), "homepage", default.clone());

        assert_eq!(homepage.get(), default);
        homepage.set(url.clone());
        assert_eq!(homepage.get(), url.clone());
        assert_eq!(store.url("homepage"), Some(url));
    }

    #[test]
    fn test_unrepresentable_write_is_skipped() {
        let store = Arc::new(MemoryStore::new());
        let big = Preference::new(store.clone(), "big", 0u64);

        big.set(10);
        big.set(u64::MAX);
        assert_eq!(big.get(), 10);
        assert_eq!(store.object("big"), Some(Value::Integer(10)));
    }
}
