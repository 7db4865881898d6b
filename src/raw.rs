//! Accessors for enumerations persisted through a raw value.

use std::any::type_name;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::store::PreferenceStore;
use crate::value::{PreferenceValue, coerce};

/// A type that maps to and from a primitive raw value.
///
/// Every instance has a raw value; not every raw value names an instance.
/// Use [`raw_representable!`](crate::raw_representable) for fieldless enums.
pub trait RawRepresentable: Sized {
    /// The primitive type actually written to the store.
    type Raw: PreferenceValue;

    fn raw_value(&self) -> Self::Raw;

    /// Returns `None` if `raw` names no instance.
    fn from_raw_value(raw: Self::Raw) -> Option<Self>;
}

/// Implement [`RawRepresentable`] for a fieldless enum.
///
/// Each variant is listed with its raw value; the raw type must implement
/// `From` for the literal used and `PartialEq`.
///
/// # Example
/// ```rust
/// use tinyprefs::{RawRepresentable, raw_representable};
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Color {
///     Red,
///     Blue,
///     Yellow,
/// }
///
/// raw_representable!(Color: String {
///     Red => "red",
///     Blue => "blue",
///     Yellow => "yellow",
/// });
///
/// assert_eq!(Color::Blue.raw_value(), "blue");
/// assert_eq!(Color::from_raw_value("yellow".to_string()), Some(Color::Yellow));
/// assert_eq!(Color::from_raw_value("purple".to_string()), None);
/// ```
#[macro_export]
macro_rules! raw_representable {
    ($ty:ty: $raw:ty { $($variant:ident => $value:expr),+ $(,)? }) => {
        impl $crate::RawRepresentable for $ty {
            type Raw = $raw;

            fn raw_value(&self) -> Self::Raw {
                match self {
                    $(Self::$variant => <$raw>::from($value),)+
                }
            }

            fn from_raw_value(raw: Self::Raw) -> ::core::option::Option<Self> {
                $(
                    if raw == <$raw>::from($value) {
                        return ::core::option::Option::Some(Self::$variant);
                    }
                )+
                ::core::option::Option::None
            }
        }
    };
}

// Raw values are primitives, so both directions use the generic object
// operations regardless of `E::Raw`.

fn load_raw<E: RawRepresentable>(store: &dyn PreferenceStore, key: &str) -> Option<E> {
    let raw = store.object(key).and_then(|value| coerce::<E::Raw>(key, value))?;
    let value = E::from_raw_value(raw);
    if value.is_none() {
        log::debug!(
            "stored raw value under `{key}` is not a valid {}",
            type_name::<E>()
        );
    }
    value
}

fn save_raw<E: RawRepresentable>(store: &dyn PreferenceStore, key: &str, value: &E) {
    match value.raw_value().to_value() {
        Some(raw) => store.set_object(key, Some(raw)),
        None => log::warn!(
            "raw value of {} has no preference representation, `{key}` left unchanged",
            type_name::<E>()
        ),
    }
}

/// An enumeration setting with a default value.
///
/// Reads fall back to the default when the key is unset, when the stored
/// value is not of the raw type, or when it is not a valid raw value.
#[derive(Clone)]
pub struct EnumPreference<E> {
    store: Arc<dyn PreferenceStore>,
    key: String,
    default: E,
}

impl<E: RawRepresentable + Clone> EnumPreference<E> {
    /// Bind `key` in `store` with the value returned while it is unset.
    pub fn new(store: Arc<dyn PreferenceStore>, key: impl Into<String>, default: E) -> Self {
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

    /// The value returned when the key is unset or holds an invalid raw value.
    pub fn default_value(&self) -> &E {
        &self.default
    }

    /// Returns the stored instance, or the default.
    pub fn get(&self) -> E {
        load_raw(self.store.as_ref(), &self.key).unwrap_or_else(|| self.default.clone())
    }

    /// Writes the raw value of `value` under the key.
    pub fn set(&self, value: E) {
        save_raw(self.store.as_ref(), &self.key, &value);
    }

    /// Removes the stored value so reads fall back to the default again.
    pub fn reset(&self) {
        self.store.remove(&self.key);
    }
}

/// An enumeration setting without a default.
pub struct OptionalEnumPreference<E> {
    store: Arc<dyn PreferenceStore>,
    key: String,
    _marker: PhantomData<fn() -> E>,
}

impl<E> Clone for OptionalEnumPreference<E> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            key: self.key.clone(),
            _marker: PhantomData,
        }
    }
}

impl<E: RawRepresentable> OptionalEnumPreference<E> {
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

    /// Returns `None` for an unset key and for an invalid raw value alike.
    pub fn get(&self) -> Option<E> {
        load_raw(self.store.as_ref(), &self.key)
    }

    /// Writes the raw value of `value`; `None` removes the key.
    pub fn set(&self, value: Option<E>) {
        match value {
            Some(value) => save_raw(self.store.as_ref(), &self.key, &value),
            None => self.store.remove(&self.key),
        }
    }

    /// Same as `set(None)`.
    pub fn remove(&self) {
        self.store.remove(&self.key);
    }
}
