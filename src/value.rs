//! Store-native values and the coercions between them and Rust types.

use std::any::type_name;
use std::collections::{BTreeMap, HashMap};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use url::Url;

use crate::store::PreferenceStore;

/// A value as the preference store holds it.
///
/// There is no null variant: an unset key is `None`, never a
/// stored value.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    /// All integer types are stored widened to `i64`.
    Integer(i64),
    /// `f32` is stored widened to `f64`.
    Float(f64),
    Bool(bool),
    /// Opaque binary blob
    Data(Data),
    /// Ordered sequence
    Array(Vec<Value>),
    /// String-keyed mapping; key order carries no meaning.
    Dictionary(BTreeMap<String, Value>),
    /// Written and read through the store's URL-specific operations.
    Url(Url),
}

impl Value {
    /// Short name of the variant, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::Data(_) => "data",
            Self::Array(_) => "array",
            Self::Dictionary(_) => "dictionary",
            Self::Url(_) => "url",
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Data> for Value {
    fn from(value: Data) -> Self {
        Self::Data(value)
    }
}

impl From<Url> for Value {
    fn from(value: Url) -> Self {
        Self::Url(value)
    }
}

/// An opaque binary blob.
///
/// Wrapping the bytes keeps blobs apart from `Vec<T>`, which is stored as an
/// ordered sequence of values.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Data(pub Vec<u8>);

impl Data {
    /// Unwraps the bytes.
    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for Data {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Data {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl AsRef<[u8]> for Data {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// A Rust type that can be written to and read back from a preference store.
///
/// `to_value` returns `None` when the value has no store representation; the
/// write is then skipped. `from_value` returns `None` when the stored value
/// does not coerce to `Self`.
///
/// `load` and `save` pick the store operation. They go through the generic
/// object operations unless a type overrides them, which is how [`Url`] is
/// routed to the URL-specific operations without inspecting values at runtime.
pub trait PreferenceValue: Sized {
    /// Converts to the stored form, or `None` if there is none.
    fn to_value(&self) -> Option<Value>;

    /// Coerces a stored value, or `None` if it does not fit `Self` exactly.
    fn from_value(value: Value) -> Option<Self>;

    /// Reads `key` from `store`, coercing the stored value to `Self`.
    fn load<S: PreferenceStore + ?Sized>(store: &S, key: &str) -> Option<Self> {
        store.object(key).and_then(|value| coerce(key, value))
    }

    /// Writes `self` to `store` under `key`.
    fn save<S: PreferenceStore + ?Sized>(&self, store: &S, key: &str) {
        match self.to_value() {
            Some(value) => store.set_object(key, Some(value)),
            None => log::warn!(
                "{} has no preference representation, `{key}` left unchanged",
                type_name::<Self>()
            ),
        }
    }
}

/// Coerces a stored value, logging when the stored type does not match.
pub(crate) fn coerce<T: PreferenceValue>(key: &str, value: Value) -> Option<T> {
    let kind = value.kind();
    let coerced = T::from_value(value);
    if coerced.is_none() {
        log::debug!(
            "stored {kind} under `{key}` does not coerce to {}",
            type_name::<T>()
        );
    }
    coerced
}

impl PreferenceValue for Value {
    fn to_value(&self) -> Option<Value> {
        Some(self.clone())
    }

    fn from_value(value: Value) -> Option<Self> {
        Some(value)
    }
}

impl PreferenceValue for String {
    fn to_value(&self) -> Option<Value> {
        Some(Value::String(self.clone()))
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(string) => Some(string),
            _ => None,
        }
    }
}

impl PreferenceValue for bool {
    fn to_value(&self) -> Option<Value> {
        Some(Value::Bool(*self))
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bool(flag) => Some(flag),
            _ => None,
        }
    }
}

macro_rules! impl_integer {
    ($($ty:ty),+ $(,)?) => {$(
        impl PreferenceValue for $ty {
            fn to_value(&self) -> Option<Value> {
                i64::try_from(*self).ok().map(Value::Integer)
            }

            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::Integer(int) => <$ty>::try_from(int).ok(),
                    _ => None,
                }
            }
        }
    )+};
}

impl_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl PreferenceValue for f64 {
    fn to_value(&self) -> Option<Value> {
        Some(Value::Float(*self))
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float(float) => Some(float),
            // Integers beyond 2^53 would round
            Value::Integer(int) if int.unsigned_abs() <= 1 << 53 => Some(int as f64),
            _ => None,
        }
    }
}

impl PreferenceValue for f32 {
    fn to_value(&self) -> Option<Value> {
        Some(Value::Float(f64::from(*self)))
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float(float) => {
                let narrowed = float as f32;
                (f64::from(narrowed) == float || float.is_nan()).then_some(narrowed)
            }
            Value::Integer(int) if int.unsigned_abs() <= 1 << 24 => Some(int as f32),
            _ => None,
        }
    }
}

impl PreferenceValue for Data {
    fn to_value(&self) -> Option<Value> {
        Some(Value::Data(self.clone()))
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Data(data) => Some(data),
            _ => None,
        }
    }
}

impl PreferenceValue for Url {
    fn to_value(&self) -> Option<Value> {
        Some(Value::Url(self.clone()))
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Url(url) => Some(url),
            _ => None,
        }
    }

    fn load<S: PreferenceStore + ?Sized>(store: &S, key: &str) -> Option<Self> {
        store.url(key)
    }

    fn save<S: PreferenceStore + ?Sized>(&self, store: &S, key: &str) {
        store.set_url(key, Some(self.clone()));
    }
}

// Containers coerce all-or-nothing: one element of the wrong type fails the
// whole read.

impl<T: PreferenceValue> PreferenceValue for Vec<T> {
    fn to_value(&self) -> Option<Value> {
        self.iter()
            .map(T::to_value)
            .collect::<Option<Vec<_>>>()
            .map(Value::Array)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Array(items) => items.into_iter().map(T::from_value).collect(),
            _ => None,
        }
    }
}

macro_rules! impl_dictionary {
    ($($map:ident),+ $(,)?) => {$(
        impl<T: PreferenceValue> PreferenceValue for $map<String, T> {
            fn to_value(&self) -> Option<Value> {
                self.iter()
                    .map(|(key, value)| Some((key.clone(), value.to_value()?)))
                    .collect::<Option<BTreeMap<_, _>>>()
                    .map(Value::Dictionary)
            }

            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::Dictionary(entries) => entries
                        .into_iter()
                        .map(|(key, value)| Some((key, T::from_value(value)?)))
                        .collect(),
                    _ => None,
                }
            }
        }
    )+};
}

impl_dictionary!(BTreeMap, HashMap);

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{MemoryStore, Preference};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_integer_range_checks() {
        assert_eq!(u8::from_value(Value::Integer(255)), Some(255));
        assert_eq!(u8::from_value(Value::Integer(256)), None);
        assert_eq!(i32::from_value(Value::Integer(-1)), Some(-1));
        assert_eq!(u32::from_value(Value::Integer(-1)), None);

        // Above i64::MAX there is no integer representation
        assert_eq!(u64::MAX.to_value(), None);
        assert_eq!(42u64.to_value(), Some(Value::Integer(42)));
    }

    #[test]
    fn test_numeric_coercions() {
        assert_eq!(f64::from_value(Value::Integer(3)), Some(3.0));
        assert_eq!(f32::from_value(Value::Float(0.25)), Some(0.25));
        assert_eq!(i64::from_value(Value::Float(3.0)), None);
        assert_eq!(bool::from_value(Value::Integer(1)), None);
        assert_eq!(String::from_value(Value::Integer(1)), None);
    }

    #[test]
    fn test_lossy_float_reads_are_rejected() {
        assert_eq!(f32::from_value(Value::Float(1e300)), None);
        assert_eq!(f32::from_value(Value::Float(0.1)), None);
        assert_eq!(f32::from_value(Value::Float(-44.3f32 as f64)), Some(-44.3));
        assert!(f32::from_value(Value::Float(f64::NAN)).is_some_and(f32::is_nan));
        assert_eq!(f32::from_value(Value::Integer(1 << 24)), Some(16_777_216.0));
        assert_eq!(f32::from_value(Value::Integer((1 << 24) + 1)), None);

        assert_eq!(f64::from_value(Value::Integer(i64::MAX)), None);
        assert_eq!(f64::from_value(Value::Integer(i64::MIN)), None);
        assert_eq!(
            f64::from_value(Value::Integer(-(1 << 53))),
            Some(-9_007_199_254_740_992.0)
        );
    }

    #[test]
    fn test_out_of_range_float_falls_back_to_default() {
        let store: Arc<MemoryStore> = Arc::new(
            [
                ("f", Value::Float(1e300)),
                ("p", Value::Float(0.1)),
                ("i", Value::Integer(i64::MAX)),
            ]
            .into_iter()
            .collect(),
        );

        assert_eq!(Preference::new(store.clone(), "f", 0.25f32).get(), 0.25);
        assert_eq!(Preference::new(store.clone(), "p", 0.5f32).get(), 0.5);
        assert_eq!(Preference::new(store.clone(), "p", 0.5f64).get(), 0.1);
        assert_eq!(Preference::new(store, "i", 1.5f64).get(), 1.5);
    }

    #[test]
    fn test_containers_coerce_all_or_nothing() {
        let mixed = Value::Array(vec![Value::Integer(1), Value::from("two")]);
        assert_eq!(Vec::<i64>::from_value(mixed.clone()), None);
        assert_eq!(
            Vec::<Value>::from_value(mixed),
            Some(vec![Value::Integer(1), Value::from("two")])
        );

        let entries = BTreeMap::from([
            ("a".to_string(), Value::Integer(1)),
            ("b".to_string(), Value::Bool(true)),
        ]);
        assert_eq!(
            HashMap::<String, i64>::from_value(Value::Dictionary(entries.clone())),
            None
        );
        assert_eq!(
            BTreeMap::<String, Value>::from_value(Value::Dictionary(entries.clone())),
            Some(entries)
        );
    }

    #[test]
    fn test_nested_container_with_unrepresentable_element() {
        let values = vec![1u64, u64::MAX];
        assert_eq!(values.to_value(), None);
    }

    #[test]
    fn test_data_is_not_an_array() {
        let blob = Data::from(&b"str"[..]);
        assert_eq!(blob.to_value(), Some(Value::Data(blob.clone())));
        assert_eq!(Vec::<u8>::from_value(Value::Data(blob.clone())), None);
        assert_eq!(Data::from_value(Value::Array(vec![])), None);
        assert_eq!(blob.as_ref(), b"str");
    }

    #[test]
    fn test_value_kind() {
        assert_eq!(Value::from("x").kind(), "string");
        assert_eq!(Value::Dictionary(BTreeMap::new()).kind(), "dictionary");
    }
}
