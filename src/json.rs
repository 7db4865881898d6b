//! Bridge between [`Value`] and `serde_json`, and storage of serde types.

use std::any::type_name;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::error::ValueError;
use crate::value::{Data, PreferenceValue, Value};

impl From<serde_json::Error> for ValueError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<Value> for JsonValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(string) => Self::String(string),
            Value::Integer(int) => Self::from(int),
            Value::Float(float) => Self::from(float),
            Value::Bool(flag) => Self::Bool(flag),
            Value::Data(Data(bytes)) => Self::Array(bytes.into_iter().map(Self::from).collect()),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Dictionary(entries) => Self::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
            Value::Url(url) => Self::String(url.as_str().to_owned()),
        }
    }
}

impl TryFrom<JsonValue> for Value {
    type Error = ValueError;

    /// `null` members of objects are dropped; anywhere else `null` is an error.
    fn try_from(value: JsonValue) -> Result<Self, Self::Error> {
        Ok(match value {
            JsonValue::Null => return Err(ValueError::Null),
            JsonValue::Bool(flag) => Self::Bool(flag),
            JsonValue::Number(number) => match number.as_i64() {
                Some(int) => Self::Integer(int),
                None => number
                    .as_f64()
                    .map(Self::Float)
                    .ok_or_else(|| ValueError::UnsupportedNumber(number.to_string()))?,
            },
            JsonValue::String(string) => Self::String(string),
            JsonValue::Array(items) => Self::Array(
                items
                    .into_iter()
                    .map(Self::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            JsonValue::Object(entries) => Self::Dictionary(
                entries
                    .into_iter()
                    .filter(|(_, value)| !value.is_null())
                    .map(|(key, value)| Ok((key, Self::try_from(value)?)))
                    .collect::<Result<_, ValueError>>()?,
            ),
        })
    }
}

/// Stores any serde type through its structural form.
///
/// Structs become dictionaries, sequences become arrays. A value that fails
/// to serialize is logged and not written; a stored value that does not
/// deserialize reads as absent.
///
/// # Example
/// ```rust
/// use std::sync::Arc;
/// use serde::{Deserialize, Serialize};
/// use tinyprefs::{Json, MemoryStore, OptionalPreference};
///
/// #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// struct Window {
///     width: u32,
///     height: u32,
/// }
///
/// let store = Arc::new(MemoryStore::new());
/// let window = OptionalPreference::<Json<Window>>::new(store, "window");
///
/// window.set(Some(Json(Window { width: 800, height: 600 })));
/// assert_eq!(window.get(), Some(Json(Window { width: 800, height: 600 })));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    /// Unwraps the serde value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: Serialize + DeserializeOwned> PreferenceValue for Json<T> {
    fn to_value(&self) -> Option<Value> {
        let encoded = serde_json::to_value(&self.0)
            .map_err(ValueError::from)
            .and_then(Value::try_from);
        match encoded {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("failed to encode {}: {e}", type_name::<T>());
                None
            }
        }
    }

    fn from_value(value: Value) -> Option<Self> {
        serde_json::from_value(JsonValue::from(value)).map(Json).ok()
    }
}
