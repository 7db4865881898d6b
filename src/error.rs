//! Error types for the `serde_json` bridge.
//!
//! Accessors never surface errors: a value that fails to coerce falls back
//! to the default (or `None`). These errors only come out of the explicit
//! conversions between [`Value`](crate::Value) and `serde_json::Value`, so
//! the module only exists with the `serde` feature.

use thiserror::Error;

/// Errors that can occur while converting into a [`Value`](crate::Value).
#[derive(Debug, Error)]
pub enum ValueError {
    /// `null` has no stored representation; absence is modelled by removing the key.
    #[error("null cannot be stored as a preference value")]
    Null,
    /// A number that fits neither `i64` nor `f64`.
    #[error("unsupported number: {0}")]
    UnsupportedNumber(String),
    /// Serialization or deserialization failure
    #[error("serialization error: {0}")]
    Serialization(String),
}
