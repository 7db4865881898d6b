//! # tinyprefs
//!
//! Typed accessors over a key-value preference store.
//!
//! Declare a setting once with its key and default, then read and write it
//! as a plain typed value. The store holds a small set of native [`Value`]s;
//! this crate maps Rust types onto them and back.
//!
//! - [`Preference`] / [`OptionalPreference`] for strings, numbers, booleans,
//!   [`Data`] blobs, [`Url`]s, and arrays and dictionaries of those
//! - [`EnumPreference`] / [`OptionalEnumPreference`] for enums persisted by
//!   raw value (see [`raw_representable!`])
//! - [`Json`] for any serde type (feature `serde`)
//!
//! Reads never fail. A missing key and a stored value of the wrong type look
//! the same: the accessor returns its default, or `None`.
//!
//! The store itself is a [`PreferenceStore`] supplied by the host.
//! [`MemoryStore`] is an in-memory implementation for tests.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use tinyprefs::{
//!     EnumPreference, MemoryStore, OptionalPreference, Preference, PreferenceStore,
//!     raw_representable,
//! };
//!
//! #[derive(Debug, Clone, Copy, PartialEq)]
//! enum Theme {
//!     Light,
//!     Dark,
//! }
//!
//! raw_representable!(Theme: String {
//!     Light => "light",
//!     Dark => "dark",
//! });
//!
//! let store: Arc<dyn PreferenceStore> = Arc::new(MemoryStore::new());
//!
//! let font_size = Preference::new(store.clone(), "font_size", 14i64);
//! let username = OptionalPreference::<String>::new(store.clone(), "username");
//! let theme = EnumPreference::new(store.clone(), "theme", Theme::Light);
//!
//! assert_eq!(font_size.get(), 14);
//! assert_eq!(username.get(), None);
//!
//! font_size.set(16);
//! username.set(Some("alice".to_string()));
//! theme.set(Theme::Dark);
//!
//! assert_eq!(font_size.get(), 16);
//! assert_eq!(username.get().as_deref(), Some("alice"));
//! assert_eq!(theme.get(), Theme::Dark);
//!
//! username.set(None);
//! assert_eq!(store.object("username"), None);
//! ```

mod accessor;
#[cfg(feature = "serde")]
mod error;
#[cfg(feature = "serde")]
mod json;
mod memory;
mod raw;
mod store;
mod value;

pub use accessor::{OptionalPreference, Preference};
#[cfg(feature = "serde")]
pub use error::ValueError;
#[cfg(feature = "serde")]
pub use json::Json;
pub use memory::MemoryStore;
pub use raw::{EnumPreference, OptionalEnumPreference, RawRepresentable};
pub use store::PreferenceStore;
pub use url::Url;
pub use value::{Data, PreferenceValue, Value};
