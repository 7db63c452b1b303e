// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Storage abstractions for the shelf book asset cache.
//!
//! This crate defines the [`KeyValueStore`] trait that every storage backend must satisfy,
//! along with [`StoredValue`] for the two shapes of data a store holds, [`CacheEntry`] for
//! timestamped and versioned payloads, and the [`Error`] type for fallible operations.
//!
//! # Overview
//!
//! A store is an untyped, string-keyed, asynchronous map. It may be shared with other
//! subsystems, so it knows nothing about cache prefixes, freshness windows or schema
//! versions. Those policies live in the `shelf` crate, which layers them on top of any
//! [`KeyValueStore`].
//!
//! Values come in two shapes:
//!
//! - [`StoredValue::Raw`] holds bytes with no metadata attached.
//! - [`StoredValue::Wrapped`] holds bytes inside a [`CacheEntry`] that records when the
//!   entry was written and under which schema version.
//!
//! Age-based eviction only ever looks at wrapped values.
//!
//! # Implementing a Store
//!
//! ```
//! use shelf_tier::{Error, KeyValueStore, StoredValue};
//! use std::collections::HashMap;
//! use std::sync::RwLock;
//!
//! struct SimpleStore(RwLock<HashMap<String, StoredValue>>);
//!
//! impl KeyValueStore for SimpleStore {
//!     async fn get(&self, key: &str) -> Result<Option<StoredValue>, Error> {
//!         Ok(self.0.read().unwrap().get(key).cloned())
//!     }
//!
//!     async fn set(&self, key: &str, value: StoredValue) -> Result<(), Error> {
//!         self.0.write().unwrap().insert(key.to_owned(), value);
//!         Ok(())
//!     }
//!
//!     async fn remove(&self, key: &str) -> Result<(), Error> {
//!         self.0.write().unwrap().remove(key);
//!         Ok(())
//!     }
//!
//!     async fn keys(&self) -> Result<Vec<String>, Error> {
//!         Ok(self.0.read().unwrap().keys().cloned().collect())
//!     }
//!
//!     async fn clear(&self) -> Result<(), Error> {
//!         self.0.write().unwrap().clear();
//!         Ok(())
//!     }
//! }
//! ```
//!
//! # Dynamic Dispatch
//!
//! Enable the `dynamic-store` feature for [`DynamicStore`], which wraps any `KeyValueStore`
//! in a clonable, type-erased container.

mod entry;
pub mod error;
pub(crate) mod store;
#[cfg(any(feature = "test-util", test))]
pub mod testing;
mod value;

#[cfg(any(test, feature = "dynamic-store"))]
mod dynamic;

#[cfg(any(test, feature = "dynamic-store"))]
#[doc(inline)]
pub use dynamic::{DynamicStore, DynamicStoreExt};
#[doc(inline)]
pub use entry::CacheEntry;
#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use store::KeyValueStore;
#[doc(inline)]
pub use value::StoredValue;
