// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The core trait for storage backends.
//!
//! [`KeyValueStore`] defines the interface every backend implements. It is deliberately
//! small and untyped: the `shelf` crate layers key prefixes, freshness checks, schema
//! versions and eviction on top of it.

use crate::{Error, StoredValue};

/// Trait for asynchronous key-value storage backends.
///
/// All five core methods are required: `get`, `set`, `remove`, `keys` and `clear`.
/// Only `len` and `is_empty` have default implementations:
/// - `len`: Returns `None` (not all stores track size)
/// - `is_empty`: Delegates to `len`
///
/// Implementations give no ordering guarantee between concurrent calls on the same
/// key; the last write to land wins.
#[cfg_attr(
    any(test, feature = "dynamic-store"),
    dynosaur::dynosaur(pub(crate) DynKeyValueStore = dyn(box) KeyValueStore, bridge(none))
)]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`, returning `None` if it is absent.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<StoredValue>, Error>> + Send;

    /// Writes `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: StoredValue) -> impl Future<Output = Result<(), Error>> + Send;

    /// Removes the value stored under `key`. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), Error>> + Send;

    /// Lists every key currently held by the store, in no particular order.
    fn keys(&self) -> impl Future<Output = Result<Vec<String>, Error>> + Send;

    /// Removes every value held by the store, including keys written by other subsystems.
    fn clear(&self) -> impl Future<Output = Result<(), Error>> + Send;

    /// Returns the number of entries, if supported.
    ///
    /// Returns `None` for implementations that don't track size.
    fn len(&self) -> Option<u64> {
        None
    }

    /// Returns `true` if the store contains no entries.
    ///
    /// Returns `None` for implementations that don't track size.
    fn is_empty(&self) -> Option<bool> {
        self.len().map(|len| len == 0)
    }
}
