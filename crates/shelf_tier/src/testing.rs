// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Mock store implementation for testing.
//!
//! This module provides `MockStore`, a configurable in-memory store that
//! records all operations and supports failure injection for testing error paths.

use std::{collections::HashMap, sync::Arc};

use parking_lot::Mutex;

use crate::{Error, KeyValueStore, StoredValue};

/// Recorded store operation with full context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    /// A get operation was performed with the given key.
    Get(String),
    /// A set operation was performed with the given key and value.
    Set {
        /// The key that was written.
        key: String,
        /// The value that was written.
        value: StoredValue,
    },
    /// A remove operation was performed with the given key.
    Remove(String),
    /// The keys were enumerated.
    Keys,
    /// A clear operation was performed.
    Clear,
}

type FailPredicate = Box<dyn Fn(&StoreOp) -> bool + Send + Sync>;

/// A configurable mock store for testing.
///
/// This store keeps values in memory and can be configured to fail
/// operations on demand, making it useful for testing error handling paths.
/// All operations are recorded for later verification, including failed ones.
///
/// # Examples
///
/// ```
/// use shelf_tier::{KeyValueStore, StoredValue, testing::{MockStore, StoreOp}};
///
/// # futures::executor::block_on(async {
/// let store = MockStore::new();
///
/// store.set("thumb_a", StoredValue::Raw(vec![1, 2])).await.unwrap();
/// let value = store.get("thumb_a").await.unwrap();
/// assert_eq!(value, Some(StoredValue::Raw(vec![1, 2])));
///
/// assert_eq!(store.operations(), vec![
///     StoreOp::Set { key: "thumb_a".to_string(), value: StoredValue::Raw(vec![1, 2]) },
///     StoreOp::Get("thumb_a".to_string()),
/// ]);
/// # });
/// ```
///
/// # Failure Injection
///
/// ```
/// use shelf_tier::{KeyValueStore, testing::{MockStore, StoreOp}};
///
/// # futures::executor::block_on(async {
/// let store = MockStore::new();
///
/// // Fail only removals of a specific key
/// store.fail_when(|op| matches!(op, StoreOp::Remove(k) if k == "meta_locked"));
/// assert!(store.remove("meta_locked").await.is_err());
/// assert!(store.remove("meta_other").await.is_ok());
/// # });
/// ```
pub struct MockStore {
    data: Arc<Mutex<HashMap<String, StoredValue>>>,
    operations: Arc<Mutex<Vec<StoreOp>>>,
    fail_when: Arc<Mutex<Option<FailPredicate>>>,
}

impl std::fmt::Debug for MockStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockStore")
            .field("data", &self.data)
            .field("operations", &self.operations)
            .field("fail_when", &self.fail_when.lock().is_some())
            .finish()
    }
}

impl Clone for MockStore {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            operations: Arc::clone(&self.operations),
            fail_when: Arc::clone(&self.fail_when),
        }
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockStore {
    /// Creates a new empty mock store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_data(HashMap::new())
    }

    /// Creates a mock store with pre-populated data.
    #[must_use]
    pub fn with_data(data: HashMap<String, StoredValue>) -> Self {
        Self {
            data: Arc::new(Mutex::new(data)),
            operations: Arc::new(Mutex::new(Vec::new())),
            fail_when: Arc::new(Mutex::new(None)),
        }
    }

    /// Writes a value directly, bypassing recording and failure injection.
    pub fn seed(&self, key: impl Into<String>, value: StoredValue) {
        self.data.lock().insert(key.into(), value);
    }

    /// Reads a value directly, bypassing recording and failure injection.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<StoredValue> {
        self.data.lock().get(key).cloned()
    }

    /// Returns the number of entries in the store.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.data.lock().len()
    }

    /// Returns true if the store contains the given key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.lock().contains_key(key)
    }

    /// Sets a predicate that determines when operations should fail.
    ///
    /// The predicate receives the operation and returns `true` if it should fail.
    /// A failing operation is still recorded but leaves the data untouched.
    pub fn fail_when<F>(&self, predicate: F)
    where
        F: Fn(&StoreOp) -> bool + Send + Sync + 'static,
    {
        *self.fail_when.lock() = Some(Box::new(predicate));
    }

    /// Clears the failure predicate, allowing all operations to succeed.
    pub fn clear_failures(&self) {
        *self.fail_when.lock() = None;
    }

    /// Returns a clone of all recorded operations.
    #[must_use]
    pub fn operations(&self) -> Vec<StoreOp> {
        self.operations.lock().clone()
    }

    /// Clears all recorded operations.
    pub fn clear_operations(&self) {
        self.operations.lock().clear();
    }

    fn check(&self, op: StoreOp, message: &'static str) -> Result<(), Error> {
        let fail = self.fail_when.lock().as_ref().is_some_and(|predicate| predicate(&op));
        self.operations.lock().push(op);
        if fail { Err(Error::caused_by(message)) } else { Ok(()) }
    }
}

impl KeyValueStore for MockStore {
    async fn get(&self, key: &str) -> Result<Option<StoredValue>, Error> {
        self.check(StoreOp::Get(key.to_owned()), "mock: get failed")?;
        Ok(self.data.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: StoredValue) -> Result<(), Error> {
        let op = StoreOp::Set {
            key: key.to_owned(),
            value: value.clone(),
        };
        self.check(op, "mock: set failed")?;
        self.data.lock().insert(key.to_owned(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), Error> {
        self.check(StoreOp::Remove(key.to_owned()), "mock: remove failed")?;
        self.data.lock().remove(key);
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, Error> {
        self.check(StoreOp::Keys, "mock: keys failed")?;
        Ok(self.data.lock().keys().cloned().collect())
    }

    async fn clear(&self) -> Result<(), Error> {
        self.check(StoreOp::Clear, "mock: clear failed")?;
        self.data.lock().clear();
        Ok(())
    }

    fn len(&self) -> Option<u64> {
        Some(self.data.lock().len() as u64)
    }
}
