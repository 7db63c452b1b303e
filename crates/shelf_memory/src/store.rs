// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! In-memory store implementation using moka.

use moka::future::Cache;
use shelf_tier::{Error, KeyValueStore, StoredValue};

use crate::builder::InMemoryStoreBuilder;

/// An in-memory store backed by moka.
///
/// Clones share the same underlying map, so a single store can back several
/// cache façades or be handed to unrelated subsystems.
///
/// # Examples
///
/// ```
/// use shelf_memory::InMemoryStore;
/// use shelf_tier::{KeyValueStore, StoredValue};
/// # futures::executor::block_on(async {
///
/// let store = InMemoryStore::new();
/// store.set("settings", StoredValue::Raw(b"dark".to_vec())).await?;
/// assert_eq!(store.keys().await?, vec!["settings".to_string()]);
/// # Ok::<(), shelf_tier::Error>(())
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    inner: Cache<String, StoredValue>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Creates a new unbounded in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates a new in-memory store holding at most `max_capacity` entries.
    #[must_use]
    pub fn with_capacity(max_capacity: u64) -> Self {
        Self::builder().max_capacity(max_capacity).build()
    }

    /// Creates a new builder for configuring an in-memory store.
    #[must_use]
    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder::new()
    }

    pub(crate) fn from_builder(builder: &InMemoryStoreBuilder) -> Self {
        let mut moka_builder = Cache::builder();

        if let Some(capacity) = builder.max_capacity {
            moka_builder = moka_builder.max_capacity(capacity);
        }

        if let Some(capacity) = builder.initial_capacity {
            moka_builder = moka_builder.initial_capacity(capacity);
        }

        if let Some(name) = builder.name.as_deref() {
            moka_builder = moka_builder.name(name);
        }

        Self {
            inner: moka_builder.build(),
        }
    }
}

impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<StoredValue>, Error> {
        Ok(self.inner.get(key).await)
    }

    async fn set(&self, key: &str, value: StoredValue) -> Result<(), Error> {
        self.inner.insert(key.to_owned(), value).await;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), Error> {
        self.inner.invalidate(key).await;
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, Error> {
        Ok(self.inner.iter().map(|(key, _)| (*key).clone()).collect())
    }

    async fn clear(&self) -> Result<(), Error> {
        self.inner.invalidate_all();
        // Lets housekeeping drop the invalidated entries so `len` catches up.
        self.inner.run_pending_tasks().await;
        Ok(())
    }

    fn len(&self) -> Option<u64> {
        Some(self.inner.entry_count())
    }
}

