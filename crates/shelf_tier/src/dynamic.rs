// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Dynamic store wrapper for type erasure.

use std::{fmt::Debug, sync::Arc};

use crate::{Error, KeyValueStore, StoredValue, store::DynKeyValueStore};

/// Extension trait for converting any `KeyValueStore` into a `DynamicStore`.
///
/// This trait is automatically implemented for all types that implement `KeyValueStore`.
///
/// # Examples
///
/// ```
/// use shelf_tier::{DynamicStore, DynamicStoreExt, KeyValueStore};
///
/// fn erase<S>(store: S) -> DynamicStore
/// where
///     S: KeyValueStore + 'static,
/// {
///     store.into_dynamic()
/// }
/// ```
pub trait DynamicStoreExt: Sized {
    /// Converts this store into a `DynamicStore`.
    fn into_dynamic(self) -> DynamicStore;
}

impl<S> DynamicStoreExt for S
where
    S: KeyValueStore + 'static,
{
    fn into_dynamic(self) -> DynamicStore {
        DynamicStore::new(self)
    }
}

/// A clonable store with type erasure.
///
/// `DynamicStore` wraps a trait object in an `Arc` so that several cache façades, or a
/// cache and an unrelated subsystem, can share one backend without naming its type.
pub struct DynamicStore(Arc<DynKeyValueStore<'static>>);

impl DynamicStore {
    pub(crate) fn new<S>(store: S) -> Self
    where
        S: KeyValueStore + 'static,
    {
        Self(DynKeyValueStore::new_arc(store))
    }
}

impl Debug for DynamicStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicStore").finish()
    }
}

impl Clone for DynamicStore {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl KeyValueStore for DynamicStore {
    async fn get(&self, key: &str) -> Result<Option<StoredValue>, Error> {
        self.0.get(key).await
    }

    async fn set(&self, key: &str, value: StoredValue) -> Result<(), Error> {
        self.0.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), Error> {
        self.0.remove(key).await
    }

    async fn keys(&self) -> Result<Vec<String>, Error> {
        self.0.keys().await
    }

    async fn clear(&self) -> Result<(), Error> {
        self.0.clear().await
    }

    fn len(&self) -> Option<u64> {
        self.0.len()
    }

    fn is_empty(&self) -> Option<bool> {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockStore;

    #[test]
    fn clones_share_the_same_backend() {
        futures::executor::block_on(async {
            let mock = MockStore::new();
            let dynamic = mock.clone().into_dynamic();
            let other = dynamic.clone();

            dynamic.set("thumb_a", StoredValue::Raw(vec![1])).await.expect("set failed");

            assert_eq!(other.get("thumb_a").await.expect("get failed"), Some(StoredValue::Raw(vec![1])));
            assert_eq!(other.len(), Some(1));
            assert!(mock.contains_key("thumb_a"));
        });
    }

    #[test]
    fn errors_pass_through() {
        futures::executor::block_on(async {
            let mock = MockStore::new();
            mock.fail_when(|_| true);
            let dynamic = mock.into_dynamic();

            assert!(dynamic.keys().await.is_err());
            assert!(dynamic.clear().await.is_err());
        });
    }
}
