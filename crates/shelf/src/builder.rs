// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Builder for [`AssetCache`].

use std::time::Duration;

use tick::Clock;

use shelf_tier::KeyValueStore;

#[cfg(feature = "memory")]
use shelf_memory::InMemoryStore;

use crate::cache::{AssetCache, CACHE_VERSION, CacheName, METADATA_FRESHNESS, SWEEP_AGE};
use crate::sweep::SweepScope;
use crate::telemetry::CacheTelemetry;

const DEFAULT_NAME: CacheName = "asset_cache";

/// Builder for an [`AssetCache`].
///
/// Created by [`AssetCache::builder`]. A store must be chosen with
/// [`storage`](Self::storage) or [`memory`](Self::memory) before the cache can be built;
/// every other setting has a default.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use shelf::{AssetCache, SweepScope};
/// use tick::Clock;
///
/// let cache = AssetCache::builder(Clock::new_frozen())
///     .memory()
///     .version("2")
///     .sweep_age(Duration::from_secs(12 * 60 * 60))
///     .sweep_scope(SweepScope::OwnedPrefixes)
///     .build();
/// assert_eq!(cache.version(), "2");
/// ```
#[derive(Debug)]
pub struct AssetCacheBuilder<S = ()> {
    name: CacheName,
    storage: S,
    clock: Clock,
    version: String,
    freshness: Duration,
    sweep_age: Duration,
    sweep_scope: SweepScope,
}

impl AssetCacheBuilder<()> {
    pub(crate) fn new(clock: Clock) -> Self {
        Self {
            name: DEFAULT_NAME,
            storage: (),
            clock,
            version: CACHE_VERSION.to_owned(),
            freshness: METADATA_FRESHNESS,
            sweep_age: SWEEP_AGE,
            sweep_scope: SweepScope::default(),
        }
    }

    /// Sets the store that holds the cached assets.
    ///
    /// # Examples
    ///
    /// ```
    /// use shelf::{AssetCache, InMemoryStore};
    /// use tick::Clock;
    ///
    /// let store = InMemoryStore::with_capacity(1_000);
    /// let cache = AssetCache::builder(Clock::new_frozen()).storage(store).build();
    /// ```
    pub fn storage<S>(self, storage: S) -> AssetCacheBuilder<S>
    where
        S: KeyValueStore,
    {
        AssetCacheBuilder {
            name: self.name,
            storage,
            clock: self.clock,
            version: self.version,
            freshness: self.freshness,
            sweep_age: self.sweep_age,
            sweep_scope: self.sweep_scope,
        }
    }

    /// Uses a new, unbounded [`InMemoryStore`].
    #[cfg(feature = "memory")]
    #[must_use]
    pub fn memory(self) -> AssetCacheBuilder<InMemoryStore> {
        self.storage(InMemoryStore::new())
    }
}

impl<S> AssetCacheBuilder<S> {
    /// Sets the name reported in log events. Defaults to `"asset_cache"`.
    #[must_use]
    pub fn name(mut self, name: CacheName) -> Self {
        self.name = name;
        self
    }

    /// Sets the schema version stamped on wrapped entries.
    ///
    /// Entries written under any other version read as misses. Defaults to [`CACHE_VERSION`].
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Sets how long a metadata record stays readable. Defaults to [`METADATA_FRESHNESS`].
    #[must_use]
    pub fn freshness(mut self, freshness: Duration) -> Self {
        self.freshness = freshness;
        self
    }

    /// Sets the age past which a sweep removes wrapped entries. Defaults to [`SWEEP_AGE`].
    #[must_use]
    pub fn sweep_age(mut self, sweep_age: Duration) -> Self {
        self.sweep_age = sweep_age;
        self
    }

    /// Sets which keys a sweep inspects. Defaults to [`SweepScope::AllKeys`].
    #[must_use]
    pub fn sweep_scope(mut self, scope: SweepScope) -> Self {
        self.sweep_scope = scope;
        self
    }

    /// Returns a reference to the builder's clock.
    pub fn clock(&self) -> &Clock {
        &self.clock
    }
}

impl<S> AssetCacheBuilder<S>
where
    S: KeyValueStore,
{
    /// Builds the cache.
    #[must_use]
    pub fn build(self) -> AssetCache<S> {
        AssetCache {
            name: self.name,
            storage: self.storage,
            clock: self.clock,
            version: self.version,
            freshness: self.freshness,
            sweep_age: self.sweep_age,
            sweep_scope: self.sweep_scope,
            telemetry: CacheTelemetry::new(self.name),
        }
    }
}
