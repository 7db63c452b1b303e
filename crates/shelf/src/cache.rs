// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The asset cache façade.

use std::time::{Duration, SystemTime};

use tick::Clock;

use shelf_tier::{CacheEntry, Error, KeyValueStore, Result, StoredValue};

use crate::builder::AssetCacheBuilder;
use crate::kind::AssetKind;
use crate::metadata::BookMetadataRecord;
use crate::sweep::SweepScope;
use crate::telemetry::{CacheActivity, CacheOperation, CacheTelemetry};

/// Type alias for cache names used in log events.
pub type CacheName = &'static str;

/// Schema version stamped on wrapped entries unless the builder overrides it.
pub const CACHE_VERSION: &str = "1";

/// How long a metadata record stays readable after it was written.
pub const METADATA_FRESHNESS: Duration = Duration::from_secs(60 * 60);

/// Age past which a sweep removes a wrapped entry.
pub const SWEEP_AGE: Duration = Duration::from_secs(24 * 60 * 60);

/// A namespaced, versioned, expiring cache for book assets.
///
/// `AssetCache` owns no cached data itself. Every operation is a single call into the
/// underlying [`KeyValueStore`], and every store failure is logged and absorbed: reads
/// fall back to `None` and writes complete silently. Callers treat a `None` the same
/// whether the asset was never cached, has expired, or the store failed.
///
/// Thumbnails are stored raw and never expire. Metadata records are stored wrapped with
/// the write time and schema version, and read back only while both are current.
///
/// # Examples
///
/// ```
/// use shelf::{AssetCache, BookMetadataRecord};
/// use tick::Clock;
/// # futures::executor::block_on(async {
///
/// let cache = AssetCache::builder(Clock::new_frozen()).memory().build();
///
/// cache.set_thumbnail("6f1c", vec![0x89, 0x50, 0x4e, 0x47]).await;
/// assert_eq!(cache.get_thumbnail("6f1c").await, Some(vec![0x89, 0x50, 0x4e, 0x47]));
///
/// let record = BookMetadataRecord::new("Emma", "6f1c", "https://cdn/6f1c.png", "2024-03-01");
/// cache.set_book_metadata("6f1c", &record).await;
/// assert_eq!(cache.get_book_metadata("6f1c").await, Some(record));
/// # });
/// ```
#[derive(Debug)]
pub struct AssetCache<S = ()> {
    pub(crate) name: CacheName,
    pub(crate) storage: S,
    pub(crate) clock: Clock,
    pub(crate) version: String,
    pub(crate) freshness: Duration,
    pub(crate) sweep_age: Duration,
    pub(crate) sweep_scope: SweepScope,
    pub(crate) telemetry: CacheTelemetry,
}

impl AssetCache<()> {
    /// Creates a new cache builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    ///
    /// use shelf::AssetCache;
    /// use tick::Clock;
    ///
    /// let cache = AssetCache::builder(Clock::new_frozen())
    ///     .memory()
    ///     .name("library")
    ///     .freshness(Duration::from_secs(10 * 60))
    ///     .build();
    /// assert_eq!(cache.name(), "library");
    /// ```
    #[must_use]
    pub fn builder(clock: Clock) -> AssetCacheBuilder {
        AssetCacheBuilder::new(clock)
    }
}

/// Outcome of reading one key, before it is logged.
#[derive(Debug)]
enum Lookup<T> {
    Found(T),
    Missing,
    Stale,
    VersionMismatch,
    Corrupted,
}

impl<T> Lookup<T> {
    fn and_then<U>(self, f: impl FnOnce(T) -> Lookup<U>) -> Lookup<U> {
        match self {
            Self::Found(value) => f(value),
            Self::Missing => Lookup::Missing,
            Self::Stale => Lookup::Stale,
            Self::VersionMismatch => Lookup::VersionMismatch,
            Self::Corrupted => Lookup::Corrupted,
        }
    }
}

/// Access methods.
impl<S> AssetCache<S> {
    /// Returns the name used in this cache's log events.
    #[must_use]
    pub fn name(&self) -> CacheName {
        self.name
    }

    /// Returns the schema version stamped on new wrapped entries.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns the clock used for timestamps.
    #[must_use]
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Milliseconds since the Unix epoch, or zero if the clock reads earlier than that.
    pub(crate) fn now_millis(&self) -> u64 {
        self.clock
            .system_time()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map_or(0, |since| u64::try_from(since.as_millis()).unwrap_or(u64::MAX))
    }
}

impl<S> AssetCache<S>
where
    S: KeyValueStore,
{
    /// Returns the cached thumbnail for `file_key`.
    ///
    /// Returns `None` if nothing is cached or the store fails.
    pub async fn get_thumbnail(&self, file_key: &str) -> Option<Vec<u8>> {
        let key = AssetKind::Thumbnail.key(file_key);
        let lookup = self.try_get_raw(&key).await;
        self.resolve(CacheOperation::GetThumbnail, &key, lookup)
    }

    /// Caches `bytes` as the thumbnail for `file_key`, replacing any previous one.
    pub async fn set_thumbnail(&self, file_key: &str, bytes: impl Into<Vec<u8>>) {
        let key = AssetKind::Thumbnail.key(file_key);
        let result = self.storage.set(&key, StoredValue::Raw(bytes.into())).await;
        self.absorb(CacheOperation::SetThumbnail, &key, CacheActivity::Inserted, result);
    }

    /// Removes the cached thumbnail for `file_key`.
    pub async fn remove_thumbnail(&self, file_key: &str) {
        let key = AssetKind::Thumbnail.key(file_key);
        let result = self.storage.remove(&key).await;
        self.absorb(CacheOperation::RemoveThumbnail, &key, CacheActivity::Removed, result);
    }

    /// Returns the cached metadata record for `file_key`.
    ///
    /// The record is returned only if it was written under the current schema version
    /// and is younger than the freshness window. An expired record is left in the store
    /// for the next sweep.
    pub async fn get_book_metadata(&self, file_key: &str) -> Option<BookMetadataRecord> {
        let key = AssetKind::Metadata.key(file_key);
        let lookup = self.try_get_metadata(&key).await;
        self.resolve(CacheOperation::GetMetadata, &key, lookup)
    }

    /// Caches `record` for `file_key`, stamped with the current time and schema version.
    pub async fn set_book_metadata(&self, file_key: &str, record: &BookMetadataRecord) {
        let key = AssetKind::Metadata.key(file_key);
        let result = self.try_set_metadata(&key, record).await;
        self.absorb(CacheOperation::SetMetadata, &key, CacheActivity::Inserted, result);
    }

    /// Removes the cached metadata record for `file_key`.
    pub async fn remove_book_metadata(&self, file_key: &str) {
        let key = AssetKind::Metadata.key(file_key);
        let result = self.storage.remove(&key).await;
        self.absorb(CacheOperation::RemoveMetadata, &key, CacheActivity::Removed, result);
    }

    /// Returns the cached book contents for `file_key`.
    ///
    /// Book contents are checked against the schema version but not the metadata
    /// freshness window; they stay readable until a sweep removes them.
    pub async fn get_book(&self, file_key: &str) -> Option<Vec<u8>> {
        let key = AssetKind::Book.key(file_key);
        let lookup = self.try_get_wrapped(&key, None).await;
        self.resolve(CacheOperation::GetBook, &key, lookup)
    }

    /// Caches the book contents for `file_key`, stamped with the current time and schema version.
    pub async fn set_book(&self, file_key: &str, bytes: impl Into<Vec<u8>>) {
        let key = AssetKind::Book.key(file_key);
        let result = self.storage.set(&key, self.wrap(bytes.into())).await;
        self.absorb(CacheOperation::SetBook, &key, CacheActivity::Inserted, result);
    }

    /// Removes the cached book contents for `file_key`.
    pub async fn remove_book(&self, file_key: &str) {
        let key = AssetKind::Book.key(file_key);
        let result = self.storage.remove(&key).await;
        self.absorb(CacheOperation::RemoveBook, &key, CacheActivity::Removed, result);
    }

    /// Erases the whole underlying store, including keys this cache did not write.
    pub async fn clear_cache(&self) {
        match self.storage.clear().await {
            Ok(()) => self.telemetry.record(CacheOperation::Clear, CacheActivity::Cleared, None),
            Err(error) => self.telemetry.record_error(CacheOperation::Clear, None, &error),
        }
    }

    async fn try_get_raw(&self, key: &str) -> Result<Lookup<Vec<u8>>> {
        Ok(match self.storage.get(key).await? {
            Some(StoredValue::Raw(bytes)) => Lookup::Found(bytes),
            Some(StoredValue::Wrapped(_)) => Lookup::Corrupted,
            None => Lookup::Missing,
        })
    }

    async fn try_get_wrapped(&self, key: &str, freshness: Option<Duration>) -> Result<Lookup<Vec<u8>>> {
        let entry = match self.storage.get(key).await? {
            Some(StoredValue::Wrapped(entry)) => entry,
            Some(StoredValue::Raw(_)) => return Ok(Lookup::Corrupted),
            None => return Ok(Lookup::Missing),
        };

        if entry.version() != self.version {
            return Ok(Lookup::VersionMismatch);
        }

        if freshness.is_some_and(|freshness| entry.age_at(self.now_millis()) >= freshness) {
            return Ok(Lookup::Stale);
        }

        Ok(Lookup::Found(entry.into_data()))
    }

    async fn try_get_metadata(&self, key: &str) -> Result<Lookup<BookMetadataRecord>> {
        let lookup = self.try_get_wrapped(key, Some(self.freshness)).await?;
        Ok(lookup.and_then(|bytes| serde_json::from_slice(&bytes).map_or(Lookup::Corrupted, Lookup::Found)))
    }

    async fn try_set_metadata(&self, key: &str, record: &BookMetadataRecord) -> Result<()> {
        let bytes = serde_json::to_vec(record).map_err(Error::from_message)?;
        self.storage.set(key, self.wrap(bytes)).await
    }

    fn wrap(&self, data: Vec<u8>) -> StoredValue {
        StoredValue::Wrapped(CacheEntry::new(data, self.now_millis(), self.version.clone()))
    }

    fn resolve<T>(&self, operation: CacheOperation, key: &str, lookup: Result<Lookup<T>>) -> Option<T> {
        let activity = match lookup {
            Ok(Lookup::Found(value)) => {
                self.telemetry.record(operation, CacheActivity::Hit, Some(key));
                return Some(value);
            }
            Ok(Lookup::Missing) => CacheActivity::Miss,
            Ok(Lookup::Stale) => CacheActivity::Stale,
            Ok(Lookup::VersionMismatch) => CacheActivity::VersionMismatch,
            Ok(Lookup::Corrupted) => CacheActivity::Corrupted,
            Err(error) => {
                self.telemetry.record_error(operation, Some(key), &error);
                return None;
            }
        };

        self.telemetry.record(operation, activity, Some(key));
        None
    }

    fn absorb(&self, operation: CacheOperation, key: &str, activity: CacheActivity, result: Result<()>) {
        match result {
            Ok(()) => self.telemetry.record(operation, activity, Some(key)),
            Err(error) => self.telemetry.record_error(operation, Some(key), &error),
        }
    }
}
