// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::time::Duration;

/// A payload stamped with its write time and schema version.
///
/// `CacheEntry` is the wrapper written around payloads that are subject to freshness
/// checks and age-based eviction. The timestamp is expressed in milliseconds since the
/// Unix epoch so that entries remain meaningful across process restarts when the store
/// is persistent.
///
/// # Examples
///
/// ```
/// use shelf_tier::CacheEntry;
/// use std::time::Duration;
///
/// let entry = CacheEntry::new("payload", 1_000, "1");
/// assert_eq!(*entry.data(), "payload");
/// assert_eq!(entry.timestamp(), 1_000);
/// assert_eq!(entry.version(), "1");
/// assert_eq!(entry.age_at(4_000), Duration::from_secs(3));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CacheEntry<T> {
    data: T,
    timestamp: u64,
    version: String,
}

impl<T> CacheEntry<T> {
    /// Creates a new entry written at `timestamp` (milliseconds since the Unix epoch)
    /// under the given schema `version`.
    pub fn new(data: T, timestamp: u64, version: impl Into<String>) -> Self {
        Self {
            data,
            timestamp,
            version: version.into(),
        }
    }

    /// Returns a reference to the wrapped payload.
    #[must_use]
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Consumes the entry and returns the wrapped payload.
    #[must_use]
    pub fn into_data(self) -> T {
        self.data
    }

    /// Returns the write time in milliseconds since the Unix epoch.
    #[must_use]
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Returns the schema version the entry was written under.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns how old the entry is at `now` (milliseconds since the Unix epoch).
    ///
    /// Entries stamped in the future (for example after the system clock moved
    /// backwards) have an age of zero.
    #[must_use]
    pub fn age_at(&self, now: u64) -> Duration {
        Duration::from_millis(now.saturating_sub(self.timestamp))
    }

    /// Transforms the payload while keeping the timestamp and version.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CacheEntry<U> {
        CacheEntry {
            data: f(self.data),
            timestamp: self.timestamp,
            version: self.version,
        }
    }

    /// Fallible variant of [`map`](Self::map).
    ///
    /// # Errors
    ///
    /// Returns whatever error `f` returns.
    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<CacheEntry<U>, E> {
        Ok(CacheEntry {
            data: f(self.data)?,
            timestamp: self.timestamp,
            version: self.version,
        })
    }
}
