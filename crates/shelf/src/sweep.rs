// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Age-based eviction of wrapped entries.

use std::time::Duration;

use futures::{Stream, StreamExt};
use tick::PeriodicTimer;

use shelf_tier::{KeyValueStore, Result, StoredValue};

use crate::AssetCache;
use crate::kind::AssetKind;
use crate::telemetry::{CacheActivity, CacheOperation};

/// Which keys of the underlying store a sweep inspects.
///
/// The store may be shared with other subsystems. With [`AllKeys`](Self::AllKeys) a
/// foreign value that happens to be wrapped, and is old enough, is evicted like any
/// cache entry. [`OwnedPrefixes`](Self::OwnedPrefixes) limits the sweep to the keys
/// this cache derives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SweepScope {
    /// Inspect every key in the store.
    #[default]
    AllKeys,
    /// Inspect only keys under the thumbnail, book and metadata prefixes.
    OwnedPrefixes,
}

impl SweepScope {
    /// Returns `true` if a sweep with this scope inspects `key`.
    #[must_use]
    pub fn covers(self, key: &str) -> bool {
        match self {
            Self::AllKeys => true,
            Self::OwnedPrefixes => AssetKind::from_key(key).is_some(),
        }
    }
}

/// Outcome of one sweep.
///
/// A sweep never stops at the first failing key, so a report can show removals and
/// failures side by side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Keys inspected.
    pub scanned: usize,
    /// Keys removed because their wrapped entry was past the sweep age.
    pub removed: usize,
    /// Keys that could not be read or removed.
    pub failures: usize,
}

impl<S> AssetCache<S>
where
    S: KeyValueStore,
{
    /// Removes every wrapped entry older than the sweep age.
    ///
    /// Raw values, thumbnails included, are never removed by a sweep. Store failures
    /// are logged and counted; removals that completed before a failure stay removed.
    /// If the keys cannot be enumerated the returned report is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use shelf::AssetCache;
    /// use tick::Clock;
    /// # futures::executor::block_on(async {
    ///
    /// let cache = AssetCache::builder(Clock::new_frozen()).memory().build();
    /// cache.set_thumbnail("6f1c", vec![1, 2, 3]).await;
    ///
    /// let report = cache.clear_old_cache().await;
    /// assert_eq!(report.removed, 0);
    /// assert!(cache.get_thumbnail("6f1c").await.is_some());
    /// # });
    /// ```
    pub async fn clear_old_cache(&self) -> SweepReport {
        let mut report = SweepReport::default();

        let keys = match self.storage.keys().await {
            Ok(keys) => keys,
            Err(error) => {
                self.telemetry.record_error(CacheOperation::Sweep, None, &error);
                return report;
            }
        };

        let now = self.now_millis();
        for key in keys.iter().filter(|key| self.sweep_scope.covers(key)) {
            report.scanned += 1;
            match self.try_sweep_key(key, now).await {
                Ok(true) => {
                    report.removed += 1;
                    self.telemetry.record(CacheOperation::Sweep, CacheActivity::Removed, Some(key.as_str()));
                }
                Ok(false) => {}
                Err(error) => {
                    report.failures += 1;
                    self.telemetry.record_error(CacheOperation::Sweep, Some(key.as_str()), &error);
                }
            }
        }

        self.telemetry.record_sweep(&report);
        report
    }

    /// Returns a stream that runs [`clear_old_cache`](Self::clear_old_cache) once per `period`.
    ///
    /// The first sweep runs one period after the stream is first polled. Nothing is
    /// swept unless the caller keeps polling the stream; dropping it stops the sweeps.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::time::Duration;
    ///
    /// use futures::StreamExt;
    /// use shelf::AssetCache;
    /// use tick::Clock;
    /// # async fn run(clock: Clock) {
    ///
    /// let cache = AssetCache::builder(clock).memory().build();
    /// let mut sweeps = std::pin::pin!(cache.sweeps(Duration::from_secs(60 * 60)));
    ///
    /// while let Some(report) = sweeps.next().await {
    ///     println!("swept {} of {} keys", report.removed, report.scanned);
    /// }
    /// # }
    /// ```
    pub fn sweeps(&self, period: Duration) -> impl Stream<Item = SweepReport> + '_ {
        PeriodicTimer::new(&self.clock, period).then(move |()| self.clear_old_cache())
    }

    async fn try_sweep_key(&self, key: &str, now: u64) -> Result<bool> {
        let Some(StoredValue::Wrapped(entry)) = self.storage.get(key).await? else {
            return Ok(false);
        };

        if entry.age_at(now) <= self.sweep_age {
            return Ok(false);
        }

        self.storage.remove(key).await?;
        Ok(true)
    }
}
