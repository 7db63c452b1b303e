// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Structured log events for cache operations.
//!
//! Every outcome of a public cache operation, including every absorbed store failure,
//! is reported here as a `tracing` event. The library never installs a subscriber.

use shelf_tier::Error;

use crate::cache::CacheName;
use crate::sweep::SweepReport;

pub(crate) mod attributes;
#[cfg(test)]
pub(crate) mod testing;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CacheOperation {
    GetThumbnail,
    SetThumbnail,
    RemoveThumbnail,
    GetBook,
    SetBook,
    RemoveBook,
    GetMetadata,
    SetMetadata,
    RemoveMetadata,
    Sweep,
    Clear,
}

impl CacheOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GetThumbnail => "cache.get_thumbnail",
            Self::SetThumbnail => "cache.set_thumbnail",
            Self::RemoveThumbnail => "cache.remove_thumbnail",
            Self::GetBook => "cache.get_book",
            Self::SetBook => "cache.set_book",
            Self::RemoveBook => "cache.remove_book",
            Self::GetMetadata => "cache.get_metadata",
            Self::SetMetadata => "cache.set_metadata",
            Self::RemoveMetadata => "cache.remove_metadata",
            Self::Sweep => "cache.sweep",
            Self::Clear => "cache.clear",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CacheActivity {
    Hit,
    Miss,
    Stale,
    VersionMismatch,
    Corrupted,
    Inserted,
    Removed,
    Swept,
    Cleared,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Severity {
    Debug,
    Info,
    Error,
}

impl CacheActivity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hit => "cache.hit",
            Self::Miss => "cache.miss",
            Self::Stale => "cache.stale",
            Self::VersionMismatch => "cache.version_mismatch",
            Self::Corrupted => "cache.corrupted",
            Self::Inserted => "cache.inserted",
            Self::Removed => "cache.removed",
            Self::Swept => "cache.swept",
            Self::Cleared => "cache.cleared",
            Self::Error => "cache.error",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            Self::Hit | Self::Miss => Severity::Debug,
            Self::Stale | Self::VersionMismatch | Self::Inserted | Self::Removed | Self::Swept | Self::Cleared => Severity::Info,
            Self::Corrupted | Self::Error => Severity::Error,
        }
    }
}

/// Emits log events on behalf of one named cache.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CacheTelemetry {
    name: CacheName,
}

impl CacheTelemetry {
    pub fn new(name: CacheName) -> Self {
        Self { name }
    }

    pub fn record(self, operation: CacheOperation, activity: CacheActivity, key: Option<&str>) {
        emit(self.name, operation, activity, key, None);
    }

    pub fn record_error(self, operation: CacheOperation, key: Option<&str>, error: &Error) {
        emit(self.name, operation, CacheActivity::Error, key, Some(error));
    }

    pub fn record_sweep(self, report: &SweepReport) {
        tracing::info!(
            cache.name = self.name,
            cache.operation = CacheOperation::Sweep.as_str(),
            cache.activity = CacheActivity::Swept.as_str(),
            sweep.scanned = report.scanned,
            sweep.removed = report.removed,
            sweep.failures = report.failures,
            "cache.event"
        );
    }
}

fn emit(cache_name: CacheName, operation: CacheOperation, activity: CacheActivity, key: Option<&str>, error: Option<&Error>) {
    let op = operation.as_str();
    let ev = activity.as_str();
    let error = error.map(tracing::field::display);

    // Tracing level must be constant, so we use a macro to select the appropriate level.
    // Field names must match constants in attributes.rs.
    macro_rules! emit_event {
        ($level:ident) => {
            tracing::$level!(
                cache.name = cache_name,
                cache.operation = op,
                cache.activity = ev,
                cache.key = key,
                error = error,
                "cache.event"
            )
        };
    }

    match activity.severity() {
        Severity::Error => emit_event!(error),
        Severity::Info => emit_event!(info),
        Severity::Debug => emit_event!(debug),
    }
}
