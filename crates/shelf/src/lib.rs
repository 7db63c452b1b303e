// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Namespaced, versioned, expiring cache for book thumbnails and metadata.
//!
//! [`AssetCache`] sits in front of any asynchronous [`KeyValueStore`] and gives it a
//! small, typed surface:
//!
//! - Thumbnails are stored raw under `thumb_<file key>` and never expire on their own.
//! - Metadata records are stored under `meta_<file key>`, wrapped with the time they
//!   were written and the schema version. They read as misses once they are older than
//!   the freshness window or were written under another version.
//! - Book contents are stored wrapped under `book_<file key>`.
//! - [`clear_old_cache`](AssetCache::clear_old_cache) removes wrapped entries past the
//!   sweep age, and [`clear_cache`](AssetCache::clear_cache) erases the whole store.
//!
//! Caching is treated purely as an optimization. No operation returns an error: store
//! failures are logged through [`tracing`] and turned into a miss or a no-op.
//!
//! # Examples
//!
//! ```
//! use shelf::{AssetCache, BookMetadataRecord};
//! use tick::Clock;
//! # futures::executor::block_on(async {
//!
//! let cache = AssetCache::builder(Clock::new_frozen()).memory().build();
//!
//! let record = BookMetadataRecord::new("Emma", "6f1c", "https://cdn/6f1c.png", "2024-03-01")
//!     .with_extra("author", "Jane Austen");
//! cache.set_book_metadata(&record.file_key, &record).await;
//!
//! let cached = cache.get_book_metadata("6f1c").await.unwrap();
//! assert_eq!(cached.extra["author"], "Jane Austen");
//!
//! cache.clear_cache().await;
//! assert!(cache.get_book_metadata("6f1c").await.is_none());
//! # });
//! ```
//!
//! # Stores
//!
//! - [`InMemoryStore`] (`memory` feature, on by default) for process-local caching.
//! - [`DirectoryStore`] (`disk` feature) keeps one file per key and survives restarts.
//! - Any other type implementing [`KeyValueStore`] can be passed to
//!   [`AssetCacheBuilder::storage`].
//!
//! # Logging
//!
//! Every outcome is emitted as a `cache.event` with the `cache.name`, `cache.operation`,
//! `cache.activity` and `cache.key` fields. Hits and misses are logged at `DEBUG`, other
//! outcomes at `INFO`, and store failures at `ERROR` with the failure in the `error`
//! field. No subscriber is installed by this crate.

pub mod builder;
pub mod cache;
mod kind;
mod metadata;
pub mod sweep;
mod telemetry;

#[doc(inline)]
pub use builder::AssetCacheBuilder;
#[doc(inline)]
pub use cache::{AssetCache, CACHE_VERSION, CacheName, METADATA_FRESHNESS, SWEEP_AGE};
#[doc(inline)]
pub use kind::AssetKind;
#[doc(inline)]
pub use metadata::BookMetadataRecord;
#[cfg(feature = "disk")]
#[doc(inline)]
pub use shelf_disk::DirectoryStore;
#[cfg(feature = "memory")]
#[doc(inline)]
pub use shelf_memory::{InMemoryStore, InMemoryStoreBuilder};
#[doc(inline)]
pub use shelf_tier::{CacheEntry, DynamicStore, DynamicStoreExt, Error, KeyValueStore, Result, StoredValue};
#[doc(inline)]
pub use sweep::{SweepReport, SweepScope};

#[cfg(any(feature = "test-util", test))]
#[doc(inline)]
pub use shelf_tier::testing::{MockStore, StoreOp};
