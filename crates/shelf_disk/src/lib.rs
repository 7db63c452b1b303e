// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Persistent store keeping one file per key inside a directory.
//!
//! [`DirectoryStore`] implements [`KeyValueStore`](shelf_tier::KeyValueStore) on top of
//! the local filesystem so that cached book assets survive process restarts.
//!
//! # Layout
//!
//! Every key maps to a file named after the lowercase hex SHA-256 of the key's UTF-8
//! bytes, with the `.entry` extension, so file names have a fixed length whatever the
//! key. The file holds the key itself next to the value, which is how
//! [`keys`](shelf_tier::KeyValueStore::keys) recovers it. Other files in the directory
//! are left alone by every operation.
//!
//! Key and value are encoded together with `postcard`. Writes go to a uniquely named temporary file that
//! is then renamed over the target, so a reader observes either the old or the new value.
//!
//! # Quick Start
//!
//! ```no_run
//! use shelf_disk::DirectoryStore;
//! use shelf_tier::{KeyValueStore, StoredValue};
//!
//! # async fn example() -> Result<(), shelf_tier::Error> {
//! let store = DirectoryStore::open("/var/cache/bookshelf").await?;
//!
//! store.set("thumb_6f1c", StoredValue::Raw(vec![0x89, 0x50])).await?;
//! let value = store.get("thumb_6f1c").await?;
//! assert!(value.is_some());
//! # Ok(())
//! # }
//! ```

mod key;
pub mod store;

#[doc(inline)]
pub use store::DirectoryStore;
