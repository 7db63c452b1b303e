// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Concurrent in-memory store backed by moka.
//!
//! This crate provides [`InMemoryStore`], a [`KeyValueStore`](shelf_tier::KeyValueStore)
//! that keeps values in process memory. Use [`InMemoryStoreBuilder`] to configure
//! capacity without exposing moka types directly.
//!
//! # Quick Start
//!
//! ```
//! use shelf_memory::InMemoryStore;
//! use shelf_tier::{KeyValueStore, StoredValue};
//!
//! # futures::executor::block_on(async {
//! let store = InMemoryStore::builder().max_capacity(1000).build();
//!
//! store.set("thumb_a", StoredValue::Raw(vec![1, 2, 3])).await?;
//! let value = store.get("thumb_a").await?;
//! assert_eq!(value, Some(StoredValue::Raw(vec![1, 2, 3])));
//! # Ok::<(), shelf_tier::Error>(())
//! # });
//! ```

pub mod builder;
pub mod store;

#[doc(inline)]
pub use builder::InMemoryStoreBuilder;
#[doc(inline)]
pub use store::InMemoryStore;
