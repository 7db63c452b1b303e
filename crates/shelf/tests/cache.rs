// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Integration tests for reading and writing cached assets.

use std::time::{Duration, UNIX_EPOCH};

use shelf::{AssetCache, BookMetadataRecord, CACHE_VERSION, CacheEntry, METADATA_FRESHNESS, StoredValue};
use shelf_memory::InMemoryStore;
use shelf_tier::KeyValueStore;
use shelf_tier::testing::{MockStore, StoreOp};
use tick::ClockControl;

const BASE: Duration = Duration::from_secs(1_700_000_000);
const BASE_MILLIS: u64 = 1_700_000_000_000;

fn block_on<F: std::future::Future>(f: F) -> F::Output {
    futures::executor::block_on(f)
}

fn record(file_key: &str) -> BookMetadataRecord {
    BookMetadataRecord::new("Northanger Abbey", file_key, format!("https://cdn/{file_key}.png"), "2024-03-01")
        .with_extra("author", "Jane Austen")
        .with_extra("pages", 251)
}

fn metadata_entry(file_key: &str, timestamp: u64, version: &str) -> StoredValue {
    let bytes = serde_json::to_vec(&record(file_key)).unwrap();
    StoredValue::Wrapped(CacheEntry::new(bytes, timestamp, version))
}

#[test]
fn thumbnail_round_trip() {
    block_on(async {
        let cache = AssetCache::builder(ClockControl::new_at(UNIX_EPOCH + BASE).to_clock()).memory().build();

        cache.set_thumbnail("6f1c", vec![0x89, 0x50, 0x4e, 0x47]).await;
        assert_eq!(cache.get_thumbnail("6f1c").await, Some(vec![0x89, 0x50, 0x4e, 0x47]));

        cache.set_thumbnail("6f1c", vec![7]).await;
        assert_eq!(cache.get_thumbnail("6f1c").await, Some(vec![7]));
    });
}

#[test]
fn thumbnail_is_stored_raw() {
    block_on(async {
        let store = MockStore::new();
        let cache = AssetCache::builder(ClockControl::new_at(UNIX_EPOCH + BASE).to_clock())
            .storage(store.clone())
            .build();

        cache.set_thumbnail("6f1c", vec![1, 2]).await;

        assert_eq!(store.peek("thumb_6f1c"), Some(StoredValue::Raw(vec![1, 2])));
    });
}

#[test]
fn missing_thumbnail_is_none() {
    block_on(async {
        let cache = AssetCache::builder(ClockControl::new().to_clock()).memory().build();
        assert_eq!(cache.get_thumbnail("absent").await, None);
    });
}

#[test]
fn thumbnails_never_expire() {
    block_on(async {
        let control = ClockControl::new_at(UNIX_EPOCH + BASE);
        let cache = AssetCache::builder(control.to_clock()).memory().build();

        cache.set_thumbnail("6f1c", vec![1]).await;
        control.advance(Duration::from_secs(365 * 24 * 60 * 60));

        assert_eq!(cache.get_thumbnail("6f1c").await, Some(vec![1]));
    });
}

#[test]
fn metadata_round_trip_keeps_extra_fields() {
    block_on(async {
        let cache = AssetCache::builder(ClockControl::new_at(UNIX_EPOCH + BASE).to_clock()).memory().build();
        let original = record("6f1c");

        cache.set_book_metadata("6f1c", &original).await;
        let cached = cache.get_book_metadata("6f1c").await;

        assert_eq!(cached, Some(original));
    });
}

#[test]
fn metadata_past_freshness_window_reads_as_none_but_stays_stored() {
    block_on(async {
        let control = ClockControl::new_at(UNIX_EPOCH + BASE);
        let store = MockStore::new();
        store.seed("meta_6f1c", metadata_entry("6f1c", BASE_MILLIS - 3_600_001, CACHE_VERSION));
        let cache = AssetCache::builder(control.to_clock()).storage(store.clone()).build();

        assert_eq!(cache.get_book_metadata("6f1c").await, None);
        assert!(store.contains_key("meta_6f1c"));
        assert!(!store.operations().iter().any(|op| matches!(op, StoreOp::Remove(_))));
    });
}

#[test]
fn metadata_expires_after_freshness_window() {
    block_on(async {
        let control = ClockControl::new_at(UNIX_EPOCH + BASE);
        let cache = AssetCache::builder(control.to_clock()).memory().build();

        cache.set_book_metadata("6f1c", &record("6f1c")).await;
        control.advance(Duration::from_secs(59 * 60));
        assert!(cache.get_book_metadata("6f1c").await.is_some());

        control.advance(Duration::from_secs(60));
        assert!(cache.get_book_metadata("6f1c").await.is_none());
    });
}

#[test]
fn custom_freshness_window() {
    block_on(async {
        let control = ClockControl::new_at(UNIX_EPOCH + BASE);
        let cache = AssetCache::builder(control.to_clock())
            .memory()
            .freshness(Duration::from_secs(30))
            .build();

        cache.set_book_metadata("6f1c", &record("6f1c")).await;
        control.advance(Duration::from_secs(30));

        assert!(cache.get_book_metadata("6f1c").await.is_none());
        assert!(METADATA_FRESHNESS > Duration::from_secs(30));
    });
}

#[test]
fn version_bump_invalidates_metadata_without_deleting_it() {
    block_on(async {
        let control = ClockControl::new_at(UNIX_EPOCH + BASE);
        let store = MockStore::new();

        let v1 = AssetCache::builder(control.to_clock()).storage(store.clone()).build();
        v1.set_book_metadata("6f1c", &record("6f1c")).await;

        let v2 = AssetCache::builder(control.to_clock())
            .storage(store.clone())
            .version("2")
            .build();
        assert_eq!(v2.get_book_metadata("6f1c").await, None);
        assert!(store.contains_key("meta_6f1c"));

        // The old version still reads it.
        assert!(v1.get_book_metadata("6f1c").await.is_some());
    });
}

#[test]
fn kinds_do_not_collide() {
    block_on(async {
        let cache = AssetCache::builder(ClockControl::new_at(UNIX_EPOCH + BASE).to_clock()).memory().build();

        cache.set_thumbnail("6f1c", vec![1]).await;
        cache.set_book("6f1c", vec![2]).await;
        cache.set_book_metadata("6f1c", &record("6f1c")).await;

        assert_eq!(cache.get_thumbnail("6f1c").await, Some(vec![1]));
        assert_eq!(cache.get_book("6f1c").await, Some(vec![2]));
        assert_eq!(cache.get_book_metadata("6f1c").await, Some(record("6f1c")));

        let mut keys = cache.storage().keys().await.unwrap();
        keys.sort();
        assert_eq!(keys, vec!["book_6f1c", "meta_6f1c", "thumb_6f1c"]);
    });
}

#[test]
fn book_is_versioned_but_not_subject_to_freshness() {
    block_on(async {
        let control = ClockControl::new_at(UNIX_EPOCH + BASE);
        let store = MockStore::new();
        let cache = AssetCache::builder(control.to_clock()).storage(store.clone()).build();

        cache.set_book("6f1c", b"%PDF-1.7".to_vec()).await;
        let entry = store.peek("book_6f1c").and_then(|value| value.as_wrapped().cloned()).expect("book should be stored wrapped");
        assert_eq!(entry.timestamp(), BASE_MILLIS);

        control.advance(Duration::from_secs(5 * 60 * 60));
        assert_eq!(cache.get_book("6f1c").await, Some(b"%PDF-1.7".to_vec()));

        let v2 = AssetCache::builder(control.to_clock()).storage(store).version("2").build();
        assert_eq!(v2.get_book("6f1c").await, None);
    });
}

#[test]
fn remove_single_assets() {
    block_on(async {
        let cache = AssetCache::builder(ClockControl::new_at(UNIX_EPOCH + BASE).to_clock()).memory().build();

        cache.set_thumbnail("a", vec![1]).await;
        cache.set_book("a", vec![2]).await;
        cache.set_book_metadata("a", &record("a")).await;
        cache.set_thumbnail("b", vec![3]).await;

        cache.remove_thumbnail("a").await;
        cache.remove_book("a").await;
        cache.remove_book_metadata("a").await;
        // Removing what is not there is fine.
        cache.remove_thumbnail("a").await;

        assert_eq!(cache.get_thumbnail("a").await, None);
        assert_eq!(cache.get_book("a").await, None);
        assert_eq!(cache.get_book_metadata("a").await, None);
        assert_eq!(cache.get_thumbnail("b").await, Some(vec![3]));
    });
}

#[test]
fn clear_cache_empties_the_store() {
    block_on(async {
        let store = InMemoryStore::new();
        store.set("settings", StoredValue::Raw(b"dark".to_vec())).await.unwrap();
        let cache = AssetCache::builder(ClockControl::new_at(UNIX_EPOCH + BASE).to_clock())
            .storage(store)
            .build();

        cache.set_thumbnail("6f1c", vec![1]).await;
        cache.set_book_metadata("6f1c", &record("6f1c")).await;

        cache.clear_cache().await;

        assert_eq!(cache.get_thumbnail("6f1c").await, None);
        assert_eq!(cache.get_book_metadata("6f1c").await, None);
        assert_eq!(cache.storage().get("settings").await.unwrap(), None);
        assert!(cache.storage().keys().await.unwrap().is_empty());
    });
}

#[test]
fn store_failures_map_to_neutral_values() {
    block_on(async {
        let control = ClockControl::new_at(UNIX_EPOCH + BASE);
        let store = MockStore::new();
        store.seed("thumb_6f1c", StoredValue::Raw(vec![1]));
        store.seed("meta_6f1c", metadata_entry("6f1c", BASE_MILLIS, CACHE_VERSION));
        store.fail_when(|_| true);
        let cache = AssetCache::builder(control.to_clock()).storage(store.clone()).build();

        assert_eq!(cache.get_thumbnail("6f1c").await, None);
        cache.set_thumbnail("6f1c", vec![2]).await;
        assert_eq!(cache.get_book_metadata("6f1c").await, None);
        cache.set_book_metadata("6f1c", &record("6f1c")).await;
        assert_eq!(cache.clear_old_cache().await.removed, 0);
        cache.clear_cache().await;
        cache.remove_thumbnail("6f1c").await;

        // Every operation reached the store and none changed it.
        assert_eq!(store.operations().len(), 7);
        assert_eq!(store.peek("thumb_6f1c"), Some(StoredValue::Raw(vec![1])));
        assert_eq!(store.entry_count(), 2);

        store.clear_failures();
        assert_eq!(cache.get_thumbnail("6f1c").await, Some(vec![1]));
    });
}

#[test]
fn works_through_dynamic_store() {
    use shelf::DynamicStoreExt;

    block_on(async {
        let cache = AssetCache::builder(ClockControl::new_at(UNIX_EPOCH + BASE).to_clock())
            .storage(InMemoryStore::new().into_dynamic())
            .build();

        cache.set_thumbnail("6f1c", vec![4, 2]).await;
        assert_eq!(cache.get_thumbnail("6f1c").await, Some(vec![4, 2]));
    });
}
