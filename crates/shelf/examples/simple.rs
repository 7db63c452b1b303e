// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Simple Asset Cache Example
//!
//! Caches a thumbnail and a metadata record in memory and reads them back.

use shelf::{AssetCache, BookMetadataRecord};
use tick::Clock;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    let cache = AssetCache::builder(Clock::new_tokio()).memory().name("library").build();

    cache.set_thumbnail("6f1c", vec![0x89, 0x50, 0x4e, 0x47]).await;
    let thumbnail = cache.get_thumbnail("6f1c").await;
    println!("thumbnail: {:?}", thumbnail.map(|bytes| bytes.len()));

    let record = BookMetadataRecord::new("Emma", "6f1c", "https://cdn.example.com/6f1c.png", "2024-03-01")
        .with_extra("author", "Jane Austen");
    cache.set_book_metadata(&record.file_key, &record).await;

    if let Some(cached) = cache.get_book_metadata("6f1c").await {
        println!("metadata: {} by {}", cached.title, cached.extra["author"]);
    }

    // Never cached, so this is a miss
    let missing = cache.get_book_metadata("0000").await;
    println!("missing: {missing:?}");

    // Reset everything, as on logout
    cache.clear_cache().await;
}
