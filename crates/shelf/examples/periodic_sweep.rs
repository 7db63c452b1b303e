// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Periodic Sweep Example
//!
//! Drives sweeps from a timer stream owned by the application.

use std::pin::pin;
use std::time::Duration;

use futures::StreamExt;
use shelf::{AssetCache, BookMetadataRecord};
use tick::Clock;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    let cache = AssetCache::builder(Clock::new_tokio())
        .memory()
        .sweep_age(Duration::from_millis(200))
        .build();

    let record = BookMetadataRecord::new("Persuasion", "9a2e", "https://cdn.example.com/9a2e.png", "2024-03-01");
    cache.set_book_metadata("9a2e", &record).await;
    cache.set_thumbnail("9a2e", vec![1, 2, 3]).await;

    // Sweep every 100ms and stop after three rounds
    let mut sweeps = pin!(cache.sweeps(Duration::from_millis(100)).take(3));
    while let Some(report) = sweeps.next().await {
        println!("scanned {} keys, removed {}, failed {}", report.scanned, report.removed, report.failures);
    }

    // The thumbnail is never swept
    assert!(cache.get_thumbnail("9a2e").await.is_some());
}
