// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Persistent Asset Cache Example
//!
//! Keeps cached assets in a directory so they survive a restart.

use shelf::{AssetCache, DirectoryStore};
use tick::Clock;

#[tokio::main]
async fn main() -> Result<(), shelf::Error> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    let dir = std::env::temp_dir().join("shelf-persistent-example");
    let clock = Clock::new_tokio();

    {
        let cache = AssetCache::builder(clock.clone())
            .storage(DirectoryStore::open(&dir).await?)
            .build();
        cache.set_thumbnail("6f1c", vec![0xff, 0xd8, 0xff]).await;
    }

    // A fresh cache over the same directory sees the thumbnail
    let cache = AssetCache::builder(clock).storage(DirectoryStore::open(&dir).await?).build();
    println!("thumbnail after reopen: {:?}", cache.get_thumbnail("6f1c").await);

    cache.clear_cache().await;
    Ok(())
}
