// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Directory-backed store implementation.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use ohno::EnrichableExt;
use shelf_tier::{Error, KeyValueStore, StoredValue};
use tokio::fs;

use crate::key::{self, ENTRY_EXTENSION, TEMP_EXTENSION};

/// A persistent store keeping one file per key in a directory.
///
/// Clones share the same directory and temporary-file counter.
///
/// # Examples
///
/// ```no_run
/// use shelf_disk::DirectoryStore;
/// use shelf_tier::{KeyValueStore, StoredValue};
///
/// # async fn example() -> Result<(), shelf_tier::Error> {
/// let store = DirectoryStore::open("/var/cache/bookshelf").await?;
/// store.set("settings", StoredValue::Raw(b"dark".to_vec())).await?;
/// assert_eq!(store.keys().await?, vec!["settings".to_string()]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    root: PathBuf,
    next_temp: AtomicU64,
}

impl DirectoryStore {
    /// Opens the store rooted at `root`, creating the directory if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub async fn open(root: impl AsRef<Path>) -> Result<Self, Error> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await.map_err(|e| io_failure(e, "create store directory", &root))?;

        Ok(Self {
            inner: Arc::new(Inner {
                root,
                next_temp: AtomicU64::new(0),
            }),
        })
    }

    /// Returns the directory backing this store.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.inner.root
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.inner.root.join(format!("{}.{ENTRY_EXTENSION}", key::file_stem(key)))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        let n = self.inner.next_temp.fetch_add(1, Ordering::Relaxed);
        self.inner
            .root
            .join(format!("{}.{}.{n}.{TEMP_EXTENSION}", key::file_stem(key), std::process::id()))
    }

    /// Lists the paths of every file this store owns, flagging which ones are entries.
    async fn owned_files(&self) -> Result<Vec<(PathBuf, bool)>, Error> {
        let root = &self.inner.root;
        let mut dir = fs::read_dir(root).await.map_err(|e| io_failure(e, "list store directory", root))?;
        let mut files = Vec::new();

        while let Some(item) = dir.next_entry().await.map_err(|e| io_failure(e, "list store directory", root))? {
            let path = item.path();
            let Some(extension) = path.extension().and_then(|e| e.to_str()) else {
                continue;
            };

            if extension == ENTRY_EXTENSION {
                if path.file_stem().and_then(|s| s.to_str()).is_some_and(key::is_entry_stem) {
                    files.push((path, true));
                }
            } else if extension == TEMP_EXTENSION {
                files.push((path, false));
            }
        }

        Ok(files)
    }
}

impl KeyValueStore for DirectoryStore {
    async fn get(&self, key: &str) -> Result<Option<StoredValue>, Error> {
        let path = self.entry_path(key);
        match read_entry(&path).await? {
            Some((stored_key, value)) if stored_key == key => Ok(Some(value)),
            // A different key with the same digest.
            _ => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: StoredValue) -> Result<(), Error> {
        let path = self.entry_path(key);
        let bytes = postcard::to_stdvec(&(key, &value)).map_err(|e| Error::from_message(e).enrich(format!("encode entry for key {key}")))?;

        let temp = self.temp_path(key);
        fs::write(&temp, &bytes).await.map_err(|e| io_failure(e, "write entry", &temp))?;

        if let Err(e) = fs::rename(&temp, &path).await {
            // Best effort; `clear` also sweeps leftover temporary files.
            let _cleanup = fs::remove_file(&temp).await;
            return Err(io_failure(e, "replace entry", &path));
        }

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), Error> {
        let path = self.entry_path(key);
        match fs::remove_file(&path).await {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(io_failure(e, "remove entry", &path)),
            _ => Ok(()),
        }
    }

    async fn keys(&self) -> Result<Vec<String>, Error> {
        let mut keys = Vec::new();
        for (path, _) in self.owned_files().await?.into_iter().filter(|(_, is_entry)| *is_entry) {
            // Entries that vanished or do not decode are not listed.
            if let Ok(Some((key, _))) = read_entry(&path).await {
                keys.push(key);
            }
        }
        Ok(keys)
    }

    async fn clear(&self) -> Result<(), Error> {
        for (path, _) in self.owned_files().await? {
            match fs::remove_file(&path).await {
                Err(e) if e.kind() != ErrorKind::NotFound => return Err(io_failure(e, "remove entry", &path)),
                _ => {}
            }
        }
        Ok(())
    }
}

/// Reads and decodes the entry file at `path`; a missing file is `Ok(None)`.
async fn read_entry(path: &Path) -> Result<Option<(String, StoredValue)>, Error> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(io_failure(e, "read entry", path)),
    };

    postcard::from_bytes(&bytes)
        .map(Some)
        .map_err(|e| Error::from_message(e).enrich(format!("decode entry {}", path.display())))
}

fn io_failure(error: std::io::Error, action: &str, path: &Path) -> Error {
    Error::from_message(error).enrich(format!("{action} {}", path.display()))
}
