// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::CacheEntry;

/// A value held by a [`KeyValueStore`](crate::KeyValueStore).
///
/// The two variants replace probing an untyped record for `timestamp` and `version`
/// fields: only [`Wrapped`](Self::Wrapped) values carry an age, so only they are ever
/// candidates for age-based eviction.
///
/// # Examples
///
/// ```
/// use shelf_tier::{CacheEntry, StoredValue};
///
/// let thumbnail = StoredValue::Raw(vec![0x89, 0x50, 0x4e, 0x47]);
/// assert!(thumbnail.as_wrapped().is_none());
///
/// let metadata = StoredValue::Wrapped(CacheEntry::new(b"{}".to_vec(), 0, "1"));
/// assert_eq!(metadata.as_wrapped().map(CacheEntry::version), Some("1"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StoredValue {
    /// Bytes stored without a timestamp or version.
    Raw(Vec<u8>),
    /// Bytes stored inside a timestamped, versioned entry.
    Wrapped(CacheEntry<Vec<u8>>),
}

impl StoredValue {
    /// Returns the wrapped entry, if this value has one.
    #[must_use]
    pub fn as_wrapped(&self) -> Option<&CacheEntry<Vec<u8>>> {
        match self {
            Self::Wrapped(entry) => Some(entry),
            Self::Raw(_) => None,
        }
    }

    /// Returns the payload bytes regardless of shape.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        match self {
            Self::Raw(bytes) => bytes,
            Self::Wrapped(entry) => entry.data(),
        }
    }

    /// Returns the size of the payload in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes().len()
    }

    /// Returns `true` if the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes().is_empty()
    }
}

impl From<CacheEntry<Vec<u8>>> for StoredValue {
    fn from(entry: CacheEntry<Vec<u8>>) -> Self {
        Self::Wrapped(entry)
    }
}
