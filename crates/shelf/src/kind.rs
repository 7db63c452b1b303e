// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Key namespacing for the kinds of cached assets.

/// The kind of asset a store key belongs to.
///
/// Each kind owns a disjoint key prefix, so the same file key can have a thumbnail, a
/// book payload and a metadata record cached side by side in one store.
///
/// # Examples
///
/// ```
/// use shelf::AssetKind;
///
/// assert_eq!(AssetKind::Thumbnail.key("6f1c"), "thumb_6f1c");
/// assert_eq!(AssetKind::from_key("meta_6f1c"), Some((AssetKind::Metadata, "6f1c")));
/// assert_eq!(AssetKind::from_key("settings"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// Raw thumbnail images, stored without a timestamp or version.
    Thumbnail,
    /// Book file contents, stored wrapped.
    Book,
    /// Book metadata records, stored wrapped.
    Metadata,
}

impl AssetKind {
    /// Every asset kind, in prefix order.
    pub const ALL: [Self; 3] = [Self::Thumbnail, Self::Book, Self::Metadata];

    /// Returns the key prefix owned by this kind.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Thumbnail => "thumb_",
            Self::Book => "book_",
            Self::Metadata => "meta_",
        }
    }

    /// Derives the store key for `file_key`.
    #[must_use]
    pub fn key(self, file_key: &str) -> String {
        let prefix = self.prefix();
        let mut key = String::with_capacity(prefix.len() + file_key.len());
        key.push_str(prefix);
        key.push_str(file_key);
        key
    }

    /// Splits a store key into its kind and file key.
    ///
    /// Returns `None` for keys outside the three cache prefixes.
    #[must_use]
    pub fn from_key(key: &str) -> Option<(Self, &str)> {
        Self::ALL
            .into_iter()
            .find_map(|kind| key.strip_prefix(kind.prefix()).map(|file_key| (kind, file_key)))
    }
}
