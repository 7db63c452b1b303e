// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Mapping between store keys and file names.

use sha2::{Digest, Sha256};

pub(crate) const ENTRY_EXTENSION: &str = "entry";
pub(crate) const TEMP_EXTENSION: &str = "tmp";

const DIGEST_LEN: usize = 32;

/// Returns the file stem for `key`: the lowercase hex SHA-256 of its UTF-8 bytes.
///
/// The stem has the same length for every key, so long keys never exceed file name limits.
pub(crate) fn file_stem(key: &str) -> String {
    hex::encode(Sha256::digest(key.as_bytes()))
}

/// Returns `true` if `stem` could have been produced by [`file_stem`].
pub(crate) fn is_entry_stem(stem: &str) -> bool {
    stem.bytes().all(|b| !b.is_ascii_uppercase()) && hex::decode(stem).is_ok_and(|digest| digest.len() == DIGEST_LEN)
}
