// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Error types for store operations.

/// A failed store operation.
///
/// This is the only error kind a store reports: the underlying operation did not
/// complete (I/O failure, exhausted quota, corrupted data, and so on). The original
/// cause is preserved and reachable through [`std::error::Error::source()`].
///
/// # Example
///
/// ```
/// use shelf_tier::Error;
///
/// let error = Error::from_message("disk quota exceeded");
/// assert!(error.to_string().contains("disk quota exceeded"));
/// ```
#[ohno::error]
pub struct Error {}

impl Error {
    /// Creates a new error from any type that can be converted to an error.
    ///
    /// This is the public API for creating store errors from external crates.
    pub fn from_message(cause: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::caused_by(cause)
    }
}

/// A specialized [`Result`] type for store operations.
pub type Result<T> = std::result::Result<T, Error>;
