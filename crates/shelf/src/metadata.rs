// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Descriptive record for one uploaded book.
///
/// `file_key` identifies the source asset and is what cache keys are derived from.
/// Fields beyond the four well-known ones are kept in [`extra`](Self::extra) so that a
/// record read back from the cache is identical to the one written.
///
/// The serialized form uses the camel-case field names the backend returns.
///
/// # Examples
///
/// ```
/// use shelf::BookMetadataRecord;
///
/// let record: BookMetadataRecord = serde_json::from_str(
///     r#"{"title":"Emma","fileKey":"6f1c","thumbUrl":"https://cdn/6f1c.png","uploadTime":"2024-03-01","author":"Austen"}"#,
/// )?;
/// assert_eq!(record.file_key, "6f1c");
/// assert_eq!(record.extra["author"], "Austen");
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BookMetadataRecord {
    /// Display title of the book.
    pub title: String,
    /// Unique identifier of the source asset.
    #[serde(rename = "fileKey")]
    pub file_key: String,
    /// Location of the book's thumbnail image.
    #[serde(rename = "thumbUrl")]
    pub thumb_url: String,
    /// When the book was uploaded, as reported by the backend.
    #[serde(rename = "uploadTime")]
    pub upload_time: String,
    /// Any additional fields.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl BookMetadataRecord {
    /// Creates a record with the four well-known fields and no extras.
    pub fn new(title: impl Into<String>, file_key: impl Into<String>, thumb_url: impl Into<String>, upload_time: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            file_key: file_key.into(),
            thumb_url: thumb_url.into(),
            upload_time: upload_time.into(),
            extra: BTreeMap::new(),
        }
    }

    /// Adds an extra field, replacing any previous value under the same name.
    #[must_use]
    pub fn with_extra(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_backend_field_names() {
        let record = BookMetadataRecord::new("Emma", "6f1c", "https://cdn/6f1c.png", "2024-03-01").with_extra("pages", 474);
        let json = serde_json::to_value(&record).expect("serialize failed");

        assert_eq!(json["fileKey"], "6f1c");
        assert_eq!(json["thumbUrl"], "https://cdn/6f1c.png");
        assert_eq!(json["uploadTime"], "2024-03-01");
        assert_eq!(json["pages"], 474);
        assert!(json.get("extra").is_none());
    }

    #[test]
    fn unknown_fields_are_preserved() {
        let json = r#"{"title":"Emma","fileKey":"6f1c","thumbUrl":"","uploadTime":"","tags":["classic"],"rating":4.5}"#;
        let record: BookMetadataRecord = serde_json::from_str(json).expect("deserialize failed");

        assert_eq!(record.extra.len(), 2);
        assert_eq!(record.extra["tags"], serde_json::json!(["classic"]));

        let back: BookMetadataRecord = serde_json::from_slice(&serde_json::to_vec(&record).expect("serialize failed")).expect("deserialize failed");
        assert_eq!(back, record);
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let result = serde_json::from_str::<BookMetadataRecord>(r#"{"title":"Emma"}"#);
        assert!(result.is_err());
    }
}
