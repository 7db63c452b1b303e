// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Integration tests for `CacheEntry` and `StoredValue`.

use std::time::Duration;

use shelf_tier::{CacheEntry, StoredValue};

#[test]
fn age_is_measured_from_timestamp() {
    let entry = CacheEntry::new(vec![1_u8], 1_000, "1");
    assert_eq!(entry.age_at(1_000), Duration::ZERO);
    assert_eq!(entry.age_at(3_601_000), Duration::from_secs(3600));
}

#[test]
fn age_of_future_entry_is_zero() {
    let entry = CacheEntry::new((), 5_000, "1");
    assert_eq!(entry.age_at(1_000), Duration::ZERO);
}

#[test]
fn map_keeps_timestamp_and_version() {
    let entry = CacheEntry::new("42", 7, "2");
    let mapped = entry.map(|s| s.len());
    assert_eq!(*mapped.data(), 2);
    assert_eq!(mapped.timestamp(), 7);
    assert_eq!(mapped.version(), "2");
}

#[test]
fn try_map_propagates_error() {
    let entry = CacheEntry::new("not a number", 7, "1");
    let result = entry.try_map(str::parse::<u32>);
    assert!(result.is_err());
}

#[test]
fn raw_value_has_no_wrapper() {
    let value = StoredValue::Raw(vec![1, 2, 3]);
    assert!(value.as_wrapped().is_none());
    assert_eq!(value.bytes(), &[1, 2, 3]);
    assert_eq!(value.len(), 3);
}

#[test]
fn wrapped_value_exposes_entry() {
    let value = StoredValue::from(CacheEntry::new(Vec::new(), 99, "1"));
    let entry = value.as_wrapped().expect("value should be wrapped");
    assert_eq!(entry.timestamp(), 99);
    assert!(value.is_empty());
}
