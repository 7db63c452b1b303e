// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg(test)]

pub(crate) const CACHE_NAME: &str = "cache.name";

pub(crate) const CACHE_EVENT_NAME: &str = "cache.event";

pub(crate) const CACHE_OPERATION_NAME: &str = "cache.operation";

pub(crate) const CACHE_ACTIVITY_NAME: &str = "cache.activity";

pub(crate) const CACHE_KEY_NAME: &str = "cache.key";
