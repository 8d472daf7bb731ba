// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Object store contract consumed by the artifact cache.
//!
//! The store is the cache's only source of truth: there is no in-process
//! table of rendered artifacts, so any number of service instances can run
//! against the same bucket. Derived objects are written once and never
//! updated; concurrent writers racing on the same key produce identical
//! bytes, so last-writer-wins create semantics are safe.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::storage::error::StoreResult;

/// A path-like key addressing one object in the backing store.
///
/// Keys are opaque to the store; their structure (workspace prefix, day
/// partition, shortcode suffix) is owned by [`crate::storage::keys`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectKey(String);

impl ObjectKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

impl AsRef<str> for ObjectKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

/// Write-time attributes for a stored object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutOptions {
    pub content_type: String,
    pub cache_control: Option<String>,
}

impl PutOptions {
    pub fn new(content_type: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            cache_control: None,
        }
    }

    pub fn with_cache_control(mut self, cache_control: impl Into<String>) -> Self {
        self.cache_control = Some(cache_control.into());
        self
    }
}

/// Minimal object store surface: existence probe, whole-object read,
/// create-style write.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Cheap existence check, preferably without fetching the body.
    async fn exists(&self, key: &ObjectKey) -> StoreResult<bool>;

    /// Fetch the full object body. Missing objects are
    /// [`StoreError::NotFound`](crate::storage::StoreError::NotFound).
    async fn get(&self, key: &ObjectKey) -> StoreResult<Vec<u8>>;

    /// Write an object. Overwrites are permitted; callers only ever write
    /// deterministic content per key.
    async fn put(&self, key: &ObjectKey, bytes: Vec<u8>, options: &PutOptions) -> StoreResult<()>;
}
