// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! In-memory object store for demos and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::storage::error::{StoreError, StoreResult};
use crate::storage::object_store::{ObjectKey, ObjectStore, PutOptions};

#[derive(Debug, Clone)]
struct StoredObject {
    bytes: Vec<u8>,
    content_type: String,
    cache_control: Option<String>,
}

/// A `HashMap`-backed store with the same create semantics as a real bucket:
/// writes land whole, last writer wins, reads of absent keys are `NotFound`.
#[derive(Debug, Default)]
pub struct InMemoryObjectStore {
    objects: RwLock<HashMap<String, StoredObject>>,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an object directly, bypassing the `ObjectStore` contract.
    /// Used by the demo driver and tests to stand in source images.
    pub fn seed(&self, key: &ObjectKey, bytes: Vec<u8>, content_type: impl Into<String>) {
        let mut objects = self.objects.write().expect("object map poisoned");
        objects.insert(
            key.as_ref().to_string(),
            StoredObject {
                bytes,
                content_type: content_type.into(),
                cache_control: None,
            },
        );
    }

    /// Content type recorded for a stored object, if present.
    pub fn content_type_of(&self, key: &ObjectKey) -> Option<String> {
        let objects = self.objects.read().expect("object map poisoned");
        objects.get(key.as_ref()).map(|o| o.content_type.clone())
    }

    /// Cache-control recorded for a stored object, if present.
    pub fn cache_control_of(&self, key: &ObjectKey) -> Option<String> {
        let objects = self.objects.read().expect("object map poisoned");
        objects.get(key.as_ref()).and_then(|o| o.cache_control.clone())
    }

    pub fn len(&self) -> usize {
        self.objects.read().expect("object map poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn exists(&self, key: &ObjectKey) -> StoreResult<bool> {
        let objects = self
            .objects
            .read()
            .map_err(|_| StoreError::backend("object map poisoned"))?;
        Ok(objects.contains_key(key.as_ref()))
    }

    async fn get(&self, key: &ObjectKey) -> StoreResult<Vec<u8>> {
        let objects = self
            .objects
            .read()
            .map_err(|_| StoreError::backend("object map poisoned"))?;
        objects
            .get(key.as_ref())
            .map(|o| o.bytes.clone())
            .ok_or_else(|| StoreError::NotFound {
                key: key.as_ref().to_string(),
            })
    }

    async fn put(&self, key: &ObjectKey, bytes: Vec<u8>, options: &PutOptions) -> StoreResult<()> {
        let mut objects = self
            .objects
            .write()
            .map_err(|_| StoreError::backend("object map poisoned"))?;
        objects.insert(
            key.as_ref().to_string(),
            StoredObject {
                bytes,
                content_type: options.content_type.clone(),
                cache_control: options.cache_control.clone(),
            },
        );
        Ok(())
    }
}
