// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! In-memory catalog for demos and tests.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::catalog::{CatalogError, ImageCatalog, SourceImageRecord};

/// A fixed map of (workspace, image) pairs to source records.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    records: HashMap<(String, String), SourceImageRecord>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        workspace: impl Into<String>,
        image: impl Into<String>,
        record: SourceImageRecord,
    ) {
        self.records.insert((workspace.into(), image.into()), record);
    }
}

#[async_trait]
impl ImageCatalog for InMemoryCatalog {
    async fn lookup_image(
        &self,
        workspace: &str,
        image: &str,
    ) -> Result<Option<SourceImageRecord>, CatalogError> {
        Ok(self
            .records
            .get(&(workspace.to_string(), image.to_string()))
            .cloned())
    }
}
