// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Image record lookup.
//!
//! The relational store that owns workspace and image rows lives outside
//! this crate; the render path only ever asks one question of it — which
//! object keys back a public (workspace, image) pair — and treats the
//! answer as read-only.

mod memory;

pub use memory::InMemoryCatalog;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::ObjectKey;

/// The object keys backing one image: the untouched upload and the
/// compressed default rendition served when no directives are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceImageRecord {
    pub original_key: ObjectKey,
    pub default_key: ObjectKey,
}

/// Errors from the catalog backend itself. A missing record is not an
/// error; lookups return `None` for that.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("catalog lookup failed: {0}")]
    Backend(String),
}

/// Lookup contract over the external image metadata store.
#[async_trait]
pub trait ImageCatalog: Send + Sync {
    /// Resolve a public (workspace, image) pair to its backing object keys.
    async fn lookup_image(
        &self,
        workspace: &str,
        image: &str,
    ) -> Result<Option<SourceImageRecord>, CatalogError>;
}
