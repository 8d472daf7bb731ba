// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Error types for object store operations.

use thiserror::Error;

/// Errors surfaced by object store backends.
///
/// `NotFound` is the only variant callers branch on; everything else is an
/// opaque backend fault carried up to the route-facing taxonomy.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No object exists at the requested key.
    #[error("object '{key}' not found")]
    NotFound { key: String },

    /// The backend rejected or failed the request.
    #[error("store request failed: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(message: impl Into<String>) -> Self {
        StoreError::Backend(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
