// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Route-facing error taxonomy for the render path.
//!
//! Invalid directives never appear here: the parser drops them silently and
//! the request proceeds with fewer operations. Everything that does surface
//! is a typed value the route layer can map to a response deterministically.
//! No variant is retried internally; the caller owns retry policy.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::imageops::ImageOpsError;
use crate::storage::{ObjectKey, StoreError};

/// Failures of `render_transform`, in roughly the order a request can hit
/// them.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The catalog backend itself failed; distinct from a missing record.
    #[error("image catalog lookup failed")]
    Catalog(#[from] CatalogError),

    /// No image record matches the public identifiers. A client error.
    #[error("no image record matches workspace '{workspace}' and image '{image}'")]
    NotFound { workspace: String, image: String },

    /// The original object is missing or unreadable. A server error,
    /// retryable by the caller.
    #[error("source object '{key}' is unavailable")]
    SourceUnavailable {
        key: ObjectKey,
        #[source]
        source: SourceFailure,
    },

    /// An operation or the final encode failed after a successful decode.
    #[error("transform pipeline failed for '{key}'")]
    Pipeline {
        key: ObjectKey,
        #[source]
        source: ImageOpsError,
    },

    /// The transform succeeded but the derived artifact could not be
    /// written. The computed bytes are discarded; a retry is safe and will
    /// recompute.
    #[error("failed to persist derived artifact '{key}'")]
    PersistFailed {
        key: ObjectKey,
        #[source]
        source: StoreError,
    },
}

/// Why the source object could not be used.
#[derive(Error, Debug)]
pub enum SourceFailure {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The object was fetched but its bytes are not a decodable image.
    #[error(transparent)]
    Decode(ImageOpsError),
}
