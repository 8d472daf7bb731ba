// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Error types for pixel operation backends.

use thiserror::Error;

use crate::transform::ImageFormat;

/// Errors from decoding, transforming, or encoding image bytes.
#[derive(Error, Debug)]
pub enum ImageOpsError {
    /// The source bytes are not a decodable image.
    #[error("source bytes could not be decoded: {0}")]
    Decode(String),

    /// Encoding to the requested output format failed.
    #[error("encoding to '{format}' failed: {message}")]
    Encode { format: ImageFormat, message: String },

    /// The blocking pixel worker terminated without producing a result.
    #[error("pixel worker terminated unexpectedly: {0}")]
    Worker(String),
}

/// Result type alias for pixel operations.
pub type ImageOpsResult<T> = Result<T, ImageOpsError>;
