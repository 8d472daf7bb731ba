// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for object store reads and writes on the render path.

use std::fmt::{Display, Formatter};

/// A derived artifact was written to the store.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ArtifactPersisted<'a> {
    pub key: &'a str,
    pub size_bytes: usize,
    pub content_type: &'a str,
}

impl Display for ArtifactPersisted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Persisted '{}': {} bytes, {}",
            self.key, self.size_bytes, self.content_type
        )
    }
}

/// Fetching the source object failed; the render cannot proceed.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct SourceFetchFailed<'a> {
    pub key: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for SourceFetchFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Failed to fetch source object '{}': {}", self.key, self.error)
    }
}

/// The artifact write failed after a successful transform.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct ArtifactPersistFailed<'a> {
    pub key: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for ArtifactPersistFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Failed to persist artifact '{}': {}", self.key, self.error)
    }
}
