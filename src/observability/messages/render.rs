// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the render path: directive handling, cache probes,
//! and pipeline runs.

use std::fmt::{Display, Formatter};

/// A transform render was requested.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use darkroom::observability::messages::render::RenderRequested;
///
/// let msg = RenderRequested {
///     workspace: "ws_1",
///     image: "img_1",
///     directives: "w=800,format=webp",
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct RenderRequested<'a> {
    pub workspace: &'a str,
    pub image: &'a str,
    pub directives: &'a str,
}

impl Display for RenderRequested<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Render requested for '{}/{}': directives=\"{}\"",
            self.workspace, self.image, self.directives
        )
    }
}

/// An empty canonical sequence resolved straight to the source's default
/// object.
///
/// # Log Level
/// `debug!` - Routine fast path
pub struct SourcePassthrough<'a> {
    pub key: &'a str,
}

impl Display for SourcePassthrough<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "No operations requested, resolving source object '{}'", self.key)
    }
}

/// A derived artifact already exists for the requested key.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ArtifactCacheHit<'a> {
    pub key: &'a str,
}

impl Display for ArtifactCacheHit<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Artifact cache hit: '{}'", self.key)
    }
}

/// No derived artifact exists yet; the pipeline will run.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ArtifactCacheMiss<'a> {
    pub key: &'a str,
}

impl Display for ArtifactCacheMiss<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Artifact cache miss: '{}'", self.key)
    }
}

/// The pipeline produced and persisted a derived artifact.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use darkroom::observability::messages::render::ArtifactRendered;
/// use std::time::Duration;
///
/// let msg = ArtifactRendered {
///     key: "ws_1/derived/2025-03-14/img_1_w_800.webp",
///     width: 800,
///     height: 450,
///     size_bytes: 32_768,
///     duration: Duration::from_millis(120),
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct ArtifactRendered<'a> {
    pub key: &'a str,
    pub width: u32,
    pub height: u32,
    pub size_bytes: usize,
    pub duration: std::time::Duration,
}

impl Display for ArtifactRendered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Rendered '{}': {}x{}, {} bytes, duration={:?}",
            self.key, self.width, self.height, self.size_bytes, self.duration
        )
    }
}

/// A render failed after the cache miss was established.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct RenderFailed<'a> {
    pub key: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for RenderFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Render of '{}' failed: {}", self.key, self.error)
    }
}
