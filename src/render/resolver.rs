// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Artifact resolution against the backing object store.
//!
//! The store is the only cache there is. A resolve is a plain
//! read-then-write: probe for the derived key, and on a miss fetch the
//! source, run the pipeline on a blocking worker, and write the result
//! back. Two requests racing on the same key may both compute and both
//! write; the bytes are deterministic per key and the store's create
//! semantics are last-writer-wins, so duplicate work is accepted instead of
//! a distributed lock.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::catalog::SourceImageRecord;
use crate::errors::{RenderError, SourceFailure};
use crate::imageops::{EncodedImage, ImageOpsError};
use crate::observability::messages::render::{
    ArtifactCacheHit, ArtifactCacheMiss, ArtifactRendered, RenderFailed, SourcePassthrough,
};
use crate::observability::messages::store::{
    ArtifactPersistFailed, ArtifactPersisted, SourceFetchFailed,
};
use crate::render::pipeline::{PipelineError, PipelineExecutor};
use crate::storage::{ObjectKey, ObjectStore, PutOptions};
use crate::transform::{CanonicalSequence, ImageFormat};

/// Shape metadata of a freshly rendered artifact, reported alongside the
/// key for response payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedMetadata {
    pub width: u32,
    pub height: u32,
    pub size_bytes: usize,
    pub format: ImageFormat,
}

impl RenderedMetadata {
    fn of(rendered: &EncodedImage) -> Self {
        Self {
            width: rendered.width,
            height: rendered.height,
            size_bytes: rendered.size_bytes(),
            format: rendered.format,
        }
    }
}

/// How a render request was satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RenderOutcome {
    /// No operations were requested; the source's default object answers.
    Source { key: ObjectKey },
    /// A derived artifact already existed for the key.
    CacheHit { key: ObjectKey },
    /// The pipeline ran and the artifact was persisted.
    Rendered {
        key: ObjectKey,
        metadata: RenderedMetadata,
    },
}

impl RenderOutcome {
    /// The object key the caller should serve, whatever the path taken.
    pub fn key(&self) -> &ObjectKey {
        match self {
            RenderOutcome::Source { key } => key,
            RenderOutcome::CacheHit { key } => key,
            RenderOutcome::Rendered { key, .. } => key,
        }
    }
}

/// Resolves (source record, canonical sequence, derived key) triples to
/// servable object keys, rendering at most once per key.
pub struct ArtifactResolver {
    store: Arc<dyn ObjectStore>,
    executor: Arc<PipelineExecutor>,
    cache_control: Option<String>,
}

impl ArtifactResolver {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        executor: Arc<PipelineExecutor>,
        cache_control: Option<String>,
    ) -> Self {
        Self {
            store,
            executor,
            cache_control,
        }
    }

    /// Resolve `key` to a servable object, rendering on a miss.
    ///
    /// No lock protects the probe/compute/write window, no internal retry
    /// runs, and a started pipeline runs to completion even if the caller
    /// has gone away.
    pub async fn resolve(
        &self,
        record: &SourceImageRecord,
        sequence: &CanonicalSequence,
        key: ObjectKey,
    ) -> Result<RenderOutcome, RenderError> {
        if sequence.is_empty() {
            debug!("{}", SourcePassthrough { key: record.default_key.as_ref() });
            return Ok(RenderOutcome::Source {
                key: record.default_key.clone(),
            });
        }

        match self.store.exists(&key).await {
            Ok(true) => {
                info!("{}", ArtifactCacheHit { key: key.as_ref() });
                return Ok(RenderOutcome::CacheHit { key });
            }
            Ok(false) => {
                info!("{}", ArtifactCacheMiss { key: key.as_ref() });
            }
            // A failed probe falls through to the miss path; a genuinely
            // broken store surfaces on the source fetch below.
            Err(err) => {
                warn!("existence probe for '{key}' failed, treating as miss: {err}");
            }
        }

        let source = self.store.get(&record.original_key).await.map_err(|err| {
            error!(
                "{}",
                SourceFetchFailed {
                    key: record.original_key.as_ref(),
                    error: &err,
                }
            );
            RenderError::SourceUnavailable {
                key: record.original_key.clone(),
                source: SourceFailure::Store(err),
            }
        })?;

        let started = Instant::now();
        let executor = Arc::clone(&self.executor);
        let worker_sequence = sequence.clone();
        let rendered = tokio::task::spawn_blocking(move || {
            executor.execute(&source, &worker_sequence)
        })
        .await
        .map_err(|join_err| RenderError::Pipeline {
            key: key.clone(),
            source: ImageOpsError::Worker(join_err.to_string()),
        })?
        .map_err(|err| {
            let err = match err {
                PipelineError::Decode(source) => RenderError::SourceUnavailable {
                    key: record.original_key.clone(),
                    source: SourceFailure::Decode(source),
                },
                PipelineError::Transform(source) => RenderError::Pipeline {
                    key: key.clone(),
                    source,
                },
            };
            error!("{}", RenderFailed { key: key.as_ref(), error: &err });
            err
        })?;

        info!(
            "{}",
            ArtifactRendered {
                key: key.as_ref(),
                width: rendered.width,
                height: rendered.height,
                size_bytes: rendered.size_bytes(),
                duration: started.elapsed(),
            }
        );

        let metadata = RenderedMetadata::of(&rendered);
        let mut options = PutOptions::new(rendered.format.content_type());
        if let Some(cache_control) = &self.cache_control {
            options = options.with_cache_control(cache_control.clone());
        }

        match self.store.put(&key, rendered.bytes, &options).await {
            Ok(()) => {
                info!(
                    "{}",
                    ArtifactPersisted {
                        key: key.as_ref(),
                        size_bytes: metadata.size_bytes,
                        content_type: &options.content_type,
                    }
                );
                Ok(RenderOutcome::Rendered { key, metadata })
            }
            Err(err) => {
                error!(
                    "{}",
                    ArtifactPersistFailed {
                        key: key.as_ref(),
                        error: &err,
                    }
                );
                Err(RenderError::PersistFailed { key, source: err })
            }
        }
    }
}
