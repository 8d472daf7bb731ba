// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The transform service facade the route layer calls.
//!
//! One entry point: public identifiers plus a raw directive string in,
//! a servable object key (with render metadata on a fresh render) out.
//! Mapping the key to a public URL or redirect stays with the caller.

use std::sync::Arc;

use tracing::info;

use crate::catalog::ImageCatalog;
use crate::errors::RenderError;
use crate::imageops::ImageOperations;
use crate::observability::messages::render::RenderRequested;
use crate::render::pipeline::PipelineExecutor;
use crate::render::resolver::{ArtifactResolver, RenderOutcome};
use crate::storage::{DerivedKeyBuilder, ObjectStore};
use crate::transform::{canonicalize, parse_directives};

/// On-demand image transformation with a derived-artifact cache.
///
/// All collaborators are injected at construction; the service holds no
/// mutable state, so one instance is shared freely across request tasks.
pub struct TransformService {
    catalog: Arc<dyn ImageCatalog>,
    keys: DerivedKeyBuilder,
    resolver: ArtifactResolver,
}

impl TransformService {
    pub fn new(
        catalog: Arc<dyn ImageCatalog>,
        store: Arc<dyn ObjectStore>,
        ops: Arc<dyn ImageOperations>,
        namespace: impl Into<String>,
        cache_control: Option<String>,
    ) -> Self {
        let executor = Arc::new(PipelineExecutor::new(ops));
        Self {
            catalog,
            keys: DerivedKeyBuilder::new(namespace),
            resolver: ArtifactResolver::new(store, executor, cache_control),
        }
    }

    /// Render (or reuse) the artifact addressed by the public identifiers
    /// and the raw directive string.
    ///
    /// Malformed directives never fail the request; they are dropped during
    /// parsing, and a fully-invalid string degrades to the no-directives
    /// path, which serves the source's default object without touching the
    /// artifact cache.
    pub async fn render_transform(
        &self,
        workspace: &str,
        image: &str,
        raw_directives: &str,
    ) -> Result<RenderOutcome, RenderError> {
        info!(
            "{}",
            RenderRequested {
                workspace,
                image,
                directives: raw_directives,
            }
        );

        let record = self
            .catalog
            .lookup_image(workspace, image)
            .await?
            .ok_or_else(|| RenderError::NotFound {
                workspace: workspace.to_string(),
                image: image.to_string(),
            })?;

        let sequence = canonicalize(&parse_directives(raw_directives));
        if sequence.is_empty() {
            return Ok(RenderOutcome::Source {
                key: record.default_key,
            });
        }

        let key = self.keys.build_today(workspace, image, &sequence);
        self.resolver.resolve(&record, &sequence, key).await
    }
}
