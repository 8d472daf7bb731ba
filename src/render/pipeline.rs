// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Pipeline executor: applies a canonical sequence to source bytes.
//!
//! The executor owns sequencing only. It walks the operations in canonical
//! order — Resize → Crop → Gravity → Blur → Sharpen → Grayscale → Format —
//! and delegates every pixel to the injected `ImageOperations` backend.
//! Execution is synchronous and CPU-bound; callers run it on a blocking
//! worker so it never stalls the async runtime.

use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::imageops::{EncodedImage, ImageOperations, ImageOpsError};
use crate::transform::{CanonicalSequence, Operation};

/// Where a pipeline run failed. Callers map `Decode` to a source fault and
/// everything else to a transform fault.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("source decode failed")]
    Decode(#[source] ImageOpsError),

    #[error("transform or encode failed")]
    Transform(#[source] ImageOpsError),
}

/// Applies canonical sequences through a pixel backend.
pub struct PipelineExecutor {
    ops: Arc<dyn ImageOperations>,
}

impl PipelineExecutor {
    pub fn new(ops: Arc<dyn ImageOperations>) -> Self {
        Self { ops }
    }

    /// Run `sequence` against `source`, returning the encoded result.
    ///
    /// Runs to completion once started; there is no cancellation point.
    pub fn execute(
        &self,
        source: &[u8],
        sequence: &CanonicalSequence,
    ) -> Result<EncodedImage, PipelineError> {
        let mut handle = self.ops.open(source).map_err(PipelineError::Decode)?;

        let operations = sequence.operations();
        debug!("applying {} operations", operations.len());
        for operation in operations {
            match operation {
                Operation::Resize { width, height } => handle.resize(width, height),
                Operation::Crop(mode) => handle.set_fit(mode),
                Operation::Gravity(position) => handle.set_gravity(position),
                Operation::Blur(sigma) => handle.blur(sigma),
                Operation::Sharpen(sigma) => handle.sharpen(sigma),
                Operation::Grayscale => handle.grayscale(),
                // The encode below carries the format; nothing to stage.
                Operation::Format(_) => {}
            }
        }

        handle
            .encode(sequence.output_format())
            .map_err(PipelineError::Transform)
    }
}
