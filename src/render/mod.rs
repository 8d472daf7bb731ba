// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod pipeline;
mod resolver;
mod service;

#[cfg(test)]
mod integration_tests;

pub use pipeline::{PipelineError, PipelineExecutor};
pub use resolver::{ArtifactResolver, RenderOutcome, RenderedMetadata};
pub use service::TransformService;
