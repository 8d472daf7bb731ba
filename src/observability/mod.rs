// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Centralized message types for diagnostic and operational logging across
//! the render path. Message types follow a struct-based pattern with a
//! `Display` implementation to:
//!
//! * Eliminate magic strings scattered throughout the codebase
//! * Enable future internationalization without code changes
//! * Provide consistent, structured logging output
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::render` - directive handling, cache probes, pipeline runs
//! * `messages::store` - object store reads and writes
//!
//! # Usage
//!
//! ```rust
//! use darkroom::observability::messages::render::ArtifactCacheHit;
//!
//! let msg = ArtifactCacheHit {
//!     key: "ws_1/derived/2025-03-14/img_1_w_800.webp",
//! };
//!
//! tracing::info!("{}", msg);
//! ```

pub mod messages;
