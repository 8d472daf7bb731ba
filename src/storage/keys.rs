// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Derived-artifact key construction.
//!
//! Keys are deterministic renderings of a canonical sequence:
//!
//! ```text
//! {workspace}/{namespace}/{YYYY-MM-DD}/{image}_{suffix}.{format}
//! ```
//!
//! Two requests share a key exactly when they canonicalize to the same
//! sequence on the same calendar day. The day segment is a deliberate
//! low-cost invalidation boundary: artifacts are immutable per
//! (source, sequence) pair, so a daily re-render is wasted work at worst,
//! never a correctness problem.

use chrono::{NaiveDate, Utc};

use crate::storage::object_store::ObjectKey;
use crate::transform::CanonicalSequence;

/// Builds derived-artifact keys under a fixed namespace token.
#[derive(Debug, Clone)]
pub struct DerivedKeyBuilder {
    namespace: String,
}

impl DerivedKeyBuilder {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    /// Build the key for `sequence` on an explicit calendar day.
    ///
    /// Callers guarantee `sequence` is non-empty; an empty sequence resolves
    /// to the source's default object and never reaches key construction.
    pub fn build(
        &self,
        workspace: &str,
        image: &str,
        sequence: &CanonicalSequence,
        day: NaiveDate,
    ) -> ObjectKey {
        ObjectKey::new(format!(
            "{workspace}/{namespace}/{day}/{image}_{suffix}.{extension}",
            namespace = self.namespace,
            day = day.format("%Y-%m-%d"),
            suffix = sequence.suffix(),
            extension = sequence.output_format().as_str(),
        ))
    }

    /// Build the key for `sequence` stamped with the current UTC day.
    pub fn build_today(&self, workspace: &str, image: &str, sequence: &CanonicalSequence) -> ObjectKey {
        self.build(workspace, image, sequence, Utc::now().date_naive())
    }
}
