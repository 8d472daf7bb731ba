// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Canonicalization of a directive set into a deterministic operation
//! sequence.
//!
//! The canonical form is what the rest of the system keys on: two requests
//! address the same derived artifact exactly when they canonicalize to the
//! same sequence. Deduplication is first-occurrence-wins per directive kind,
//! and the operation order is fixed regardless of the order directives
//! appeared in the URL: Resize → Crop → Gravity → Blur → Sharpen →
//! Grayscale → Format.

use std::collections::HashSet;

use crate::transform::operation::{CropMode, Gravity, ImageFormat, Operation};
use crate::transform::parser::Directive;

/// The deduplicated, fixed-order operation set derived from a directive
/// string. A pure function of the directive set: same set in, same sequence
/// and key suffix out.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CanonicalSequence {
    width: Option<u32>,
    height: Option<u32>,
    crop: Option<CropMode>,
    gravity: Option<Gravity>,
    blur: Option<f32>,
    sharpen: Option<f32>,
    grayscale: bool,
    format: Option<ImageFormat>,
}

/// Fold parsed directives into a canonical sequence.
///
/// The first directive of each kind wins; later duplicates are ignored. A
/// leading `Grayscale(false)` therefore claims the grayscale slot and keeps
/// any later enable out, while contributing no operation itself.
pub fn canonicalize(directives: &[Directive]) -> CanonicalSequence {
    let mut seen = HashSet::new();
    let mut sequence = CanonicalSequence::default();

    for directive in directives {
        if !seen.insert(directive.kind()) {
            continue;
        }
        match *directive {
            Directive::Width(w) => sequence.width = Some(w),
            Directive::Height(h) => sequence.height = Some(h),
            Directive::Crop(mode) => sequence.crop = Some(mode),
            Directive::Gravity(position) => sequence.gravity = Some(position),
            Directive::Blur(sigma) => sequence.blur = Some(sigma),
            Directive::Sharpen(sigma) => sequence.sharpen = Some(sigma),
            Directive::Grayscale(enabled) => sequence.grayscale = enabled,
            Directive::Format(format) => sequence.format = Some(format),
        }
    }

    sequence
}

impl CanonicalSequence {
    /// True when no operation is present. An empty sequence resolves to the
    /// source's default object and never touches the artifact cache.
    pub fn is_empty(&self) -> bool {
        self.width.is_none()
            && self.height.is_none()
            && self.crop.is_none()
            && self.gravity.is_none()
            && self.blur.is_none()
            && self.sharpen.is_none()
            && !self.grayscale
            && self.format.is_none()
    }

    /// The present operations in canonical order.
    pub fn operations(&self) -> Vec<Operation> {
        let mut operations = Vec::new();
        if self.width.is_some() || self.height.is_some() {
            operations.push(Operation::Resize {
                width: self.width,
                height: self.height,
            });
        }
        if let Some(mode) = self.crop {
            operations.push(Operation::Crop(mode));
        }
        if let Some(position) = self.gravity {
            operations.push(Operation::Gravity(position));
        }
        if let Some(sigma) = self.blur {
            operations.push(Operation::Blur(sigma));
        }
        if let Some(sigma) = self.sharpen {
            operations.push(Operation::Sharpen(sigma));
        }
        if self.grayscale {
            operations.push(Operation::Grayscale);
        }
        if let Some(format) = self.format {
            operations.push(Operation::Format(format));
        }
        operations
    }

    /// The encoding of the derived artifact: the explicit format directive
    /// when present, `webp` otherwise.
    pub fn output_format(&self) -> ImageFormat {
        self.format.unwrap_or(ImageFormat::Webp)
    }

    /// Render the underscore-joined shortcode suffix used in derived keys,
    /// e.g. `w_800_h_600_c_cover_e_blur:2_webp`. The format shortcode only
    /// appears when the format was explicitly requested; the key's file
    /// extension carries the effective format either way.
    pub fn suffix(&self) -> String {
        let mut parts = Vec::new();
        if let Some(w) = self.width {
            parts.push(format!("w_{w}"));
        }
        if let Some(h) = self.height {
            parts.push(format!("h_{h}"));
        }
        if let Some(mode) = self.crop {
            parts.push(format!("c_{}", mode.as_str()));
        }
        if let Some(position) = self.gravity {
            parts.push(format!("g_{}", position.as_str()));
        }
        if let Some(sigma) = self.blur {
            parts.push(format!("e_blur:{sigma}"));
        }
        if let Some(sigma) = self.sharpen {
            parts.push(format!("e_sharpen:{sigma}"));
        }
        if self.grayscale {
            parts.push("grayscale".to_string());
        }
        if let Some(format) = self.format {
            parts.push(format.as_str().to_string());
        }
        parts.join("_")
    }
}
