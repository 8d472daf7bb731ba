// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Pixel operation capability consumed by the pipeline executor.
//!
//! The executor sequences *which* operations run and in what order; the
//! backend behind these traits owns *how* pixels actually move. The handle
//! is stateful the way image encoders are in practice: resize dimensions,
//! fit mode, and gravity accumulate and take effect together, while blur,
//! sharpen, and grayscale act immediately.

mod error;
mod local;
#[cfg(test)]
pub mod stub;

pub use error::{ImageOpsError, ImageOpsResult};
pub use local::LocalImageOperations;

use serde::Serialize;

use crate::transform::{CropMode, Gravity, ImageFormat};

/// An encoded output image plus the metadata callers report back.
#[derive(Debug, Clone, Serialize)]
pub struct EncodedImage {
    #[serde(skip)]
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
}

impl EncodedImage {
    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}

/// Entry point of a pixel backend: decode source bytes into a workable
/// handle.
pub trait ImageOperations: Send + Sync {
    fn open(&self, bytes: &[u8]) -> ImageOpsResult<Box<dyn ImageHandle>>;
}

/// A decoded image being transformed.
///
/// `resize`, `set_fit`, and `set_gravity` stage a geometry change that is
/// applied before the first pixel-level operation or the final encode;
/// `blur`, `sharpen`, and `grayscale` touch pixels immediately.
pub trait ImageHandle: Send {
    /// Stage target dimensions. With one dimension given, the other follows
    /// the source aspect ratio.
    fn resize(&mut self, width: Option<u32>, height: Option<u32>);

    /// Stage the fit strategy used when both dimensions constrain.
    fn set_fit(&mut self, mode: CropMode);

    /// Stage the crop anchor used by covering fits.
    fn set_gravity(&mut self, gravity: Gravity);

    fn blur(&mut self, sigma: f32);

    fn sharpen(&mut self, sigma: f32);

    fn grayscale(&mut self);

    /// Apply any staged geometry and encode to `format`.
    fn encode(&mut self, format: ImageFormat) -> ImageOpsResult<EncodedImage>;
}
