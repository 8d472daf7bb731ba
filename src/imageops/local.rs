// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! In-process pixel backend built on the `image` crate.
//!
//! Filtering, color conversion, and codecs all come from the crate; this
//! backend only owns the geometry bookkeeping — how staged dimensions, fit
//! mode, and gravity combine into one resize/crop before pixel-level
//! operations run.

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use std::io::Cursor;

use crate::imageops::error::{ImageOpsError, ImageOpsResult};
use crate::imageops::{EncodedImage, ImageHandle, ImageOperations};
use crate::transform::{CropMode, Gravity, ImageFormat};

const FILTER: FilterType = FilterType::Lanczos3;

/// Factory for local image handles.
#[derive(Debug, Default, Clone)]
pub struct LocalImageOperations;

impl LocalImageOperations {
    pub fn new() -> Self {
        Self
    }
}

impl ImageOperations for LocalImageOperations {
    fn open(&self, bytes: &[u8]) -> ImageOpsResult<Box<dyn ImageHandle>> {
        let image = image::load_from_memory(bytes)
            .map_err(|err| ImageOpsError::Decode(err.to_string()))?;
        Ok(Box::new(LocalImageHandle {
            image,
            staged: StagedGeometry::default(),
        }))
    }
}

/// Geometry accumulated between `resize`/`set_fit`/`set_gravity` calls,
/// applied as one step before the first pixel operation or the encode.
#[derive(Debug, Default, Clone, Copy)]
struct StagedGeometry {
    width: Option<u32>,
    height: Option<u32>,
    fit: Option<CropMode>,
    gravity: Option<Gravity>,
}

struct LocalImageHandle {
    image: DynamicImage,
    staged: StagedGeometry,
}

impl LocalImageHandle {
    fn flush_geometry(&mut self) {
        let staged = std::mem::take(&mut self.staged);
        let (source_w, source_h) = self.image.dimensions();
        if source_w == 0 || source_h == 0 {
            return;
        }

        match (staged.width, staged.height) {
            (None, None) => {}
            // One dimension: the other follows the source aspect ratio.
            (Some(w), None) => {
                let h = scaled_dimension(source_h, w, source_w);
                self.image = self.image.resize_exact(w, h, FILTER);
            }
            (None, Some(h)) => {
                let w = scaled_dimension(source_w, h, source_h);
                self.image = self.image.resize_exact(w, h, FILTER);
            }
            (Some(w), Some(h)) => self.fit_to(w, h, staged),
        }
    }

    fn fit_to(&mut self, target_w: u32, target_h: u32, staged: StagedGeometry) {
        let (source_w, source_h) = self.image.dimensions();
        let scale_x = f64::from(target_w) / f64::from(source_w);
        let scale_y = f64::from(target_h) / f64::from(source_h);

        match staged.fit.unwrap_or(CropMode::Cover) {
            CropMode::Fill => {
                self.image = self.image.resize_exact(target_w, target_h, FILTER);
            }
            CropMode::Contain => {
                self.image = self.image.resize(target_w, target_h, FILTER);
            }
            CropMode::Inside => {
                let scale = scale_x.min(scale_y).min(1.0);
                if scale < 1.0 {
                    self.image = self.image.resize(target_w, target_h, FILTER);
                }
            }
            CropMode::Outside => {
                let scale = scale_x.max(scale_y);
                let w = scale_round(source_w, scale);
                let h = scale_round(source_h, scale);
                self.image = self.image.resize_exact(w, h, FILTER);
            }
            CropMode::Cover => {
                let scale = scale_x.max(scale_y);
                let w = scale_round(source_w, scale).max(target_w);
                let h = scale_round(source_h, scale).max(target_h);
                let scaled = self.image.resize_exact(w, h, FILTER);
                let (anchor_x, anchor_y) = crop_anchor(staged.gravity.unwrap_or(Gravity::Center));
                let x = (f64::from(w - target_w) * anchor_x).round() as u32;
                let y = (f64::from(h - target_h) * anchor_y).round() as u32;
                self.image = scaled.crop_imm(x, y, target_w, target_h);
            }
        }
    }
}

/// Horizontal/vertical fraction of the crop slack placed before the kept
/// region, per anchor position.
fn crop_anchor(gravity: Gravity) -> (f64, f64) {
    match gravity {
        Gravity::Northwest => (0.0, 0.0),
        Gravity::North => (0.5, 0.0),
        Gravity::Northeast => (1.0, 0.0),
        Gravity::West => (0.0, 0.5),
        Gravity::Center => (0.5, 0.5),
        Gravity::East => (1.0, 0.5),
        Gravity::Southwest => (0.0, 1.0),
        Gravity::South => (0.5, 1.0),
        Gravity::Southeast => (1.0, 1.0),
    }
}

fn scaled_dimension(other: u32, target: u32, source: u32) -> u32 {
    let scaled = f64::from(other) * f64::from(target) / f64::from(source);
    (scaled.round() as u32).max(1)
}

fn scale_round(value: u32, scale: f64) -> u32 {
    ((f64::from(value) * scale).round() as u32).max(1)
}

impl ImageHandle for LocalImageHandle {
    fn resize(&mut self, width: Option<u32>, height: Option<u32>) {
        self.staged.width = width;
        self.staged.height = height;
    }

    fn set_fit(&mut self, mode: CropMode) {
        self.staged.fit = Some(mode);
    }

    fn set_gravity(&mut self, gravity: Gravity) {
        self.staged.gravity = Some(gravity);
    }

    fn blur(&mut self, sigma: f32) {
        self.flush_geometry();
        if sigma > 0.0 {
            self.image = self.image.blur(sigma);
        }
    }

    fn sharpen(&mut self, sigma: f32) {
        self.flush_geometry();
        if sigma > 0.0 {
            self.image = self.image.unsharpen(sigma, 0);
        }
    }

    fn grayscale(&mut self) {
        self.flush_geometry();
        self.image = self.image.grayscale();
    }

    fn encode(&mut self, format: ImageFormat) -> ImageOpsResult<EncodedImage> {
        self.flush_geometry();

        // Codec color-type limits: JPEG carries no alpha, the WebP and AVIF
        // encoders take 8-bit RGB(A) only.
        let image = match format {
            ImageFormat::Jpg | ImageFormat::Jpeg => DynamicImage::ImageRgb8(self.image.to_rgb8()),
            ImageFormat::Webp | ImageFormat::Avif => {
                DynamicImage::ImageRgba8(self.image.to_rgba8())
            }
            ImageFormat::Png => self.image.clone(),
        };

        let codec = match format {
            ImageFormat::Avif => image::ImageFormat::Avif,
            ImageFormat::Webp => image::ImageFormat::WebP,
            ImageFormat::Jpg | ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Png => image::ImageFormat::Png,
        };

        let mut bytes = Cursor::new(Vec::new());
        image
            .write_to(&mut bytes, codec)
            .map_err(|err| ImageOpsError::Encode {
                format,
                message: err.to_string(),
            })?;

        let (width, height) = image.dimensions();
        Ok(EncodedImage {
            bytes: bytes.into_inner(),
            width,
            height,
            format,
        })
    }
}
