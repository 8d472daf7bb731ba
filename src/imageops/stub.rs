// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Recording pixel backend for executor and resolver tests.

use std::sync::{Arc, Mutex};

use crate::imageops::error::{ImageOpsError, ImageOpsResult};
use crate::imageops::{EncodedImage, ImageHandle, ImageOperations};
use crate::transform::{CropMode, Gravity, ImageFormat};

/// A backend that records every call instead of touching pixels.
///
/// `encode` returns a fixed four-byte body so resolver tests can assert on
/// persisted content without real codecs in the loop.
pub struct StubImageOperations {
    log: Arc<Mutex<Vec<String>>>,
    fail_open: bool,
    fail_encode: bool,
}

impl StubImageOperations {
    pub fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(Vec::new())),
            fail_open: false,
            fail_encode: false,
        }
    }

    /// A backend whose `open` always fails, simulating undecodable source
    /// bytes.
    pub fn failing_open() -> Self {
        Self {
            fail_open: true,
            ..Self::new()
        }
    }

    /// A backend whose `encode` always fails.
    pub fn failing_encode() -> Self {
        Self {
            fail_encode: true,
            ..Self::new()
        }
    }

    /// Shared handle to the call log.
    pub fn log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.log)
    }
}

impl ImageOperations for StubImageOperations {
    fn open(&self, _bytes: &[u8]) -> ImageOpsResult<Box<dyn ImageHandle>> {
        if self.fail_open {
            return Err(ImageOpsError::Decode("stubbed decode failure".to_string()));
        }
        self.log.lock().unwrap().push("open".to_string());
        Ok(Box::new(StubHandle {
            log: Arc::clone(&self.log),
            fail_encode: self.fail_encode,
        }))
    }
}

struct StubHandle {
    log: Arc<Mutex<Vec<String>>>,
    fail_encode: bool,
}

impl StubHandle {
    fn record(&self, entry: String) {
        self.log.lock().unwrap().push(entry);
    }
}

impl ImageHandle for StubHandle {
    fn resize(&mut self, width: Option<u32>, height: Option<u32>) {
        let w = width.map_or_else(|| "_".to_string(), |w| w.to_string());
        let h = height.map_or_else(|| "_".to_string(), |h| h.to_string());
        self.record(format!("resize:{w}x{h}"));
    }

    fn set_fit(&mut self, mode: CropMode) {
        self.record(format!("fit:{}", mode.as_str()));
    }

    fn set_gravity(&mut self, gravity: Gravity) {
        self.record(format!("gravity:{}", gravity.as_str()));
    }

    fn blur(&mut self, sigma: f32) {
        self.record(format!("blur:{sigma}"));
    }

    fn sharpen(&mut self, sigma: f32) {
        self.record(format!("sharpen:{sigma}"));
    }

    fn grayscale(&mut self) {
        self.record("grayscale".to_string());
    }

    fn encode(&mut self, format: ImageFormat) -> ImageOpsResult<EncodedImage> {
        if self.fail_encode {
            return Err(ImageOpsError::Encode {
                format,
                message: "stubbed encode failure".to_string(),
            });
        }
        self.record(format!("encode:{format}"));
        Ok(EncodedImage {
            bytes: vec![0xAB, 0xCD, 0xEF, 0x01],
            width: 1,
            height: 1,
            format,
        })
    }
}
