// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Core operation vocabulary for the transform pipeline.
//!
//! These types are the shared language between the directive parser, the
//! canonicalizer, the derived-key builder, and the pipeline executor. Every
//! value that survives parsing is expressed in terms of this vocabulary;
//! raw URL strings never travel past the parser.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Output encodings a derived artifact can be written in.
///
/// `Jpg` and `Jpeg` are deliberately distinct variants: they are distinct
/// directive values, render distinct key suffixes, and therefore address
/// distinct cache entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Avif,
    Webp,
    Jpg,
    Jpeg,
    Png,
}

impl ImageFormat {
    /// Parse a format name as it appears in directives and key suffixes.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "avif" => Some(ImageFormat::Avif),
            "webp" => Some(ImageFormat::Webp),
            "jpg" => Some(ImageFormat::Jpg),
            "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Avif => "avif",
            ImageFormat::Webp => "webp",
            ImageFormat::Jpg => "jpg",
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Png => "png",
        }
    }

    /// Content type written alongside a persisted artifact.
    pub fn content_type(&self) -> String {
        format!("image/{}", self.as_str())
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fit strategy applied when both resize dimensions constrain the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CropMode {
    /// Scale to cover both dimensions, cropping overflow at the gravity anchor.
    Cover,
    /// Scale to fit within both dimensions, preserving aspect ratio.
    Contain,
    /// Scale each axis independently to the exact dimensions.
    Fill,
    /// Like `Contain`, but never enlarge beyond the source dimensions.
    Inside,
    /// Scale so both dimensions are at least the targets, without cropping.
    Outside,
}

impl CropMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "cover" => Some(CropMode::Cover),
            "contain" => Some(CropMode::Contain),
            "fill" => Some(CropMode::Fill),
            "inside" => Some(CropMode::Inside),
            "outside" => Some(CropMode::Outside),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CropMode::Cover => "cover",
            CropMode::Contain => "contain",
            CropMode::Fill => "fill",
            CropMode::Inside => "inside",
            CropMode::Outside => "outside",
        }
    }
}

/// Anchor position used when a fit operation crops the image.
///
/// The nine compass points plus center. The British spelling `centre` is
/// accepted on input and normalized to `Center`, so both spellings resolve
/// to the same canonical sequence and the same cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gravity {
    North,
    Northeast,
    East,
    Southeast,
    South,
    Southwest,
    West,
    Northwest,
    Center,
}

impl Gravity {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "north" => Some(Gravity::North),
            "northeast" => Some(Gravity::Northeast),
            "east" => Some(Gravity::East),
            "southeast" => Some(Gravity::Southeast),
            "south" => Some(Gravity::South),
            "southwest" => Some(Gravity::Southwest),
            "west" => Some(Gravity::West),
            "northwest" => Some(Gravity::Northwest),
            "center" | "centre" => Some(Gravity::Center),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gravity::North => "north",
            Gravity::Northeast => "northeast",
            Gravity::East => "east",
            Gravity::Southeast => "southeast",
            Gravity::South => "south",
            Gravity::Southwest => "southwest",
            Gravity::West => "west",
            Gravity::Northwest => "northwest",
            Gravity::Center => "center",
        }
    }
}

/// A single step of the canonical transform pipeline.
///
/// Width and height directives merge into one `Resize` operation; everything
/// else maps one directive to one operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation {
    Resize {
        width: Option<u32>,
        height: Option<u32>,
    },
    Crop(CropMode),
    Gravity(Gravity),
    Blur(f32),
    Sharpen(f32),
    Grayscale,
    Format(ImageFormat),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parse_accepts_whitelist_only() {
        assert_eq!(ImageFormat::parse("webp"), Some(ImageFormat::Webp));
        assert_eq!(ImageFormat::parse("jpg"), Some(ImageFormat::Jpg));
        assert_eq!(ImageFormat::parse("jpeg"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::parse("gif"), None);
        assert_eq!(ImageFormat::parse("WEBP"), None);
    }

    #[test]
    fn content_type_uses_format_name() {
        assert_eq!(ImageFormat::Webp.content_type(), "image/webp");
        assert_eq!(ImageFormat::Jpg.content_type(), "image/jpg");
    }

    #[test]
    fn gravity_normalizes_british_spelling() {
        assert_eq!(Gravity::parse("centre"), Some(Gravity::Center));
        assert_eq!(Gravity::parse("center"), Some(Gravity::Center));
        assert_eq!(Gravity::Center.as_str(), "center");
    }

    #[test]
    fn crop_mode_rejects_unknown_values() {
        assert_eq!(CropMode::parse("diagonal"), None);
        assert_eq!(CropMode::parse("cover"), Some(CropMode::Cover));
    }
}
