// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Directive parser for the raw transform segment of a request path.
//!
//! The accepted grammar is `key=value` tokens separated by `,` or `&`, with
//! a bare `grayscale` token as the single flag form. Tokens that are not in
//! that grammar get a second-pass match against the shortcode grammar used
//! in derived keys (`w_800`, `c_cover`, `e_blur:2`, ...), so pre-rendered
//! shortcodes round-trip through the parser. Everything else is dropped
//! without error: a hostile or malformed directive string degrades to fewer
//! operations, never to a failed request.

use crate::transform::operation::{CropMode, Gravity, ImageFormat};

/// One validated transform instruction from the request path.
///
/// `Grayscale(false)` is a real directive, not an absence: it claims the
/// grayscale slot during deduplication and suppresses later enables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Directive {
    Width(u32),
    Height(u32),
    Crop(CropMode),
    Gravity(Gravity),
    Blur(f32),
    Sharpen(f32),
    Grayscale(bool),
    Format(ImageFormat),
}

/// Deduplication key for a directive. One slot per kind survives
/// canonicalization, first occurrence wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    Width,
    Height,
    Crop,
    Gravity,
    Blur,
    Sharpen,
    Grayscale,
    Format,
}

impl Directive {
    pub fn kind(&self) -> DirectiveKind {
        match self {
            Directive::Width(_) => DirectiveKind::Width,
            Directive::Height(_) => DirectiveKind::Height,
            Directive::Crop(_) => DirectiveKind::Crop,
            Directive::Gravity(_) => DirectiveKind::Gravity,
            Directive::Blur(_) => DirectiveKind::Blur,
            Directive::Sharpen(_) => DirectiveKind::Sharpen,
            Directive::Grayscale(_) => DirectiveKind::Grayscale,
            Directive::Format(_) => DirectiveKind::Format,
        }
    }
}

/// Parse a raw directive string into the directives it contains, in
/// encounter order. Unknown keys, unknown values, and unparsable numbers are
/// silently dropped; the empty result is a valid, cacheable outcome.
pub fn parse_directives(raw: &str) -> Vec<Directive> {
    raw.split([',', '&'])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(parse_token)
        .collect()
}

fn parse_token(token: &str) -> Option<Directive> {
    if token == "grayscale" {
        return Some(Directive::Grayscale(true));
    }
    match token.split_once('=') {
        Some((key, value)) => key_value_directive(key, value),
        None => shortcode_directive(token),
    }
}

/// Primary grammar: a whitelisted `key=value` pair.
fn key_value_directive(key: &str, value: &str) -> Option<Directive> {
    if value.is_empty() {
        return None;
    }
    match key {
        "format" => ImageFormat::parse(value).map(Directive::Format),
        "width" | "w" => positive_dimension(value).map(Directive::Width),
        "height" | "h" => positive_dimension(value).map(Directive::Height),
        "crop" => CropMode::parse(value).map(Directive::Crop),
        "gravity" => Gravity::parse(value).map(Directive::Gravity),
        "blur" => finite_sigma(value).map(Directive::Blur),
        "sharpen" => finite_sigma(value).map(Directive::Sharpen),
        "grayscale" => match value {
            "true" => Some(Directive::Grayscale(true)),
            "false" => Some(Directive::Grayscale(false)),
            _ => None,
        },
        _ => None,
    }
}

/// Second-pass grammar: a token already rendered in shortcode form, as it
/// appears in derived keys.
fn shortcode_directive(token: &str) -> Option<Directive> {
    if let Some(rest) = token.strip_prefix("w_") {
        return positive_dimension(rest).map(Directive::Width);
    }
    if let Some(rest) = token.strip_prefix("h_") {
        return positive_dimension(rest).map(Directive::Height);
    }
    if let Some(rest) = token.strip_prefix("c_") {
        return CropMode::parse(rest).map(Directive::Crop);
    }
    if let Some(rest) = token.strip_prefix("g_") {
        return Gravity::parse(rest).map(Directive::Gravity);
    }
    if let Some(rest) = token.strip_prefix("e_blur:") {
        return finite_sigma(rest).map(Directive::Blur);
    }
    if let Some(rest) = token.strip_prefix("e_sharpen:") {
        return finite_sigma(rest).map(Directive::Sharpen);
    }
    if token == "e_grayscale" {
        return Some(Directive::Grayscale(true));
    }
    if let Some(rest) = token.strip_prefix("format_") {
        return ImageFormat::parse(rest).map(Directive::Format);
    }
    None
}

fn positive_dimension(value: &str) -> Option<u32> {
    value.parse::<u32>().ok().filter(|n| *n > 0)
}

fn finite_sigma(value: &str) -> Option<f32> {
    value.parse::<f32>().ok().filter(|s| s.is_finite())
}
