// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod catalog;    // image record lookup
pub mod config;     // config + runtime wiring
pub mod errors;     // error handling
pub mod imageops;   // pixel operation backends
pub mod observability;
pub mod render;     // pipeline executor + artifact resolver
pub mod storage;    // object stores + derived keys
pub mod transform;  // directive parsing + canonicalization
