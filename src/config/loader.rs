// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::consts::{DEFAULT_CACHE_CONTROL, DEFAULT_NAMESPACE};
use crate::errors::ConfigError;

/// Main configuration structure for the transform service.
///
/// Typically loaded from a YAML file. Only the store section is required;
/// the namespace and cache-control fall back to built-in defaults, and the
/// catalog section exists to seed the in-memory backends for demos and
/// tests.
///
/// # Example
/// ```yaml
/// namespace: derived
/// cache_control: "public, max-age=31536000"
/// store:
///   type: s3
///   bucket: my-image-bucket
///   region: us-east-1
/// catalog:
///   images:
///     - workspace: ws_1
///       image: img_1
///       original_key: uploads/ws_1/img_1/original.png
///       default_key: uploads/ws_1/img_1/default.webp
/// ```
#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(default = "default_cache_control")]
    pub cache_control: String,
    pub store: StoreConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_cache_control() -> String {
    DEFAULT_CACHE_CONTROL.to_string()
}

/// Object store backend selection and connection settings.
///
/// # Fields
/// * `backend` - which store implementation to construct
/// * `bucket` - bucket name (required for `s3`)
/// * `region` - region override (optional, `s3` only)
/// * `endpoint` - endpoint override for S3-compatible deployments (optional)
#[derive(Debug, Deserialize)]
pub struct StoreConfig {
    #[serde(rename = "type")]
    pub backend: StoreBackend,
    pub bucket: Option<String>,
    pub region: Option<String>,
    pub endpoint: Option<String>,
}

/// Available object store backends.
#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// An S3 bucket or S3-compatible endpoint.
    S3,
    /// Process-local storage for demos and tests.
    Memory,
}

/// Seed data for the in-memory catalog.
#[derive(Debug, Deserialize, Default)]
pub struct CatalogConfig {
    #[serde(default)]
    pub images: Vec<CatalogImageConfig>,
}

/// One catalog record: the public identifiers and their backing keys.
///
/// `seed_path` is demo plumbing: when the memory store backend is selected,
/// the file's bytes are loaded under both backing keys so a render has
/// something to transform.
#[derive(Debug, Deserialize)]
pub struct CatalogImageConfig {
    pub workspace: String,
    pub image: String,
    pub original_key: String,
    pub default_key: String,
    pub seed_path: Option<PathBuf>,
}

/// Load a config from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let cfg: ServiceConfig = serde_yaml::from_str(&content)?;
    Ok(cfg)
}

/// Load and validate a config from a YAML file
///
/// Validation covers cross-field requirements serde cannot express, e.g.
/// that the s3 backend names a bucket.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<ServiceConfig, ConfigError> {
    let cfg = load_config(path)?;
    validate_config(&cfg)?;
    Ok(cfg)
}

pub(crate) fn validate_config(cfg: &ServiceConfig) -> Result<(), ConfigError> {
    if cfg.store.backend == StoreBackend::S3 && cfg.store.bucket.is_none() {
        return Err(ConfigError::Invalid(
            "store type 's3' requires a 'bucket'".to_string(),
        ));
    }
    if cfg.namespace.is_empty() || cfg.namespace.contains('/') {
        return Err(ConfigError::Invalid(format!(
            "namespace '{}' must be a single non-empty path segment",
            cfg.namespace
        )));
    }
    Ok(())
}
