// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use tracing::info;

use crate::catalog::{InMemoryCatalog, SourceImageRecord};
use crate::config::loader::{ServiceConfig, StoreBackend};
use crate::config::validate_config;
use crate::errors::ConfigError;
use crate::imageops::LocalImageOperations;
use crate::render::TransformService;
use crate::storage::{InMemoryObjectStore, ObjectKey, ObjectStore, S3ObjectStore};
use crate::transform::ImageFormat;

/// Service runtime builder - constructs the collaborator set from
/// configuration and injects it into a ready `TransformService`.
///
/// Every handle the service holds (store client, catalog, pixel backend) is
/// created here, once, and passed in; nothing reaches for ambient state
/// after this returns.
pub struct RuntimeBuilder;

impl RuntimeBuilder {
    /// Build a complete transform service from configuration.
    ///
    /// Validates the config, connects the configured store backend, seeds
    /// the in-memory catalog with the configured records, and wires the
    /// local pixel backend.
    pub async fn from_config(cfg: &ServiceConfig) -> Result<TransformService, ConfigError> {
        validate_config(cfg)?;

        let store: Arc<dyn ObjectStore> = match cfg.store.backend {
            StoreBackend::Memory => {
                let store = InMemoryObjectStore::new();
                seed_store(&store, cfg)?;
                Arc::new(store)
            }
            StoreBackend::S3 => {
                // validate_config guarantees the bucket is present.
                let bucket = cfg.store.bucket.clone().ok_or_else(|| {
                    ConfigError::Invalid("store type 's3' requires a 'bucket'".to_string())
                })?;
                let store =
                    S3ObjectStore::connect(bucket, cfg.store.region.clone(), cfg.store.endpoint.clone())
                        .await
                        .map_err(ConfigError::StoreInit)?;
                Arc::new(store)
            }
        };

        let mut catalog = InMemoryCatalog::new();
        for entry in &cfg.catalog.images {
            catalog.insert(
                entry.workspace.clone(),
                entry.image.clone(),
                SourceImageRecord {
                    original_key: ObjectKey::new(entry.original_key.clone()),
                    default_key: ObjectKey::new(entry.default_key.clone()),
                },
            );
        }
        info!("catalog seeded with {} image records", cfg.catalog.images.len());

        Ok(TransformService::new(
            Arc::new(catalog),
            store,
            Arc::new(LocalImageOperations::new()),
            cfg.namespace.clone(),
            Some(cfg.cache_control.clone()),
        ))
    }
}

/// Load `seed_path` files into the memory store so demo renders have source
/// bytes to work with.
fn seed_store(store: &InMemoryObjectStore, cfg: &ServiceConfig) -> Result<(), ConfigError> {
    for entry in &cfg.catalog.images {
        let Some(path) = &entry.seed_path else {
            continue;
        };
        let bytes = std::fs::read(path)?;
        let content_type = path
            .extension()
            .and_then(|extension| extension.to_str())
            .and_then(ImageFormat::parse)
            .map(|format| format.content_type())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        store.seed(
            &ObjectKey::new(entry.original_key.clone()),
            bytes.clone(),
            content_type.clone(),
        );
        store.seed(&ObjectKey::new(entry.default_key.clone()), bytes, content_type);
    }
    Ok(())
}
