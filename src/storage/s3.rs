// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! S3-compatible object store backend.
//!
//! One client is constructed at startup and injected wherever store access
//! is needed; nothing in the crate reaches for ambient AWS state after
//! initialization. Existence checks use `HeadObject` so a cache probe never
//! transfers a body.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use tracing::{debug, info};

use crate::storage::error::{StoreError, StoreResult};
use crate::storage::object_store::{ObjectKey, ObjectStore, PutOptions};

/// Object store backed by an S3 bucket (or any S3-compatible endpoint).
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Connect to a bucket, verifying access before returning.
    ///
    /// Credentials come from the standard AWS environment/config chain;
    /// `region` and `endpoint` override the chain when given (an explicit
    /// endpoint is how MinIO-style test deployments are pointed at).
    pub async fn connect(
        bucket: impl Into<String>,
        region: Option<String>,
        endpoint: Option<String>,
    ) -> StoreResult<Self> {
        let bucket = bucket.into();
        info!("initializing s3 object store for bucket '{bucket}'");

        let mut loader = aws_config::from_env();
        if let Some(region) = region {
            loader = loader.region(aws_config::Region::new(region));
        }
        if let Some(endpoint) = endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        let config = loader.load().await;
        let client = Client::new(&config);

        client
            .head_bucket()
            .bucket(&bucket)
            .send()
            .await
            .map_err(|err| StoreError::backend(format!("bucket '{bucket}' is not accessible: {err}")))?;

        Ok(Self { client, bucket })
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn exists(&self, key: &ObjectKey) -> StoreResult<bool> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key.as_ref())
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(err) => {
                let service = err.into_service_error();
                if service.is_not_found() {
                    Ok(false)
                } else {
                    Err(StoreError::backend(format!("head '{key}': {service}")))
                }
            }
        }
    }

    async fn get(&self, key: &ObjectKey) -> StoreResult<Vec<u8>> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key.as_ref())
            .send()
            .await
            .map_err(|err| {
                let service = err.into_service_error();
                if service.is_no_such_key() {
                    StoreError::NotFound {
                        key: key.as_ref().to_string(),
                    }
                } else {
                    StoreError::backend(format!("get '{key}': {service}"))
                }
            })?;

        let bytes = output
            .body
            .collect()
            .await
            .map_err(|err| StoreError::backend(format!("read '{key}': {err}")))?
            .into_bytes()
            .to_vec();

        debug!("fetched '{key}' ({} bytes)", bytes.len());
        Ok(bytes)
    }

    async fn put(&self, key: &ObjectKey, bytes: Vec<u8>, options: &PutOptions) -> StoreResult<()> {
        let size = bytes.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key.as_ref())
            .body(ByteStream::from(bytes))
            .content_type(options.content_type.as_str())
            .set_cache_control(options.cache_control.clone())
            .send()
            .await
            .map_err(|err| {
                let service = err.into_service_error();
                StoreError::backend(format!("put '{key}': {service}"))
            })?;

        debug!("stored '{key}' ({size} bytes, {})", options.content_type);
        Ok(())
    }
}
