// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! End-to-end tests for the render path: service → resolver → pipeline →
//! store, with recording fakes standing in for the collaborators.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::catalog::{InMemoryCatalog, SourceImageRecord};
use crate::errors::RenderError;
use crate::imageops::stub::StubImageOperations;
use crate::imageops::{ImageOperations, LocalImageOperations};
use crate::render::{RenderOutcome, TransformService};
use crate::storage::{
    InMemoryObjectStore, ObjectKey, ObjectStore, PutOptions, StoreError, StoreResult,
};

const ORIGINAL_KEY: &str = "uploads/ws_1/img_1/original.png";
const DEFAULT_KEY: &str = "uploads/ws_1/img_1/default.webp";

/// Store wrapper counting contract calls, with switchable failures.
struct RecordingStore {
    inner: InMemoryObjectStore,
    exists_calls: AtomicUsize,
    get_calls: AtomicUsize,
    put_calls: AtomicUsize,
    fail_get: bool,
    fail_put: bool,
}

impl RecordingStore {
    fn new() -> Self {
        Self {
            inner: InMemoryObjectStore::new(),
            exists_calls: AtomicUsize::new(0),
            get_calls: AtomicUsize::new(0),
            put_calls: AtomicUsize::new(0),
            fail_get: false,
            fail_put: false,
        }
    }

    fn failing_get() -> Self {
        Self {
            fail_get: true,
            ..Self::new()
        }
    }

    fn failing_put() -> Self {
        Self {
            fail_put: true,
            ..Self::new()
        }
    }

    fn counts(&self) -> (usize, usize, usize) {
        (
            self.exists_calls.load(Ordering::SeqCst),
            self.get_calls.load(Ordering::SeqCst),
            self.put_calls.load(Ordering::SeqCst),
        )
    }
}

#[async_trait]
impl ObjectStore for RecordingStore {
    async fn exists(&self, key: &ObjectKey) -> StoreResult<bool> {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.exists(key).await
    }

    async fn get(&self, key: &ObjectKey) -> StoreResult<Vec<u8>> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_get {
            return Err(StoreError::backend("injected get failure"));
        }
        self.inner.get(key).await
    }

    async fn put(&self, key: &ObjectKey, bytes: Vec<u8>, options: &PutOptions) -> StoreResult<()> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_put {
            return Err(StoreError::backend("injected put failure"));
        }
        self.inner.put(key, bytes, options).await
    }
}

fn catalog() -> Arc<InMemoryCatalog> {
    let mut catalog = InMemoryCatalog::new();
    catalog.insert(
        "ws_1",
        "img_1",
        SourceImageRecord {
            original_key: ObjectKey::from(ORIGINAL_KEY),
            default_key: ObjectKey::from(DEFAULT_KEY),
        },
    );
    Arc::new(catalog)
}

fn build_service(store: Arc<RecordingStore>, ops: Arc<dyn ImageOperations>) -> TransformService {
    TransformService::new(
        catalog(),
        store,
        ops,
        "derived",
        Some("public, max-age=31536000".to_string()),
    )
}

fn seeded_store() -> Arc<RecordingStore> {
    let store = RecordingStore::new();
    store
        .inner
        .seed(&ObjectKey::from(ORIGINAL_KEY), b"source bytes".to_vec(), "image/png");
    Arc::new(store)
}

#[tokio::test]
async fn no_directives_resolve_to_the_default_key_without_store_traffic() {
    let store = seeded_store();
    let ops = StubImageOperations::new();
    let log = ops.log();
    let service = build_service(Arc::clone(&store), Arc::new(ops));

    let outcome = service.render_transform("ws_1", "img_1", "").await.unwrap();

    assert_eq!(outcome, RenderOutcome::Source { key: ObjectKey::from(DEFAULT_KEY) });
    assert_eq!(store.counts(), (0, 0, 0));
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn fully_invalid_directives_take_the_no_directives_path() {
    let store = seeded_store();
    let ops = StubImageOperations::new();
    let log = ops.log();
    let service = build_service(Arc::clone(&store), Arc::new(ops));

    let outcome = service
        .render_transform("ws_1", "img_1", "foo=bar,crop=diagonal,zoom")
        .await
        .unwrap();

    assert_eq!(outcome.key(), &ObjectKey::from(DEFAULT_KEY));
    assert_eq!(store.counts(), (0, 0, 0));
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn a_miss_fetches_transforms_in_order_and_persists() {
    let store = seeded_store();
    let ops = StubImageOperations::new();
    let log = ops.log();
    let service = build_service(Arc::clone(&store), Arc::new(ops));

    let outcome = service
        .render_transform("ws_1", "img_1", "grayscale,blur=2,crop=cover,w=100,format=png")
        .await
        .unwrap();

    let key = outcome.key().clone();
    assert!(key.as_ref().contains("/derived/"));
    assert!(key.as_ref().ends_with("img_1_w_100_c_cover_e_blur:2_grayscale_png.png"));

    // Canonical order, regardless of directive order in the URL.
    assert_eq!(
        *log.lock().unwrap(),
        vec!["open", "resize:100x_", "fit:cover", "blur:2", "grayscale", "encode:png"]
    );

    // One probe, one source fetch, one artifact write.
    assert_eq!(store.counts(), (1, 1, 1));
    assert!(store.inner.exists(&key).await.unwrap());
    assert_eq!(store.inner.content_type_of(&key).as_deref(), Some("image/png"));
    assert_eq!(
        store.inner.cache_control_of(&key).as_deref(),
        Some("public, max-age=31536000")
    );

    match outcome {
        RenderOutcome::Rendered { metadata, .. } => {
            assert_eq!((metadata.width, metadata.height), (1, 1));
            assert_eq!(metadata.size_bytes, 4);
        }
        other => panic!("expected a rendered outcome, got {other:?}"),
    }
}

#[tokio::test]
async fn a_hit_never_runs_the_pipeline_or_writes() {
    let store = seeded_store();
    let ops = StubImageOperations::new();
    let service = build_service(Arc::clone(&store), Arc::new(ops));

    let first = service
        .render_transform("ws_1", "img_1", "w=100,format=png")
        .await
        .unwrap();
    assert!(matches!(first, RenderOutcome::Rendered { .. }));

    let ops = StubImageOperations::new();
    let log = ops.log();
    let service = build_service(Arc::clone(&store), Arc::new(ops));
    let second = service
        .render_transform("ws_1", "img_1", "w=100,format=png")
        .await
        .unwrap();

    assert_eq!(second, RenderOutcome::CacheHit { key: first.key().clone() });
    assert!(log.lock().unwrap().is_empty());
    // First render: probe + get + put. Second: probe only.
    assert_eq!(store.counts(), (2, 1, 1));
}

#[tokio::test]
async fn equivalent_directive_strings_share_one_artifact() {
    let store = seeded_store();
    let service = build_service(Arc::clone(&store), Arc::new(StubImageOperations::new()));

    let first = service
        .render_transform("ws_1", "img_1", "format=webp,w=800")
        .await
        .unwrap();
    let second = service
        .render_transform("ws_1", "img_1", "w=800,format=webp")
        .await
        .unwrap();
    let third = service
        .render_transform("ws_1", "img_1", "w=800&format=webp")
        .await
        .unwrap();

    assert!(matches!(first, RenderOutcome::Rendered { .. }));
    assert_eq!(second, RenderOutcome::CacheHit { key: first.key().clone() });
    assert_eq!(third, RenderOutcome::CacheHit { key: first.key().clone() });
    assert_eq!(store.counts(), (3, 1, 1));
}

#[tokio::test]
async fn unknown_identifiers_are_not_found() {
    let store = seeded_store();
    let service = build_service(store, Arc::new(StubImageOperations::new()));

    let err = service
        .render_transform("ws_1", "img_2", "w=100")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RenderError::NotFound { ref workspace, ref image } if workspace == "ws_1" && image == "img_2"
    ));
}

#[tokio::test]
async fn a_missing_original_is_source_unavailable() {
    // Catalog knows the image, but the store has no original object.
    let store = Arc::new(RecordingStore::new());
    let service = build_service(Arc::clone(&store), Arc::new(StubImageOperations::new()));

    let err = service
        .render_transform("ws_1", "img_1", "w=100")
        .await
        .unwrap_err();

    match err {
        RenderError::SourceUnavailable { key, .. } => {
            assert_eq!(key, ObjectKey::from(ORIGINAL_KEY));
        }
        other => panic!("expected SourceUnavailable, got {other:?}"),
    }
    assert_eq!(store.counts(), (1, 1, 0));
}

#[tokio::test]
async fn a_failing_source_fetch_is_source_unavailable() {
    let store = Arc::new(RecordingStore::failing_get());
    store
        .inner
        .seed(&ObjectKey::from(ORIGINAL_KEY), b"source bytes".to_vec(), "image/png");
    let service = build_service(Arc::clone(&store), Arc::new(StubImageOperations::new()));

    let err = service
        .render_transform("ws_1", "img_1", "w=100")
        .await
        .unwrap_err();

    assert!(matches!(err, RenderError::SourceUnavailable { .. }));
    assert_eq!(store.counts(), (1, 1, 0));
}

#[tokio::test]
async fn undecodable_source_bytes_are_source_unavailable() {
    let store = seeded_store();
    let service = build_service(store, Arc::new(StubImageOperations::failing_open()));

    let err = service
        .render_transform("ws_1", "img_1", "w=100")
        .await
        .unwrap_err();

    assert!(matches!(err, RenderError::SourceUnavailable { .. }));
}

#[tokio::test]
async fn an_encode_failure_is_a_pipeline_error() {
    let store = seeded_store();
    let service = build_service(store, Arc::new(StubImageOperations::failing_encode()));

    let err = service
        .render_transform("ws_1", "img_1", "w=100")
        .await
        .unwrap_err();

    assert!(matches!(err, RenderError::Pipeline { .. }));
}

#[tokio::test]
async fn a_failed_write_is_persist_failed_after_a_successful_transform() {
    let store = Arc::new(RecordingStore::failing_put());
    store
        .inner
        .seed(&ObjectKey::from(ORIGINAL_KEY), b"source bytes".to_vec(), "image/png");
    let ops = StubImageOperations::new();
    let log = ops.log();
    let service = build_service(Arc::clone(&store), Arc::new(ops));

    let err = service
        .render_transform("ws_1", "img_1", "w=100")
        .await
        .unwrap_err();

    assert!(matches!(err, RenderError::PersistFailed { .. }));
    // The pipeline did run; only the write failed.
    assert!(log.lock().unwrap().iter().any(|entry| entry.starts_with("encode:")));
    assert_eq!(store.counts(), (1, 1, 1));
}

#[tokio::test]
async fn real_pixels_flow_through_the_local_backend() {
    use image::{DynamicImage, GenericImageView, RgbaImage};
    use std::io::Cursor;

    let mut png = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, image::Rgba([200, 40, 40, 255])))
        .write_to(&mut png, image::ImageFormat::Png)
        .unwrap();

    let store = Arc::new(RecordingStore::new());
    store.inner.seed(&ObjectKey::from(ORIGINAL_KEY), png.into_inner(), "image/png");
    let service = build_service(Arc::clone(&store), Arc::new(LocalImageOperations::new()));

    let outcome = service
        .render_transform("ws_1", "img_1", "w=4,grayscale,format=png")
        .await
        .unwrap();

    let key = outcome.key().clone();
    match outcome {
        RenderOutcome::Rendered { metadata, .. } => {
            assert_eq!((metadata.width, metadata.height), (4, 4));
        }
        other => panic!("expected a rendered outcome, got {other:?}"),
    }

    let stored = store.inner.get(&key).await.unwrap();
    let decoded = image::load_from_memory(&stored).unwrap();
    assert_eq!(decoded.dimensions(), (4, 4));
}
