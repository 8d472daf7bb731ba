// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod error;
mod keys;
mod memory;
mod object_store;
mod s3;

pub use error::{StoreError, StoreResult};
pub use keys::DerivedKeyBuilder;
pub use memory::InMemoryObjectStore;
pub use object_store::{ObjectKey, ObjectStore, PutOptions};
pub use s3::S3ObjectStore;
