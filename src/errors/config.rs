// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised while loading configuration or building the runtime.

use thiserror::Error;

use crate::storage::StoreError;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid YAML for the expected schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The config parsed but violates a cross-field requirement.
    #[error("invalid config: {0}")]
    Invalid(String),

    /// The configured object store could not be initialized.
    #[error("failed to initialize object store")]
    StoreInit(#[source] StoreError),
}
