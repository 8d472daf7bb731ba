// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Namespace token under which derived artifacts are keyed
pub const DEFAULT_NAMESPACE: &str = "derived";
/// Cache-control written with every derived artifact (artifacts are
/// immutable per key, so a year-long public lifetime is safe)
pub const DEFAULT_CACHE_CONTROL: &str = "public, max-age=31536000";
