// SPDX-FileCopyrightText: 2026 Mintpic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client seam used by purchase handlers.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::MintpicError;
use crate::types::HttpMethod;

/// Calls a remote endpoint and returns its parsed JSON body.
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    /// Performs one request, failing with [`MintpicError::Timeout`] once
    /// `timeout` elapses.
    async fn fetch(
        &self,
        method: HttpMethod,
        url: &str,
        timeout: Duration,
    ) -> Result<serde_json::Value, MintpicError>;
}
