// SPDX-FileCopyrightText: 2026 Mintpic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for configured image APIs.
//!
//! Provides [`ReqwestFetcher`], the production [`JsonFetcher`]: one request
//! per call, no retries, bounded by the caller's timeout.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use mintpic_core::{HttpMethod, JsonFetcher, MintpicError};

/// `reqwest`-backed JSON fetcher.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    /// Creates a fetcher with its own connection pool.
    pub fn new() -> Result<Self, MintpicError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("mintpic/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MintpicError::Http {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl JsonFetcher for ReqwestFetcher {
    async fn fetch(
        &self,
        method: HttpMethod,
        url: &str,
        timeout: Duration,
    ) -> Result<serde_json::Value, MintpicError> {
        // POST goes out without a body.
        let request = match method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
        };

        let response = request
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| map_request_error(e, timeout))?;

        let status = response.status();
        debug!(%method, url, status = %status, "api response received");

        if !status.is_success() {
            return Err(MintpicError::Http {
                message: format!("{method} {url} returned {status}"),
                source: None,
            });
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| map_request_error(e, timeout))
    }
}

fn map_request_error(err: reqwest::Error, timeout: Duration) -> MintpicError {
    if err.is_timeout() {
        return MintpicError::Timeout { duration: timeout };
    }
    let message = if err.is_decode() {
        format!("response is not valid JSON: {err}")
    } else {
        format!("HTTP request failed: {err}")
    };
    MintpicError::Http {
        message,
        source: Some(Box::new(err)),
    }
}
