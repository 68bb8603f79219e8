// SPDX-FileCopyrightText: 2026 Mintpic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock HTTP fetcher for deterministic testing.
//!
//! `MockFetcher` returns queued responses in order and records every call,
//! so tests can assert how many requests a purchase made and with which
//! method, URL and timeout.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use mintpic_core::{HttpMethod, JsonFetcher, MintpicError};

/// One recorded call to [`MockFetcher::fetch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCall {
    pub method: HttpMethod,
    pub url: String,
    pub timeout: Duration,
}

enum Scripted {
    Json(serde_json::Value),
    Timeout,
    Status(u16),
}

/// A scripted HTTP fetcher.
///
/// When the queue is empty, `fetch()` fails with an HTTP error.
#[derive(Clone, Default)]
pub struct MockFetcher {
    responses: Arc<Mutex<VecDeque<Scripted>>>,
    calls: Arc<Mutex<Vec<FetchCall>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful JSON body.
    pub async fn push_json(&self, body: serde_json::Value) {
        self.responses.lock().await.push_back(Scripted::Json(body));
    }

    /// Queue a timeout for the next call.
    pub async fn push_timeout(&self) {
        self.responses.lock().await.push_back(Scripted::Timeout);
    }

    /// Queue a non-success HTTP status for the next call.
    pub async fn push_status(&self, status: u16) {
        self.responses.lock().await.push_back(Scripted::Status(status));
    }

    /// All calls made so far, in order.
    pub async fn calls(&self) -> Vec<FetchCall> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }
}

#[async_trait]
impl JsonFetcher for MockFetcher {
    async fn fetch(
        &self,
        method: HttpMethod,
        url: &str,
        timeout: Duration,
    ) -> Result<serde_json::Value, MintpicError> {
        self.calls.lock().await.push(FetchCall {
            method,
            url: url.to_string(),
            timeout,
        });

        match self.responses.lock().await.pop_front() {
            Some(Scripted::Json(body)) => Ok(body),
            Some(Scripted::Timeout) => Err(MintpicError::Timeout { duration: timeout }),
            Some(Scripted::Status(status)) => Err(MintpicError::Http {
                message: format!("{method} {url} returned {status}"),
                source: None,
            }),
            None => Err(MintpicError::Http {
                message: format!("no scripted response for {method} {url}"),
                source: None,
            }),
        }
    }
}
