// SPDX-FileCopyrightText: 2026 Mintpic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Purchase fulfillment for one configured API entry.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{Instrument, debug, error, info, info_span};

use mintpic_config::ApiEntry;
use mintpic_core::types::MessageId;
use mintpic_core::{JsonFetcher, MintpicError, OutboundMessage, PurchaseHandler, PurchaseResult, Session};
use mintpic_jsonpath::JsonPath;

/// Where the delivered image comes from.
#[derive(Debug)]
enum ImageSource {
    /// The configured URL is the image itself.
    Direct,
    /// The configured URL is an API; the image URL is extracted with a path.
    Api(JsonPath),
}

/// Fulfills purchases of one configured entry.
///
/// The response path is compiled once at construction, so a malformed path
/// surfaces at registration time rather than on the first purchase.
pub struct ApiPurchaseHandler {
    namespace: String,
    entry: ApiEntry,
    source: ImageSource,
    fetcher: Arc<dyn JsonFetcher>,
    timeout: Duration,
}

impl ApiPurchaseHandler {
    pub fn new(
        namespace: impl Into<String>,
        entry: ApiEntry,
        fetcher: Arc<dyn JsonFetcher>,
        timeout: Duration,
    ) -> Result<Self, MintpicError> {
        let source = if entry.is_direct() {
            ImageSource::Direct
        } else {
            let path = JsonPath::parse(&entry.response).map_err(|e| MintpicError::InvalidPath {
                path: entry.response.clone(),
                message: e.to_string(),
            })?;
            ImageSource::Api(path)
        };

        Ok(Self {
            namespace: namespace.into(),
            entry,
            source,
            fetcher,
            timeout,
        })
    }

    /// Resolves the image to deliver, calling the API when the entry has a
    /// response path.
    pub async fn resolve_image(&self) -> Result<String, MintpicError> {
        match &self.source {
            ImageSource::Direct => Ok(self.entry.url.clone()),
            ImageSource::Api(path) => {
                let body = self
                    .fetcher
                    .fetch(self.entry.method, &self.entry.url, self.timeout)
                    .await?;
                debug!(body = %body, "api response body");
                extract_image(&body, path)
            }
        }
    }

    /// Resolves the image and sends it to `session`.
    pub async fn redeem(&self, session: &dyn Session) -> Result<Vec<MessageId>, MintpicError> {
        let src = self.resolve_image().await?;
        debug!(src = %src, "delivering image");
        session.send(OutboundMessage::image(src)).await
    }
}

impl std::fmt::Debug for ApiPurchaseHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiPurchaseHandler")
            .field("namespace", &self.namespace)
            .field("item", &self.entry.name)
            .field("source", &self.source)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl PurchaseHandler for ApiPurchaseHandler {
    async fn on_purchase(&self, session: &dyn Session) -> PurchaseResult {
        let span = info_span!(
            "purchase",
            namespace = %self.namespace,
            item = %self.entry.name,
            user = %session.user_id(),
        );

        async {
            match self.redeem(session).await {
                Ok(_) => {
                    info!("item redeemed");
                    PurchaseResult::success()
                }
                Err(e) => {
                    error!(
                        namespace = %self.namespace,
                        item = %self.entry.name,
                        user = %session.user_id(),
                        error = %e,
                        "redeem failed"
                    );
                    PurchaseResult::failure()
                }
            }
        }
        .instrument(span)
        .await
    }
}

/// Pulls the image source out of a response body.
///
/// The first match wins. Numbers and booleans are stringified; null, arrays
/// and objects are rejected.
pub fn extract_image(body: &Value, path: &JsonPath) -> Result<String, MintpicError> {
    match path.first(body) {
        None => Err(MintpicError::NoMatch {
            path: path.to_string(),
        }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(other) => Err(MintpicError::UnexpectedValue {
            path: path.to_string(),
            found: value_kind(other).to_string(),
        }),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
