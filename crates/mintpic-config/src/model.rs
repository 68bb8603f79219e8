// SPDX-FileCopyrightText: 2026 Mintpic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for mintpic.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use mintpic_core::HttpMethod;
use serde::{Deserialize, Serialize};

/// Smallest accepted request timeout, in milliseconds.
pub const MIN_TIMEOUT_MS: u64 = 1000;

/// Smallest accepted item price.
pub const MIN_PRICE: u64 = 1;

/// Top-level mintpic configuration.
///
/// ```toml
/// timeout = 5000
/// debug = false
///
/// [[api_list]]
/// name = "Sunset"
/// description = "A random sunset"
/// tags = ["pic", "sunset"]
/// url = "https://example.com/api/sunset"
/// method = "GET"
/// response = "$.data.url"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MintpicConfig {
    /// Namespace the items are registered under in the marketplace.
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// HTTP request timeout in milliseconds. Does not bound image downloads
    /// done by the chat platform afterwards.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Enables debug logging for this workspace's crates.
    #[serde(default)]
    pub debug: bool,

    /// Configured goods, one marketplace item each.
    #[serde(default, alias = "apiList")]
    pub api_list: Vec<ApiEntry>,
}

impl Default for MintpicConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            timeout: default_timeout(),
            debug: false,
            api_list: Vec::new(),
        }
    }
}

impl MintpicConfig {
    /// The request timeout as a `Duration`.
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout)
    }

    /// Looks up a configured entry by name.
    pub fn entry(&self, name: &str) -> Option<&ApiEntry> {
        self.api_list.iter().find(|e| e.name == name)
    }
}

fn default_namespace() -> String {
    "pointmintmarket-pic".to_string()
}

fn default_timeout() -> u64 {
    5000
}

/// One configured good backed by an HTTP API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiEntry {
    /// Optional stable identifier handed to the marketplace.
    #[serde(default)]
    pub id: Option<String>,

    /// Item name, unique across the list.
    pub name: String,

    /// Item description shown in the marketplace.
    #[serde(default)]
    pub description: String,

    /// Search keywords.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Price in points. The marketplace applies its default when absent.
    #[serde(default)]
    pub price: Option<u64>,

    /// Units available. Unlimited when absent.
    #[serde(default)]
    pub stock: Option<u64>,

    /// Full API URL, or the image itself when `response` is empty.
    pub url: String,

    /// HTTP method used to call `url`.
    #[serde(default)]
    pub method: HttpMethod,

    /// JSONPath into the response body locating the image URL. The empty
    /// string means `url` is sent as the image without any request; blank
    /// text is not empty and must parse as a path.
    #[serde(default)]
    pub response: String,
}

impl ApiEntry {
    /// True when `url` is itself the image and no request is made.
    pub fn is_direct(&self) -> bool {
        self.response.is_empty()
    }
}
