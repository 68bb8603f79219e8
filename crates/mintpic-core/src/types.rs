// SPDX-FileCopyrightText: 2026 Mintpic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the adapter traits, the marketplace host, and the
//! purchase handlers.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Message shown to the buyer when a redemption succeeds.
pub const REDEEM_SUCCESS_MSG: &str = "兑换成功";

/// Message shown to the buyer when a redemption fails.
pub const REDEEM_FAILURE_MSG: &str = "兑换失败";

/// Unique identifier for a delivered message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// HTTP method used to call a configured API.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum HttpMethod {
    #[default]
    #[strum(serialize = "GET")]
    #[serde(rename = "GET", alias = "get")]
    Get,
    #[strum(serialize = "POST")]
    #[serde(rename = "POST", alias = "post")]
    Post,
}

/// Kind of goods carried in a purchase result payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ItemType {
    Api,
}

/// Payload attached to every purchase result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseData {
    pub item_type: ItemType,
}

/// Outcome of one purchase attempt, as returned to the marketplace host.
///
/// Serializes to `{ "code": 200, "msg": "...", "data": { "itemType": "api" } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseResult {
    pub code: u16,
    pub msg: String,
    pub data: PurchaseData,
}

impl PurchaseResult {
    pub const SUCCESS: u16 = 200;
    pub const FAILURE: u16 = 500;

    pub fn success() -> Self {
        Self {
            code: Self::SUCCESS,
            msg: REDEEM_SUCCESS_MSG.to_string(),
            data: PurchaseData {
                item_type: ItemType::Api,
            },
        }
    }

    pub fn failure() -> Self {
        Self {
            code: Self::FAILURE,
            msg: REDEEM_FAILURE_MSG.to_string(),
            data: PurchaseData {
                item_type: ItemType::Api,
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Self::SUCCESS
    }
}

/// What the marketplace host needs to list an item.
///
/// `id`, `price` and `stock` are only present when the configuration
/// supplies them; the host picks its own defaults otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u64>,
}

/// One element of an outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageElement {
    Text(String),
    Image { src: String },
}

/// A message to deliver to the purchasing session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutboundMessage {
    pub elements: Vec<MessageElement>,
}

impl OutboundMessage {
    /// A message consisting of a single image reference.
    pub fn image(src: impl Into<String>) -> Self {
        Self {
            elements: vec![MessageElement::Image { src: src.into() }],
        }
    }

    /// A plain text message.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            elements: vec![MessageElement::Text(text.into())],
        }
    }

    /// Image sources referenced by this message, in order.
    pub fn image_sources(&self) -> Vec<&str> {
        self.elements
            .iter()
            .filter_map(|e| match e {
                MessageElement::Image { src } => Some(src.as_str()),
                MessageElement::Text(_) => None,
            })
            .collect()
    }

    /// Renders the message as host markup (`<img src="..."/>` for images).
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        for element in &self.elements {
            match element {
                MessageElement::Text(text) => out.push_str(&escape(text, false)),
                MessageElement::Image { src } => {
                    out.push_str("<img src=\"");
                    out.push_str(&escape(src, true));
                    out.push_str("\"/>");
                }
            }
        }
        out
    }
}

fn escape(raw: &str, attribute: bool) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
