// SPDX-FileCopyrightText: 2026 Mintpic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for mintpic.

use std::time::Duration;

use thiserror::Error;

/// The primary error type used across the adapter traits and core operations.
#[derive(Debug, Error)]
pub enum MintpicError {
    /// Outbound HTTP errors (connection failure, non-2xx status, bad body).
    #[error("http error: {message}")]
    Http {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The outbound request did not finish within the configured timeout.
    #[error("request timed out after {duration:?}")]
    Timeout { duration: Duration },

    /// A response path expression could not be parsed.
    #[error("invalid response path `{path}`: {message}")]
    InvalidPath { path: String, message: String },

    /// The response path matched nothing in the response body.
    #[error("response path `{path}` matched nothing")]
    NoMatch { path: String },

    /// The response path matched a value that cannot be used as an image source.
    #[error("response path `{path}` matched {found}, expected a string")]
    UnexpectedValue { path: String, found: String },

    /// Message delivery to the purchasing session failed.
    #[error("send error: {message}")]
    Send {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The marketplace host rejected a registration or removal.
    #[error("market error: {message}")]
    Market {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// No item with this name is registered.
    #[error("item not found: {name}")]
    ItemNotFound { name: String },

    /// The item has a stock limit and none is left.
    #[error("item out of stock: {name}")]
    OutOfStock { name: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl MintpicError {
    /// Shorthand for a `Market` error without an underlying source.
    pub fn market(message: impl Into<String>) -> Self {
        Self::Market {
            message: message.into(),
            source: None,
        }
    }

    /// Shorthand for a `Send` error without an underlying source.
    pub fn send(message: impl Into<String>) -> Self {
        Self::Send {
            message: message.into(),
            source: None,
        }
    }
}
