// SPDX-FileCopyrightText: 2026 Mintpic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for mintpic.
//!
//! This crate provides the trait definitions, error type, and common types
//! shared by the purchase adapter, the marketplace host, and the binary.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::MintpicError;
pub use types::{
    HealthStatus, HttpMethod, ItemDescriptor, MessageId, OutboundMessage, PurchaseResult,
};

pub use traits::{JsonFetcher, MarketHost, MarketItem, PluginAdapter, PurchaseHandler, Session};
