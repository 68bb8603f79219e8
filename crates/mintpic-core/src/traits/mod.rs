// SPDX-FileCopyrightText: 2026 Mintpic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the purchase adapter and the systems around it.
//!
//! All traits use `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod fetch;
pub mod market;
pub mod session;

pub use adapter::PluginAdapter;
pub use fetch::JsonFetcher;
pub use market::{MarketHost, MarketItem, PurchaseHandler};
pub use session::Session;
