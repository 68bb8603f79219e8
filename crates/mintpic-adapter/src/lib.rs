// SPDX-FileCopyrightText: 2026 Mintpic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Purchase adapter for mintpic.
//!
//! [`PicAdapter`] registers one marketplace item per configured API entry.
//! Buying an item calls the entry's API, pulls an image URL out of the JSON
//! response with a JSONPath expression, and delivers it to the buyer as an
//! image message.

pub mod adapter;
pub mod fetch;
pub mod item;
pub mod purchase;

pub use adapter::{PicAdapter, RegistrationReport};
pub use fetch::ReqwestFetcher;
pub use item::describe;
pub use purchase::{ApiPurchaseHandler, extract_image};
