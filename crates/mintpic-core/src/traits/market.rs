// SPDX-FileCopyrightText: 2026 Mintpic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Marketplace host trait and the item shape it accepts.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::MintpicError;
use crate::traits::session::Session;
use crate::types::{ItemDescriptor, PurchaseResult};

/// Fulfills one purchase of an item.
///
/// The signature is infallible: every failure has to be turned into a
/// failed [`PurchaseResult`] before it reaches the host.
#[async_trait]
pub trait PurchaseHandler: Send + Sync {
    async fn on_purchase(&self, session: &dyn Session) -> PurchaseResult;
}

/// An item as handed to the marketplace host.
#[derive(Clone)]
pub struct MarketItem {
    pub descriptor: ItemDescriptor,
    pub handler: Arc<dyn PurchaseHandler>,
}

impl std::fmt::Debug for MarketItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketItem")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

/// The marketplace service items are registered with.
#[async_trait]
pub trait MarketHost: Send + Sync {
    /// Removes every item owned by `namespace`, returning how many were
    /// removed. Succeeds with 0 when nothing is registered.
    async fn unregister_items(&self, namespace: &str) -> Result<usize, MintpicError>;

    /// Registers one item under `namespace`.
    async fn register_item(&self, namespace: &str, item: MarketItem) -> Result<(), MintpicError>;
}
