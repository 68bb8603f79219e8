// SPDX-FileCopyrightText: 2026 Mintpic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Item registry with stock tracking and purchase dispatch.
//!
//! Items are keyed by name across all namespaces. A namespace may replace
//! its own items but never claim a name another namespace owns.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use mintpic_core::{
    ItemDescriptor, MarketHost, MarketItem, MintpicError, PurchaseHandler, PurchaseResult, Session,
};

use crate::catalog;

/// Price applied to items registered without one.
pub const DEFAULT_PRICE: u64 = 10;

/// A registered item as shown to buyers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketListing {
    pub namespace: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub price: u64,
    /// Units left; `None` is unlimited.
    pub stock: Option<u64>,
}

struct Entry {
    namespace: String,
    descriptor: ItemDescriptor,
    handler: Arc<dyn PurchaseHandler>,
    stock: Option<u64>,
}

impl Entry {
    fn listing(&self) -> MarketListing {
        MarketListing {
            namespace: self.namespace.clone(),
            id: self.descriptor.id.clone(),
            name: self.descriptor.name.clone(),
            description: self.descriptor.description.clone(),
            tags: self.descriptor.tags.clone(),
            price: self.descriptor.price.unwrap_or(DEFAULT_PRICE),
            stock: self.stock,
        }
    }
}

/// Marketplace host living in the current process.
#[derive(Default)]
pub struct InMemoryMarket {
    entries: RwLock<HashMap<String, Entry>>,
}

impl InMemoryMarket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buys one unit of `name` for the session's user.
    ///
    /// Stock is reserved before the handler runs and given back when the
    /// handler reports a failure. The registry lock is not held while the
    /// handler runs.
    pub async fn purchase(
        &self,
        name: &str,
        session: &dyn Session,
    ) -> Result<PurchaseResult, MintpicError> {
        let handler = {
            let mut entries = self.entries.write().await;
            let entry = entries
                .get_mut(name)
                .ok_or_else(|| MintpicError::ItemNotFound {
                    name: name.to_string(),
                })?;
            if let Some(stock) = entry.stock.as_mut() {
                if *stock == 0 {
                    return Err(MintpicError::OutOfStock {
                        name: name.to_string(),
                    });
                }
                *stock -= 1;
            }
            Arc::clone(&entry.handler)
        };

        let result = handler.on_purchase(session).await;

        if result.is_success() {
            info!(item = name, user = session.user_id(), "purchase completed");
        } else {
            self.restore_stock(name, &handler).await;
            warn!(item = name, user = session.user_id(), code = result.code, "purchase failed");
        }
        Ok(result)
    }

    async fn restore_stock(&self, name: &str, handler: &Arc<dyn PurchaseHandler>) {
        let mut entries = self.entries.write().await;
        // Only if the item was not replaced or removed meanwhile.
        if let Some(entry) = entries.get_mut(name) {
            if Arc::ptr_eq(&entry.handler, handler) {
                if let Some(stock) = entry.stock.as_mut() {
                    *stock += 1;
                    debug!(item = name, stock = *stock, "stock restored");
                }
            }
        }
    }

    /// Looks up one listing by name.
    pub async fn get(&self, name: &str) -> Option<MarketListing> {
        self.entries.read().await.get(name).map(Entry::listing)
    }

    /// Lists items sorted by name, optionally only those of one namespace.
    pub async fn list(&self, namespace: Option<&str>) -> Vec<MarketListing> {
        let entries = self.entries.read().await;
        let mut listings: Vec<MarketListing> = entries
            .values()
            .filter(|e| namespace.is_none_or(|ns| e.namespace == ns))
            .map(Entry::listing)
            .collect();
        listings.sort_by(|a, b| a.name.cmp(&b.name));
        listings
    }

    /// Case-insensitive search over name, description and tags.
    pub async fn search(&self, query: &str) -> Vec<MarketListing> {
        catalog::search_listings(self.list(None).await, query)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl MarketHost for InMemoryMarket {
    async fn unregister_items(&self, namespace: &str) -> Result<usize, MintpicError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, e| e.namespace != namespace);
        let removed = before - entries.len();
        debug!(namespace, removed, "items unregistered");
        Ok(removed)
    }

    async fn register_item(&self, namespace: &str, item: MarketItem) -> Result<(), MintpicError> {
        let name = item.descriptor.name.clone();
        if name.trim().is_empty() {
            return Err(MintpicError::market("item name must not be empty"));
        }

        let mut entries = self.entries.write().await;
        if let Some(existing) = entries.get(&name) {
            if existing.namespace != namespace {
                return Err(MintpicError::market(format!(
                    "item `{name}` is already registered by `{}`",
                    existing.namespace
                )));
            }
        }

        let stock = item.descriptor.stock;
        entries.insert(
            name.clone(),
            Entry {
                namespace: namespace.to_string(),
                descriptor: item.descriptor,
                handler: item.handler,
                stock,
            },
        );
        debug!(namespace, item = %name, "item registered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use mintpic_test_utils::MockSession;

    /// Counts calls and answers with a fixed result.
    struct Counting {
        calls: AtomicUsize,
        succeed: bool,
    }

    impl Counting {
        fn new(succeed: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                succeed,
            })
        }
    }

    #[async_trait]
    impl PurchaseHandler for Counting {
        async fn on_purchase(&self, _session: &dyn Session) -> PurchaseResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.succeed {
                PurchaseResult::success()
            } else {
                PurchaseResult::failure()
            }
        }
    }

    fn item(name: &str, stock: Option<u64>, handler: Arc<dyn PurchaseHandler>) -> MarketItem {
        MarketItem {
            descriptor: ItemDescriptor {
                id: None,
                name: name.into(),
                description: format!("{name} picture"),
                tags: vec!["pic".into()],
                price: None,
                stock,
            },
            handler,
        }
    }

    #[tokio::test]
    async fn purchase_dispatches_to_handler() {
        let market = InMemoryMarket::new();
        let handler = Counting::new(true);
        market
            .register_item("ns", item("Sunset", None, handler.clone()))
            .await
            .unwrap();

        let result = market
            .purchase("Sunset", &MockSession::default())
            .await
            .unwrap();
        assert!(result.is_success());
        assert_eq!(handler.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unknown_item_is_not_found() {
        let market = InMemoryMarket::new();
        let err = market
            .purchase("Missing", &MockSession::default())
            .await
            .unwrap_err();
        assert!(matches!(err, MintpicError::ItemNotFound { name } if name == "Missing"));
    }

    #[tokio::test]
    async fn stock_is_consumed_and_exhausted() {
        let market = InMemoryMarket::new();
        let handler = Counting::new(true);
        market
            .register_item("ns", item("Rare", Some(1), handler.clone()))
            .await
            .unwrap();

        let session = MockSession::default();
        market.purchase("Rare", &session).await.unwrap();
        assert_eq!(market.get("Rare").await.unwrap().stock, Some(0));

        let err = market.purchase("Rare", &session).await.unwrap_err();
        assert!(matches!(err, MintpicError::OutOfStock { .. }));
        assert_eq!(handler.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_purchase_restores_stock() {
        let market = InMemoryMarket::new();
        market
            .register_item("ns", item("Flaky", Some(2), Counting::new(false)))
            .await
            .unwrap();

        let result = market
            .purchase("Flaky", &MockSession::default())
            .await
            .unwrap();
        assert_eq!(result.code, PurchaseResult::FAILURE);
        assert_eq!(market.get("Flaky").await.unwrap().stock, Some(2));
    }

    #[tokio::test]
    async fn foreign_namespace_cannot_claim_name() {
        let market = InMemoryMarket::new();
        market
            .register_item("a", item("Shared", None, Counting::new(true)))
            .await
            .unwrap();

        let err = market
            .register_item("b", item("Shared", None, Counting::new(true)))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("already registered by `a`"));
        assert_eq!(market.get("Shared").await.unwrap().namespace, "a");
    }

    #[tokio::test]
    async fn same_namespace_replaces() {
        let market = InMemoryMarket::new();
        market
            .register_item("a", item("Pic", Some(1), Counting::new(true)))
            .await
            .unwrap();
        market
            .register_item("a", item("Pic", Some(9), Counting::new(true)))
            .await
            .unwrap();

        assert_eq!(market.len().await, 1);
        assert_eq!(market.get("Pic").await.unwrap().stock, Some(9));
    }

    #[tokio::test]
    async fn empty_name_is_rejected() {
        let market = InMemoryMarket::new();
        let err = market
            .register_item("a", item("  ", None, Counting::new(true)))
            .await
            .unwrap_err();
        assert!(matches!(err, MintpicError::Market { .. }));
        assert!(market.is_empty().await);
    }

    #[tokio::test]
    async fn unregister_only_touches_namespace() {
        let market = InMemoryMarket::new();
        market
            .register_item("a", item("One", None, Counting::new(true)))
            .await
            .unwrap();
        market
            .register_item("a", item("Two", None, Counting::new(true)))
            .await
            .unwrap();
        market
            .register_item("b", item("Three", None, Counting::new(true)))
            .await
            .unwrap();

        assert_eq!(market.unregister_items("a").await.unwrap(), 2);
        assert_eq!(market.unregister_items("a").await.unwrap(), 0);
        let names: Vec<String> = market.list(None).await.into_iter().map(|l| l.name).collect();
        assert_eq!(names, vec!["Three"]);
    }

    #[tokio::test]
    async fn list_is_sorted_and_applies_default_price() {
        let market = InMemoryMarket::new();
        let mut priced = item("Alpha", None, Counting::new(true));
        priced.descriptor.price = Some(30);
        market.register_item("a", priced).await.unwrap();
        market
            .register_item("a", item("Beta", None, Counting::new(true)))
            .await
            .unwrap();
        market
            .register_item("b", item("Gamma", None, Counting::new(true)))
            .await
            .unwrap();

        let listed = market.list(Some("a")).await;
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "Alpha");
        assert_eq!(listed[0].price, 30);
        assert_eq!(listed[1].name, "Beta");
        assert_eq!(listed[1].price, DEFAULT_PRICE);
    }

    #[tokio::test]
    async fn concurrent_purchases_respect_stock() {
        let market = Arc::new(InMemoryMarket::new());
        let handler = Counting::new(true);
        market
            .register_item("ns", item("Limited", Some(3), handler.clone()))
            .await
            .unwrap();

        let session = MockSession::default();
        let attempts = (0..8).map(|_| market.purchase("Limited", &session));
        let results = futures::future::join_all(attempts).await;

        let succeeded = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(succeeded, 3);
        assert_eq!(handler.calls.load(Ordering::SeqCst), 3);
        assert_eq!(market.get("Limited").await.unwrap().stock, Some(0));
    }

    #[test]
    fn listing_serializes_without_absent_id() {
        let listing = MarketListing {
            namespace: "ns".into(),
            id: None,
            name: "Direct".into(),
            description: String::new(),
            tags: vec![],
            price: DEFAULT_PRICE,
            stock: None,
        };
        let json = serde_json::to_value(&listing).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["price"], 10);
        assert!(json["stock"].is_null());
    }
}
