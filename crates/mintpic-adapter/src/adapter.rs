// SPDX-FileCopyrightText: 2026 Mintpic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lifecycle of the purchase adapter.
//!
//! `start` clears every item left under the namespace and registers one item
//! per configured entry; `stop` clears the namespace again. Both may be
//! called repeatedly and in any order.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{Instrument, debug, info, info_span, warn};

use mintpic_config::{ApiEntry, MintpicConfig};
use mintpic_core::{
    HealthStatus, JsonFetcher, MarketHost, MarketItem, MintpicError, PluginAdapter,
};

use crate::item::describe;
use crate::purchase::ApiPurchaseHandler;

/// Names of the items a `start` registered, and of those it could not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationReport {
    pub registered: Vec<String>,
    pub failed: Vec<String>,
}

impl RegistrationReport {
    /// True when every configured entry was registered.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Debug)]
enum Lifecycle {
    Idle,
    Running(RegistrationReport),
    Stopped,
}

/// Registers configured HTTP image APIs as marketplace items.
pub struct PicAdapter {
    config: Arc<MintpicConfig>,
    market: Arc<dyn MarketHost>,
    fetcher: Arc<dyn JsonFetcher>,
    state: Mutex<Lifecycle>,
}

impl PicAdapter {
    pub fn new(
        config: MintpicConfig,
        market: Arc<dyn MarketHost>,
        fetcher: Arc<dyn JsonFetcher>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            market,
            fetcher,
            state: Mutex::new(Lifecycle::Idle),
        }
    }

    fn build_item(&self, entry: &ApiEntry) -> Result<MarketItem, MintpicError> {
        let handler = ApiPurchaseHandler::new(
            self.config.namespace.clone(),
            entry.clone(),
            Arc::clone(&self.fetcher),
            self.config.timeout(),
        )?;
        Ok(MarketItem {
            descriptor: describe(entry),
            handler: Arc::new(handler),
        })
    }

    /// Registers every entry, skipping the ones that fail.
    async fn register_all(&self) -> RegistrationReport {
        let namespace = &self.config.namespace;
        let mut report = RegistrationReport::default();

        for entry in &self.config.api_list {
            let registered = match self.build_item(entry) {
                Ok(item) => self.market.register_item(namespace, item).await,
                Err(e) => Err(e),
            };
            match registered {
                Ok(()) => {
                    debug!(item = %entry.name, "item registered");
                    report.registered.push(entry.name.clone());
                }
                Err(e) => {
                    warn!(item = %entry.name, error = %e, "failed to register item, skipping");
                    report.failed.push(entry.name.clone());
                }
            }
        }

        report
    }
}

#[async_trait]
impl PluginAdapter for PicAdapter {
    type StartOutput = RegistrationReport;

    fn name(&self) -> &str {
        &self.config.namespace
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn start(&self) -> Result<RegistrationReport, MintpicError> {
        let span = info_span!("adapter", namespace = %self.config.namespace);
        async {
            let mut state = self.state.lock().await;

            // Leftovers from a previous run would otherwise duplicate items.
            let removed = self.market.unregister_items(&self.config.namespace).await?;
            debug!(removed, "cleared existing items");

            let report = self.register_all().await;
            if report.is_complete() {
                info!(registered = report.registered.len(), "adapter started");
            } else {
                warn!(
                    registered = report.registered.len(),
                    failed = report.failed.len(),
                    "adapter started with registration failures"
                );
            }

            *state = Lifecycle::Running(report.clone());
            Ok::<_, MintpicError>(report)
        }
        .instrument(span)
        .await
    }

    async fn stop(&self) -> Result<(), MintpicError> {
        let span = info_span!("adapter", namespace = %self.config.namespace);
        async {
            let mut state = self.state.lock().await;
            let removed = self.market.unregister_items(&self.config.namespace).await?;
            *state = Lifecycle::Stopped;
            info!(removed, "adapter stopped");
            Ok::<_, MintpicError>(())
        }
        .instrument(span)
        .await
    }

    async fn health_check(&self) -> Result<HealthStatus, MintpicError> {
        let state = self.state.lock().await;
        let status = match &*state {
            Lifecycle::Idle => HealthStatus::Unhealthy("not started".to_string()),
            Lifecycle::Stopped => HealthStatus::Unhealthy("stopped".to_string()),
            Lifecycle::Running(report) if report.is_complete() => HealthStatus::Healthy,
            Lifecycle::Running(report) => HealthStatus::Degraded(format!(
                "{} of {} items failed to register: {}",
                report.failed.len(),
                report.failed.len() + report.registered.len(),
                report.failed.join(", ")
            )),
        };
        Ok(status)
    }
}
