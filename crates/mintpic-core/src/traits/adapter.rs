// SPDX-FileCopyrightText: 2026 Mintpic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lifecycle trait the host runtime drives.

use async_trait::async_trait;

use crate::error::MintpicError;
use crate::types::HealthStatus;

/// A plugin whose lifecycle is driven by the host.
///
/// `start` corresponds to the host's ready event and `stop` to its dispose
/// event. Both must be idempotent: the host may call either of them more
/// than once, and `stop` may arrive without a preceding `start`.
#[async_trait]
pub trait PluginAdapter: Send + Sync + 'static {
    /// The type returned from a successful start.
    type StartOutput: Send;

    /// Returns the namespace this adapter registers its items under.
    fn name(&self) -> &str;

    /// Returns the semantic version of this adapter.
    fn version(&self) -> semver::Version;

    /// Acquires host resources (registers items).
    async fn start(&self) -> Result<Self::StartOutput, MintpicError>;

    /// Releases host resources (unregisters items).
    async fn stop(&self) -> Result<(), MintpicError>;

    /// Performs a health check and returns the adapter's current status.
    async fn health_check(&self) -> Result<HealthStatus, MintpicError>;
}
