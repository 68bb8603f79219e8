// SPDX-FileCopyrightText: 2026 Mintpic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The buyer's chat session, as handed to purchase handlers by the host.

use async_trait::async_trait;

use crate::error::MintpicError;
use crate::types::{MessageId, OutboundMessage};

/// A conversation the purchased goods are delivered into.
#[async_trait]
pub trait Session: Send + Sync {
    /// Identifier of the purchasing user.
    fn user_id(&self) -> &str;

    /// Identifier of the channel the purchase was made from.
    fn channel_id(&self) -> &str;

    /// Delivers a message to the session.
    async fn send(&self, message: OutboundMessage) -> Result<Vec<MessageId>, MintpicError>;
}
