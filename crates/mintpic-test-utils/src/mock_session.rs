// SPDX-FileCopyrightText: 2026 Mintpic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock buyer session for deterministic testing.
//!
//! `MockSession` implements `Session`, capturing outbound messages for
//! assertion and optionally failing every send.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use mintpic_core::types::{MessageId, OutboundMessage};
use mintpic_core::{MintpicError, Session};

/// A mock buyer session for testing.
#[derive(Clone)]
pub struct MockSession {
    user_id: String,
    channel_id: String,
    sent: Arc<Mutex<Vec<OutboundMessage>>>,
    fail_sends: Arc<AtomicBool>,
}

impl MockSession {
    /// Create a session for `user_id` in a default test channel.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            channel_id: "mock-channel".to_string(),
            sent: Arc::new(Mutex::new(Vec::new())),
            fail_sends: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make every subsequent `send()` fail (or succeed again with `false`).
    pub fn fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::SeqCst);
    }

    /// Get all messages that were sent through `send()`.
    pub async fn sent_messages(&self) -> Vec<OutboundMessage> {
        self.sent.lock().await.clone()
    }

    /// Get the count of sent messages.
    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }

    /// Image sources of every sent message, flattened in order.
    pub async fn sent_images(&self) -> Vec<String> {
        self.sent
            .lock()
            .await
            .iter()
            .flat_map(|m| m.image_sources().into_iter().map(str::to_string))
            .collect()
    }
}

impl Default for MockSession {
    fn default() -> Self {
        Self::new("test-user")
    }
}

#[async_trait]
impl Session for MockSession {
    fn user_id(&self) -> &str {
        &self.user_id
    }

    fn channel_id(&self) -> &str {
        &self.channel_id
    }

    async fn send(&self, message: OutboundMessage) -> Result<Vec<MessageId>, MintpicError> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(MintpicError::send("mock session is offline"));
        }
        let id = format!("mock-msg-{}", uuid::Uuid::new_v4());
        self.sent.lock().await.push(message);
        Ok(vec![MessageId(id)])
    }
}
