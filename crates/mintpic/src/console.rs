// SPDX-FileCopyrightText: 2026 Mintpic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal-backed buyer session used by `mintpic redeem`.

use std::io::Write;

use async_trait::async_trait;

use mintpic_core::types::{MessageId, OutboundMessage};
use mintpic_core::{MintpicError, Session};

/// Writes every delivered message to stdout as chat markup.
pub struct ConsoleSession {
    user_id: String,
}

impl ConsoleSession {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

#[async_trait]
impl Session for ConsoleSession {
    fn user_id(&self) -> &str {
        &self.user_id
    }

    fn channel_id(&self) -> &str {
        "console"
    }

    async fn send(&self, message: OutboundMessage) -> Result<Vec<MessageId>, MintpicError> {
        writeln!(std::io::stdout(), "{}", message.to_markup()).map_err(|e| MintpicError::Send {
            message: format!("failed to write to stdout: {e}"),
            source: Some(Box::new(e)),
        })?;
        Ok(vec![MessageId(uuid::Uuid::new_v4().to_string())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_returns_one_message_id() {
        let session = ConsoleSession::new("alice");
        assert_eq!(session.user_id(), "alice");
        assert_eq!(session.channel_id(), "console");

        let ids = session
            .send(OutboundMessage::image("https://img/2.png"))
            .await
            .unwrap();
        assert_eq!(ids.len(), 1);
        assert!(!ids[0].0.is_empty());
    }
}
