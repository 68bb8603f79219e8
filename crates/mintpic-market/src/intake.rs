// SPDX-FileCopyrightText: 2026 Mintpic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Line-oriented purchase intake.
//!
//! Each input line is `<user> <item>`. Everything after the user id is the
//! item name, so names may contain spaces. Blank lines and lines starting
//! with `#` are skipped. Every request yields exactly one JSON line on the
//! output.

use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use mintpic_core::{MintpicError, PurchaseResult, Session};

use crate::registry::InMemoryMarket;

/// One parsed intake line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseRequest {
    pub user: String,
    pub item: String,
}

impl PurchaseRequest {
    /// Parses an intake line. `None` means the line carries no request.
    pub fn parse_line(line: &str) -> Option<Result<Self, String>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        let parsed = match line.split_once(char::is_whitespace) {
            Some((user, item)) if !item.trim().is_empty() => Ok(Self {
                user: user.to_string(),
                item: item.trim().to_string(),
            }),
            _ => Err(format!("expected `<user> <item>`, got `{line}`")),
        };
        Some(parsed)
    }
}

/// The JSON line written back for one request.
///
/// Completed purchases carry the purchase result fields. Requests the market
/// refused, and malformed lines, carry `error` instead.
#[derive(Debug, Serialize)]
pub struct IntakeReply {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    #[serde(flatten)]
    pub result: Option<PurchaseResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Counts of what one intake run handled.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IntakeSummary {
    /// Purchases answered with 200.
    pub succeeded: usize,
    /// Purchases answered with 500.
    pub failed: usize,
    /// Malformed lines and purchases the market refused.
    pub rejected: usize,
}

/// Reads purchase requests from `reader` until end of input, buying each
/// item with a session from `open_session` and writing one reply per request
/// to `writer`.
///
/// Requests are handled one at a time in input order.
pub async fn run_intake<R, W, S, F>(
    market: &InMemoryMarket,
    reader: R,
    mut writer: W,
    mut open_session: F,
) -> Result<IntakeSummary, MintpicError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    S: Session,
    F: FnMut(&str) -> S,
{
    let mut lines = reader.lines();
    let mut summary = IntakeSummary::default();

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| MintpicError::Internal(format!("failed to read purchase request: {e}")))?
    {
        let Some(parsed) = PurchaseRequest::parse_line(&line) else {
            continue;
        };

        let reply = match parsed {
            Err(message) => {
                warn!(%message, "malformed purchase request");
                summary.rejected += 1;
                IntakeReply {
                    user: None,
                    item: None,
                    result: None,
                    error: Some(message),
                }
            }
            Ok(request) => {
                let session = open_session(&request.user);
                let (result, error) = match market.purchase(&request.item, &session).await {
                    Ok(result) => {
                        if result.is_success() {
                            summary.succeeded += 1;
                        } else {
                            summary.failed += 1;
                        }
                        (Some(result), None)
                    }
                    Err(e) => {
                        warn!(item = %request.item, user = %request.user, error = %e, "purchase refused");
                        summary.rejected += 1;
                        (None, Some(e.to_string()))
                    }
                };
                IntakeReply {
                    user: Some(request.user),
                    item: Some(request.item),
                    result,
                    error,
                }
            }
        };

        write_reply(&mut writer, &reply).await?;
    }

    debug!(?summary, "purchase intake reached end of input");
    Ok(summary)
}

async fn write_reply<W>(writer: &mut W, reply: &IntakeReply) -> Result<(), MintpicError>
where
    W: AsyncWrite + Unpin,
{
    let mut line = serde_json::to_string(reply)
        .map_err(|e| MintpicError::Internal(format!("failed to encode reply: {e}")))?;
    line.push('\n');
    let io = |e: std::io::Error| MintpicError::Internal(format!("failed to write reply: {e}"));
    writer.write_all(line.as_bytes()).await.map_err(io)?;
    writer.flush().await.map_err(io)
}
