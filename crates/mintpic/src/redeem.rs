// SPDX-FileCopyrightText: 2026 Mintpic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `mintpic redeem` command implementation.
//!
//! Performs one purchase against the in-process market. The delivered
//! message goes to stdout as markup, followed by the purchase result JSON.

use mintpic_config::MintpicConfig;
use mintpic_core::{MintpicError, PluginAdapter};

use crate::console::ConsoleSession;
use crate::serve;

pub async fn run_redeem(config: MintpicConfig, name: &str, user: &str) -> Result<(), MintpicError> {
    let (market, adapter) = serve::build(config)?;
    adapter.start().await?;

    let session = ConsoleSession::new(user);
    let purchased = market.purchase(name, &session).await;

    // Clear the namespace whether or not the purchase went through.
    adapter.stop().await?;

    let result = purchased?;
    let json = serde_json::to_string_pretty(&result)
        .map_err(|e| MintpicError::Internal(format!("failed to encode result: {e}")))?;
    println!("{json}");
    Ok(())
}
