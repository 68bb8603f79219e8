// SPDX-FileCopyrightText: 2026 Mintpic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `mintpic serve` command implementation.
//!
//! Starts the purchase adapter on the in-process marketplace and buys items
//! for `<user> <item>` lines read from stdin until a shutdown signal
//! arrives. Delivered images go to stdout as markup, each followed by one
//! JSON reply line.

use std::sync::Arc;

use tokio::io::BufReader;
use tracing::{info, warn};

use mintpic_adapter::{PicAdapter, RegistrationReport, ReqwestFetcher};
use mintpic_config::MintpicConfig;
use mintpic_core::{MarketHost, MintpicError, PluginAdapter};
use mintpic_market::{InMemoryMarket, run_intake};

use crate::console::ConsoleSession;

/// Wires the adapter to a fresh in-process market with a real HTTP client.
pub fn build(config: MintpicConfig) -> Result<(Arc<InMemoryMarket>, PicAdapter), MintpicError> {
    let market = Arc::new(InMemoryMarket::new());
    let fetcher = Arc::new(ReqwestFetcher::new()?);
    let adapter = PicAdapter::new(config, Arc::clone(&market) as Arc<dyn MarketHost>, fetcher);
    Ok((market, adapter))
}

/// Run the `mintpic serve` command.
pub async fn run_serve(config: MintpicConfig) -> Result<(), MintpicError> {
    let (market, adapter) = build(config)?;

    let report = adapter.start().await?;
    print_report(adapter.name(), &report);
    info!(
        items = market.len().await,
        "reading `<user> <item>` purchase requests from stdin, press Ctrl+C to stop"
    );

    let stdin = BufReader::new(tokio::io::stdin());
    let intake = run_intake(&market, stdin, tokio::io::stdout(), |user: &str| {
        ConsoleSession::new(user)
    });
    tokio::select! {
        outcome = intake => {
            match outcome {
                Ok(summary) => info!(
                    succeeded = summary.succeeded,
                    failed = summary.failed,
                    rejected = summary.rejected,
                    "stdin closed, waiting for shutdown signal"
                ),
                Err(e) => warn!(error = %e, "purchase intake stopped"),
            }
            wait_for_shutdown().await;
        }
        () = wait_for_shutdown() => {}
    }

    adapter.stop().await?;
    eprintln!("mintpic: stopped");
    Ok(())
}

fn print_report(namespace: &str, report: &RegistrationReport) {
    eprintln!(
        "mintpic: {} item(s) registered under `{namespace}`",
        report.registered.len()
    );
    if !report.is_complete() {
        eprintln!(
            "mintpic: {} item(s) could not be registered: {}",
            report.failed.len(),
            report.failed.join(", ")
        );
    }
}

/// Resolves on Ctrl+C, or on SIGTERM where available.
async fn wait_for_shutdown() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => info!("received SIGINT (Ctrl+C), shutting down"),
                    _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
                }
                return;
            }
            Err(e) => warn!(error = %e, "failed to install SIGTERM handler"),
        }
    }

    if let Err(e) = ctrl_c.await {
        warn!(error = %e, "failed to listen for Ctrl+C");
    }
    info!("received Ctrl+C, shutting down");
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise mintpic crates log at `info`
/// (`debug` when the configuration enables it) and everything else at `warn`.
pub fn init_tracing(debug: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(debug)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}

fn default_filter(debug: bool) -> String {
    let level = if debug { "debug" } else { "info" };
    format!("mintpic={level},warn")
}
