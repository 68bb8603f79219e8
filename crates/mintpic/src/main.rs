// SPDX-FileCopyrightText: 2026 Mintpic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mintpic - sell images from HTTP APIs as points-marketplace items.
//!
//! This is the binary entry point. It runs the purchase adapter against the
//! in-process marketplace.

mod check;
mod console;
mod items;
mod redeem;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mintpic_config::MintpicConfig;

/// Mintpic - sell images from HTTP APIs as points-marketplace items.
#[derive(Parser, Debug)]
#[command(name = "mintpic", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the default locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Register the configured items and buy `<user> <item>` lines from stdin
    /// until Ctrl+C.
    Serve,
    /// Validate the configuration and summarize the configured items.
    Check {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
    /// List registered items, optionally filtered by a search query.
    Items {
        /// Case-insensitive text matched against name, description and tags.
        query: Option<String>,
    },
    /// Buy one item and print the delivered message and the result.
    Redeem {
        /// Item name.
        name: String,
        /// Buyer identifier.
        #[arg(long, default_value = "console")]
        user: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Some(Commands::Check { plain }) = &cli.command {
        let ok = check::run_check(cli.config.as_deref(), *plain);
        std::process::exit(if ok { 0 } else { 1 });
    }

    let config = load_config(&cli);
    serve::init_tracing(config.debug);

    let outcome = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Items { query }) => items::run_items(config, query.as_deref()).await,
        Some(Commands::Redeem { name, user }) => redeem::run_redeem(config, &name, &user).await,
        Some(Commands::Check { .. }) => Ok(()),
        None => {
            println!("mintpic: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = outcome {
        eprintln!("mintpic: {e}");
        std::process::exit(1);
    }
    // A pending stdin read in `serve` would otherwise hold the runtime open.
    std::process::exit(0);
}

/// Loads and validates configuration, exiting with rendered diagnostics on
/// failure.
fn load_config(cli: &Cli) -> MintpicConfig {
    let loaded = match &cli.config {
        Some(path) => mintpic_config::load_and_validate_path(path),
        None => mintpic_config::load_and_validate(),
    };
    match loaded {
        Ok(config) => config,
        Err(errors) => {
            mintpic_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}
