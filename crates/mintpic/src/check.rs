// SPDX-FileCopyrightText: 2026 Mintpic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `mintpic check` command implementation.
//!
//! Validates the configuration and prints one line per configured item, so
//! mistakes show up before the items are ever put on sale.

use std::io::IsTerminal;
use std::path::Path;

use mintpic_config::{ApiEntry, MintpicConfig};

/// Run the `mintpic check` command. Returns `false` when the configuration
/// is invalid.
pub fn run_check(path: Option<&Path>, plain: bool) -> bool {
    let use_color = !plain && std::io::stdout().is_terminal();

    let loaded = match path {
        Some(path) => mintpic_config::load_and_validate_path(path),
        None => mintpic_config::load_and_validate(),
    };

    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            mintpic_config::render_errors(&errors);
            let word = if errors.len() == 1 { "problem" } else { "problems" };
            let summary = format!("  configuration has {} {word}", errors.len());
            if use_color {
                use colored::Colorize;
                println!("{}", summary.red());
            } else {
                println!("{summary}");
            }
            return false;
        }
    };

    println!();
    println!("  mintpic check");
    println!("  {}", "-".repeat(50));
    for line in summarize(&config) {
        println!("    {line}");
    }
    println!();

    let status = format!("  configuration OK ({} item(s))", config.api_list.len());
    if use_color {
        use colored::Colorize;
        println!("{}", status.green());
    } else {
        println!("{status}");
    }
    true
}

/// Human-readable summary of a validated configuration.
fn summarize(config: &MintpicConfig) -> Vec<String> {
    let mut lines = vec![
        format!("namespace  {}", config.namespace),
        format!("timeout    {}ms", config.timeout),
        format!("debug      {}", config.debug),
    ];
    if config.api_list.is_empty() {
        lines.push("no items configured".to_string());
    }
    lines.extend(config.api_list.iter().map(describe_entry));
    lines
}

fn describe_entry(entry: &ApiEntry) -> String {
    let source = if entry.is_direct() {
        format!("direct image {}", entry.url)
    } else {
        format!("{} {} -> {}", entry.method, entry.url, entry.response.trim())
    };
    let mut extras = Vec::new();
    if let Some(price) = entry.price {
        extras.push(format!("{price} pts"));
    }
    if let Some(stock) = entry.stock {
        extras.push(format!("stock {stock}"));
    }
    if extras.is_empty() {
        format!("{:<20} {source}", entry.name)
    } else {
        format!("{:<20} {source} ({})", entry.name, extras.join(", "))
    }
}
