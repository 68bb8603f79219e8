// SPDX-FileCopyrightText: 2026 Mintpic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `mintpic items` command implementation.

use mintpic_config::MintpicConfig;
use mintpic_core::{MintpicError, PluginAdapter};
use mintpic_market::MarketListing;

use crate::serve;

/// Registers the configured items, prints the matching ones, and clears them.
pub async fn run_items(config: MintpicConfig, query: Option<&str>) -> Result<(), MintpicError> {
    let (market, adapter) = serve::build(config)?;
    adapter.start().await?;

    let listings = market.search(query.unwrap_or_default()).await;
    if listings.is_empty() {
        println!("no items found");
    }
    for listing in &listings {
        println!("{}", format_listing(listing));
    }

    adapter.stop().await
}

fn format_listing(listing: &MarketListing) -> String {
    let stock = match listing.stock {
        Some(n) => format!("{n} left"),
        None => "unlimited".to_string(),
    };
    let mut line = format!("{:<20} {:>6} pts  {:<10}", listing.name, listing.price, stock);
    if !listing.description.is_empty() {
        line.push_str("  ");
        line.push_str(&listing.description);
    }
    if !listing.tags.is_empty() {
        line.push_str(&format!("  [{}]", listing.tags.join(", ")));
    }
    line.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing() -> MarketListing {
        MarketListing {
            namespace: "ns".into(),
            id: None,
            name: "Sunset".into(),
            description: "A random sunset".into(),
            tags: vec!["pic".into(), "sunset".into()],
            price: 10,
            stock: None,
        }
    }

    #[test]
    fn listing_line_shows_price_stock_and_tags() {
        let line = format_listing(&listing());
        assert!(line.starts_with("Sunset"));
        assert!(line.contains("10 pts"));
        assert!(line.contains("unlimited"));
        assert!(line.contains("A random sunset"));
        assert!(line.ends_with("[pic, sunset]"));
    }

    #[test]
    fn limited_stock_is_counted() {
        let limited = MarketListing {
            stock: Some(3),
            description: String::new(),
            tags: vec![],
            ..listing()
        };
        let line = format_listing(&limited);
        assert!(line.ends_with("3 left"), "{line}");
    }
}
