// SPDX-FileCopyrightText: 2026 Mintpic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog search over registered listings.

use crate::registry::MarketListing;

/// Filters `listings` by a case-insensitive substring of name, description,
/// or any tag. An empty query keeps everything.
pub fn search_listings(listings: Vec<MarketListing>, query: &str) -> Vec<MarketListing> {
    let query = query.trim();
    if query.is_empty() {
        return listings;
    }
    let query_lower = query.to_lowercase();
    listings
        .into_iter()
        .filter(|l| {
            l.name.to_lowercase().contains(&query_lower)
                || l.description.to_lowercase().contains(&query_lower)
                || l.tags.iter().any(|t| t.to_lowercase().contains(&query_lower))
        })
        .collect()
}
