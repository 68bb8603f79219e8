// SPDX-FileCopyrightText: 2026 Mintpic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping from configured entries to marketplace item descriptors.

use mintpic_config::ApiEntry;
use mintpic_core::ItemDescriptor;

/// Builds the descriptor the marketplace lists for `entry`.
///
/// Optional fields are passed through untouched so the host can apply its
/// own defaults.
pub fn describe(entry: &ApiEntry) -> ItemDescriptor {
    ItemDescriptor {
        id: entry.id.clone(),
        name: entry.name.clone(),
        description: entry.description.clone(),
        tags: entry.tags.clone(),
        price: entry.price,
        stock: entry.stock,
    }
}
