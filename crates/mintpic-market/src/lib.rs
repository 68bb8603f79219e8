// SPDX-FileCopyrightText: 2026 Mintpic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process marketplace host for mintpic.
//!
//! [`InMemoryMarket`] implements [`mintpic_core::MarketHost`] with stock
//! tracking, purchase dispatch and catalog search. [`run_intake`] feeds it
//! purchase requests read line by line. Together they let the adapter run
//! without an external points marketplace and back the end-to-end tests.

pub mod catalog;
pub mod intake;
pub mod registry;

pub use catalog::search_listings;
pub use intake::{IntakeReply, IntakeSummary, PurchaseRequest, run_intake};
pub use registry::{DEFAULT_PRICE, InMemoryMarket, MarketListing};
