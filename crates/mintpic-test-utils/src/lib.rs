// SPDX-FileCopyrightText: 2026 Mintpic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for mintpic integration tests.
//!
//! Provides mock collaborators for fast, deterministic, CI-runnable tests
//! without external services.
//!
//! # Components
//!
//! - [`MockSession`] - Buyer session that captures sent messages
//! - [`MockFetcher`] - HTTP fetcher with queued responses and call recording

pub mod mock_fetcher;
pub mod mock_session;

pub use mock_fetcher::{FetchCall, MockFetcher};
pub use mock_session::MockSession;
