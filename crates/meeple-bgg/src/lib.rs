// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote-service adapter for the Meeple sync engine.
//!
//! Talks to a BoardGameGeek-compatible XML API whose bulk exports are
//! asynchronous and rate-limited: a request may come back 202 (queued), 429
//! (throttled), or 200 with a disguised-empty body while the export is still
//! being prepared. This crate provides the HTTP client, the collection and
//! play-history fetchers (each attempt running under
//! [`meeple_resilience::RetryPolicy`]), and the streaming XML parsers that
//! turn response bodies into domain records without buffering whole
//! documents.

pub mod client;
pub mod collection;
pub mod parse;
pub mod plays;

pub use client::RemoteClient;
pub use collection::CollectionFetcher;
pub use plays::{PLAYS_PAGE_SIZE, PlaysFetcher};
