// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence for the Meeple board-game tracker.
//!
//! The local mirror lives in a single SQLite file. Collection rows are
//! replaced wholesale on sync; plays are upserted by remote id.

pub mod database;
pub mod migrations;
pub mod queries;
pub mod store;

pub use database::Database;
pub use store::SqliteStore;
