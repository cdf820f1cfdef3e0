// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for the Meeple board-game tracker.
//!
//! Layered TOML configuration with `MEEPLE_` environment overrides, built on
//! figment. Every tuned constant of the sync engine (retry schedule,
//! inter-request delay, remote base URL) is overridable here so tests and
//! rate-limit changes never require code edits.

pub mod loader;
pub mod model;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{BggConfig, LogConfig, MeepleConfig, RetryConfig, StorageConfig};
