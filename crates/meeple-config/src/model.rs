// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Meeple.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Meeple configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MeepleConfig {
    /// Remote service settings.
    #[serde(default)]
    pub bgg: BggConfig,

    /// Retry and backoff settings shared by all fetchers.
    #[serde(default)]
    pub retry: RetryConfig,

    /// Local store settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// Remote game-cataloging service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BggConfig {
    /// Base URL of the XML API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Username whose collection and plays are mirrored. `None` means not
    /// logged in; sync refuses to start.
    #[serde(default)]
    pub username: Option<String>,

    /// Pause between the base-game and expansion collection requests.
    /// The remote service throttles rapid requests per account.
    #[serde(default = "default_collection_gap_ms")]
    pub collection_gap_ms: u64,
}

impl Default for BggConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            username: None,
            collection_gap_ms: default_collection_gap_ms(),
        }
    }
}

fn default_base_url() -> String {
    "https://boardgamegeek.com/xmlapi2".to_string()
}

fn default_collection_gap_ms() -> u64 {
    5000
}

/// Backoff schedule for queued or throttled responses.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            multiplier: default_multiplier(),
        }
    }
}

fn default_max_attempts() -> u32 {
    10
}

fn default_initial_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    15000
}

fn default_multiplier() -> f64 {
    1.4
}

/// Local SQLite store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|d| d.join("meeple/meeple.db").to_string_lossy().into_owned())
        .unwrap_or_else(|| "meeple.db".to_string())
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
