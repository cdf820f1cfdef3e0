// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./meeple.toml` > `~/.config/meeple/meeple.toml`
//! with environment variable overrides via `MEEPLE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::MeepleConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `~/.config/meeple/meeple.toml` (user XDG config)
/// 3. `./meeple.toml` (local directory)
/// 4. `MEEPLE_*` environment variables
pub fn load_config() -> Result<MeepleConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MeepleConfig::default()))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("meeple/meeple.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("meeple.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from an inline TOML string only (no XDG lookup).
///
/// Used for testing and for callers that already hold the TOML text.
pub fn load_config_from_str(toml_content: &str) -> Result<MeepleConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MeepleConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<MeepleConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MeepleConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `MEEPLE_BGG_COLLECTION_GAP_MS` must map
/// to `bgg.collection_gap_ms`, not `bgg.collection.gap.ms`.
fn env_provider() -> Env {
    Env::prefixed("MEEPLE_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: MEEPLE_BGG_USERNAME -> "bgg_username"
        let mapped = key
            .as_str()
            .replacen("bgg_", "bgg.", 1)
            .replacen("retry_", "retry.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("log_", "log.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_extract_cleanly() {
        let config = load_config_from_str("").expect("defaults should be valid");
        assert_eq!(config.bgg.base_url, "https://boardgamegeek.com/xmlapi2");
        assert!(config.bgg.username.is_none());
        assert_eq!(config.bgg.collection_gap_ms, 5000);
        assert_eq!(config.retry.max_attempts, 10);
        assert_eq!(config.retry.initial_delay_ms, 1000);
        assert_eq!(config.retry.max_delay_ms, 15000);
        assert_eq!(config.retry.multiplier, 1.4);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn toml_overrides_defaults() {
        let config = load_config_from_str(
            r#"
            [bgg]
            username = "alice"
            collection_gap_ms = 100

            [retry]
            max_attempts = 3
            "#,
        )
        .expect("valid config");
        assert_eq!(config.bgg.username.as_deref(), Some("alice"));
        assert_eq!(config.bgg.collection_gap_ms, 100);
        assert_eq!(config.retry.max_attempts, 3);
        // Untouched sections keep their defaults.
        assert_eq!(config.retry.multiplier, 1.4);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = load_config_from_str(
            r#"
            [bgg]
            user_name = "typo"
            "#,
        );
        assert!(result.is_err(), "unknown key should be rejected");
    }

    #[test]
    fn env_vars_override_toml() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "meeple.toml",
                r#"
                [bgg]
                username = "from-toml"
                "#,
            )?;
            jail.set_env("MEEPLE_BGG_USERNAME", "from-env");
            jail.set_env("MEEPLE_RETRY_MAX_ATTEMPTS", "2");

            let config = load_config().expect("valid config");
            assert_eq!(config.bgg.username.as_deref(), Some("from-env"));
            assert_eq!(config.retry.max_attempts, 2);
            Ok(())
        });
    }
}
