// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `meeple sync` command implementation.
//!
//! Wires the configured retry schedule, remote client, fetchers, and the
//! SQLite store into a sync orchestrator and runs one full sync.

use std::sync::Arc;
use std::time::Duration;

use meeple_bgg::{CollectionFetcher, PlaysFetcher, RemoteClient};
use meeple_config::model::{MeepleConfig, RetryConfig};
use meeple_core::LocalStore;
use meeple_resilience::RetryPolicy;
use meeple_storage::SqliteStore;
use meeple_sync::SyncOrchestrator;

use crate::credentials::ConfigCredentials;

fn retry_policy(config: &RetryConfig) -> RetryPolicy {
    RetryPolicy {
        max_attempts: config.max_attempts,
        initial_delay: Duration::from_millis(config.initial_delay_ms),
        max_delay: Duration::from_millis(config.max_delay_ms),
        multiplier: config.multiplier,
    }
}

/// Run the `meeple sync` command.
pub async fn run_sync(
    config: &MeepleConfig,
    username: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = Arc::new(SqliteStore::open(&config.storage.database_path).await?);
    let client = RemoteClient::new(config.bgg.base_url.clone())?;
    let retry = retry_policy(&config.retry);

    let collection = CollectionFetcher::new(client.clone(), retry.clone())
        .with_subfetch_gap(Duration::from_millis(config.bgg.collection_gap_ms));
    let plays = PlaysFetcher::new(client, retry);

    let orchestrator = SyncOrchestrator::new(
        Arc::new(ConfigCredentials::new(config, username)),
        Arc::clone(&store) as Arc<dyn LocalStore>,
        Arc::new(collection),
        Arc::new(plays),
    );

    let report = orchestrator.sync_all().await?;
    println!(
        "Synced {}: {} collection items, {} plays",
        report.username, report.collection_items, report.plays
    );

    store.close().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_policy_mirrors_config() {
        let config = RetryConfig {
            max_attempts: 3,
            initial_delay_ms: 10,
            max_delay_ms: 50,
            multiplier: 2.0,
        };
        let policy = retry_policy(&config);
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.initial_delay, Duration::from_millis(10));
        assert_eq!(policy.max_delay, Duration::from_millis(50));
        assert_eq!(policy.multiplier, 2.0);
    }

    #[test]
    fn default_config_matches_default_policy() {
        let policy = retry_policy(&RetryConfig::default());
        let default = RetryPolicy::default();
        assert_eq!(policy.max_attempts, default.max_attempts);
        assert_eq!(policy.initial_delay, default.initial_delay);
        assert_eq!(policy.max_delay, default.max_delay);
        assert_eq!(policy.multiplier, default.multiplier);
    }
}
