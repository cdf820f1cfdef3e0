// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `meeple status` command implementation.
//!
//! Shows last-sync times and local record counts from the SQLite mirror.

use std::io::IsTerminal;

use chrono::{DateTime, Utc};
use serde::Serialize;

use meeple_config::model::MeepleConfig;
use meeple_core::LocalStore;
use meeple_storage::SqliteStore;

/// Structured status output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub username: Option<String>,
    pub collection_items: usize,
    pub plays: usize,
    pub last_collection_sync: Option<DateTime<Utc>>,
    pub last_plays_sync: Option<DateTime<Utc>>,
    pub last_full_sync: Option<DateTime<Utc>>,
}

/// Format a sync instant for display, or "never".
fn format_sync_time(at: Option<DateTime<Utc>>) -> String {
    match at {
        Some(at) => at.format("%Y-%m-%d %H:%M UTC").to_string(),
        None => "never".to_string(),
    }
}

/// Run the `meeple status` command.
pub async fn run_status(
    config: &MeepleConfig,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteStore::open(&config.storage.database_path).await?;
    let timestamps = store.sync_timestamps().await?;
    let collection_items = store.collection().await?.len();
    let plays = store.plays().await?.len();
    store.close().await?;

    if json {
        let response = StatusResponse {
            username: config.bgg.username.clone(),
            collection_items,
            plays,
            last_collection_sync: timestamps.collection,
            last_plays_sync: timestamps.plays,
            last_full_sync: timestamps.full,
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    let use_color = std::io::stdout().is_terminal();
    println!();
    println!("  meeple status");
    println!("  {}", "-".repeat(35));
    match &config.bgg.username {
        Some(username) => println!("    Account:    {username}"),
        None => {
            if use_color {
                use colored::Colorize;
                println!("    Account:    {}", "not configured".red());
            } else {
                println!("    Account:    not configured");
            }
        }
    }
    println!("    Collection: {collection_items} items");
    println!("    Plays:      {plays} logged");
    println!(
        "    Last sync:  {} (collection {}, plays {})",
        format_sync_time(timestamps.full),
        format_sync_time(timestamps.collection),
        format_sync_time(timestamps.plays),
    );
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_synced_formats_as_never() {
        assert_eq!(format_sync_time(None), "never");
    }

    #[test]
    fn sync_time_formats_to_minute_precision() {
        let at = "2024-06-01T12:34:56Z".parse::<DateTime<Utc>>().unwrap();
        assert_eq!(format_sync_time(Some(at)), "2024-06-01 12:34 UTC");
    }

    #[test]
    fn status_response_serializes() {
        let response = StatusResponse {
            username: Some("alice".into()),
            collection_items: 42,
            plays: 7,
            last_collection_sync: None,
            last_plays_sync: None,
            last_full_sync: None,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"username\":\"alice\""));
        assert!(json.contains("\"collection_items\":42"));
        assert!(json.contains("\"last_full_sync\":null"));
    }
}
