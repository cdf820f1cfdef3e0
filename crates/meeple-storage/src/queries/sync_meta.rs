// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sync timestamp bookkeeping in the `sync_meta` key-value table.

use chrono::{DateTime, Utc};
use rusqlite::params;
use rusqlite::types::Type;

use meeple_core::{SyncError, SyncTimestamps};

use crate::database::Database;

const LAST_COLLECTION_SYNC: &str = "last_collection_sync";
const LAST_PLAYS_SYNC: &str = "last_plays_sync";
const LAST_FULL_SYNC: &str = "last_full_sync";

async fn set(db: &Database, key: &'static str, at: DateTime<Utc>) -> Result<(), SyncError> {
    db.connection()
        .call(move |conn| -> Result<(), tokio_rusqlite::Error> {
            conn.execute(
                "INSERT INTO sync_meta (key, value) VALUES (?1, ?2)
                 ON CONFLICT (key) DO UPDATE SET value = excluded.value",
                params![key, at.to_rfc3339()],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

pub async fn set_last_collection_sync(db: &Database, at: DateTime<Utc>) -> Result<(), SyncError> {
    set(db, LAST_COLLECTION_SYNC, at).await
}

pub async fn set_last_plays_sync(db: &Database, at: DateTime<Utc>) -> Result<(), SyncError> {
    set(db, LAST_PLAYS_SYNC, at).await
}

pub async fn set_last_full_sync(db: &Database, at: DateTime<Utc>) -> Result<(), SyncError> {
    set(db, LAST_FULL_SYNC, at).await
}

/// Read all three sync instants. Missing keys mean "never synced".
pub async fn sync_timestamps(db: &Database) -> Result<SyncTimestamps, SyncError> {
    db.connection()
        .call(|conn| -> Result<SyncTimestamps, tokio_rusqlite::Error> {
            let mut stmt = conn.prepare("SELECT key, value FROM sync_meta")?;
            let rows = stmt.query_map([], |row| {
                let key: String = row.get(0)?;
                let value: String = row.get(1)?;
                let at = DateTime::parse_from_rfc3339(&value)
                    .map(|t| t.with_timezone(&Utc))
                    .map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e))
                    })?;
                Ok((key, at))
            })?;

            let mut timestamps = SyncTimestamps::default();
            for row in rows {
                let (key, at) = row?;
                match key.as_str() {
                    LAST_COLLECTION_SYNC => timestamps.collection = Some(at),
                    LAST_PLAYS_SYNC => timestamps.plays = Some(at),
                    LAST_FULL_SYNC => timestamps.full = Some(at),
                    _ => {}
                }
            }
            Ok(timestamps)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
