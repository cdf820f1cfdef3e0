// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the [`LocalStore`] trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use meeple_core::{CollectionItem, LocalStore, Play, SyncError, SyncTimestamps};

use crate::database::Database;
use crate::queries;

/// SQLite-backed local store.
///
/// Wraps a [`Database`] handle and delegates all operations to the typed
/// query modules.
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    /// Open (creating and migrating if necessary) the store at `path`.
    pub async fn open(path: &str) -> Result<Self, SyncError> {
        let db = Database::open(path).await?;
        debug!(path, "SQLite store opened");
        Ok(Self { db })
    }

    /// Checkpoint the WAL before process exit.
    pub async fn close(&self) -> Result<(), SyncError> {
        self.db.close().await
    }
}

#[async_trait]
impl LocalStore for SqliteStore {
    async fn replace_collection(&self, items: &[CollectionItem]) -> Result<(), SyncError> {
        queries::collection::replace_collection(&self.db, items).await
    }

    async fn upsert_plays(&self, plays: &[Play]) -> Result<(), SyncError> {
        queries::plays::upsert_plays(&self.db, plays).await
    }

    async fn set_last_collection_sync(&self, at: DateTime<Utc>) -> Result<(), SyncError> {
        queries::sync_meta::set_last_collection_sync(&self.db, at).await
    }

    async fn set_last_plays_sync(&self, at: DateTime<Utc>) -> Result<(), SyncError> {
        queries::sync_meta::set_last_plays_sync(&self.db, at).await
    }

    async fn set_last_full_sync(&self, at: DateTime<Utc>) -> Result<(), SyncError> {
        queries::sync_meta::set_last_full_sync(&self.db, at).await
    }

    async fn collection(&self) -> Result<Vec<CollectionItem>, SyncError> {
        queries::collection::collection(&self.db).await
    }

    async fn plays(&self) -> Result<Vec<Play>, SyncError> {
        queries::plays::plays(&self.db).await
    }

    async fn sync_timestamps(&self) -> Result<SyncTimestamps, SyncError> {
        queries::sync_meta::sync_timestamps(&self.db).await
    }
}
