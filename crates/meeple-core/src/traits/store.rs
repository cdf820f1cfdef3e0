// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local store trait for durable persistence of synced records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::SyncError;
use crate::types::{CollectionItem, Play, SyncTimestamps};

/// Durable key-value persistence of domain records and sync timestamps.
///
/// The store is externally synchronized: the engine issues at most one write
/// per sync stage and never holds a store handle across a network wait.
/// Note the intentional asymmetry: the collection is replaced wholesale
/// (the remote list is the source of truth), while plays are upserted by id
/// so a failed later page can never erase existing history.
#[async_trait]
pub trait LocalStore: Send + Sync {
    /// Atomically replaces the whole collection snapshot.
    async fn replace_collection(&self, items: &[CollectionItem]) -> Result<(), SyncError>;

    /// Inserts or updates plays by `play_id`, preserving unrelated records.
    async fn upsert_plays(&self, plays: &[Play]) -> Result<(), SyncError>;

    async fn set_last_collection_sync(&self, at: DateTime<Utc>) -> Result<(), SyncError>;
    async fn set_last_plays_sync(&self, at: DateTime<Utc>) -> Result<(), SyncError>;
    async fn set_last_full_sync(&self, at: DateTime<Utc>) -> Result<(), SyncError>;

    /// Current collection snapshot, base games before expansions.
    async fn collection(&self) -> Result<Vec<CollectionItem>, SyncError>;

    /// Stored plays, most recent first.
    async fn plays(&self) -> Result<Vec<Play>, SyncError>;

    async fn sync_timestamps(&self) -> Result<SyncTimestamps, SyncError>;
}
