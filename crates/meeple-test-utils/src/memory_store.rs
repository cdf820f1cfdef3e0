// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory [`LocalStore`] with the same replace/upsert semantics as the
//! SQLite store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use meeple_core::{CollectionItem, LocalStore, Play, SyncError, SyncTimestamps};

#[derive(Default)]
struct Inner {
    collection: Vec<CollectionItem>,
    plays: BTreeMap<i64, Play>,
    timestamps: SyncTimestamps,
}

/// In-memory store for orchestration tests.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LocalStore for MemoryStore {
    async fn replace_collection(&self, items: &[CollectionItem]) -> Result<(), SyncError> {
        self.inner.lock().await.collection = items.to_vec();
        Ok(())
    }

    async fn upsert_plays(&self, plays: &[Play]) -> Result<(), SyncError> {
        let mut inner = self.inner.lock().await;
        for play in plays {
            inner.plays.insert(play.play_id, play.clone());
        }
        Ok(())
    }

    async fn set_last_collection_sync(&self, at: DateTime<Utc>) -> Result<(), SyncError> {
        self.inner.lock().await.timestamps.collection = Some(at);
        Ok(())
    }

    async fn set_last_plays_sync(&self, at: DateTime<Utc>) -> Result<(), SyncError> {
        self.inner.lock().await.timestamps.plays = Some(at);
        Ok(())
    }

    async fn set_last_full_sync(&self, at: DateTime<Utc>) -> Result<(), SyncError> {
        self.inner.lock().await.timestamps.full = Some(at);
        Ok(())
    }

    async fn collection(&self) -> Result<Vec<CollectionItem>, SyncError> {
        Ok(self.inner.lock().await.collection.clone())
    }

    async fn plays(&self) -> Result<Vec<Play>, SyncError> {
        Ok(self.inner.lock().await.plays.values().cloned().collect())
    }

    async fn sync_timestamps(&self) -> Result<SyncTimestamps, SyncError> {
        Ok(self.inner.lock().await.timestamps)
    }
}
