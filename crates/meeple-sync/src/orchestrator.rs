// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sync orchestration: collection first, then plays, stopping on the first
//! failed stage.
//!
//! The orchestrator performs no retries of its own; all retry policy lives
//! inside the fetchers. Its responsibilities are sequencing, merging results
//! into the local store, and recording sync timestamps only after the
//! corresponding stage succeeded, so a failed sync never invalidates
//! previously cached data.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

use meeple_core::{
    CollectionSource, CredentialProvider, LocalStore, PlaysSource, SyncError,
};

/// Outcome of a failed sync, qualified by the stage that broke so callers
/// know which half of the local mirror is stale.
#[derive(Debug, Error)]
pub enum SyncFailed {
    /// No authenticated user; nothing was fetched.
    #[error("not logged in")]
    NotLoggedIn,

    /// The collection stage failed; plays were not attempted.
    #[error("collection sync failed: {0}")]
    Collection(#[source] SyncError),

    /// The collection stage succeeded but the plays stage failed.
    #[error("plays sync failed: {0}")]
    Plays(#[source] SyncError),
}

/// Summary of a completed sync.
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub username: String,
    pub collection_items: usize,
    pub plays: usize,
    pub finished_at: DateTime<Utc>,
}

/// Sequences a full sync for the current user.
///
/// All collaborators are injected, so tests drive the orchestrator with
/// scripted fakes. Callers must ensure at most one sync per user runs at a
/// time; the engine does not single-flight internally.
pub struct SyncOrchestrator {
    credentials: Arc<dyn CredentialProvider>,
    store: Arc<dyn LocalStore>,
    collection: Arc<dyn CollectionSource>,
    plays: Arc<dyn PlaysSource>,
}

impl SyncOrchestrator {
    pub fn new(
        credentials: Arc<dyn CredentialProvider>,
        store: Arc<dyn LocalStore>,
        collection: Arc<dyn CollectionSource>,
        plays: Arc<dyn PlaysSource>,
    ) -> Self {
        Self {
            credentials,
            store,
            collection,
            plays,
        }
    }

    /// Runs a full sync: collection, then plays, then the overall timestamp.
    pub async fn sync_all(&self) -> Result<SyncReport, SyncFailed> {
        let username = match self.credentials.current_username().await {
            Some(name) if !name.trim().is_empty() => name,
            _ => {
                warn!("sync requested with no logged-in user");
                return Err(SyncFailed::NotLoggedIn);
            }
        };
        info!(username, "starting full sync");

        let items = self
            .collection
            .fetch_collection(&username)
            .await
            .map_err(SyncFailed::Collection)?;
        self.store
            .replace_collection(&items)
            .await
            .map_err(SyncFailed::Collection)?;
        self.store
            .set_last_collection_sync(Utc::now())
            .await
            .map_err(SyncFailed::Collection)?;
        debug!(username, items = items.len(), "collection stage complete");

        let plays = self
            .plays
            .fetch_plays(&username)
            .await
            .map_err(SyncFailed::Plays)?;
        self.store
            .upsert_plays(&plays)
            .await
            .map_err(SyncFailed::Plays)?;
        self.store
            .set_last_plays_sync(Utc::now())
            .await
            .map_err(SyncFailed::Plays)?;
        debug!(username, plays = plays.len(), "plays stage complete");

        let finished_at = Utc::now();
        self.store
            .set_last_full_sync(finished_at)
            .await
            .map_err(SyncFailed::Plays)?;
        info!(
            username,
            collection_items = items.len(),
            plays = plays.len(),
            "full sync complete"
        );

        Ok(SyncReport {
            username,
            collection_items: items.len(),
            plays: plays.len(),
            finished_at,
        })
    }
}
