// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fetcher traits: the seams between the orchestrator and the remote service.

use async_trait::async_trait;

use crate::error::SyncError;
use crate::types::{CollectionItem, Play};

/// Fetches the user's full collection from the remote service.
#[async_trait]
pub trait CollectionSource: Send + Sync {
    /// Returns the complete collection, base games first, then expansions.
    async fn fetch_collection(&self, username: &str) -> Result<Vec<CollectionItem>, SyncError>;
}

/// Fetches the user's full play history from the remote service.
#[async_trait]
pub trait PlaysSource: Send + Sync {
    /// Returns all plays in remote order, paginating internally.
    async fn fetch_plays(&self, username: &str) -> Result<Vec<Play>, SyncError>;
}
