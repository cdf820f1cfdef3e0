// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Play-history fetcher.
//!
//! The remote service pages play history at a fixed 100 records per page and
//! exposes no reliable total, so pagination runs until the first short page
//! (including an empty one). Each page runs under the retry executor with
//! the same transient-status classification as the collection fetcher.

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use meeple_core::{Play, PlaysSource, SyncError};
use meeple_resilience::{AttemptError, RetryPolicy};

use crate::client::{RemoteClient, body_reader, is_transient};
use crate::parse;

/// Page size fixed by the remote protocol; the service never short-pages
/// except on the final page.
pub const PLAYS_PAGE_SIZE: usize = 100;

/// Fetches a user's complete play history, paginating internally.
pub struct PlaysFetcher {
    client: RemoteClient,
    retry: RetryPolicy,
}

impl PlaysFetcher {
    pub fn new(client: RemoteClient, retry: RetryPolicy) -> Self {
        Self { client, retry }
    }

    /// Fetches all plays for `username`, preserving remote order within and
    /// across pages.
    pub async fn fetch(&self, username: &str) -> Result<Vec<Play>, SyncError> {
        if username.trim().is_empty() {
            return Err(SyncError::InvalidUsername);
        }

        let mut all = Vec::new();
        let mut page = 1u32;
        loop {
            let batch = self
                .retry
                .run(username, |attempt| self.attempt(username, page, attempt))
                .await?;
            let count = batch.len();
            all.extend(batch);
            debug!(username, page, count, total = all.len(), "plays page fetched");
            if count < PLAYS_PAGE_SIZE {
                break;
            }
            page += 1;
        }
        Ok(all)
    }

    async fn attempt(
        &self,
        username: &str,
        page: u32,
        attempt: u32,
    ) -> Result<Vec<Play>, AttemptError> {
        let response = self
            .client
            .get_plays(username, page)
            .await
            .map_err(AttemptError::Fatal)?;

        let status = response.status();
        debug!(username, page, attempt, status = %status, "plays response received");

        if is_transient(status) {
            return Err(AttemptError::Retry {
                status: Some(status.as_u16()),
            });
        }
        if status != StatusCode::OK {
            return Err(AttemptError::Fatal(SyncError::UnexpectedStatus {
                status: status.as_u16(),
            }));
        }

        parse::plays::parse(body_reader(response))
            .await
            .map_err(AttemptError::Fatal)
    }
}

#[async_trait]
impl PlaysSource for PlaysFetcher {
    async fn fetch_plays(&self, username: &str) -> Result<Vec<Play>, SyncError> {
        self.fetch(username).await
    }
}
